//! Domain models with validation at construction
//!
//! Caller input (usernames, titles) is validated when these types are built.
//! Invalid input returns `ValidationError`, not panic.

pub mod outcome;
pub mod title;
pub mod todo;
pub mod username;
pub mod validation;

pub use outcome::Outcome;
pub use title::TodoTitle;
pub use todo::{attach_todos, partition_by_done, Todo, TodoList};
pub use username::{Scope, Username};
pub use validation::ValidationError;
