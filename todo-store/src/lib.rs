//! todo-store: per-user todo lists over PostgreSQL
//!
//! A `TodoStore` wraps a connection pool and a credential verifier. Callers
//! authenticate once with `TodoStore::login` and pass the resulting `Scope`
//! to every other call; all reads and writes are filtered by its username.
//!
//! ```ignore
//! let pool = todo_store::db::create_pool(&url, 5).await?;
//! let store = TodoStore::new(pool);
//!
//! let user = Username::new("admin")?;
//! if let Some(scope) = store.login(&user, "secret").await? {
//!     for list in store.sorted_todo_lists(&scope).await? {
//!         println!("{} ({}/{})", list.title, list.done_count(), list.todos.len());
//!     }
//! }
//! ```

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use auth::{Argon2Verifier, CredentialVerifier};
pub use error::{Result, StoreError};
pub use models::{Outcome, Scope, Todo, TodoList, TodoTitle, Username, ValidationError};
pub use store::TodoStore;
