//! Todo commands: add, toggle, remove

use anyhow::{bail, Result};
use clap::Subcommand;
use todo_store::{Outcome, Todo, TodoTitle};

use super::{open_session, parse_title, ConnectionArgs};

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Add a todo to a list
    Add {
        /// Todo list ID
        list_id: i32,
        /// Todo title (1-100 characters)
        #[arg(value_parser = parse_title)]
        title: TodoTitle,
    },
    /// Toggle a todo between done and not done
    Toggle {
        /// Todo list ID
        list_id: i32,
        /// Todo ID
        todo_id: i32,
    },
    /// Delete a todo
    Remove {
        /// Todo list ID
        list_id: i32,
        /// Todo ID
        todo_id: i32,
    },
}

pub async fn run_todos(cmd: TodoCommand, conn: &ConnectionArgs) -> Result<()> {
    let session = open_session(conn).await?;
    let (store, scope) = (&session.store, &session.scope);

    match cmd {
        TodoCommand::Add { list_id, title } => {
            if store.create_todo(scope, list_id, &title).await? == Outcome::NotFound {
                bail!("todo list {list_id} not found");
            }
            println!("Added \"{title}\" to list {list_id}.");
        }
        TodoCommand::Toggle { list_id, todo_id } => {
            if !store.toggle_done_todo(scope, list_id, todo_id).await?.is_changed() {
                bail!("todo {todo_id} not found in list {list_id}");
            }
            let todo = store.load_todo(scope, list_id, todo_id).await?;
            println!("{}", toggled_message(todo_id, todo.as_ref()));
        }
        TodoCommand::Remove { list_id, todo_id } => {
            if store.delete_todo(scope, list_id, todo_id).await? == Outcome::NotFound {
                bail!("todo {todo_id} not found in list {list_id}");
            }
            println!("Deleted todo {todo_id}.");
        }
    }

    Ok(())
}

/// The todo can be gone by the time it is reloaded (deleted concurrently).
fn toggled_message(todo_id: i32, todo: Option<&Todo>) -> String {
    match todo {
        Some(todo) => {
            let state = if todo.done { "done" } else { "not done" };
            format!("\"{}\" marked {state}.", todo.title)
        }
        None => format!("Toggled todo {todo_id}."),
    }
}
