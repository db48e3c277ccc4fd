//! Todo list commands: listing, showing, creating, renaming, deleting

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;
use todo_store::{Outcome, Todo, TodoList, TodoTitle};

use super::{mark, open_session, parse_title, ConnectionArgs};

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// Show all todo lists, unfinished lists first
    Lists {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one todo list and its todos
    Show {
        /// Todo list ID
        list_id: i32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a todo list
    NewList {
        /// Title (1-100 characters, unique among your lists)
        #[arg(value_parser = parse_title)]
        title: TodoTitle,
    },
    /// Rename a todo list
    Rename {
        /// Todo list ID
        list_id: i32,
        /// New title
        #[arg(value_parser = parse_title)]
        title: TodoTitle,
    },
    /// Delete a todo list
    DeleteList {
        /// Todo list ID
        list_id: i32,
    },
    /// Mark every todo in a list as done
    CompleteAll {
        /// Todo list ID
        list_id: i32,
    },
}

#[derive(Serialize)]
struct ListSummary<'a> {
    id: i32,
    title: &'a str,
    done: bool,
    completed: usize,
    total: usize,
}

#[derive(Serialize)]
struct ListDetail<'a> {
    id: i32,
    title: &'a str,
    done: bool,
    todos: &'a [Todo],
}

pub async fn run_lists(cmd: ListCommand, conn: &ConnectionArgs) -> Result<()> {
    let session = open_session(conn).await?;
    let (store, scope) = (&session.store, &session.scope);

    match cmd {
        ListCommand::Lists { json } => {
            let lists = store.sorted_todo_lists(scope).await?;
            if json {
                let summaries: Vec<_> = lists.iter().map(summary).collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else if lists.is_empty() {
                println!("You don't have any todo lists.");
            } else {
                for list in &lists {
                    println!(
                        "{} {:>4}  {}  ({}/{})",
                        mark(list.is_done()),
                        list.id,
                        list.title,
                        list.done_count(),
                        list.todos.len()
                    );
                }
            }
        }
        ListCommand::Show { list_id, json } => {
            let Some(list) = store.load_todo_list(scope, list_id).await? else {
                bail!("todo list {list_id} not found");
            };
            let todos = store.sorted_todos(scope, &list).await?;

            if json {
                let detail = ListDetail {
                    id: list.id,
                    title: &list.title,
                    done: list.is_done(),
                    todos: &todos,
                };
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                println!("{} {}", mark(list.is_done()), list.title);
                if todos.is_empty() {
                    println!("  (no todos)");
                }
                for todo in &todos {
                    println!("  {} {:>4}  {}", mark(todo.done), todo.id, todo.title);
                }
            }
        }
        ListCommand::NewList { title } => {
            if !store.create_todo_list(scope, &title).await? {
                bail!("a todo list titled \"{title}\" already exists");
            }
            println!("Created todo list \"{title}\".");
        }
        ListCommand::Rename { list_id, title } => {
            let Some(list) = store.load_todo_list(scope, list_id).await? else {
                bail!("todo list {list_id} not found");
            };
            if title_taken_by_other(&list, &title)
                && store.exists_todo_list_title(scope, &title).await?
            {
                bail!("a todo list titled \"{title}\" already exists");
            }
            match store.set_todo_list_title(scope, list_id, &title).await {
                Ok(Outcome::NotFound) => bail!("todo list {list_id} not found"),
                Ok(_) => println!("Renamed todo list {list_id} to \"{title}\"."),
                // Another request took the title between the check and the update.
                Err(err) if err.is_unique_violation() => {
                    bail!("a todo list titled \"{title}\" already exists")
                }
                Err(err) => return Err(err.into()),
            }
        }
        ListCommand::DeleteList { list_id } => {
            if store.delete_todo_list(scope, list_id).await? == Outcome::NotFound {
                bail!("todo list {list_id} not found");
            }
            println!("Deleted todo list {list_id}.");
        }
        ListCommand::CompleteAll { list_id } => {
            match store.complete_all_todos(scope, list_id).await? {
                Outcome::Changed => println!("All todos in list {list_id} are done."),
                Outcome::Unchanged => println!("Nothing to complete in list {list_id}."),
                Outcome::NotFound => bail!("todo list {list_id} not found"),
            }
        }
    }

    Ok(())
}

/// Renaming a list to its current title is not a conflict.
fn title_taken_by_other(list: &TodoList, title: &TodoTitle) -> bool {
    list.title != title.as_str()
}

fn summary(list: &TodoList) -> ListSummary<'_> {
    ListSummary {
        id: list.id,
        title: &list.title,
        done: list.is_done(),
        completed: list.done_count(),
        total: list.todos.len(),
    }
}
