//! Todo list and todo records, and the in-memory shaping applied to them

use std::collections::HashMap;

use serde::Serialize;
use sqlx::FromRow;

/// Todo record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub done: bool,
    pub todolist_id: i32,
    pub username: String,
}

/// Todo list record with its todos attached
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TodoList {
    pub id: i32,
    pub title: String,
    pub username: String,

    /// Not a column; filled in from the `todos` table after the list is read.
    #[sqlx(skip)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// A list is done when it has at least one todo and all of them are done.
    /// An empty list is never done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.done)
    }

    pub fn done_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.done).count()
    }
}

/// Distribute `todos` onto their owning lists by `todolist_id`.
///
/// Todos keep their relative order. Todos whose list is not in `lists` are
/// dropped.
pub fn attach_todos(lists: &mut [TodoList], todos: Vec<Todo>) {
    let mut by_list: HashMap<i32, Vec<Todo>> = HashMap::new();
    for todo in todos {
        by_list.entry(todo.todolist_id).or_default().push(todo);
    }

    for list in lists.iter_mut() {
        list.todos = by_list.remove(&list.id).unwrap_or_default();
    }
}

/// Stable partition: lists that are not done, followed by lists that are.
pub fn partition_by_done(lists: Vec<TodoList>) -> Vec<TodoList> {
    let (done, mut undone): (Vec<_>, Vec<_>) = lists.into_iter().partition(TodoList::is_done);
    undone.extend(done);
    undone
}
