//! The todo store
//!
//! Every scoped query binds the caller's username into its `WHERE` clause
//! (or, for inserts, copies it from a row already filtered by it). An id that
//! belongs to another user is indistinguishable from one that does not exist.
//!
//! Queries that need two independent row sets issue both at once and shape
//! the result after both arrive. Nothing here opens a transaction; the
//! `(title, username)` UNIQUE constraint arbitrates racing list creation.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use crate::auth::{Argon2Verifier, CredentialVerifier};
use crate::error::{Result, StoreError};
use crate::models::{
    attach_todos, partition_by_done, Outcome, Scope, Todo, TodoList, TodoTitle, Username,
};

const ALL_TODOLISTS: &str = r#"
    SELECT id, title, username
    FROM todolists
    WHERE username = $1
    ORDER BY lower(title) ASC
"#;

const ALL_TODOS: &str = r#"
    SELECT id, title, done, todolist_id, username
    FROM todos
    WHERE username = $1
"#;

const FIND_TODOLIST: &str = r#"
    SELECT id, title, username
    FROM todolists
    WHERE id = $1 AND username = $2
"#;

const FIND_TODOS: &str = r#"
    SELECT id, title, done, todolist_id, username
    FROM todos
    WHERE todolist_id = $1 AND username = $2
"#;

const SORTED_TODOS: &str = r#"
    SELECT id, title, done, todolist_id, username
    FROM todos
    WHERE todolist_id = $1 AND username = $2
    ORDER BY done ASC, lower(title) ASC
"#;

const FIND_TODO: &str = r#"
    SELECT id, title, done, todolist_id, username
    FROM todos
    WHERE todolist_id = $1 AND id = $2 AND username = $3
"#;

const TOGGLE_DONE: &str = r#"
    UPDATE todos SET done = NOT done
    WHERE todolist_id = $1 AND id = $2 AND username = $3
"#;

const DELETE_TODO: &str = r#"
    DELETE FROM todos
    WHERE todolist_id = $1 AND id = $2 AND username = $3
"#;

// One statement so "list missing" and "nothing left to complete" can be told
// apart without a second round trip.
const COMPLETE_ALL: &str = r#"
    WITH list AS (
        SELECT id FROM todolists WHERE id = $1 AND username = $2
    ), completed AS (
        UPDATE todos SET done = TRUE
        WHERE todolist_id IN (SELECT id FROM list) AND username = $2 AND NOT done
        RETURNING id
    )
    SELECT EXISTS (SELECT 1 FROM list) AS list_found,
           (SELECT COUNT(*) FROM completed) AS completed
"#;

// The parent list is selected by (id, username), so a todo can only ever land
// on a list its owner owns.
const CREATE_TODO: &str = r#"
    INSERT INTO todos (title, todolist_id, username)
    SELECT $1, id, username
    FROM todolists
    WHERE id = $2 AND username = $3
"#;

const DELETE_TODOLIST: &str = r#"
    DELETE FROM todolists
    WHERE id = $1 AND username = $2
"#;

const EXISTS_TODOLIST_TITLE: &str = r#"
    SELECT EXISTS (
        SELECT 1 FROM todolists WHERE title = $1 AND username = $2
    )
"#;

const CREATE_TODOLIST: &str = r#"
    INSERT INTO todolists (title, username)
    VALUES ($1, $2)
"#;

const UPDATE_TODOLIST_TITLE: &str = r#"
    UPDATE todolists SET title = $1
    WHERE id = $2 AND username = $3
"#;

const FIND_HASHED_PASSWORD: &str = r#"
    SELECT password FROM users WHERE username = $1
"#;

/// Todo list store shared by all requests.
///
/// Cheap to clone. Holds no per-user state; pass a `Scope` to each call.
#[derive(Clone)]
pub struct TodoStore {
    pool: PgPool,
    verifier: Arc<dyn CredentialVerifier>,
}

impl TodoStore {
    /// Store using Argon2 for password checks.
    pub fn new(pool: PgPool) -> Self {
        Self::with_verifier(pool, Arc::new(Argon2Verifier::new()))
    }

    pub fn with_verifier(pool: PgPool, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { pool, verifier }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// All of the user's lists with their todos attached: lists that are not
    /// done first, then done lists, each group by case-insensitive title.
    ///
    /// Todos inside each list are not sorted.
    #[instrument(skip_all, fields(user = %scope.username()))]
    pub async fn sorted_todo_lists(&self, scope: &Scope) -> Result<Vec<TodoList>> {
        let user = scope.username().as_str();

        let (mut lists, todos) = tokio::try_join!(
            sqlx::query_as::<_, TodoList>(ALL_TODOLISTS)
                .bind(user)
                .fetch_all(&self.pool),
            sqlx::query_as::<_, Todo>(ALL_TODOS)
                .bind(user)
                .fetch_all(&self.pool),
        )?;

        debug!(lists = lists.len(), todos = todos.len(), "Fetched todo lists");
        attach_todos(&mut lists, todos);
        Ok(partition_by_done(lists))
    }

    /// One list with its (unsorted) todos, or `None`.
    #[instrument(skip(self, scope), fields(user = %scope.username()))]
    pub async fn load_todo_list(
        &self,
        scope: &Scope,
        todo_list_id: i32,
    ) -> Result<Option<TodoList>> {
        let user = scope.username().as_str();

        let (list, todos) = tokio::try_join!(
            sqlx::query_as::<_, TodoList>(FIND_TODOLIST)
                .bind(todo_list_id)
                .bind(user)
                .fetch_optional(&self.pool),
            sqlx::query_as::<_, Todo>(FIND_TODOS)
                .bind(todo_list_id)
                .bind(user)
                .fetch_all(&self.pool),
        )?;

        Ok(list.map(|mut list| {
            list.todos = todos;
            list
        }))
    }

    /// The list's todos: not done first, then by case-insensitive title.
    #[instrument(skip_all, fields(user = %scope.username(), todo_list_id = todo_list.id))]
    pub async fn sorted_todos(&self, scope: &Scope, todo_list: &TodoList) -> Result<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(SORTED_TODOS)
            .bind(todo_list.id)
            .bind(scope.username().as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    #[instrument(skip(self, scope), fields(user = %scope.username()))]
    pub async fn load_todo(
        &self,
        scope: &Scope,
        todo_list_id: i32,
        todo_id: i32,
    ) -> Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(FIND_TODO)
            .bind(todo_list_id)
            .bind(todo_id)
            .bind(scope.username().as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(todo)
    }

    /// Flip a todo between done and not done.
    #[instrument(skip(self, scope), fields(user = %scope.username()))]
    pub async fn toggle_done_todo(
        &self,
        scope: &Scope,
        todo_list_id: i32,
        todo_id: i32,
    ) -> Result<Outcome> {
        let result = sqlx::query(TOGGLE_DONE)
            .bind(todo_list_id)
            .bind(todo_id)
            .bind(scope.username().as_str())
            .execute(&self.pool)
            .await?;
        Ok(Outcome::from_rows_affected(result.rows_affected()))
    }

    #[instrument(skip(self, scope), fields(user = %scope.username()))]
    pub async fn delete_todo(
        &self,
        scope: &Scope,
        todo_list_id: i32,
        todo_id: i32,
    ) -> Result<Outcome> {
        let result = sqlx::query(DELETE_TODO)
            .bind(todo_list_id)
            .bind(todo_id)
            .bind(scope.username().as_str())
            .execute(&self.pool)
            .await?;
        Ok(Outcome::from_rows_affected(result.rows_affected()))
    }

    /// Mark every not-done todo in the list as done.
    ///
    /// `Unchanged` when the list exists but had nothing left to complete
    /// (already done, or empty).
    #[instrument(skip(self, scope), fields(user = %scope.username()))]
    pub async fn complete_all_todos(&self, scope: &Scope, todo_list_id: i32) -> Result<Outcome> {
        let (list_found, completed): (bool, i64) = sqlx::query_as(COMPLETE_ALL)
            .bind(todo_list_id)
            .bind(scope.username().as_str())
            .fetch_one(&self.pool)
            .await?;

        debug!(list_found, completed, "Completed todos");
        Ok(match (list_found, completed) {
            (false, _) => Outcome::NotFound,
            (true, 0) => Outcome::Unchanged,
            (true, _) => Outcome::Changed,
        })
    }

    /// Add a not-done todo to the list. `NotFound` if the list does not exist
    /// for this user.
    #[instrument(skip(self, scope, title), fields(user = %scope.username(), title = %title))]
    pub async fn create_todo(
        &self,
        scope: &Scope,
        todo_list_id: i32,
        title: &TodoTitle,
    ) -> Result<Outcome> {
        let result = sqlx::query(CREATE_TODO)
            .bind(title.as_str())
            .bind(todo_list_id)
            .bind(scope.username().as_str())
            .execute(&self.pool)
            .await?;
        Ok(Outcome::from_rows_affected(result.rows_affected()))
    }

    /// Delete a list. What happens to its todos is up to the schema's
    /// foreign-key policy.
    #[instrument(skip(self, scope), fields(user = %scope.username()))]
    pub async fn delete_todo_list(&self, scope: &Scope, todo_list_id: i32) -> Result<Outcome> {
        let result = sqlx::query(DELETE_TODOLIST)
            .bind(todo_list_id)
            .bind(scope.username().as_str())
            .execute(&self.pool)
            .await?;
        Ok(Outcome::from_rows_affected(result.rows_affected()))
    }

    #[instrument(skip_all, fields(user = %scope.username(), title = %title))]
    pub async fn exists_todo_list_title(&self, scope: &Scope, title: &TodoTitle) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(EXISTS_TODOLIST_TITLE)
            .bind(title.as_str())
            .bind(scope.username().as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create a list. Returns `false` when the user already has a list with
    /// this title; every other failure is an error.
    #[instrument(skip_all, fields(user = %scope.username(), title = %title))]
    pub async fn create_todo_list(&self, scope: &Scope, title: &TodoTitle) -> Result<bool> {
        let result = sqlx::query(CREATE_TODOLIST)
            .bind(title.as_str())
            .bind(scope.username().as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(inserted) => Ok(inserted.rows_affected() > 0),
            Err(err) => match StoreError::from(err) {
                err if err.is_unique_violation() => {
                    warn!(constraint = ?err.constraint(), "Todo list title already in use");
                    Ok(false)
                }
                err => Err(err),
            },
        }
    }

    /// Rename a list.
    ///
    /// Renaming onto another of the user's titles fails with
    /// `StoreError::UniqueViolation`.
    #[instrument(skip(self, scope, title), fields(user = %scope.username(), title = %title))]
    pub async fn set_todo_list_title(
        &self,
        scope: &Scope,
        todo_list_id: i32,
        title: &TodoTitle,
    ) -> Result<Outcome> {
        let result = sqlx::query(UPDATE_TODOLIST_TITLE)
            .bind(title.as_str())
            .bind(todo_list_id)
            .bind(scope.username().as_str())
            .execute(&self.pool)
            .await?;
        Ok(Outcome::from_rows_affected(result.rows_affected()))
    }

    /// Check a username/password pair against `users`.
    ///
    /// Not scoped: this runs before there is an identity to scope by. An
    /// unknown user and a wrong password both give `false`.
    #[instrument(skip_all, fields(user = %username))]
    pub async fn authenticate(&self, username: &Username, password: &str) -> Result<bool> {
        let row: Option<(String,)> = sqlx::query_as(FIND_HASHED_PASSWORD)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await?;

        let Some((hash,)) = row else {
            debug!("No such user");
            return Ok(false);
        };

        self.verifier.verify(password, &hash).await
    }

    /// `authenticate`, returning the scope for subsequent calls on success.
    pub async fn login(&self, username: &Username, password: &str) -> Result<Option<Scope>> {
        let ok = self.authenticate(username, password).await?;
        Ok(ok.then(|| Scope::new(username.clone())))
    }
}
