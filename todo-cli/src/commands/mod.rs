//! Command implementations for todoctl

pub mod account;
pub mod lists;
pub mod todos;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use todo_store::config::TodoctlConfig;
use todo_store::{db, Scope, TodoStore, TodoTitle, Username, ValidationError};

pub use account::{run_hash_password, run_login};
pub use lists::run_lists;
pub use todos::run_todos;

/// Credentials and connection settings shared by every data command
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Account to act as
    #[arg(long, short = 'u', env = "TODOCTL_USER", global = true)]
    pub user: Option<String>,

    /// Password for --user
    #[arg(long, env = "TODOCTL_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Database URL (overrides todoctl.toml)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    pub database_url: Option<String>,
}

/// An authenticated store handle
pub struct Session {
    pub store: TodoStore,
    pub scope: Scope,
}

/// Connect, check the credentials, and return a scoped session.
pub async fn open_session(conn: &ConnectionArgs) -> Result<Session> {
    let user = conn
        .user
        .as_deref()
        .context("no user given: pass --user or set TODOCTL_USER")?;
    let username = Username::new(user)?;
    let password = conn
        .password
        .as_deref()
        .context("no password given: pass --password or set TODOCTL_PASSWORD")?;

    let config = TodoctlConfig::load();
    let pool = db::connect(&config, conn.database_url.as_deref())
        .await
        .context("Failed to connect to database")?;
    let store = TodoStore::new(pool);

    let scope = store
        .login(&username, password)
        .await?
        .ok_or_else(|| anyhow!("invalid username or password"))?;

    tracing::debug!(user = %username, "Authenticated");
    Ok(Session { store, scope })
}

/// clap value parser for titles
pub fn parse_title(s: &str) -> Result<TodoTitle, ValidationError> {
    TodoTitle::new(s)
}

/// Checkbox marker used in listings
pub fn mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}
