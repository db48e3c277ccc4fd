//! todoctl - manage per-user todo lists from the command line
//!
//! Every data command signs in first with --user/--password (or
//! TODOCTL_USER/TODOCTL_PASSWORD) and then only sees that user's lists.
//! Connection settings come from --database-url, DATABASE_URL, ./todoctl.toml
//! or ~/.todoctl/config.toml, in that order; .env files are loaded first.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::lists::ListCommand;
use commands::todos::TodoCommand;
use commands::ConnectionArgs;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Per-user todo lists backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    conn: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Lists(ListCommand),
    #[command(flatten)]
    Todos(TodoCommand),
    /// Check credentials without doing anything else
    Login,
    /// Print an Argon2 hash for the users table
    HashPassword {
        /// Password to hash (read from stdin if omitted)
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so .env values can feed clap's env fallbacks.
    todo_store::config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Lists(cmd) => commands::run_lists(cmd, &cli.conn).await?,
        Commands::Todos(cmd) => commands::run_todos(cmd, &cli.conn).await?,
        Commands::Login => commands::run_login(&cli.conn).await?,
        Commands::HashPassword { password } => commands::run_hash_password(password)?,
    }
    Ok(())
}
