//! Account commands: credential check and password hashing

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use todo_store::Argon2Verifier;

use super::{open_session, ConnectionArgs};

/// Check --user/--password against the database.
pub async fn run_login(conn: &ConnectionArgs) -> Result<()> {
    let session = open_session(conn).await?;
    println!("Signed in as {}.", session.scope.username());
    Ok(())
}

/// Print an Argon2 hash suitable for the `users.password` column.
///
/// Reads the password from the first line of stdin when not given.
pub fn run_hash_password(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read password from stdin")?;
            line.trim_end_matches(&['\r', '\n'][..]).to_owned()
        }
    };

    if password.is_empty() {
        bail!("password cannot be empty");
    }

    println!("{}", Argon2Verifier::new().hash_password(&password)?);
    Ok(())
}
