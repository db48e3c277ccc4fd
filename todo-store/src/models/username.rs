//! Usernames and the per-request scope built from them

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for usernames
const MAX_USERNAME_LEN: usize = 64;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@-]+$").expect("invalid username regex"));

/// Validated account name, as stored in `users.username` and as the owner
/// column of every list and todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username.
    ///
    /// Leading/trailing whitespace is trimmed.
    ///
    /// # Example
    /// ```
    /// use todo_store::models::Username;
    ///
    /// assert!(Username::new("admin").is_ok());
    /// assert!(Username::new("  ").is_err());
    /// assert!(Username::new("two words").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }

        if s.chars().count() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            });
        }

        if !USERNAME_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "username",
                reason: "may only contain letters, digits, '_', '.', '@' and '-'",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated identity a store operation runs on behalf of.
///
/// Every scoped `TodoStore` method takes a `&Scope` and binds its username
/// into the `WHERE` clause, so one store can serve many users concurrently.
/// A scope is immutable once built; get one from `TodoStore::login` or, when
/// identity was already established upstream, from `Scope::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    username: Username,
}

impl Scope {
    pub fn new(username: Username) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}
