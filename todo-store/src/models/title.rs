//! Title validation for todo lists and todos

use std::fmt;

use super::ValidationError;

/// Maximum title length in characters, shared by lists and todos
const MAX_TITLE_LEN: usize = 100;

/// Validated title (trimmed, 1-100 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new title.
    ///
    /// # Example
    /// ```
    /// use todo_store::models::TodoTitle;
    ///
    /// let title = TodoTitle::new("  Groceries ").unwrap();
    /// assert_eq!(title.as_str(), "Groceries");
    /// assert!(TodoTitle::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if s.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
