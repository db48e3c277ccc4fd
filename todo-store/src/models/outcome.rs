//! Result of a scoped mutation

/// What a write did.
///
/// `NotFound` covers both "no such id" and "owned by another user"; the two
/// are deliberately indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// At least one row was written
    Changed,
    /// The target exists but nothing needed changing
    Unchanged,
    /// No matching row for this user
    NotFound,
}

impl Outcome {
    /// Build from an affected-row count where zero rows means the target is
    /// missing.
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            Self::Changed
        } else {
            Self::NotFound
        }
    }

    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}
