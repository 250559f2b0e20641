//! The user profile model.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// User IDs are assigned sequentially: the next ID is one more than the
/// largest existing ID, starting from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// The ID given to the first user.
    pub const FIRST: UserId = UserId(1);

    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// The ID that follows `self` in the sequence.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A named profile that owns expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's sequential ID.
    pub user_id: UserId,
    /// The display name.
    pub name: String,
    /// When the profile was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Check that a user name is usable and return it trimmed.
///
/// # Errors
/// Returns [Error::Validation] if `name` is empty or only whitespace.
pub fn validate_user_name(name: &str) -> Result<String, Error> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::validation("Name is required"));
    }

    Ok(name.to_owned())
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{UserId, validate_user_name};

    #[test]
    fn trims_name() {
        assert_eq!(validate_user_name("  Asha ").unwrap(), "Asha");
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            validate_user_name("   "),
            Err(Error::Validation("Name is required".to_owned()))
        );
    }

    #[test]
    fn next_id_increments() {
        assert_eq!(UserId::FIRST.next(), UserId::new(2));
    }
}
