//! Identifier assigned by the identity provider.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    /// Identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// Identifier carried leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    Padded,
}

/// Opaque account identifier returned on successful sign-up or login.
///
/// Providers use their own formats, so only emptiness and padding are
/// checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Padded);
        }
        Ok(Self(id))
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdError::Empty)]
    #[case(" abc", UserIdError::Padded)]
    #[case("abc\n", UserIdError::Padded)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: UserIdError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn random_ids_are_distinct_and_valid() {
        let a = UserId::random();
        let b = UserId::random();
        assert_ne!(a, b);
        assert_eq!(UserId::new(a.as_str()), Ok(a));
    }

    #[rstest]
    fn deserialising_validates() {
        let err = serde_json::from_str::<UserId>("\"\"");
        assert!(err.is_err());
        let ok: UserId = serde_json::from_str("\"kZ81uid\"").expect("valid id");
        assert_eq!(ok.as_str(), "kZ81uid");
    }
}
