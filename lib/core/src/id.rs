//! Session identifiers.
//!
//! The host hands the gate an opaque session identifier; freshly minted
//! identifiers are ULIDs so they sort by creation time in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Opaque identifier for a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from an existing string (e.g. a cookie value).
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Parses a session ID issued by [`SessionId::generate`].
    ///
    /// Returns `None` unless `value` is a ULID, so arbitrary client-chosen
    /// strings are never used as session keys.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        value.parse::<Ulid>().ok().map(|ulid| Self(ulid.to_string()))
    }

    /// Generates a new random session ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
