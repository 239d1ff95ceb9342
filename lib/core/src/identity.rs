//! The verified user identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user identity resolved from the identity provider.
///
/// Only the email claim is kept; it is the key used for the allowlist and
/// for the billing customer lookup. Identities are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    email: String,
}

impl Identity {
    /// Creates an identity for the given email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}
