//! Deployment mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects between live provider credentials and sandboxed ones.
///
/// Resolved once from configuration at startup and passed into client
/// construction; nothing downstream re-reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Production endpoints and credentials from the secret source.
    #[default]
    Live,
    /// Local redirect URL and sandbox billing credentials from configuration.
    Sandbox,
}

impl DeploymentMode {
    /// Returns true for sandbox deployments.
    #[must_use]
    pub fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}
