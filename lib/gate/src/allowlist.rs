//! Development-time allowlisting.
//!
//! When enabled, only identities listed in the allowlist get past the gate.
//! The list is re-read on every check so edits take effect immediately.

use crate::error::GateError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Returns whether `email` is a member of `allowlist`.
#[must_use]
pub fn is_permitted(email: &str, allowlist: &HashSet<String>) -> bool {
    allowlist.contains(email)
}

/// Where the allowlist comes from.
#[async_trait]
pub trait AllowlistSource: Send + Sync {
    /// Loads the current allowlist.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::PolicySourceUnavailable`] if the source cannot be
    /// read.
    async fn load(&self) -> Result<HashSet<String>, GateError>;
}

/// Allowlist stored as a text file with one identity per line.
///
/// Surrounding whitespace is trimmed and blank lines are ignored.
#[derive(Debug, Clone)]
pub struct FileAllowlist {
    path: PathBuf,
}

impl FileAllowlist {
    /// Creates an allowlist backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl AllowlistSource for FileAllowlist {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<HashSet<String>, GateError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            GateError::PolicySourceUnavailable {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let entries: HashSet<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        debug!(count = entries.len(), "Loaded allowlist");
        Ok(entries)
    }
}

/// Fixed in-memory allowlist.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowlist {
    entries: HashSet<String>,
}

impl StaticAllowlist {
    /// Creates an allowlist from the given identities.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AllowlistSource for StaticAllowlist {
    async fn load(&self) -> Result<HashSet<String>, GateError> {
        Ok(self.entries.clone())
    }
}

/// Allowlist check that can be switched off.
#[derive(Debug, Clone)]
pub struct AllowlistPolicy<A> {
    enabled: bool,
    source: A,
}

impl<A: AllowlistSource> AllowlistPolicy<A> {
    /// Creates a policy. When `enabled` is false every identity is permitted
    /// and the source is never read.
    #[must_use]
    pub fn new(enabled: bool, source: A) -> Self {
        Self { enabled, source }
    }

    /// Returns whether the policy is enforced.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Checks `email` against the current allowlist.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::PolicySourceUnavailable`] if the policy is enabled
    /// and the source cannot be read.
    pub async fn check(&self, email: &str) -> Result<bool, GateError> {
        if !self.enabled {
            return Ok(true);
        }
        let allowlist = self.source.load().await?;
        Ok(is_permitted(email, &allowlist))
    }
}
