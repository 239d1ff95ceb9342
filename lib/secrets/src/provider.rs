//! Startup secret resolution.

use crate::error::SecretError;
use crate::source::{LATEST_VERSION, SecretSource};
use tracing::{error, info};

/// Resolves named secrets from a [`SecretSource`] at their latest version.
///
/// Intended to be called once per secret during startup; failures are meant
/// to abort the process rather than let it run half-configured.
pub struct SecretProvider<S> {
    source: S,
}

impl<S: SecretSource> SecretProvider<S> {
    /// Creates a provider over the given source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves the latest version of `secret_name` within `project_scope`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Unavailable`] if the source is unreachable or
    /// the secret does not exist.
    pub async fn resolve(
        &self,
        project_scope: &str,
        secret_name: &str,
    ) -> paygate_core::Result<String, SecretError> {
        match self
            .source
            .access(project_scope, secret_name, LATEST_VERSION)
            .await
        {
            Ok(value) => {
                info!(secret = %secret_name, "Resolved secret");
                Ok(value)
            }
            Err(e) => {
                error!(secret = %secret_name, error = %e, "Failed to resolve secret");
                Err(e.into())
            }
        }
    }
}
