//! The secret source abstraction.

use crate::error::SecretError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Version sentinel meaning "the most recent version".
pub const LATEST_VERSION: &str = "latest";

/// Trait for backends that hold secret values.
///
/// Secrets are addressed by project scope, name, and version.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Reads the value of a secret.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Unavailable`] if the backend cannot be reached
    /// or the secret does not exist.
    async fn access(
        &self,
        project_scope: &str,
        secret_name: &str,
        version: &str,
    ) -> Result<String, SecretError>;
}

/// In-memory secret source keyed by secret name.
///
/// Project scope and version are ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretSource {
    values: HashMap<String, String>,
}

impl StaticSecretSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret value.
    #[must_use]
    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns the number of secrets held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no secrets are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[async_trait]
impl SecretSource for StaticSecretSource {
    async fn access(
        &self,
        _project_scope: &str,
        secret_name: &str,
        _version: &str,
    ) -> Result<String, SecretError> {
        self.values
            .get(secret_name)
            .cloned()
            .ok_or_else(|| SecretError::Unavailable {
                secret: secret_name.to_string(),
                reason: "not present in static source".to_string(),
            })
    }
}
