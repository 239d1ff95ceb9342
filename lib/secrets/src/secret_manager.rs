//! Google Secret Manager client.
//!
//! Uses the REST endpoint
//! `GET {api_base}/projects/{project}/secrets/{name}/versions/{version}:access`
//! with an OAuth bearer token. The token is either configured explicitly
//! (e.g. from `gcloud auth print-access-token`) or fetched from the
//! metadata server, which is how Cloud Run and GCE workloads authenticate.

use crate::error::SecretError;
use crate::source::SecretSource;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Configuration for the Secret Manager client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretManagerConfig {
    /// Base URL of the Secret Manager REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Metadata server endpoint that issues access tokens.
    #[serde(default = "default_metadata_token_url")]
    pub metadata_token_url: String,
    /// Static access token. When set, the metadata server is not consulted.
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_api_base() -> String {
    "https://secretmanager.googleapis.com/v1".to_string()
}

fn default_metadata_token_url() -> String {
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token"
        .to_string()
}

impl Default for SecretManagerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            metadata_token_url: default_metadata_token_url(),
            access_token: None,
        }
    }
}

/// Secret Manager REST client.
pub struct SecretManagerClient {
    http: reqwest::Client,
    config: SecretManagerConfig,
}

#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    data: String,
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

impl SecretManagerClient {
    /// Creates a new client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::ClientSetup`] if the HTTP client cannot be built.
    pub fn new(config: SecretManagerConfig, timeout: Duration) -> Result<Self, SecretError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SecretError::ClientSetup {
                reason: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SecretManagerConfig {
        &self.config
    }

    async fn bearer_token(&self, secret_name: &str) -> Result<String, SecretError> {
        if let Some(token) = &self.config.access_token {
            return Ok(token.clone());
        }

        let unavailable = |reason: String| SecretError::Unavailable {
            secret: secret_name.to_string(),
            reason,
        };

        debug!("Fetching access token from metadata server");
        let response = self
            .http
            .get(&self.config.metadata_token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| unavailable(format!("metadata server request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(unavailable(format!(
                "metadata server returned {}",
                response.status()
            )));
        }

        let token: MetadataToken = response
            .json()
            .await
            .map_err(|e| unavailable(format!("invalid metadata token response: {e}")))?;

        Ok(token.access_token)
    }
}

#[async_trait]
impl SecretSource for SecretManagerClient {
    #[instrument(skip(self))]
    async fn access(
        &self,
        project_scope: &str,
        secret_name: &str,
        version: &str,
    ) -> Result<String, SecretError> {
        let unavailable = |reason: String| SecretError::Unavailable {
            secret: secret_name.to_string(),
            reason,
        };

        let token = self.bearer_token(secret_name).await?;
        let url = format!(
            "{}/projects/{project_scope}/secrets/{secret_name}/versions/{version}:access",
            self.config.api_base.trim_end_matches('/')
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "Secret Manager returned an error");
            return Err(unavailable(format!("Secret Manager returned {status}")));
        }

        let body: AccessSecretVersionResponse = response
            .json()
            .await
            .map_err(|e| unavailable(format!("invalid response body: {e}")))?;

        let bytes = STANDARD
            .decode(body.payload.data.as_bytes())
            .map_err(|e| unavailable(format!("payload is not base64: {e}")))?;

        String::from_utf8(bytes).map_err(|_| SecretError::InvalidValue {
            secret: secret_name.to_string(),
            reason: "payload is not UTF-8".to_string(),
        })
    }
}
