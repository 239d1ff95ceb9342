//! Identity provider configuration and client credentials.

use paygate_core::DeploymentMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Configuration for the identity provider.
///
/// Fields with defaults can be omitted when loading from environment
/// variables. The defaults target Google's OAuth2 endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Authorization endpoint the browser is sent to.
    #[serde(default = "default_auth_url")]
    auth_url: String,
    /// Token endpoint codes are exchanged at.
    #[serde(default = "default_token_url")]
    token_url: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "email"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// Extra query parameters appended to the authorization URL.
    /// Default: `access_type=offline`
    #[serde(default = "default_extra_params")]
    extra_params: BTreeMap<String, String>,
    /// Name of the secret holding `"<client_id>/<client_secret>"`.
    #[serde(default = "default_credentials_secret")]
    credentials_secret: String,
    /// Redirect URL registered with the provider for live deployments.
    #[serde(default)]
    redirect_url: Option<String>,
    /// Redirect URL used in sandbox mode.
    #[serde(default = "default_sandbox_redirect_url")]
    sandbox_redirect_url: String,
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_scopes() -> String {
    "email".to_string()
}

fn default_extra_params() -> BTreeMap<String, String> {
    BTreeMap::from([("access_type".to_string(), "offline".to_string())])
}

fn default_credentials_secret() -> String {
    "OAUTH_CLIENT_ID_AND_SECRET".to_string()
}

fn default_sandbox_redirect_url() -> String {
    "http://localhost:8501/".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            scopes: default_scopes(),
            extra_params: default_extra_params(),
            credentials_secret: default_credentials_secret(),
            redirect_url: None,
            sandbox_redirect_url: default_sandbox_redirect_url(),
        }
    }
}

impl IdentityConfig {
    /// Overrides the authorization and token endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, auth_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self.token_url = token_url.into();
        self
    }

    /// Sets the live redirect URL.
    #[must_use]
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Returns the authorization endpoint URL.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the OAuth2 scopes to request, parsed from comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the extra authorization URL parameters.
    #[must_use]
    pub fn extra_params(&self) -> &BTreeMap<String, String> {
        &self.extra_params
    }

    /// Returns the name of the credentials secret.
    #[must_use]
    pub fn credentials_secret(&self) -> &str {
        &self.credentials_secret
    }

    /// Returns the redirect URL for the given deployment mode.
    ///
    /// Live deployments have no default; `None` means it was not configured.
    #[must_use]
    pub fn redirect_url_for(&self, mode: DeploymentMode) -> Option<&str> {
        match mode {
            DeploymentMode::Live => self.redirect_url.as_deref(),
            DeploymentMode::Sandbox => Some(&self.sandbox_redirect_url),
        }
    }
}

/// OAuth2 client credentials for the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Creates credentials from their parts.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Parses the stored `"<client_id>/<client_secret>"` form.
    ///
    /// Splits on the first `/`. Returns `None` if either part is empty.
    #[must_use]
    pub fn from_joined(value: &str) -> Option<Self> {
        let (client_id, client_secret) = value.trim().split_once('/')?;
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Self::new(client_id, client_secret))
    }

    /// Returns the client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_google() {
        let config = IdentityConfig::default();
        assert_eq!(
            config.auth_url(),
            "https://accounts.google.com/o/oauth2/v2/auth"
        );
        assert_eq!(config.token_url(), "https://oauth2.googleapis.com/token");
        assert_eq!(config.scopes(), vec!["email"]);
        assert_eq!(
            config.extra_params().get("access_type").map(String::as_str),
            Some("offline")
        );
        assert_eq!(config.credentials_secret(), "OAUTH_CLIENT_ID_AND_SECRET");
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{ "redirect_url": "https://app.example.com/" }"#;
        let config: IdentityConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(
            config.redirect_url_for(DeploymentMode::Live),
            Some("https://app.example.com/")
        );
        assert_eq!(
            config.redirect_url_for(DeploymentMode::Sandbox),
            Some("http://localhost:8501/")
        );
    }

    #[test]
    fn live_redirect_has_no_default() {
        let config = IdentityConfig::default();
        assert_eq!(config.redirect_url_for(DeploymentMode::Live), None);
    }

    #[test]
    fn scopes_parses_comma_separated() {
        let json = r#"{ "scopes": "openid, email ,profile" }"#;
        let config: IdentityConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.scopes(), vec!["openid", "email", "profile"]);
    }

    #[test]
    fn credentials_split_on_first_slash() {
        let creds = ClientCredentials::from_joined("abc.apps.googleusercontent.com/GOCSPX/x")
            .expect("parses");
        assert_eq!(creds.client_id(), "abc.apps.googleusercontent.com");
        assert_eq!(creds.client_secret(), "GOCSPX/x");
    }

    #[test]
    fn credentials_reject_missing_parts() {
        assert!(ClientCredentials::from_joined("no-separator").is_none());
        assert!(ClientCredentials::from_joined("/secret").is_none());
        assert!(ClientCredentials::from_joined("id/").is_none());
    }

    #[test]
    fn credentials_debug_redacts_secret() {
        let creds = ClientCredentials::new("id", "super-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("id"));
        assert!(!debug.contains("super-secret"));
    }
}
