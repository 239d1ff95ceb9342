//! Centralized server configuration.
//!
//! Loaded once at startup via the `config` crate from an optional
//! `paygate.toml` file and environment variables, with `__` separating
//! nested keys (e.g. `IDENTITY__REDIRECT_URL`, `BILLING__SANDBOX_API_KEY`).
//!
//! See [`IdentityConfig`], [`BillingConfig`], and [`SecretManagerConfig`] for
//! the provider settings.

use paygate_billing::BillingConfig;
use paygate_core::DeploymentMode;
use paygate_identity::IdentityConfig;
use paygate_secrets::SecretManagerConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Project scope secrets are resolved in.
    pub project_id: String,

    /// Live or sandbox deployment.
    #[serde(default)]
    pub mode: DeploymentMode,

    /// Identity provider configuration.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Billing provider configuration.
    #[serde(default)]
    pub billing: BillingConfig,

    /// Secret Manager configuration.
    #[serde(default)]
    pub secrets: SecretManagerConfig,

    /// Development-time allowlisting.
    #[serde(default)]
    pub allowlist: AllowlistConfig,

    /// Outbound HTTP settings shared by all provider clients.
    #[serde(default)]
    pub http: HttpClientConfig,

    /// Session cookie and store settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Listener and page settings.
    #[serde(default)]
    pub server: HttpServerConfig,
}

/// Allowlist configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowlistConfig {
    /// Whether only listed identities may pass.
    #[serde(default)]
    pub enabled: bool,

    /// File with one identity per line.
    #[serde(default = "default_allowlist_path")]
    pub path: PathBuf,
}

fn default_allowlist_path() -> PathBuf {
    PathBuf::from("allowed_users.txt")
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_allowlist_path(),
        }
    }
}

/// Outbound HTTP configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientConfig {
    /// Per-request timeout for provider calls, in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout_seconds() -> u64 {
    30
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl HttpClientConfig {
    /// Returns the request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session duration in minutes. Bounds both the cookie and the stored state.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: u64,

    /// Interval between session cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_session_duration_minutes() -> u64 {
    60
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_session_duration_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl SessionConfig {
    /// Returns how long a session lives.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_minutes.saturating_mul(60))
    }

    /// Returns the interval between cleanup runs.
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Label of the login button.
    #[serde(default = "default_login_text")]
    pub login_text: String,

    /// Label of the subscribe button.
    #[serde(default = "default_subscribe_text")]
    pub subscribe_text: String,

    /// Background color of both buttons.
    #[serde(default = "default_button_color")]
    pub button_color: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8501".to_string()
}

fn default_login_text() -> String {
    "Login with Google".to_string()
}

fn default_subscribe_text() -> String {
    "Subscribe now!".to_string()
}

fn default_button_color() -> String {
    "#FD504D".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            login_text: default_login_text(),
            subscribe_text: default_subscribe_text(),
            button_color: default_button_color(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from `paygate.toml` (if present) and environment
    /// variables. Environment variables win.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("paygate").required(false))
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid or misses required keys.
    pub fn from_toml(document: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = ServerConfig::from_toml(r#"project_id = "815648219579""#).expect("config");

        assert_eq!(config.project_id, "815648219579");
        assert_eq!(config.mode, DeploymentMode::Live);
        assert!(!config.allowlist.enabled);
        assert_eq!(config.allowlist.path, PathBuf::from("allowed_users.txt"));
        assert_eq!(config.http.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.server.bind_addr, "0.0.0.0:8501");
        assert!(config.session.secure_cookies);
        assert_eq!(config.session.duration(), Duration::from_secs(3600));
        assert_eq!(config.session.cleanup_interval(), Duration::from_secs(300));
        assert_eq!(config.server.login_text, "Login with Google");
        assert_eq!(config.server.subscribe_text, "Subscribe now!");
        assert_eq!(config.server.button_color, "#FD504D");
        assert_eq!(config.billing.api_key_secret, "STRIPE_API_KEY");
        assert_eq!(
            config.identity.credentials_secret(),
            "OAUTH_CLIENT_ID_AND_SECRET"
        );
    }

    #[test]
    fn project_id_is_required() {
        assert!(ServerConfig::from_toml(r#"mode = "sandbox""#).is_err());
    }

    #[test]
    fn nested_sections_override_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            project_id = "p"
            mode = "sandbox"

            [identity]
            redirect_url = "https://app.example.com/"

            [billing]
            sandbox_api_key = "sk_test_1"
            sandbox_payment_link = "https://buy.stripe.com/test_x"

            [allowlist]
            enabled = true
            path = "/etc/paygate/allowed.txt"

            [http]
            request_timeout_seconds = 5

            [session]
            duration_minutes = 15
            secure_cookies = false
            "#,
        )
        .expect("config");

        assert!(config.mode.is_sandbox());
        assert_eq!(
            config.identity.redirect_url_for(DeploymentMode::Live),
            Some("https://app.example.com/")
        );
        assert!(config.billing.sandbox_credentials().is_some());
        assert!(config.allowlist.enabled);
        assert_eq!(config.http.request_timeout(), Duration::from_secs(5));
        assert!(!config.session.secure_cookies);
        assert_eq!(config.session.duration(), Duration::from_secs(900));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            project_id = "p"
            mode = "staging"
            "#,
        );
        assert!(result.is_err());
    }
}
