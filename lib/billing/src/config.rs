//! Billing configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Base URL of the Stripe REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Secret holding the API key in live deployments.
    #[serde(default = "default_api_key_secret")]
    pub api_key_secret: String,
    /// Secret holding the hosted payment link in live deployments.
    #[serde(default = "default_payment_link_secret")]
    pub payment_link_secret: String,
    /// API key used in sandbox mode (a test-mode key).
    #[serde(default)]
    pub sandbox_api_key: Option<String>,
    /// Payment link used in sandbox mode.
    #[serde(default)]
    pub sandbox_payment_link: Option<String>,
}

fn default_api_base() -> String {
    "https://api.stripe.com/v1".to_string()
}

fn default_api_key_secret() -> String {
    "STRIPE_API_KEY".to_string()
}

fn default_payment_link_secret() -> String {
    "STRIPE_LINK".to_string()
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key_secret: default_api_key_secret(),
            payment_link_secret: default_payment_link_secret(),
            sandbox_api_key: None,
            sandbox_payment_link: None,
        }
    }
}

impl BillingConfig {
    /// Returns sandbox credentials if both sandbox values are configured.
    #[must_use]
    pub fn sandbox_credentials(&self) -> Option<BillingCredentials> {
        match (&self.sandbox_api_key, &self.sandbox_payment_link) {
            (Some(key), Some(link)) => Some(BillingCredentials::new(key, link)),
            _ => None,
        }
    }
}

/// API key and payment link for the billing provider.
#[derive(Clone, PartialEq, Eq)]
pub struct BillingCredentials {
    api_key: String,
    payment_link: String,
}

impl BillingCredentials {
    /// Creates billing credentials.
    #[must_use]
    pub fn new(api_key: impl Into<String>, payment_link: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            payment_link: payment_link.into(),
        }
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the payment link.
    #[must_use]
    pub fn payment_link(&self) -> &str {
        &self.payment_link
    }
}

impl fmt::Debug for BillingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillingCredentials")
            .field("api_key", &"[redacted]")
            .field("payment_link", &self.payment_link)
            .finish()
    }
}
