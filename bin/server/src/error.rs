//! Startup error types.
//!
//! Any of these aborts the process before the listener is bound.

use std::fmt;

/// Errors while assembling the gate from configuration and secrets.
#[derive(Debug)]
pub enum StartupError {
    /// A secret could not be resolved.
    SecretUnavailable { secret: String, details: String },
    /// The identity credentials secret is not `<client_id>/<client_secret>`.
    MalformedCredentials { secret: String },
    /// Live mode has no redirect URL configured.
    MissingRedirectUrl,
    /// Sandbox mode lacks the sandbox billing key or payment link.
    MissingSandboxBilling,
    /// A provider client could not be constructed.
    ClientSetup { client: &'static str, details: String },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretUnavailable { secret, details } => {
                write!(f, "secret '{secret}' unavailable: {details}")
            }
            Self::MalformedCredentials { secret } => {
                write!(
                    f,
                    "secret '{secret}' is not in the form <client_id>/<client_secret>"
                )
            }
            Self::MissingRedirectUrl => {
                write!(f, "identity.redirect_url is required in live mode")
            }
            Self::MissingSandboxBilling => write!(
                f,
                "billing.sandbox_api_key and billing.sandbox_payment_link are required in sandbox mode"
            ),
            Self::ClientSetup { client, details } => {
                write!(f, "failed to build {client} client: {details}")
            }
        }
    }
}

impl std::error::Error for StartupError {}
