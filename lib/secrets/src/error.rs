//! Error types for secret resolution.

use std::fmt;

/// Errors from resolving a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// The secret store could not be reached or the secret does not exist.
    Unavailable { secret: String, reason: String },
    /// The secret exists but its value is not in the expected format.
    InvalidValue { secret: String, reason: String },
    /// The HTTP client for the secret store could not be built.
    ClientSetup { reason: String },
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { secret, reason } => {
                write!(f, "secret '{secret}' unavailable: {reason}")
            }
            Self::InvalidValue { secret, reason } => {
                write!(f, "secret '{secret}' has an invalid value: {reason}")
            }
            Self::ClientSetup { reason } => {
                write!(f, "failed to set up secret store client: {reason}")
            }
        }
    }
}

impl std::error::Error for SecretError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_display_names_secret() {
        let err = SecretError::Unavailable {
            secret: "STRIPE_API_KEY".to_string(),
            reason: "404 Not Found".to_string(),
        };
        assert!(err.to_string().contains("STRIPE_API_KEY"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn invalid_value_display_does_not_leak_value() {
        let err = SecretError::InvalidValue {
            secret: "OAUTH_CLIENT_ID_AND_SECRET".to_string(),
            reason: "expected '<client_id>/<client_secret>'".to_string(),
        };
        assert!(err.to_string().contains("invalid value"));
    }
}
