//! Error types for the identity crate.

use std::fmt;

/// Errors from identity provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The redirect URL is not an absolute URL.
    InvalidRedirect { url: String, reason: String },
    /// The code could not be exchanged for tokens.
    ///
    /// Covers network failures, provider rejections (invalid, expired, or
    /// already-used codes), and responses without an identity token.
    TokenExchangeFailed { reason: String },
    /// The identity token payload could not be decoded or lacks the email claim.
    MalformedToken { reason: String },
    /// Endpoint configuration is invalid.
    Configuration { reason: String },
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRedirect { url, reason } => {
                write!(f, "invalid redirect URL '{url}': {reason}")
            }
            Self::TokenExchangeFailed { reason } => {
                write!(f, "token exchange failed: {reason}")
            }
            Self::MalformedToken { reason } => {
                write!(f, "malformed identity token: {reason}")
            }
            Self::Configuration { reason } => {
                write!(f, "identity provider configuration error: {reason}")
            }
        }
    }
}

impl std::error::Error for IdentityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_redirect_display() {
        let err = IdentityError::InvalidRedirect {
            url: "/callback".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().contains("/callback"));
        assert!(err.to_string().contains("relative URL"));
    }

    #[test]
    fn token_exchange_failed_display() {
        let err = IdentityError::TokenExchangeFailed {
            reason: "invalid_grant".to_string(),
        };
        assert!(err.to_string().contains("token exchange failed"));
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[test]
    fn malformed_token_display() {
        let err = IdentityError::MalformedToken {
            reason: "missing claim: email".to_string(),
        };
        assert!(err.to_string().contains("malformed"));
        assert!(err.to_string().contains("email"));
    }
}
