//! Billing errors.

use std::fmt;

/// Errors from billing provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// The billing provider could not be reached, rejected the request, or
    /// returned a body that could not be decoded.
    ProviderUnavailable { reason: String },
    /// The configured payment link is not a valid URL.
    InvalidPaymentLink { reason: String },
}

impl fmt::Display for BillingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnavailable { reason } => {
                write!(f, "billing provider unavailable: {reason}")
            }
            Self::InvalidPaymentLink { reason } => {
                write!(f, "invalid payment link: {reason}")
            }
        }
    }
}

impl std::error::Error for BillingError {}
