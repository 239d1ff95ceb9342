//! Gate errors.

use paygate_billing::BillingError;
use paygate_identity::IdentityError;
use std::fmt;

/// Errors surfaced by gate evaluation.
///
/// Failures on the login branch never appear here; they fall back to a login
/// redirect. These are the faults that happen once an identity is known, or
/// that make the login link itself impossible to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The allowlist could not be read.
    PolicySourceUnavailable { path: String, reason: String },
    /// The billing provider failed.
    Billing(BillingError),
    /// The login URL could not be built.
    Identity(IdentityError),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PolicySourceUnavailable { path, reason } => {
                write!(f, "allowlist '{path}' unavailable: {reason}")
            }
            Self::Billing(e) => write!(f, "{e}"),
            Self::Identity(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GateError {}

impl From<BillingError> for GateError {
    fn from(e: BillingError) -> Self {
        Self::Billing(e)
    }
}

impl From<IdentityError> for GateError {
    fn from(e: IdentityError) -> Self {
        Self::Identity(e)
    }
}
