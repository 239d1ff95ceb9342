//! Gate outcomes.

use paygate_core::Identity;
use paygate_identity::IdentityError;
use std::fmt;

/// Where a session stands in the login and payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateState {
    Unauthenticated,
    Authenticating,
    AuthenticatedUnpaid,
    AuthenticatedPaid,
    AccessDenied,
    LoggedOut,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::AuthenticatedUnpaid => "authenticated_unpaid",
            Self::AuthenticatedPaid => "authenticated_paid",
            Self::AccessDenied => "access_denied",
            Self::LoggedOut => "logged_out",
        };
        f.write_str(s)
    }
}

/// The result of evaluating a request.
///
/// Anything other than [`GateDecision::Proceed`] means the application must
/// not render; the host shows the decision instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The identity is logged in and subscribed.
    Proceed { identity: Identity },
    /// Send the browser to the identity provider.
    RedirectToLogin {
        url: String,
        /// Set when this request carried a code whose exchange failed.
        exchange_failure: Option<IdentityError>,
    },
    /// Send the browser to the payment page.
    RedirectToPayment { url: String, identity: Identity },
    /// The identity is not on the allowlist.
    Denied { identity: Identity },
}

impl GateDecision {
    /// Returns the state this decision leaves the session in.
    #[must_use]
    pub fn state(&self) -> GateState {
        match self {
            Self::Proceed { .. } => GateState::AuthenticatedPaid,
            Self::RedirectToLogin { .. } => GateState::Authenticating,
            Self::RedirectToPayment { .. } => GateState::AuthenticatedUnpaid,
            Self::Denied { .. } => GateState::AccessDenied,
        }
    }

    /// Returns the identity the decision was made for, if one is known.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Proceed { identity }
            | Self::RedirectToPayment { identity, .. }
            | Self::Denied { identity } => Some(identity),
            Self::RedirectToLogin { .. } => None,
        }
    }

    /// Returns whether the application may render.
    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed { .. })
    }
}
