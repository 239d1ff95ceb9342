//! Transient values of the authorization-code flow.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Parameters for building a provider-facing authorization URL.
///
/// Not persisted; built from configuration when a login link is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Where the provider sends the browser back with the code.
    pub redirect_url: String,
    /// Requested scopes.
    pub scope: BTreeSet<String>,
    /// Provider-specific query parameters (e.g. `access_type=offline`).
    pub extra_params: BTreeMap<String, String>,
}

impl AuthorizationRequest {
    /// Creates a request with no scopes or extra parameters.
    #[must_use]
    pub fn new(redirect_url: impl Into<String>) -> Self {
        Self {
            redirect_url: redirect_url.into(),
            scope: BTreeSet::new(),
            extra_params: BTreeMap::new(),
        }
    }

    /// Adds a scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope.insert(scope.into());
        self
    }

    /// Adds several scopes.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope.extend(scopes.into_iter().map(Into::into));
        self
    }

    /// Adds an extra query parameter.
    #[must_use]
    pub fn with_extra_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(name.into(), value.into());
        self
    }
}

/// Tokens returned by a successful code exchange.
///
/// Consumed immediately to produce an identity and then dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenExchangeResult {
    access_token: String,
    id_token: String,
}

impl TokenExchangeResult {
    /// Creates a result from the raw tokens.
    #[must_use]
    pub fn new(access_token: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            id_token: id_token.into(),
        }
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the compact identity token.
    #[must_use]
    pub fn id_token(&self) -> &str {
        &self.id_token
    }
}

impl fmt::Debug for TokenExchangeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenExchangeResult")
            .field("access_token", &"[redacted]")
            .field("id_token", &"[redacted]")
            .finish()
    }
}
