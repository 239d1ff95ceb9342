//! Identity provider trait.

use crate::error::IdentityError;
use crate::request::{AuthorizationRequest, TokenExchangeResult};
use async_trait::async_trait;
use paygate_core::Identity;

/// Client side of an OAuth2 authorization-code flow.
///
/// Implemented by [`IdentityClient`](crate::IdentityClient) for real
/// providers and by fakes in tests.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the URL the browser is sent to for login.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidRedirect`] if the request's redirect
    /// URL is not absolute.
    fn build_authorization_url(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<String, IdentityError>;

    /// Builds a login URL from just a redirect URL and scopes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidRedirect`] if `redirect_url` is not
    /// absolute.
    fn authorization_url(
        &self,
        redirect_url: &str,
        scope: &[&str],
    ) -> Result<String, IdentityError> {
        let request = AuthorizationRequest::new(redirect_url).with_scopes(scope.iter().copied());
        self.build_authorization_url(&request)
    }

    /// Exchanges a single-use authorization code for tokens.
    ///
    /// `redirect_url` must be the same URL used to build the authorization URL.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::TokenExchangeFailed`] on any transport or
    /// provider failure, including reused or expired codes.
    async fn exchange_code_for_token(
        &self,
        code: &str,
        redirect_url: &str,
    ) -> Result<TokenExchangeResult, IdentityError>;

    /// Reads the identity out of the exchange result's identity token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedToken`] if the token cannot be decoded.
    fn extract_identity(&self, tokens: &TokenExchangeResult) -> Result<Identity, IdentityError> {
        crate::token::extract_identity(tokens.id_token())
    }
}
