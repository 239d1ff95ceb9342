//! OAuth2 authorization-code client backed by the `oauth2` crate.

use crate::config::{ClientCredentials, IdentityConfig};
use crate::error::IdentityError;
use crate::provider::IdentityProvider;
use crate::request::{AuthorizationRequest, TokenExchangeResult};
use async_trait::async_trait;
use oauth2::basic::{
    BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
    BasicTokenType,
};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, ExtraTokenFields, RedirectUrl,
    Scope, StandardRevocableToken, StandardTokenResponse, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Token endpoint fields beyond the OAuth2 standard set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdTokenFields {
    /// Compact identity token, present when an OpenID scope was granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl ExtraTokenFields for IdTokenFields {}

type ProviderTokenResponse = StandardTokenResponse<IdTokenFields, BasicTokenType>;

type ProviderClient = oauth2::Client<
    BasicErrorResponse,
    ProviderTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
>;

/// Identity provider client.
///
/// Holds validated endpoint URLs and a shared HTTP client. The OAuth2 client
/// itself is built per call since the redirect URL varies per request.
pub struct IdentityClient {
    credentials: ClientCredentials,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    http: reqwest::Client,
}

impl IdentityClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Configuration`] if an endpoint URL is invalid
    /// or the HTTP client cannot be built.
    pub fn new(
        config: IdentityConfig,
        credentials: ClientCredentials,
        timeout: Duration,
    ) -> Result<Self, IdentityError> {
        let auth_url =
            AuthUrl::new(config.auth_url().to_string()).map_err(|e| IdentityError::Configuration {
                reason: format!("invalid auth URL: {e}"),
            })?;
        let token_url = TokenUrl::new(config.token_url().to_string()).map_err(|e| {
            IdentityError::Configuration {
                reason: format!("invalid token URL: {e}"),
            }
        })?;

        // Following redirects at the token endpoint would leak the client secret.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Configuration {
                reason: format!("HTTP client error: {e}"),
            })?;

        Ok(Self {
            credentials,
            auth_url,
            token_url,
            http,
        })
    }

    /// Returns the client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    fn redirect(redirect_url: &str) -> Result<RedirectUrl, IdentityError> {
        RedirectUrl::new(redirect_url.to_string()).map_err(|e| IdentityError::InvalidRedirect {
            url: redirect_url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    fn build_authorization_url(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<String, IdentityError> {
        let client = ProviderClient::new(ClientId::new(self.credentials.client_id().to_string()))
            .set_auth_uri(self.auth_url.clone())
            .set_redirect_uri(Self::redirect(&request.redirect_url)?);

        let mut auth_request = client.authorize_url(CsrfToken::new_random);
        for scope in &request.scope {
            auth_request = auth_request.add_scope(Scope::new(scope.clone()));
        }
        for (name, value) in &request.extra_params {
            auth_request = auth_request.add_extra_param(name.as_str(), value.as_str());
        }

        let (url, _state) = auth_request.url();
        Ok(url.to_string())
    }

    #[instrument(skip(self, code))]
    async fn exchange_code_for_token(
        &self,
        code: &str,
        redirect_url: &str,
    ) -> Result<TokenExchangeResult, IdentityError> {
        let client = ProviderClient::new(ClientId::new(self.credentials.client_id().to_string()))
            .set_client_secret(ClientSecret::new(
                self.credentials.client_secret().to_string(),
            ))
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(Self::redirect(redirect_url)?);

        debug!("Exchanging authorization code");
        let token = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| {
                warn!(error = %e, "Token exchange rejected");
                IdentityError::TokenExchangeFailed {
                    reason: e.to_string(),
                }
            })?;

        let id_token = token.extra_fields().id_token.clone().ok_or_else(|| {
            IdentityError::TokenExchangeFailed {
                reason: "no id_token in response".to_string(),
            }
        })?;

        Ok(TokenExchangeResult::new(
            token.access_token().secret().clone(),
            id_token,
        ))
    }
}
