//! Startup wiring: secrets, provider clients, and the gate.

use crate::config::ServerConfig;
use crate::error::StartupError;
use paygate_billing::{BillingCredentials, StripeClient};
use paygate_gate::{AllowlistPolicy, AuthGate, FileAllowlist, InMemorySessionStore};
use paygate_identity::{AuthorizationRequest, ClientCredentials, IdentityClient};
use paygate_secrets::{SecretProvider, SecretSource};
use tracing::info;

/// The gate as wired for the server.
pub type AppGate = AuthGate<IdentityClient, StripeClient, InMemorySessionStore, FileAllowlist>;

/// Resolves credentials and builds the gate.
///
/// Identity credentials always come from the secret source. Billing
/// credentials come from the secret source in live mode and from
/// configuration in sandbox mode.
///
/// # Errors
///
/// Returns an error if a secret cannot be resolved or is malformed, a
/// mode-specific setting is missing, or a client cannot be built.
pub async fn build_gate<S: SecretSource>(
    config: &ServerConfig,
    secrets: &SecretProvider<S>,
) -> paygate_core::Result<AppGate, StartupError> {
    let timeout = config.http.request_timeout();

    let redirect_url = config
        .identity
        .redirect_url_for(config.mode)
        .ok_or(StartupError::MissingRedirectUrl)?
        .to_string();

    let credentials = identity_credentials(config, secrets).await?;
    let identity =
        IdentityClient::new(config.identity.clone(), credentials, timeout).map_err(|e| {
            StartupError::ClientSetup {
                client: "identity",
                details: e.to_string(),
            }
        })?;

    let billing_credentials = billing_credentials(config, secrets).await?;
    let billing = StripeClient::new(config.billing.api_base.clone(), billing_credentials, timeout)
        .map_err(|e| StartupError::ClientSetup {
            client: "billing",
            details: e.to_string(),
        })?;

    let allowlist = AllowlistPolicy::new(
        config.allowlist.enabled,
        FileAllowlist::new(config.allowlist.path.clone()),
    );

    let mut authorization =
        AuthorizationRequest::new(redirect_url).with_scopes(config.identity.scopes());
    for (name, value) in config.identity.extra_params() {
        authorization = authorization.with_extra_param(name.as_str(), value.as_str());
    }

    info!(
        mode = %config.mode,
        redirect_url = %authorization.redirect_url,
        allowlist = config.allowlist.enabled,
        "Gate configured"
    );

    Ok(AuthGate::new(
        identity,
        billing,
        InMemorySessionStore::new(config.session.duration()),
        allowlist,
        authorization,
    ))
}

async fn identity_credentials<S: SecretSource>(
    config: &ServerConfig,
    secrets: &SecretProvider<S>,
) -> Result<ClientCredentials, StartupError> {
    let secret = config.identity.credentials_secret();
    let joined = resolve(config, secrets, secret).await?;
    ClientCredentials::from_joined(&joined).ok_or_else(|| StartupError::MalformedCredentials {
        secret: secret.to_string(),
    })
}

async fn billing_credentials<S: SecretSource>(
    config: &ServerConfig,
    secrets: &SecretProvider<S>,
) -> Result<BillingCredentials, StartupError> {
    if config.mode.is_sandbox() {
        return config
            .billing
            .sandbox_credentials()
            .ok_or(StartupError::MissingSandboxBilling);
    }

    let api_key = resolve(config, secrets, &config.billing.api_key_secret).await?;
    let payment_link = resolve(config, secrets, &config.billing.payment_link_secret).await?;
    Ok(BillingCredentials::new(api_key.trim(), payment_link.trim()))
}

async fn resolve<S: SecretSource>(
    config: &ServerConfig,
    secrets: &SecretProvider<S>,
    secret: &str,
) -> Result<String, StartupError> {
    secrets
        .resolve(&config.project_id, secret)
        .await
        .map_err(|report| StartupError::SecretUnavailable {
            secret: secret.to_string(),
            details: report.to_string(),
        })
}
