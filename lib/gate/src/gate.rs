//! The gate state machine.

use crate::allowlist::{AllowlistPolicy, AllowlistSource};
use crate::context::RequestContext;
use crate::decision::GateDecision;
use crate::error::GateError;
use crate::session::{SessionState, SessionStore};
use paygate_billing::SubscriptionProvider;
use paygate_core::{Identity, SessionId};
use paygate_identity::{AuthorizationRequest, IdentityError, IdentityProvider};
use tracing::{debug, error, info, instrument, warn};

/// Decides whether a request may reach the application.
///
/// Checks run in order identity, allowlist, billing, so the local checks
/// short-circuit the billing network call. Session state is written only
/// after the provider call it depends on has succeeded.
pub struct AuthGate<I, B, S, A> {
    identity: I,
    billing: B,
    sessions: S,
    allowlist: AllowlistPolicy<A>,
    authorization: AuthorizationRequest,
}

impl<I, B, S, A> AuthGate<I, B, S, A>
where
    I: IdentityProvider,
    B: SubscriptionProvider,
    S: SessionStore,
    A: AllowlistSource,
{
    /// Creates a gate.
    ///
    /// `authorization` is the request used to build login links; its redirect
    /// URL is also sent with every code exchange.
    pub fn new(
        identity: I,
        billing: B,
        sessions: S,
        allowlist: AllowlistPolicy<A>,
        authorization: AuthorizationRequest,
    ) -> Self {
        Self {
            identity,
            billing,
            sessions,
            allowlist,
            authorization,
        }
    }

    /// Returns the session store.
    #[must_use]
    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Evaluates one request.
    ///
    /// A callback code in `ctx` is consumed whether or not the exchange
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the login link cannot be built, the allowlist
    /// cannot be read, or the billing provider fails. Login-branch failures
    /// are not errors; they produce a login redirect.
    #[instrument(skip(self, ctx), fields(session_id = %ctx.session_id()))]
    pub async fn evaluate(
        &self,
        ctx: &mut RequestContext,
    ) -> paygate_core::Result<GateDecision, GateError> {
        let session_id = ctx.session_id().clone();
        let state = self.sessions.get(&session_id).await.unwrap_or_default();

        let identity = match state.identity() {
            Some(identity) => identity.clone(),
            None => match ctx.take_callback_code() {
                Some(code) => match self.authenticate(&session_id, &code).await {
                    Ok(identity) => identity,
                    Err(e) => {
                        let exchange_failure =
                            matches!(e, IdentityError::TokenExchangeFailed { .. }).then_some(e);
                        return self.login_redirect(exchange_failure);
                    }
                },
                None => return self.login_redirect(None),
            },
        };

        match self.allowlist.check(identity.email()).await {
            Ok(true) => {}
            Ok(false) => {
                info!(email = %identity, "Identity not on allowlist");
                return Ok(GateDecision::Denied { identity });
            }
            Err(e) => {
                error!(error = %e, "Allowlist unavailable");
                return Err(e.into());
            }
        }

        self.check_subscription(&session_id, identity).await
    }

    /// Clears the session and re-evaluates it with an empty request.
    ///
    /// # Errors
    ///
    /// Returns an error if the login link cannot be built.
    #[instrument(skip(self))]
    pub async fn logout(
        &self,
        session_id: &SessionId,
    ) -> paygate_core::Result<GateDecision, GateError> {
        self.sessions.clear(session_id).await;
        info!("Session logged out");
        self.evaluate(&mut RequestContext::new(session_id.clone()))
            .await
    }

    async fn authenticate(
        &self,
        session_id: &SessionId,
        code: &str,
    ) -> Result<Identity, IdentityError> {
        let tokens = self
            .identity
            .exchange_code_for_token(code, &self.authorization.redirect_url)
            .await
            .inspect_err(|e| warn!(error = %e, "Authorization code exchange failed"))?;

        let identity = self
            .identity
            .extract_identity(&tokens)
            .inspect_err(|e| warn!(error = %e, "Identity token rejected"))?;

        self.sessions
            .put(session_id, SessionState::authenticated(identity.clone()))
            .await;
        info!(email = %identity, "Identity resolved");
        Ok(identity)
    }

    fn login_redirect(
        &self,
        exchange_failure: Option<IdentityError>,
    ) -> paygate_core::Result<GateDecision, GateError> {
        let url = self
            .identity
            .build_authorization_url(&self.authorization)
            .map_err(GateError::from)?;
        debug!("Redirecting to login");
        Ok(GateDecision::RedirectToLogin {
            url,
            exchange_failure,
        })
    }

    async fn check_subscription(
        &self,
        session_id: &SessionId,
        identity: Identity,
    ) -> paygate_core::Result<GateDecision, GateError> {
        let subscribed = match self.billing.is_active_subscriber(identity.email()).await {
            Ok(subscribed) => subscribed,
            Err(e) => {
                error!(error = %e, "Subscription lookup failed");
                return Err(GateError::from(e).into());
            }
        };

        // A logout may have landed while billing was in flight.
        match self.sessions.get(session_id).await {
            Some(mut state) if state.identity() == Some(&identity) => {
                state.record_subscription(subscribed);
                self.sessions.put(session_id, state).await;
            }
            _ => debug!("Session changed during lookup; status not recorded"),
        }

        if subscribed {
            debug!(email = %identity, "Subscriber admitted");
            return Ok(GateDecision::Proceed { identity });
        }

        info!(email = %identity, "Identity has no subscription");
        let url = self
            .billing
            .payment_url(identity.email())
            .map_err(GateError::from)?;
        Ok(GateDecision::RedirectToPayment { url, identity })
    }
}
