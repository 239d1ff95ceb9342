//! HTTP routes: the gated index, logout, and health check.

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use paygate_core::SessionId;
use paygate_gate::{GateDecision, RequestContext, SessionStore};
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::bootstrap::AppGate;
use crate::config::SessionConfig;
use crate::pages::{self, PageSettings};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "paygate_session";

/// Shared application state.
pub struct AppState {
    /// The gate every page request goes through.
    pub gate: AppGate,
    /// Page text and styling.
    pub pages: PageSettings,
    /// Session cookie settings.
    pub session: SessionConfig,
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/logout", get(logout))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameters on the index, including the provider's callback.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    code: Option<String>,
    error: Option<String>,
}

fn session_cookie(id: &SessionId, config: &SessionConfig) -> Cookie<'static> {
    let max_age = TimeDuration::try_from(config.duration()).unwrap_or(TimeDuration::MAX);
    Cookie::build((SESSION_COOKIE, id.as_str().to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Evaluates the gate and renders its decision.
///
/// A request carrying a callback code is always answered with a redirect to
/// `/` so the code does not linger in the address bar or history. The login
/// is recorded under a freshly issued session id; whatever id the browser
/// presented beforehand is discarded.
pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<IndexQuery>,
) -> Response {
    let presented = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()));

    if let Some(reason) = &query.error {
        warn!(error = %reason, "Identity provider returned an error");
    }

    if let Some(code) = query.code.filter(|code| !code.is_empty()) {
        if let Some(previous) = &presented {
            state.gate.sessions().clear(previous).await;
        }
        let session_id = SessionId::generate();
        let jar = jar.add(session_cookie(&session_id, &state.session));
        let mut ctx = RequestContext::new(session_id).with_callback_code(code);

        match state.gate.evaluate(&mut ctx).await {
            Ok(GateDecision::RedirectToLogin {
                exchange_failure: Some(e),
                ..
            }) => warn!(error = %e, "Login callback rejected"),
            Ok(_) => {}
            Err(report) => error!("Gate evaluation failed after login: {report}"),
        }
        return (jar, Redirect::to("/")).into_response();
    }

    let (jar, session_id) = match presented {
        Some(id) => (jar, id),
        None => {
            let id = SessionId::generate();
            let jar = jar.add(session_cookie(&id, &state.session));
            (jar, id)
        }
    };

    let mut ctx = RequestContext::new(session_id);
    let page = match state.gate.evaluate(&mut ctx).await {
        Ok(GateDecision::RedirectToLogin { url, .. }) => pages::login(&url, &state.pages),
        Ok(GateDecision::RedirectToPayment { url, identity }) => {
            pages::payment(&url, identity.email(), &state.pages)
        }
        Ok(GateDecision::Denied { identity }) => {
            return (StatusCode::FORBIDDEN, jar, pages::denied(identity.email())).into_response();
        }
        Ok(GateDecision::Proceed { identity }) => pages::application(identity.email()),
        Err(report) => {
            error!("Gate evaluation failed: {report}");
            return (StatusCode::SERVICE_UNAVAILABLE, jar, pages::unavailable()).into_response();
        }
    };

    (jar, page).into_response()
}

/// Clears the session and sends the browser back to `/`.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session_id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
    {
        if let Err(report) = state.gate.logout(&session_id).await {
            error!("Logout re-evaluation failed: {report}");
        }
    }

    // Remove session cookie; the next visit starts a fresh session
    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), Redirect::to("/"))
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
