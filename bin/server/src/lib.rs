//! paygate web host.
//!
//! Serves the gate over HTTP: every page request is evaluated by the
//! [`AuthGate`](paygate_gate::AuthGate) and answered with the login link,
//! the payment link, an access-denied page, or the application.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod pages;
pub mod routes;

pub use bootstrap::{AppGate, build_gate};
pub use config::ServerConfig;
pub use error::StartupError;
pub use routes::{AppState, router};
