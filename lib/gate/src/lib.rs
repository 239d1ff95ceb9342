//! The paygate access gate.
//!
//! [`AuthGate`] decides, for one request, whether the application may render
//! or the browser has to go somewhere else first:
//!
//! ```text
//! UNAUTHENTICATED ──code──▶ AUTHENTICATING ──identity──▶ allowlist ──▶ billing
//!       ▲                                                    │            │
//!       │                                                 Denied    unpaid │ paid
//!       └──────────────────── logout ◀──────────────────────────── Payment / Proceed
//! ```
//!
//! Per-session state lives in an injected [`SessionStore`]; everything the
//! gate needs from the request travels in an explicit [`RequestContext`].

pub mod allowlist;
pub mod context;
pub mod decision;
pub mod error;
pub mod gate;
pub mod session;

pub use allowlist::{AllowlistPolicy, AllowlistSource, FileAllowlist, StaticAllowlist, is_permitted};
pub use context::RequestContext;
pub use decision::{GateDecision, GateState};
pub use error::GateError;
pub use gate::AuthGate;
pub use session::{InMemorySessionStore, SessionState, SessionStore};
