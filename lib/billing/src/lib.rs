//! Billing provider client for paygate.
//!
//! Answers one question about a logged-in email: does the billing provider
//! have at least one subscription on file for it? When it does not, the
//! caller sends the browser to a hosted payment link with the email
//! prefilled.
//!
//! [`StripeClient`] talks to the Stripe REST API. [`SubscriptionProvider`] is
//! the seam the gate depends on.

pub mod config;
pub mod error;
pub mod provider;
pub mod stripe;

pub use config::{BillingConfig, BillingCredentials};
pub use error::BillingError;
pub use provider::SubscriptionProvider;
pub use stripe::StripeClient;
