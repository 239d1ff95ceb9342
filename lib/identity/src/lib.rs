//! Identity provider client for paygate.
//!
//! This crate implements the client side of the OAuth2 authorization-code
//! flow against an external identity provider (Google by default):
//! - building the provider-facing authorization URL
//! - exchanging a single-use authorization code for tokens
//! - reading the `email` claim out of the returned identity token
//!
//! # Trust boundary
//!
//! [`extract_identity`] does **not** verify the identity token's signature.
//! It is only ever applied to a token that was just returned by the
//! provider's token endpoint over TLS in the same exchange; tokens from any
//! other channel (storage, query strings, headers) must not be passed to it.
//!
//! # Example
//!
//! ```
//! use paygate_identity::{AuthorizationRequest, ClientCredentials, IdentityClient, IdentityConfig};
//! use paygate_identity::IdentityProvider;
//! use std::time::Duration;
//!
//! let credentials = ClientCredentials::new("client-id", "client-secret");
//! let client = IdentityClient::new(IdentityConfig::default(), credentials, Duration::from_secs(30))
//!     .expect("valid configuration");
//!
//! let request = AuthorizationRequest::new("https://app.example.com/")
//!     .with_scope("email")
//!     .with_extra_param("access_type", "offline");
//! let url = client.build_authorization_url(&request).expect("absolute redirect");
//! assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod request;
pub mod token;

pub use client::IdentityClient;
pub use config::{ClientCredentials, IdentityConfig};
pub use error::IdentityError;
pub use provider::IdentityProvider;
pub use request::{AuthorizationRequest, TokenExchangeResult};
pub use token::extract_identity;
