//! Secret resolution for paygate.
//!
//! Credentials (identity-provider client id/secret, billing API key and
//! payment link) are read once at process start through a [`SecretSource`]
//! and held read-only for the lifetime of the process.
//!
//! Two sources are provided:
//! - [`SecretManagerClient`]: Google Secret Manager over its REST API
//! - [`StaticSecretSource`]: an in-memory map for sandbox runs and tests
//!
//! # Example
//!
//! ```
//! use paygate_secrets::{SecretProvider, StaticSecretSource};
//!
//! let source = StaticSecretSource::new().with_secret("STRIPE_API_KEY", "sk_test_123");
//! let provider = SecretProvider::new(source);
//! assert_eq!(provider.source().len(), 1);
//! ```

pub mod error;
pub mod provider;
pub mod secret_manager;
pub mod source;

pub use error::SecretError;
pub use provider::SecretProvider;
pub use secret_manager::{SecretManagerClient, SecretManagerConfig};
pub use source::{LATEST_VERSION, SecretSource, StaticSecretSource};
