//! Subscription provider trait.

use crate::error::BillingError;
use async_trait::async_trait;

/// Source of subscription status and payment links.
#[async_trait]
pub trait SubscriptionProvider: Send + Sync {
    /// Returns whether `email` has at least one subscription on file.
    ///
    /// An email with no customer record is not a subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ProviderUnavailable`] if the provider cannot
    /// answer.
    async fn is_active_subscriber(&self, email: &str) -> Result<bool, BillingError>;

    /// Returns the payment link with `email` prefilled.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidPaymentLink`] if the configured link is
    /// not a URL.
    fn payment_url(&self, email: &str) -> Result<String, BillingError>;
}
