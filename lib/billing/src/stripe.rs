//! Stripe subscription lookups.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::config::BillingCredentials;
use crate::error::BillingError;
use crate::provider::SubscriptionProvider;

/// Query parameter Stripe payment links read the customer email from.
const PREFILLED_EMAIL_PARAM: &str = "prefilled_email";

/// Largest page size Stripe list endpoints accept.
const CUSTOMER_PAGE_SIZE: &str = "100";

/// Stripe REST client.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_base: String,
    credentials: BillingCredentials,
}

impl StripeClient {
    /// Creates a new Stripe client.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ProviderUnavailable`] if the HTTP client cannot
    /// be built.
    pub fn new(
        api_base: impl Into<String>,
        credentials: BillingCredentials,
        timeout: Duration,
    ) -> Result<Self, BillingError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BillingError::ProviderUnavailable {
                reason: format!("HTTP client error: {e}"),
            })?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Make an authenticated GET request to Stripe.
    async fn stripe_get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BillingError> {
        let url = format!("{}{endpoint}", self.api_base);

        let response = self
            .client
            .get(&url)
            .basic_auth(self.credentials.api_key(), Option::<&str>::None)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Stripe API request failed");
                BillingError::ProviderUnavailable {
                    reason: e.to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Stripe API error");
            return Err(BillingError::ProviderUnavailable {
                reason: format!("Stripe API error: {status}"),
            });
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, "Failed to parse Stripe response");
            BillingError::ProviderUnavailable {
                reason: format!("failed to parse response: {e}"),
            }
        })
    }

    /// Finds the customer record for an email.
    ///
    /// When several customers share the email, the earliest created wins.
    /// Stripe lists newest first, so every page is fetched before choosing.
    #[instrument(skip(self))]
    pub async fn find_customer(&self, email: &str) -> Result<Option<StripeCustomer>, BillingError> {
        let mut customers = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let mut query = vec![("email", email), ("limit", CUSTOMER_PAGE_SIZE)];
            if let Some(after) = starting_after.as_deref() {
                query.push(("starting_after", after));
            }
            let page: StripeList<StripeCustomer> = self.stripe_get("/customers", &query).await?;

            starting_after = page.data.last().map(|c| c.id.clone());
            let has_more = page.has_more;
            customers.extend(page.data);
            if !has_more || starting_after.is_none() {
                break;
            }
        }

        debug!(count = customers.len(), "Listed customers");
        // min_by_key keeps the first of equal keys, preserving provider order on ties.
        Ok(customers.into_iter().min_by_key(|c| c.created))
    }

    /// Returns whether the customer has any subscription on file.
    #[instrument(skip(self))]
    pub async fn has_subscription(&self, customer_id: &str) -> Result<bool, BillingError> {
        let subscriptions: StripeList<StripeSubscription> = self
            .stripe_get(
                "/subscriptions",
                &[("customer", customer_id), ("limit", "1")],
            )
            .await?;

        Ok(!subscriptions.data.is_empty())
    }
}

#[async_trait]
impl SubscriptionProvider for StripeClient {
    #[instrument(skip(self))]
    async fn is_active_subscriber(&self, email: &str) -> Result<bool, BillingError> {
        let Some(customer) = self.find_customer(email).await? else {
            info!("No customer record for email");
            return Ok(false);
        };

        let subscribed = self.has_subscription(&customer.id).await?;
        info!(customer_id = %customer.id, subscribed, "Resolved subscription status");
        Ok(subscribed)
    }

    fn payment_url(&self, email: &str) -> Result<String, BillingError> {
        let mut url = Url::parse(self.credentials.payment_link()).map_err(|e| {
            BillingError::InvalidPaymentLink {
                reason: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair(PREFILLED_EMAIL_PARAM, email);
        Ok(url.to_string())
    }
}

// Stripe API types

#[derive(Debug, Clone, Deserialize)]
pub struct StripeList<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Unix timestamp.
    #[serde(default)]
    pub created: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_link(link: &str) -> StripeClient {
        StripeClient::new(
            "https://api.stripe.com/v1",
            BillingCredentials::new("sk_test_1", link),
            Duration::from_secs(5),
        )
        .expect("client")
    }

    #[test]
    fn payment_url_prefills_encoded_email() {
        let client = client_with_link("https://buy.stripe.com/test_abc");
        let url = client.payment_url("a+b@x.com").expect("valid link");
        assert_eq!(
            url,
            "https://buy.stripe.com/test_abc?prefilled_email=a%2Bb%40x.com"
        );
    }

    #[test]
    fn payment_url_keeps_existing_query() {
        let client = client_with_link("https://buy.stripe.com/test_abc?locale=en");
        let url = client.payment_url("a@x.com").expect("valid link");
        assert_eq!(
            url,
            "https://buy.stripe.com/test_abc?locale=en&prefilled_email=a%40x.com"
        );
    }

    #[test]
    fn payment_url_rejects_non_url_link() {
        let client = client_with_link("not a link");
        let err = client.payment_url("a@x.com").unwrap_err();
        assert!(matches!(err, BillingError::InvalidPaymentLink { .. }));
    }

    #[test]
    fn customer_list_deserializes() {
        let json = r#"{
            "object": "list",
            "url": "/v1/customers",
            "has_more": false,
            "data": [{ "id": "cus_1", "object": "customer", "email": "a@x.com", "created": 1700000000 }]
        }"#;
        let list: StripeList<StripeCustomer> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].id, "cus_1");
        assert_eq!(list.data[0].created, 1_700_000_000);
    }
}
