//! Integration tests for the Stripe client against a mock API.

use std::time::Duration;

use paygate_billing::{BillingCredentials, BillingError, StripeClient, SubscriptionProvider};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> StripeClient {
    StripeClient::new(
        format!("{}/v1", server.uri()),
        BillingCredentials::new("sk_test_123", "https://buy.stripe.com/test_abc"),
        Duration::from_secs(5),
    )
    .expect("client")
}

fn list(data: serde_json::Value) -> serde_json::Value {
    json!({ "object": "list", "has_more": false, "data": data })
}

async fn mount_customers(server: &MockServer, email: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(query_param("email", email))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(data)))
        .mount(server)
        .await;
}

async fn mount_subscriptions(server: &MockServer, customer: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/subscriptions"))
        .and(query_param("customer", customer))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(data)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn email_without_customer_is_not_subscriber() {
    let server = MockServer::start().await;
    mount_customers(&server, "nobody@x.com", json!([])).await;
    // No subscription lookup happens without a customer.
    Mock::given(method("GET"))
        .and(path("/v1/subscriptions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let active = client_for(&server)
        .is_active_subscriber("nobody@x.com")
        .await
        .expect("lookup succeeds");
    assert!(!active);
}

#[tokio::test]
async fn customer_without_subscriptions_is_not_subscriber() {
    let server = MockServer::start().await;
    mount_customers(
        &server,
        "a@x.com",
        json!([{ "id": "cus_1", "email": "a@x.com", "created": 1700000000 }]),
    )
    .await;
    mount_subscriptions(&server, "cus_1", json!([])).await;

    let active = client_for(&server)
        .is_active_subscriber("a@x.com")
        .await
        .expect("lookup succeeds");
    assert!(!active);
}

#[tokio::test]
async fn any_subscription_counts_regardless_of_status() {
    let server = MockServer::start().await;
    mount_customers(
        &server,
        "a@x.com",
        json!([{ "id": "cus_1", "email": "a@x.com", "created": 1700000000 }]),
    )
    .await;
    mount_subscriptions(
        &server,
        "cus_1",
        json!([{ "id": "sub_1", "status": "past_due" }]),
    )
    .await;

    let active = client_for(&server)
        .is_active_subscriber("a@x.com")
        .await
        .expect("lookup succeeds");
    assert!(active);
}

#[tokio::test]
async fn earliest_created_customer_wins() {
    let server = MockServer::start().await;
    mount_customers(
        &server,
        "a@x.com",
        json!([
            { "id": "cus_new", "email": "a@x.com", "created": 1800000000 },
            { "id": "cus_old", "email": "a@x.com", "created": 1600000000 }
        ]),
    )
    .await;
    mount_subscriptions(&server, "cus_old", json!([{ "id": "sub_1", "status": "active" }]))
        .await;
    mount_subscriptions(&server, "cus_new", json!([])).await;

    let active = client_for(&server)
        .is_active_subscriber("a@x.com")
        .await
        .expect("lookup succeeds");
    assert!(active);
}

#[tokio::test]
async fn earliest_customer_on_a_later_page_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(query_param("email", "a@x.com"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "has_more": true,
            "data": [
                { "id": "cus_newest", "email": "a@x.com", "created": 1700000300 },
                { "id": "cus_newer", "email": "a@x.com", "created": 1700000200 }
            ]
        })))
        .mount(&server)
        .await;
    // The follow-up page is matched first when the cursor is present.
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(query_param("starting_after", "cus_newer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(json!([
            { "id": "cus_oldest", "email": "a@x.com", "created": 1600000000 }
        ]))))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let customer = client_for(&server)
        .find_customer("a@x.com")
        .await
        .expect("lookup succeeds")
        .expect("customer found");
    assert_eq!(customer.id, "cus_oldest");
}

#[tokio::test]
async fn api_key_is_sent_as_basic_auth_username() {
    let server = MockServer::start().await;
    // base64("sk_test_123:")
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(header("authorization", "Basic c2tfdGVzdF8xMjM6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .is_active_subscriber("a@x.com")
        .await
        .expect("lookup succeeds");
}

#[tokio::test]
async fn rejected_api_key_is_provider_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "type": "invalid_request_error", "message": "Invalid API Key provided" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .is_active_subscriber("a@x.com")
        .await
        .unwrap_err();
    match err {
        BillingError::ProviderUnavailable { reason } => assert!(reason.contains("401")),
        other => panic!("expected ProviderUnavailable, got: {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_provider_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .is_active_subscriber("a@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::ProviderUnavailable { .. }));
}
