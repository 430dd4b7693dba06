//! # Checkout HTTP Client
//!
//! reqwest-based implementation of the request-sender traits against the
//! storefront and internal checkout APIs. Connection failures map to
//! `TransportError::Network`, non-success statuses to
//! `TransportError::Status` with the response body preserved for
//! inspection, and undecodable bodies to `TransportError::Decode`.

use crate::config::ClientConfig;
use async_trait::async_trait;
use checkout_core::{
    AddressRequestSender, BillingAddress, CartSnapshot, Checkout, CheckoutResult, Customer,
    CustomerRequestSender, OrderRequestBody, OrderRequestSender, OrderResponseBody,
    RequestOptions, ResponseHeaders, TransportError, TransportResponse, TransportResult,
    UpdateCustomerRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Response header carrying the order authorization token
const TOKEN_HEADER: &str = "token";

/// HTTP client for the checkout API
pub struct CheckoutHttpClient {
    config: ClientConfig,
    client: Client,
}

impl CheckoutHttpClient {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.default_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create a client from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = ClientConfig::from_env()?;
        Ok(Self::new(config))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Send a request and decode the response envelope
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<T>> {
        let request = match options.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        let token = response
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "checkout API request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = serde_json::from_str(&body)
            .map_err(|err| TransportError::Decode(err.to_string()))?;

        Ok(TransportResponse {
            body,
            headers: ResponseHeaders { token },
        })
    }
}

#[async_trait]
impl AddressRequestSender for CheckoutHttpClient {
    #[instrument(skip(self, body, options), fields(checkout_id = %checkout_id))]
    async fn create_address(
        &self,
        checkout_id: &str,
        body: &BillingAddress,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<Checkout>> {
        debug!("creating billing address");

        let url = self.url(&format!(
            "/api/storefront/checkouts/{}/billing-address",
            checkout_id
        ));
        self.execute(self.client.post(&url).json(body), options)
            .await
    }

    #[instrument(skip(self, body, options), fields(checkout_id = %checkout_id))]
    async fn update_address(
        &self,
        checkout_id: &str,
        body: &BillingAddress,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<Checkout>> {
        debug!("updating billing address");

        let url = self.url(&format!(
            "/api/storefront/checkouts/{}/billing-address",
            checkout_id
        ));
        self.execute(self.client.put(&url).json(body), options)
            .await
    }
}

#[async_trait]
impl CustomerRequestSender for CheckoutHttpClient {
    #[instrument(skip_all)]
    async fn update_customer(
        &self,
        body: &UpdateCustomerRequest,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<Customer>> {
        debug!("updating customer");

        let url = self.url("/internalapi/v1/checkout/customer");
        self.execute(self.client.post(&url).json(body), options)
            .await
    }
}

#[async_trait]
impl OrderRequestSender for CheckoutHttpClient {
    #[instrument(skip(self, options), fields(order_id = %order_id))]
    async fn load_order(
        &self,
        order_id: &str,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<OrderResponseBody>> {
        let url = self.url(&format!("/internalapi/v1/checkout/order/{}", order_id));
        self.execute(self.client.get(&url), options).await
    }

    #[instrument(skip_all)]
    async fn submit_order(
        &self,
        payload: &OrderRequestBody,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<OrderResponseBody>> {
        debug!("submitting order");

        let url = self.url("/internalapi/v1/checkout/order");
        let mut request = self.client.post(&url).json(payload);

        if let Some(key) = &payload.idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        self.execute(request, options).await
    }

    #[instrument(skip(self, options), fields(order_id = %order_id))]
    async fn finalize_order(
        &self,
        order_id: &str,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<OrderResponseBody>> {
        debug!("finalizing order");

        let url = self.url(&format!("/internalapi/v1/checkout/order/{}", order_id));
        self.execute(self.client.post(&url), options).await
    }

    #[instrument(skip_all)]
    async fn load_cart(
        &self,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<CartSnapshot>> {
        let url = self.url("/internalapi/v1/checkout/cart");
        self.execute(self.client.get(&url), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Currency, Order, Price};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cart_fixture() -> CartSnapshot {
        CartSnapshot {
            id: "cart-1".to_string(),
            currency: Currency::USD,
            line_items: Vec::new(),
            base_amount: Price::zero(Currency::USD),
            discount_amount: Price::zero(Currency::USD),
            cart_amount: Price::zero(Currency::USD),
            updated_at: chrono::Utc::now(),
        }
    }

    fn checkout_fixture() -> Checkout {
        Checkout {
            id: "checkout-1".to_string(),
            cart: cart_fixture(),
            billing_address: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn order_body_fixture() -> OrderResponseBody {
        OrderResponseBody {
            data: Order {
                id: "order-1".to_string(),
                cart_id: Some("cart-1".to_string()),
                currency: Currency::USD,
                total: Price::new(3000, Currency::USD),
                is_complete: false,
                created_at: chrono::Utc::now(),
            },
            meta: None,
        }
    }

    fn client_for(server: &MockServer) -> CheckoutHttpClient {
        CheckoutHttpClient::new(ClientConfig::new(server.uri()).unwrap())
    }

    #[tokio::test]
    async fn test_create_address_posts_payload() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        let payload = BillingAddress {
            email: Some("guest@example.com".to_string()),
            ..BillingAddress::default()
        };

        Mock::given(method("POST"))
            .and(path("/api/storefront/checkouts/checkout-1/billing-address"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(checkout_fixture()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client
            .create_address("checkout-1", &payload, &RequestOptions::default())
            .await?;

        assert_eq!(response.body.id, "checkout-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_address_uses_put() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/storefront/checkouts/checkout-1/billing-address"))
            .respond_with(ResponseTemplate::new(200).set_body_json(checkout_fixture()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let payload = BillingAddress {
            id: Some("5".to_string()),
            ..BillingAddress::default()
        };
        client
            .update_address("checkout-1", &payload, &RequestOptions::default())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_order_extracts_token_header() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        let payload = OrderRequestBody::new();
        let key = payload.idempotency_key.clone().unwrap();

        Mock::given(method("POST"))
            .and(path("/internalapi/v1/checkout/order"))
            .and(header("Idempotency-Key", key.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(order_body_fixture())
                    .insert_header("token", "auth-jwt"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client
            .submit_order(&payload, &RequestOptions::default())
            .await?;

        assert_eq!(response.headers.token.as_deref(), Some("auth-jwt"));
        assert_eq!(response.body.data.id, "order-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_error_status_preserves_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/internalapi/v1/checkout/order/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such order"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .load_order("missing", &RequestOptions::default())
            .await
            .unwrap_err();

        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such order");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/internalapi/v1/checkout/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .load_cart(&RequestOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        // Port 9 (discard) is not listening.
        let client =
            CheckoutHttpClient::new(ClientConfig::new("http://127.0.0.1:9").unwrap());

        let err = client
            .load_cart(&RequestOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Network(_)));
    }
}
