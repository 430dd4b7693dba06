//! # Transport Contracts
//!
//! Boundary traits for the HTTP request senders consumed by the
//! orchestration flows, plus the response envelope and the transport
//! error type. `checkout-client` provides the reqwest implementation;
//! tests substitute hand-rolled mocks.

use crate::address::BillingAddress;
use crate::cart::CartSnapshot;
use crate::checkout::{Checkout, Customer};
use crate::order::{Order, OrderRequestBody};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Per-request options forwarded to the transport
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the client's default timeout when set
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Response headers the flows care about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// Order authorization token issued on submission
    pub token: Option<String>,
}

/// A transport response: decoded body plus selected headers
#[derive(Debug, Clone)]
pub struct TransportResponse<T> {
    pub body: T,
    pub headers: ResponseHeaders,
}

impl<T> TransportResponse<T> {
    /// Wrap a body with empty headers
    pub fn new(body: T) -> Self {
        Self {
            body,
            headers: ResponseHeaders::default(),
        }
    }

    /// Builder: attach headers
    pub fn with_headers(mut self, headers: ResponseHeaders) -> Self {
        self.headers = headers;
        self
    }
}

/// Transport-level failures, before domain classification
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection-level failure; the request may not have reached the server
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// Result type alias for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Body of the customer consent update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    pub email: String,
    pub accepts_marketing: bool,
}

/// Order endpoints respond with the order under `data` plus an optional
/// meta object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponseBody {
    pub data: Order,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Billing address create/update operations
#[async_trait]
pub trait AddressRequestSender: Send + Sync {
    async fn create_address(
        &self,
        checkout_id: &str,
        body: &BillingAddress,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<Checkout>>;

    async fn update_address(
        &self,
        checkout_id: &str,
        body: &BillingAddress,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<Checkout>>;
}

/// Customer update operations
#[async_trait]
pub trait CustomerRequestSender: Send + Sync {
    async fn update_customer(
        &self,
        body: &UpdateCustomerRequest,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<Customer>>;
}

/// Order lifecycle operations plus the cart fetch used for verification
#[async_trait]
pub trait OrderRequestSender: Send + Sync {
    async fn load_order(
        &self,
        order_id: &str,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<OrderResponseBody>>;

    async fn submit_order(
        &self,
        payload: &OrderRequestBody,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<OrderResponseBody>>;

    async fn finalize_order(
        &self,
        order_id: &str,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<OrderResponseBody>>;

    async fn load_cart(
        &self,
        options: &RequestOptions,
    ) -> TransportResult<TransportResponse<CartSnapshot>>;
}
