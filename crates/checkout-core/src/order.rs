//! # Order Types
//!
//! Orders as returned by the server, the request body used to submit one,
//! and the metadata attached to a successful submission.

use crate::money::{Currency, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An order as loaded or created by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,

    /// Cart the order was created from, when still known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,

    pub currency: Currency,

    pub total: Price,

    /// True once payment has been captured and the order finalized
    pub is_complete: bool,

    pub created_at: DateTime<Utc>,
}

/// Selected payment for an order submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment method id (matches `PaymentMethodDescriptor::id`)
    pub method_id: String,

    /// Gateway, when the method routes through one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
}

/// Request body for order submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,

    #[serde(default)]
    pub use_store_credit: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,

    /// Idempotency key sent with the submission (prevents duplicate orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl OrderRequestBody {
    /// Create a request body with a generated idempotency key
    pub fn new() -> Self {
        Self {
            cart_id: None,
            customer_message: None,
            use_store_credit: false,
            payment: None,
            idempotency_key: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Builder: attach the originating cart
    pub fn with_cart_id(mut self, cart_id: impl Into<String>) -> Self {
        self.cart_id = Some(cart_id.into());
        self
    }

    /// Builder: select the payment
    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Builder: set a customer-facing order message
    pub fn with_customer_message(mut self, message: impl Into<String>) -> Self {
        self.customer_message = Some(message.into());
        self
    }
}

impl Default for OrderRequestBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata delivered with a successful order submission: the response
/// meta object merged with the authorization token taken from the
/// response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}
