//! # Checkout and Customer Snapshots
//!
//! Read models for the current checkout session and its customer, as held
//! by the external state store and read through `CheckoutStateAccessor`.

use crate::address::BillingAddress;
use crate::cart::CartSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The current checkout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkout {
    pub id: String,

    pub cart: CartSnapshot,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BillingAddress>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// The customer attached to the checkout, when one exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// False for a signed-in account, true for an anonymous session
    pub is_guest: bool,

    /// Current marketing consent, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_marketing: Option<bool>,
}

impl Customer {
    /// An anonymous guest customer
    pub fn guest() -> Self {
        Self {
            id: None,
            email: None,
            is_guest: true,
            accepts_marketing: None,
        }
    }
}
