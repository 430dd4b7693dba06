//! # Cart Types
//!
//! Server-loaded cart snapshots and the structural comparator used to
//! verify a client-held cart still matches server state before an order
//! is submitted. Snapshots are never mutated in place; a fresh snapshot
//! replaces the old one wholesale.

use crate::money::{Currency, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line item inside a cart snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Server-assigned line item id
    pub id: String,

    /// Product the line refers to
    pub product_id: String,

    /// Variant, when the product has options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,

    /// Display name (denormalized)
    pub name: String,

    pub quantity: u32,

    /// Per-unit price after discounts
    pub sale_price: Price,
}

/// A cart as loaded from the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub id: String,

    pub currency: Currency,

    pub line_items: Vec<CartLineItem>,

    /// Sum of line totals before discounts
    pub base_amount: Price,

    /// Total discount applied
    pub discount_amount: Price,

    /// Amount the customer pays
    pub cart_amount: Price,

    /// Last server-side modification time
    pub updated_at: DateTime<Utc>,
}

impl CartSnapshot {
    /// Total number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}

/// Structural equality check between two cart snapshots.
///
/// Compares identity-bearing content only: cart id, currency, amounts,
/// and every line item. The `updated_at` timestamp is excluded, so a
/// cart reloaded without changes still verifies equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartComparator;

impl CartComparator {
    pub fn new() -> Self {
        Self
    }

    pub fn is_equal(&self, a: &CartSnapshot, b: &CartSnapshot) -> bool {
        a.id == b.id
            && a.currency == b.currency
            && a.base_amount == b.base_amount
            && a.discount_amount == b.discount_amount
            && a.cart_amount == b.cart_amount
            && a.line_items == b.line_items
    }
}
