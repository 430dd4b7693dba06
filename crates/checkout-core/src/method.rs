//! # Payment Method Descriptors
//!
//! Identity and classification of a payment method as supplied by the
//! storefront configuration. The strategy resolver derives its lookup
//! token from these fields.

use serde::{Deserialize, Serialize};

/// Broad classification of how a payment method is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodType {
    /// Processed in-page with collected instrument data
    Standard,
    /// Settled out of band (cash on delivery, bank deposit)
    Offline,
    /// Redirects to a provider-hosted payment page
    Hosted,
    /// Anything else
    Other,
}

impl Default for PaymentMethodType {
    fn default() -> Self {
        PaymentMethodType::Standard
    }
}

/// Immutable descriptor of a configured payment method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodDescriptor {
    /// Method identifier (e.g. "braintree", "cod")
    pub id: String,

    /// Gateway the method is routed through, when it differs from the id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// Processing classification
    #[serde(default, rename = "type")]
    pub method_type: PaymentMethodType,
}

impl PaymentMethodDescriptor {
    pub fn new(id: impl Into<String>, method_type: PaymentMethodType) -> Self {
        Self {
            id: id.into(),
            gateway: None,
            method_type,
        }
    }

    /// Builder: route the method through a gateway
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = Some(gateway.into());
        self
    }

    /// The identity used for registry lookup and instance caching:
    /// the gateway when present, the method id otherwise.
    pub fn method_id(&self) -> &str {
        self.gateway.as_deref().unwrap_or(&self.id)
    }
}
