//! # Billing Address Types
//!
//! Billing address snapshots and request payloads, plus the guest
//! credentials used to continue a checkout without signing in.
//!
//! All address fields are optional: the same shape serves as the stored
//! snapshot and as the partial update payload. The presence of `id`
//! distinguishes an existing record (update) from a new one (create).

use serde::{Deserialize, Serialize};

/// A billing address, stored or outgoing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    /// Server-assigned address record id; present only for stored addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl BillingAddress {
    /// True when this address has no server-side record yet
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Copy of this address with the `country` field cleared.
    /// Stored country values are derived server-side and must not be
    /// echoed back on guest continuation.
    pub fn without_country(&self) -> Self {
        Self {
            country: None,
            ..self.clone()
        }
    }

    /// Minimal payload carrying only the guest's email
    pub fn from_credentials(credentials: &GuestCredentials) -> Self {
        Self {
            email: Some(credentials.email.clone()),
            ..Self::default()
        }
    }
}

/// Credentials supplied when continuing a checkout as a guest.
///
/// `marketing_email_consent` is tri-state: `Some(true)` opts in,
/// `Some(false)` opts out, `None` leaves the stored consent untouched
/// and suppresses the consent update entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCredentials {
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_email_consent: Option<bool>,
}

impl GuestCredentials {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            marketing_email_consent: None,
        }
    }

    /// Builder: set the marketing consent decision
    pub fn with_marketing_consent(mut self, consent: bool) -> Self {
        self.marketing_email_consent = Some(consent);
        self
    }
}
