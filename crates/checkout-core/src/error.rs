//! # Checkout Error Types
//!
//! The closed error taxonomy for checkout orchestration. Transport
//! failures are classified into `CheckoutError::Request` via `From`;
//! everything else is a named domain error. No error here triggers an
//! automatic retry anywhere in the crate; retrying is the caller's call.

use crate::transport::TransportError;
use thiserror::Error;

/// Which precondition snapshot was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDataSubject {
    Checkout,
    Cart,
    Order,
    Payment,
}

impl std::fmt::Display for MissingDataSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checkout => write!(f, "checkout"),
            Self::Cart => write!(f, "cart"),
            Self::Order => write!(f, "order"),
            Self::Payment => write!(f, "payment"),
        }
    }
}

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required snapshot is absent from the current state
    #[error("missing required {0} data")]
    MissingData(MissingDataSubject),

    /// A signed-in customer is already attached to the checkout
    #[error("unable to continue as guest: a signed-in customer is present")]
    UnableToContinueAsGuest,

    /// No factory registered under the requested token
    #[error("no registered factory for token: {token}")]
    NotFound { token: String },

    /// The server cart no longer matches the supplied snapshot
    #[error("cart has changed since it was last loaded")]
    CartChanged,

    /// The marketing consent update failed; the cause is preserved
    #[error("failed to update customer consent")]
    UpdateCustomer(#[source] Box<CheckoutError>),

    /// Classified transport failure carrying the originating response
    #[error(transparent)]
    Request(#[from] TransportError),

    /// Invalid registry or client configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CheckoutError {
    /// Wrap a consent sub-call failure, preserving the cause
    pub fn update_customer(source: CheckoutError) -> Self {
        CheckoutError::UpdateCustomer(Box::new(source))
    }

    /// True for business-rule rejections that re-issuing the same call
    /// cannot fix
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            CheckoutError::MissingData(_)
                | CheckoutError::UnableToContinueAsGuest
                | CheckoutError::CartChanged
        )
    }

    /// True when the caller may reasonably retry after reconfirming state
    /// (re-fetching the cart for `CartChanged`, waiting out a network
    /// failure for `Request`)
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::CartChanged => true,
            CheckoutError::Request(TransportError::Network(_)) => true,
            CheckoutError::UpdateCustomer(source) => source.is_retryable(),
            _ => false,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
