//! # Lifecycle Actions
//!
//! Tagged events emitted by the orchestration flows. Every operation
//! emits a `*Requested` action followed by exactly one terminal
//! `*Succeeded` or `*Failed` action; a consumer (typically a reducer over
//! the persisted state) applies them in arrival order.

use crate::checkout::{Checkout, Customer};
use crate::error::CheckoutError;
use crate::order::{Order, OrderMeta};

/// Actions emitted by the billing address flows
#[derive(Debug)]
pub enum BillingAddressAction {
    ContinueAsGuestRequested,
    ContinueAsGuestSucceeded(Checkout),
    ContinueAsGuestFailed(CheckoutError),

    UpdateBillingAddressRequested,
    UpdateBillingAddressSucceeded(Checkout),
    UpdateBillingAddressFailed(CheckoutError),
}

impl BillingAddressAction {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ContinueAsGuestFailed(_) | Self::UpdateBillingAddressFailed(_)
        )
    }
}

/// Actions emitted by the customer consent sub-flow
#[derive(Debug)]
pub enum CustomerAction {
    UpdateCustomerRequested,
    UpdateCustomerSucceeded(Customer),
    UpdateCustomerFailed(CheckoutError),
}

impl CustomerAction {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::UpdateCustomerFailed(_))
    }
}

/// Actions emitted by the order flows
#[derive(Debug)]
pub enum OrderAction {
    LoadOrderRequested,
    LoadOrderSucceeded(Order),
    LoadOrderFailed(CheckoutError),

    SubmitOrderRequested,
    SubmitOrderSucceeded { order: Order, meta: OrderMeta },
    SubmitOrderFailed(CheckoutError),

    FinalizeOrderRequested,
    FinalizeOrderSucceeded(Order),
    FinalizeOrderFailed(CheckoutError),
}

impl OrderAction {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::LoadOrderFailed(_) | Self::SubmitOrderFailed(_) | Self::FinalizeOrderFailed(_)
        )
    }
}

/// Union of the actions delivered on the merged guest continuation
/// stream, which interleaves the address flow with the consent flow
#[derive(Debug)]
pub enum CheckoutAction {
    BillingAddress(BillingAddressAction),
    Customer(CustomerAction),
}

impl CheckoutAction {
    pub fn is_failure(&self) -> bool {
        match self {
            Self::BillingAddress(action) => action.is_failure(),
            Self::Customer(action) => action.is_failure(),
        }
    }
}

impl From<BillingAddressAction> for CheckoutAction {
    fn from(action: BillingAddressAction) -> Self {
        Self::BillingAddress(action)
    }
}

impl From<CustomerAction> for CheckoutAction {
    fn from(action: CustomerAction) -> Self {
        Self::Customer(action)
    }
}
