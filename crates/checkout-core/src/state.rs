//! # State Access
//!
//! Read-only snapshot access to the externally held checkout state. The
//! persisted store and its reducers live outside this workspace; flows
//! only ever read through this trait and never write back directly.

use crate::address::BillingAddress;
use crate::checkout::{Checkout, Customer};

/// Snapshot reads against the current checkout state.
///
/// Implementations return owned clones so a flow keeps working against
/// the state observed at its start, even if the store moves on.
pub trait CheckoutStateAccessor: Send + Sync {
    fn checkout(&self) -> Option<Checkout>;

    fn customer(&self) -> Option<Customer>;

    fn billing_address(&self) -> Option<BillingAddress>;
}
