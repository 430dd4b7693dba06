//! # checkout-flows
//!
//! Orchestration flows for the checkout-kit engine.
//!
//! This crate provides:
//! - `BillingAddressActionCreator` for guest continuation and billing
//!   address updates
//! - `OrderActionCreator` for order load/submit/finalize, including the
//!   pre-submission cart consistency check
//! - `ActionStream` for consuming per-flow lifecycle actions
//! - The generic bucket payment strategies and
//!   `create_payment_strategy_registry` wiring
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_flows::{BillingAddressActionCreator, OrderActionCreator};
//! use checkout_core::{GuestCredentials, RequestOptions};
//!
//! let billing = BillingAddressActionCreator::new(state, address_sender, customer_sender);
//!
//! let mut stream = billing.continue_as_guest(
//!     GuestCredentials::new("guest@example.com").with_marketing_consent(true),
//!     RequestOptions::default(),
//! )?;
//!
//! while let Some(action) = stream.next().await {
//!     store.dispatch(action);
//! }
//! ```

pub mod billing;
pub mod order;
pub mod strategies;
pub mod stream;

// Re-exports for convenience
pub use billing::BillingAddressActionCreator;
pub use order::OrderActionCreator;
pub use strategies::{
    create_payment_strategy_registry, CreditCardPaymentStrategy, LegacyPaymentStrategy,
    OfflinePaymentStrategy, OffsitePaymentStrategy, StrategySettings,
};
pub use stream::ActionStream;
