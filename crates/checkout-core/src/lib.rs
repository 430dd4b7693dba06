//! # checkout-core
//!
//! Core types and traits for the checkout-kit orchestration layer.
//!
//! This crate provides:
//! - `Registry` and `PaymentStrategyRegistry` for strategy resolution
//!   (token fallback chain with per-method instance caching)
//! - `PaymentStrategy` capability trait for payment handling
//! - `CartComparator` for the pre-submission cart consistency check
//! - Lifecycle action enums consumed by the state reducers
//! - Transport and state-access traits at the system boundary
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{
//!     PaymentMethodDescriptor, PaymentMethodType, PaymentStrategyRegistry,
//!     PaymentStrategyRegistryOptions,
//! };
//!
//! let mut registry = PaymentStrategyRegistry::new(PaymentStrategyRegistryOptions {
//!     default_token: Some("creditcard".to_string()),
//!     client_side_providers: Some(vec!["squarev2".to_string()]),
//! });
//!
//! registry.register("braintree", || make_braintree_strategy())?;
//!
//! let method = PaymentMethodDescriptor::new("card", PaymentMethodType::Standard)
//!     .with_gateway("braintree");
//! let strategy = registry.get_by_method(Some(&method))?;
//! ```

pub mod action;
pub mod address;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod method;
pub mod money;
pub mod order;
pub mod registry;
pub mod state;
pub mod strategy;
pub mod transport;

// Re-exports for convenience
pub use action::{BillingAddressAction, CheckoutAction, CustomerAction, OrderAction};
pub use address::{BillingAddress, GuestCredentials};
pub use cart::{CartComparator, CartLineItem, CartSnapshot};
pub use checkout::{Checkout, Customer};
pub use error::{CheckoutError, CheckoutResult, MissingDataSubject};
pub use method::{PaymentMethodDescriptor, PaymentMethodType};
pub use money::{Currency, Price};
pub use order::{Order, OrderMeta, OrderRequestBody, Payment};
pub use registry::Registry;
pub use state::CheckoutStateAccessor;
pub use strategy::{
    BoxedPaymentStrategy, PaymentStrategy, PaymentStrategyRegistry,
    PaymentStrategyRegistryOptions,
};
pub use transport::{
    AddressRequestSender, CustomerRequestSender, OrderRequestSender, OrderResponseBody,
    RequestOptions, ResponseHeaders, TransportError, TransportResponse, TransportResult,
    UpdateCustomerRequest,
};
