//! # checkout-client
//!
//! HTTP transport for checkout-kit-rs.
//!
//! This crate provides `CheckoutHttpClient`, the reqwest-based
//! implementation of the request-sender traits defined in
//! `checkout-core`. The orchestration flows in `checkout-flows` consume
//! those traits; tests substitute mocks, production wires this client.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_client::CheckoutHttpClient;
//! use checkout_flows::OrderActionCreator;
//! use std::sync::Arc;
//!
//! // CHECKOUT_API_BASE_URL from the environment
//! let client = Arc::new(CheckoutHttpClient::from_env()?);
//!
//! let orders = OrderActionCreator::new(client);
//! let mut stream = orders.submit_order(payload, Some(cart), Default::default());
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::CheckoutHttpClient;
pub use config::ClientConfig;
