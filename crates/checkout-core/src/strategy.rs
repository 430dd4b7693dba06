//! # Payment Strategy Resolution
//!
//! Core Strategy pattern trait for payment handling, and the registry
//! that resolves a payment method descriptor to a strategy instance
//! through an ordered fallback chain.
//!
//! A new integration registers an exact-match factory under its method id
//! (or gateway). Anything unregistered degrades to one of the generic
//! buckets: `"offline"` for out-of-band methods, `"legacy"` for methods
//! kept on the server-driven path, `"offsite"` for hosted redirects, and
//! `"creditcard"` for everything else.

use crate::error::CheckoutResult;
use crate::method::{PaymentMethodDescriptor, PaymentMethodType};
use crate::order::{Order, OrderRequestBody};
use crate::registry::Registry;
use crate::transport::RequestOptions;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability interface implemented by every payment strategy.
///
/// `execute` drives the order submission for the selected method.
/// `initialize` and `finalize` default to no-ops; strategies that need a
/// setup step or a post-redirect completion override them.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    async fn initialize(&self, options: &RequestOptions) -> CheckoutResult<()> {
        let _ = options;
        Ok(())
    }

    async fn execute(
        &self,
        payload: &OrderRequestBody,
        options: &RequestOptions,
    ) -> CheckoutResult<Order>;

    async fn finalize(&self, options: &RequestOptions) -> CheckoutResult<()> {
        let _ = options;
        Ok(())
    }

    /// Get the strategy name (for logging and diagnostics)
    fn name(&self) -> &'static str;
}

/// Type alias for a shared payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

impl std::fmt::Debug for dyn PaymentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentStrategy")
            .field("name", &self.name())
            .finish()
    }
}

/// Options for constructing a `PaymentStrategyRegistry`
#[derive(Debug, Clone, Default)]
pub struct PaymentStrategyRegistryOptions {
    /// Token returned for tokenless lookups; `"default"` when unset
    pub default_token: Option<String>,

    /// Methods handled client-side. A method outside this list is routed
    /// through the `"legacy"` bucket; no list disables legacy routing.
    pub client_side_providers: Option<Vec<String>>,
}

/// Registry resolving payment method descriptors to cached strategies
pub struct PaymentStrategyRegistry {
    registry: Registry<dyn PaymentStrategy>,
    client_side_providers: Option<Vec<String>>,
}

impl PaymentStrategyRegistry {
    pub fn new(options: PaymentStrategyRegistryOptions) -> Self {
        let registry = match options.default_token {
            Some(token) => Registry::with_default_token(token),
            None => Registry::new(),
        };

        Self {
            registry,
            client_side_providers: options.client_side_providers,
        }
    }

    /// Register a strategy factory under `token`.
    /// Duplicate tokens are rejected, same as `Registry::register`.
    pub fn register<F>(&mut self, token: impl Into<String>, factory: F) -> CheckoutResult<()>
    where
        F: Fn() -> BoxedPaymentStrategy + Send + Sync + 'static,
    {
        self.registry.register(token, factory)
    }

    pub fn has_factory(&self, token: &str) -> bool {
        self.registry.has_factory(token)
    }

    /// Resolve the strategy for a payment method.
    ///
    /// With no descriptor, the default strategy is returned. Otherwise
    /// the token is derived by the fallback chain and the instance is
    /// cached under the method identity (`gateway` or `id`), so two
    /// methods sharing a bucket token but differing in gateway hold
    /// distinct instances.
    pub fn get_by_method(
        &self,
        method: Option<&PaymentMethodDescriptor>,
    ) -> CheckoutResult<BoxedPaymentStrategy> {
        let Some(method) = method else {
            return self.registry.get(None, None);
        };

        let token = self.token_for(method);
        self.registry.get(Some(&token), Some(method.method_id()))
    }

    /// Ordered fallback chain, first match wins
    fn token_for(&self, method: &PaymentMethodDescriptor) -> String {
        let method_id = method.method_id();

        if self.registry.has_factory(method_id) {
            return method_id.to_string();
        }

        if method.method_type == PaymentMethodType::Offline {
            return "offline".to_string();
        }

        if self.is_legacy_method(method) {
            return "legacy".to_string();
        }

        if method.method_type == PaymentMethodType::Hosted {
            return "offsite".to_string();
        }

        "creditcard".to_string()
    }

    /// A method is legacy when an allow-list is configured and neither
    /// its id nor its gateway appears in it. Adyen-gatewayed methods are
    /// carved out: they are never routed through the legacy path.
    fn is_legacy_method(&self, method: &PaymentMethodDescriptor) -> bool {
        let Some(providers) = &self.client_side_providers else {
            return false;
        };

        if method.gateway.as_deref() == Some("adyen") {
            return false;
        }

        !providers
            .iter()
            .any(|id| method.id == *id || method.gateway.as_deref() == Some(id.as_str()))
    }
}
