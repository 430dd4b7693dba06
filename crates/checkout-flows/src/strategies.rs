//! # Bucket Payment Strategies
//!
//! The generic strategies behind the resolver's fallback tokens, and the
//! wiring that registers them. An unregistered payment method always
//! lands in one of these buckets:
//!
//! - `creditcard` - in-page methods; submits the order with its payment
//!   selection attached
//! - `offsite` - hosted redirect methods; submits, then `finalize`
//!   completes the order on return from the provider
//! - `offline` - out-of-band methods (cash on delivery, bank deposit);
//!   submits with no payment data
//! - `legacy` - methods outside the client-side allow-list, processed by
//!   the older server-driven path
//!
//! Provider-specific strategies register their own exact-match factories
//! on top of this wiring and take precedence in resolution.

use checkout_core::{
    CheckoutError, CheckoutResult, MissingDataSubject, Order, OrderRequestBody,
    OrderRequestSender, PaymentStrategy, PaymentStrategyRegistry, PaymentStrategyRegistryOptions,
    RequestOptions,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Deployment-level strategy settings, loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategySettings {
    /// Token used for tokenless lookups; `"creditcard"` when unset
    #[serde(default)]
    pub default_token: Option<String>,

    /// Methods handled client-side; anything else routes through the
    /// legacy bucket. Leave unset to disable legacy routing.
    #[serde(default)]
    pub client_side_providers: Option<Vec<String>>,
}

impl StrategySettings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> CheckoutResult<Self> {
        toml::from_str(content)
            .map_err(|err| CheckoutError::Configuration(format!("invalid strategy settings: {}", err)))
    }

    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CheckoutResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            CheckoutError::Configuration(format!(
                "failed to read strategy settings from {}: {}",
                path.display(),
                err
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Build the strategy registry with the four bucket strategies
/// registered. Exact-match provider factories can be registered on the
/// returned registry afterwards.
pub fn create_payment_strategy_registry(
    sender: Arc<dyn OrderRequestSender>,
    settings: StrategySettings,
) -> CheckoutResult<PaymentStrategyRegistry> {
    let mut registry = PaymentStrategyRegistry::new(PaymentStrategyRegistryOptions {
        default_token: settings
            .default_token
            .or_else(|| Some("creditcard".to_string())),
        client_side_providers: settings.client_side_providers,
    });

    {
        let sender = Arc::clone(&sender);
        registry.register("creditcard", move || {
            Arc::new(CreditCardPaymentStrategy::new(Arc::clone(&sender)))
        })?;
    }
    {
        let sender = Arc::clone(&sender);
        registry.register("offsite", move || {
            Arc::new(OffsitePaymentStrategy::new(Arc::clone(&sender)))
        })?;
    }
    {
        let sender = Arc::clone(&sender);
        registry.register("offline", move || {
            Arc::new(OfflinePaymentStrategy::new(Arc::clone(&sender)))
        })?;
    }
    registry.register("legacy", move || {
        Arc::new(LegacyPaymentStrategy::new(Arc::clone(&sender)))
    })?;

    Ok(registry)
}

async fn submit_through(
    sender: &dyn OrderRequestSender,
    payload: &OrderRequestBody,
    options: &RequestOptions,
) -> CheckoutResult<Order> {
    let response = sender.submit_order(payload, options).await?;
    Ok(response.body.data)
}

/// Default bucket: in-page payment methods with instrument data
pub struct CreditCardPaymentStrategy {
    sender: Arc<dyn OrderRequestSender>,
}

impl CreditCardPaymentStrategy {
    pub fn new(sender: Arc<dyn OrderRequestSender>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl PaymentStrategy for CreditCardPaymentStrategy {
    async fn execute(
        &self,
        payload: &OrderRequestBody,
        options: &RequestOptions,
    ) -> CheckoutResult<Order> {
        // In-page methods cannot submit without a payment selection.
        if payload.payment.is_none() {
            return Err(CheckoutError::MissingData(MissingDataSubject::Payment));
        }

        debug!("submitting order with in-page payment");
        submit_through(self.sender.as_ref(), payload, options).await
    }

    fn name(&self) -> &'static str {
        "creditcard"
    }
}

/// Hosted redirect methods: the provider completes payment off-site and
/// the order is finalized on return
pub struct OffsitePaymentStrategy {
    sender: Arc<dyn OrderRequestSender>,
    pending_order: Mutex<Option<String>>,
}

impl OffsitePaymentStrategy {
    pub fn new(sender: Arc<dyn OrderRequestSender>) -> Self {
        Self {
            sender,
            pending_order: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PaymentStrategy for OffsitePaymentStrategy {
    async fn execute(
        &self,
        payload: &OrderRequestBody,
        options: &RequestOptions,
    ) -> CheckoutResult<Order> {
        let order = submit_through(self.sender.as_ref(), payload, options).await?;

        info!(order_id = %order.id, "order submitted, awaiting off-site payment");
        *self.pending_order.lock().expect("pending order lock poisoned") =
            Some(order.id.clone());

        Ok(order)
    }

    async fn finalize(&self, options: &RequestOptions) -> CheckoutResult<()> {
        let order_id = self
            .pending_order
            .lock()
            .expect("pending order lock poisoned")
            .take()
            .ok_or(CheckoutError::MissingData(MissingDataSubject::Order))?;

        self.sender.finalize_order(&order_id, options).await?;
        info!(%order_id, "off-site order finalized");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "offsite"
    }
}

/// Out-of-band methods: the order is submitted with no payment data and
/// settled outside the checkout
pub struct OfflinePaymentStrategy {
    sender: Arc<dyn OrderRequestSender>,
}

impl OfflinePaymentStrategy {
    pub fn new(sender: Arc<dyn OrderRequestSender>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl PaymentStrategy for OfflinePaymentStrategy {
    async fn execute(
        &self,
        payload: &OrderRequestBody,
        options: &RequestOptions,
    ) -> CheckoutResult<Order> {
        let mut payload = payload.clone();
        payload.payment = None;

        debug!("submitting order for out-of-band settlement");
        submit_through(self.sender.as_ref(), &payload, options).await
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

/// Methods kept on the older server-driven path: the submission is
/// passed through untouched and the server drives payment processing
pub struct LegacyPaymentStrategy {
    sender: Arc<dyn OrderRequestSender>,
}

impl LegacyPaymentStrategy {
    pub fn new(sender: Arc<dyn OrderRequestSender>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl PaymentStrategy for LegacyPaymentStrategy {
    async fn execute(
        &self,
        payload: &OrderRequestBody,
        options: &RequestOptions,
    ) -> CheckoutResult<Order> {
        debug!("submitting order through server-driven payment path");
        submit_through(self.sender.as_ref(), payload, options).await
    }

    fn name(&self) -> &'static str {
        "legacy"
    }
}
