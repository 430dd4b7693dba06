//! # Order Flows
//!
//! Orchestration of the order lifecycle: load, submit (with the
//! pre-submission cart consistency check), and finalize. Each operation
//! is a two-event lifecycle on its own stream; submission inserts the
//! cart verification between the requested action and the network call.

use crate::stream::{ActionStream, FLOW_CHANNEL_CAPACITY};
use checkout_core::{
    CartComparator, CartSnapshot, CheckoutError, CheckoutResult, OrderAction, OrderMeta,
    OrderRequestBody, OrderRequestSender, OrderResponseBody, RequestOptions, TransportResponse,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Creates the order action streams
pub struct OrderActionCreator {
    sender: Arc<dyn OrderRequestSender>,
    comparator: CartComparator,
}

impl OrderActionCreator {
    pub fn new(sender: Arc<dyn OrderRequestSender>) -> Self {
        Self {
            sender,
            comparator: CartComparator::new(),
        }
    }

    pub fn load_order(
        &self,
        order_id: impl Into<String>,
        options: RequestOptions,
    ) -> ActionStream<OrderAction> {
        let sender = Arc::clone(&self.sender);
        let order_id = order_id.into();

        let (tx, rx) = mpsc::channel(FLOW_CHANNEL_CAPACITY);
        let task = tokio::spawn(async move {
            let _ = tx.send(OrderAction::LoadOrderRequested).await;

            let action = match sender.load_order(&order_id, &options).await {
                Ok(response) => OrderAction::LoadOrderSucceeded(response.body.data),
                Err(err) => OrderAction::LoadOrderFailed(err.into()),
            };

            let _ = tx.send(action).await;
        });

        ActionStream::new(rx, vec![task])
    }

    /// Submit the order.
    ///
    /// When a previously loaded cart snapshot is supplied, the current
    /// cart is fetched and compared first; any mismatch, or any failure
    /// of the verification fetch itself, aborts the flow with
    /// `CartChanged` before the submit call is made. Without a snapshot
    /// the check is skipped and the order submits unconditionally.
    ///
    /// The success action carries the response meta merged with the
    /// authorization token from the response headers.
    #[instrument(skip_all, fields(cart_verified = cart.is_some()))]
    pub fn submit_order(
        &self,
        payload: OrderRequestBody,
        cart: Option<CartSnapshot>,
        options: RequestOptions,
    ) -> ActionStream<OrderAction> {
        let sender = Arc::clone(&self.sender);
        let comparator = self.comparator;

        let (tx, rx) = mpsc::channel(FLOW_CHANNEL_CAPACITY);
        let task = tokio::spawn(async move {
            let _ = tx.send(OrderAction::SubmitOrderRequested).await;

            let action =
                match verify_and_submit(sender.as_ref(), &comparator, &payload, cart, &options)
                    .await
                {
                    Ok(response) => {
                        let meta = OrderMeta {
                            token: response.headers.token,
                            extra: response.body.meta,
                        };
                        OrderAction::SubmitOrderSucceeded {
                            order: response.body.data,
                            meta,
                        }
                    }
                    Err(err) => OrderAction::SubmitOrderFailed(err),
                };

            let _ = tx.send(action).await;
        });

        ActionStream::new(rx, vec![task])
    }

    pub fn finalize_order(
        &self,
        order_id: impl Into<String>,
        options: RequestOptions,
    ) -> ActionStream<OrderAction> {
        let sender = Arc::clone(&self.sender);
        let order_id = order_id.into();

        let (tx, rx) = mpsc::channel(FLOW_CHANNEL_CAPACITY);
        let task = tokio::spawn(async move {
            let _ = tx.send(OrderAction::FinalizeOrderRequested).await;

            let action = match sender.finalize_order(&order_id, &options).await {
                Ok(response) => OrderAction::FinalizeOrderSucceeded(response.body.data),
                Err(err) => OrderAction::FinalizeOrderFailed(err.into()),
            };

            let _ = tx.send(action).await;
        });

        ActionStream::new(rx, vec![task])
    }
}

async fn verify_and_submit(
    sender: &dyn OrderRequestSender,
    comparator: &CartComparator,
    payload: &OrderRequestBody,
    cart: Option<CartSnapshot>,
    options: &RequestOptions,
) -> CheckoutResult<TransportResponse<OrderResponseBody>> {
    if let Some(existing) = cart {
        verify_cart(sender, comparator, &existing, options).await?;
    }

    sender
        .submit_order(payload, options)
        .await
        .map_err(CheckoutError::from)
}

/// Fetch the current cart and require structural equality with the
/// supplied snapshot. A failed fetch counts as a changed cart: the
/// caller cannot safely submit against state it could not confirm.
async fn verify_cart(
    sender: &dyn OrderRequestSender,
    comparator: &CartComparator,
    existing: &CartSnapshot,
    options: &RequestOptions,
) -> CheckoutResult<()> {
    match sender.load_cart(options).await {
        Ok(response) if comparator.is_equal(existing, &response.body) => {
            debug!(cart_id = %existing.id, "cart verified");
            Ok(())
        }
        Ok(_) => {
            warn!(cart_id = %existing.id, "cart changed since last load");
            Err(CheckoutError::CartChanged)
        }
        Err(err) => {
            warn!(cart_id = %existing.id, error = %err, "cart verification fetch failed");
            Err(CheckoutError::CartChanged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{
        CartLineItem, Currency, Order, Price, ResponseHeaders, TransportError,
    };
    use std::sync::Mutex;

    fn cart_fixture() -> CartSnapshot {
        CartSnapshot {
            id: "cart-1".to_string(),
            currency: Currency::USD,
            line_items: vec![CartLineItem {
                id: "li-1".to_string(),
                product_id: "prod-9".to_string(),
                variant_id: None,
                name: "Widget".to_string(),
                quantity: 2,
                sale_price: Price::new(1500, Currency::USD),
            }],
            base_amount: Price::new(3000, Currency::USD),
            discount_amount: Price::zero(Currency::USD),
            cart_amount: Price::new(3000, Currency::USD),
            updated_at: chrono::Utc::now(),
        }
    }

    fn order_fixture() -> Order {
        Order {
            id: "order-1".to_string(),
            cart_id: Some("cart-1".to_string()),
            currency: Currency::USD,
            total: Price::new(3000, Currency::USD),
            is_complete: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[derive(Default)]
    struct MockOrderSender {
        calls: Mutex<Vec<&'static str>>,
        server_cart: Option<CartSnapshot>,
        cart_fetch_fails: bool,
        submit_token: Option<String>,
        load_fails: bool,
    }

    impl MockOrderSender {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl OrderRequestSender for MockOrderSender {
        async fn load_order(
            &self,
            _order_id: &str,
            _options: &RequestOptions,
        ) -> checkout_core::TransportResult<TransportResponse<OrderResponseBody>> {
            self.record("load_order");

            if self.load_fails {
                Err(TransportError::Status {
                    status: 404,
                    body: "no such order".to_string(),
                })
            } else {
                Ok(TransportResponse::new(OrderResponseBody {
                    data: order_fixture(),
                    meta: None,
                }))
            }
        }

        async fn submit_order(
            &self,
            _payload: &OrderRequestBody,
            _options: &RequestOptions,
        ) -> checkout_core::TransportResult<TransportResponse<OrderResponseBody>> {
            self.record("submit_order");

            let response = TransportResponse::new(OrderResponseBody {
                data: order_fixture(),
                meta: Some(serde_json::json!({ "device_fingerprint": "df-1" })),
            })
            .with_headers(ResponseHeaders {
                token: self.submit_token.clone(),
            });

            Ok(response)
        }

        async fn finalize_order(
            &self,
            _order_id: &str,
            _options: &RequestOptions,
        ) -> checkout_core::TransportResult<TransportResponse<OrderResponseBody>> {
            self.record("finalize_order");

            let mut order = order_fixture();
            order.is_complete = true;
            Ok(TransportResponse::new(OrderResponseBody {
                data: order,
                meta: None,
            }))
        }

        async fn load_cart(
            &self,
            _options: &RequestOptions,
        ) -> checkout_core::TransportResult<TransportResponse<CartSnapshot>> {
            self.record("load_cart");

            if self.cart_fetch_fails {
                return Err(TransportError::Network("timeout".to_string()));
            }

            Ok(TransportResponse::new(
                self.server_cart.clone().unwrap_or_else(cart_fixture),
            ))
        }
    }

    #[tokio::test]
    async fn test_submit_without_snapshot_skips_verification() {
        let sender = Arc::new(MockOrderSender {
            submit_token: Some("auth-token".to_string()),
            ..MockOrderSender::default()
        });
        let actions =
            OrderActionCreator::new(Arc::clone(&sender) as Arc<dyn OrderRequestSender>)
                .submit_order(OrderRequestBody::new(), None, RequestOptions::default())
                .collect()
                .await;

        assert!(matches!(actions[0], OrderAction::SubmitOrderRequested));
        match &actions[1] {
            OrderAction::SubmitOrderSucceeded { order, meta } => {
                assert_eq!(order.id, "order-1");
                assert_eq!(meta.token.as_deref(), Some("auth-token"));
                assert!(meta.extra.is_some());
            }
            other => panic!("unexpected terminal action: {:?}", other),
        }

        assert_eq!(sender.calls(), vec!["submit_order"]);
    }

    #[tokio::test]
    async fn test_submit_with_matching_snapshot_proceeds() {
        let sender = Arc::new(MockOrderSender::default());
        let actions =
            OrderActionCreator::new(Arc::clone(&sender) as Arc<dyn OrderRequestSender>)
                .submit_order(
                    OrderRequestBody::new(),
                    Some(cart_fixture()),
                    RequestOptions::default(),
                )
                .collect()
                .await;

        assert!(matches!(
            actions[1],
            OrderAction::SubmitOrderSucceeded { .. }
        ));
        assert_eq!(sender.calls(), vec!["load_cart", "submit_order"]);
    }

    #[tokio::test]
    async fn test_submit_with_stale_snapshot_aborts() {
        let mut server_cart = cart_fixture();
        server_cart.line_items[0].quantity = 5;

        let sender = Arc::new(MockOrderSender {
            server_cart: Some(server_cart),
            ..MockOrderSender::default()
        });
        let actions =
            OrderActionCreator::new(Arc::clone(&sender) as Arc<dyn OrderRequestSender>)
                .submit_order(
                    OrderRequestBody::new(),
                    Some(cart_fixture()),
                    RequestOptions::default(),
                )
                .collect()
                .await;

        assert!(matches!(
            actions[1],
            OrderAction::SubmitOrderFailed(CheckoutError::CartChanged)
        ));

        // The submit call must never happen against a stale cart.
        assert_eq!(sender.calls(), vec!["load_cart"]);
    }

    #[tokio::test]
    async fn test_failed_verification_fetch_counts_as_changed_cart() {
        let sender = Arc::new(MockOrderSender {
            cart_fetch_fails: true,
            ..MockOrderSender::default()
        });
        let actions =
            OrderActionCreator::new(Arc::clone(&sender) as Arc<dyn OrderRequestSender>)
                .submit_order(
                    OrderRequestBody::new(),
                    Some(cart_fixture()),
                    RequestOptions::default(),
                )
                .collect()
                .await;

        assert!(matches!(
            actions[1],
            OrderAction::SubmitOrderFailed(CheckoutError::CartChanged)
        ));
        assert_eq!(sender.calls(), vec!["load_cart"]);
    }

    #[tokio::test]
    async fn test_load_order_lifecycle() {
        let sender = Arc::new(MockOrderSender::default());
        let actions =
            OrderActionCreator::new(Arc::clone(&sender) as Arc<dyn OrderRequestSender>)
                .load_order("order-1", RequestOptions::default())
                .collect()
                .await;

        assert!(matches!(actions[0], OrderAction::LoadOrderRequested));
        assert!(matches!(actions[1], OrderAction::LoadOrderSucceeded(_)));
        assert_eq!(actions.len(), 2);
    }

    #[tokio::test]
    async fn test_load_order_failure_is_classified() {
        let sender = Arc::new(MockOrderSender {
            load_fails: true,
            ..MockOrderSender::default()
        });
        let actions =
            OrderActionCreator::new(Arc::clone(&sender) as Arc<dyn OrderRequestSender>)
                .load_order("missing", RequestOptions::default())
                .collect()
                .await;

        match &actions[1] {
            OrderAction::LoadOrderFailed(CheckoutError::Request(TransportError::Status {
                status,
                ..
            })) => assert_eq!(*status, 404),
            other => panic!("unexpected terminal action: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_finalize_order_lifecycle() {
        let sender = Arc::new(MockOrderSender::default());
        let actions =
            OrderActionCreator::new(Arc::clone(&sender) as Arc<dyn OrderRequestSender>)
                .finalize_order("order-1", RequestOptions::default())
                .collect()
                .await;

        assert!(matches!(actions[0], OrderAction::FinalizeOrderRequested));
        match &actions[1] {
            OrderAction::FinalizeOrderSucceeded(order) => assert!(order.is_complete),
            other => panic!("unexpected terminal action: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancel_stops_delivery() {
        struct StalledSender;

        #[async_trait::async_trait]
        impl OrderRequestSender for StalledSender {
            async fn load_order(
                &self,
                _order_id: &str,
                _options: &RequestOptions,
            ) -> checkout_core::TransportResult<TransportResponse<OrderResponseBody>> {
                std::future::pending().await
            }

            async fn submit_order(
                &self,
                _payload: &OrderRequestBody,
                _options: &RequestOptions,
            ) -> checkout_core::TransportResult<TransportResponse<OrderResponseBody>> {
                std::future::pending().await
            }

            async fn finalize_order(
                &self,
                _order_id: &str,
                _options: &RequestOptions,
            ) -> checkout_core::TransportResult<TransportResponse<OrderResponseBody>> {
                std::future::pending().await
            }

            async fn load_cart(
                &self,
                _options: &RequestOptions,
            ) -> checkout_core::TransportResult<TransportResponse<CartSnapshot>> {
                std::future::pending().await
            }
        }

        let creator = OrderActionCreator::new(Arc::new(StalledSender));
        let mut stream =
            creator.submit_order(OrderRequestBody::new(), None, RequestOptions::default());

        assert!(matches!(
            stream.next().await,
            Some(OrderAction::SubmitOrderRequested)
        ));

        stream.cancel();
        assert!(stream.next().await.is_none());
    }
}
