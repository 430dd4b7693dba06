//! # Billing Address Flows
//!
//! Orchestration of the billing address operations: guest continuation
//! (address write merged with an optional marketing consent update) and
//! the single-flow billing address update.
//!
//! Flows read their snapshots once, up front, through the state
//! accessor; precondition failures reject the call before any action is
//! emitted or any network request is dispatched.

use crate::stream::{ActionStream, FLOW_CHANNEL_CAPACITY};
use checkout_core::{
    AddressRequestSender, BillingAddress, BillingAddressAction, Checkout, CheckoutAction,
    CheckoutError, CheckoutResult, CheckoutStateAccessor, CustomerAction, CustomerRequestSender,
    GuestCredentials, MissingDataSubject, RequestOptions, TransportResponse, TransportResult,
    UpdateCustomerRequest,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Creates the billing address action streams
pub struct BillingAddressActionCreator {
    state: Arc<dyn CheckoutStateAccessor>,
    address_sender: Arc<dyn AddressRequestSender>,
    customer_sender: Arc<dyn CustomerRequestSender>,
}

impl BillingAddressActionCreator {
    pub fn new(
        state: Arc<dyn CheckoutStateAccessor>,
        address_sender: Arc<dyn AddressRequestSender>,
        customer_sender: Arc<dyn CustomerRequestSender>,
    ) -> Self {
        Self {
            state,
            address_sender,
            customer_sender,
        }
    }

    /// Continue the checkout as a guest.
    ///
    /// Requires a current checkout and no signed-in customer. The billing
    /// address is created or updated with the guest's email; when a
    /// marketing consent decision is supplied, the consent update runs
    /// concurrently and both sub-flows deliver onto the returned stream.
    /// The first failing sub-flow ends delivery; the other sub-flow's
    /// in-flight request is not aborted but its remaining actions are
    /// dropped.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub fn continue_as_guest(
        &self,
        credentials: GuestCredentials,
        options: RequestOptions,
    ) -> CheckoutResult<ActionStream<CheckoutAction>> {
        let checkout = self
            .state
            .checkout()
            .ok_or(CheckoutError::MissingData(MissingDataSubject::Checkout))?;

        if let Some(customer) = self.state.customer() {
            if !customer.is_guest {
                return Err(CheckoutError::UnableToContinueAsGuest);
            }
        }

        // Existing address data is kept, minus the derived country, with
        // the guest's email taking precedence.
        let payload = match self.state.billing_address() {
            None => BillingAddress::from_credentials(&credentials),
            Some(stored) => {
                let mut merged = stored.without_country();
                merged.email = Some(credentials.email.clone());
                merged
            }
        };

        let (tx, rx) = mpsc::channel(FLOW_CHANNEL_CAPACITY);
        let (address_tx, address_rx) = mpsc::channel(FLOW_CHANNEL_CAPACITY);
        let (customer_tx, customer_rx) = mpsc::channel(FLOW_CHANNEL_CAPACITY);

        let address_task = {
            let sender = Arc::clone(&self.address_sender);
            let checkout_id = checkout.id.clone();
            let options = options.clone();

            tokio::spawn(async move {
                let _ = address_tx
                    .send(BillingAddressAction::ContinueAsGuestRequested)
                    .await;

                let action = match create_or_update_billing_address(
                    sender.as_ref(),
                    &checkout_id,
                    &payload,
                    &options,
                )
                .await
                {
                    Ok(response) => {
                        BillingAddressAction::ContinueAsGuestSucceeded(response.body)
                    }
                    Err(err) => BillingAddressAction::ContinueAsGuestFailed(err.into()),
                };

                let _ = address_tx.send(action).await;
            })
        };

        let consent_task = {
            let sender = Arc::clone(&self.customer_sender);
            let email = credentials.email.clone();
            let consent = credentials.marketing_email_consent;

            tokio::spawn(async move {
                // No consent decision means the sub-flow completes
                // without events or network activity.
                let Some(accepts_marketing) = consent else {
                    return;
                };

                let _ = customer_tx
                    .send(CustomerAction::UpdateCustomerRequested)
                    .await;

                let request = UpdateCustomerRequest {
                    email,
                    accepts_marketing,
                };

                let action = match sender.update_customer(&request, &options).await {
                    Ok(response) => CustomerAction::UpdateCustomerSucceeded(response.body),
                    Err(err) => CustomerAction::UpdateCustomerFailed(
                        CheckoutError::update_customer(err.into()),
                    ),
                };

                let _ = customer_tx.send(action).await;
            })
        };

        let merge_task = tokio::spawn(merge_guest_flows(address_rx, customer_rx, tx));

        Ok(ActionStream::new(
            rx,
            vec![address_task, consent_task, merge_task],
        ))
    }

    /// Update the billing address.
    ///
    /// A caller-absent email falls back to the stored address email; an
    /// explicit value, including an explicit empty one, always wins. When
    /// a stored address id exists it is attached, turning the operation
    /// into an update regardless of the caller's payload.
    #[instrument(skip_all)]
    pub fn update_address(
        &self,
        address: BillingAddress,
        options: RequestOptions,
    ) -> CheckoutResult<ActionStream<BillingAddressAction>> {
        let checkout = self
            .state
            .checkout()
            .ok_or(CheckoutError::MissingData(MissingDataSubject::Checkout))?;

        let stored = self.state.billing_address();

        let mut payload = address;

        // The email may have been set separately through a convenience
        // call; a billing address loaded from an order carries no id, so
        // id presence cannot stand in for "email already known".
        if payload.email.is_none() {
            payload.email = stored.as_ref().and_then(|stored| stored.email.clone());
        }

        if let Some(stored_id) = stored.as_ref().and_then(|stored| stored.id.clone()) {
            payload.id = Some(stored_id);
        }

        let sender = Arc::clone(&self.address_sender);
        let checkout_id = checkout.id;

        let (tx, rx) = mpsc::channel(FLOW_CHANNEL_CAPACITY);
        let task = tokio::spawn(async move {
            let _ = tx
                .send(BillingAddressAction::UpdateBillingAddressRequested)
                .await;

            let action = match create_or_update_billing_address(
                sender.as_ref(),
                &checkout_id,
                &payload,
                &options,
            )
            .await
            {
                Ok(response) => {
                    BillingAddressAction::UpdateBillingAddressSucceeded(response.body)
                }
                Err(err) => BillingAddressAction::UpdateBillingAddressFailed(err.into()),
            };

            let _ = tx.send(action).await;
        });

        Ok(ActionStream::new(rx, vec![task]))
    }
}

/// Create when the payload has no id, update otherwise
async fn create_or_update_billing_address(
    sender: &dyn AddressRequestSender,
    checkout_id: &str,
    payload: &BillingAddress,
    options: &RequestOptions,
) -> TransportResult<TransportResponse<Checkout>> {
    if payload.id.is_none() {
        debug!(checkout_id, "creating billing address");
        sender.create_address(checkout_id, payload, options).await
    } else {
        debug!(checkout_id, "updating billing address");
        sender.update_address(checkout_id, payload, options).await
    }
}

/// Fan the two guest continuation sub-flows into one stream. Delivery
/// stops after the first failure is forwarded; the other sub-flow keeps
/// running but nothing more reaches the caller.
async fn merge_guest_flows(
    mut address_rx: mpsc::Receiver<BillingAddressAction>,
    mut customer_rx: mpsc::Receiver<CustomerAction>,
    tx: mpsc::Sender<CheckoutAction>,
) {
    let mut address_done = false;
    let mut customer_done = false;

    while !(address_done && customer_done) {
        let action: CheckoutAction = tokio::select! {
            action = address_rx.recv(), if !address_done => match action {
                Some(action) => action.into(),
                None => {
                    address_done = true;
                    continue;
                }
            },
            action = customer_rx.recv(), if !customer_done => match action {
                Some(action) => action.into(),
                None => {
                    customer_done = true;
                    continue;
                }
            },
        };

        let failed = action.is_failure();

        if tx.send(action).await.is_err() {
            // Caller dropped the stream; stop forwarding.
            break;
        }

        if failed {
            break;
        }
    }
}
