//! Checkout adapter: order load, payment method, single payment.

use crate::adapters::error::{FetchError, WorkflowError};
use crate::adapters::loading::{cleared_error, error_payload};
use crate::adapters::notify::{Notice, Notifier, SilentNotifier};
use crate::adapters::Fetch;
use crate::core::context_of;
use crate::engine::{Machine, MachineOptions};
use crate::workflows::{checkout_machine, CheckoutEvent, CheckoutState};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use stillwater::effect::Effect;
use tracing::{debug, info, warn};

/// Payment method chosen on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    Balance,
    Score,
    Card,
}

/// Drives one checkout: `O` is the loaded order, `R` the payment receipt.
///
/// The pay action is enabled exactly when the machine accepts `Pay`, so a
/// double tap while `Paying` never reaches the payment service.
pub struct Checkout<O, R> {
    machine: Machine<CheckoutState, CheckoutEvent>,
    order: Option<O>,
    receipt: Option<R>,
    notifier: Arc<dyn Notifier>,
}

impl<O, R> Checkout<O, R> {
    pub fn new(options: MachineOptions) -> Self {
        Self {
            machine: checkout_machine(options),
            order: None,
            receipt: None,
            notifier: Arc::new(SilentNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn machine(&self) -> &Machine<CheckoutState, CheckoutEvent> {
        &self.machine
    }

    pub fn state(&self) -> &CheckoutState {
        self.machine.state()
    }

    pub fn order(&self) -> Option<&O> {
        self.order.as_ref()
    }

    pub fn receipt(&self) -> Option<&R> {
        self.receipt.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.machine.context().get("error").and_then(Value::as_str)
    }

    pub fn pay_type(&self) -> Option<PayType> {
        self.machine
            .context()
            .get("pay_type")
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Whether the pay button should be enabled.
    pub fn can_pay(&self) -> bool {
        self.machine.can(&CheckoutEvent::Pay)
    }

    pub fn begin_load(&mut self) -> Result<(), WorkflowError> {
        let event = match self.machine.state() {
            CheckoutState::Error => CheckoutEvent::Retry,
            _ => CheckoutEvent::Load,
        };
        self.machine.try_send(event, None)?;
        debug!(machine = %self.machine.label(), "order load started");
        Ok(())
    }

    pub fn finish_load(&mut self, outcome: Result<O, FetchError>) -> Result<&O, WorkflowError> {
        match outcome {
            Ok(order) => {
                self.machine
                    .try_send(CheckoutEvent::LoadSuccess, Some(cleared_error()))?;
                Ok(&*self.order.insert(order))
            }
            Err(error) => {
                self.machine
                    .try_send(CheckoutEvent::LoadError, Some(error_payload(&error)))?;
                warn!(machine = %self.machine.label(), %error, "order load failed");
                self.notifier.notify(Notice::error(error.to_string()));
                Err(error.into())
            }
        }
    }

    pub async fn load<Env>(&mut self, env: &Env, fetch: Fetch<O, Env>) -> Result<&O, WorkflowError>
    where
        O: Send + 'static,
        Env: Clone + Send + Sync + 'static,
    {
        self.begin_load()?;
        let outcome = fetch.run(env).await;
        self.finish_load(outcome)
    }

    /// Record the chosen payment method. Only accepted in `Ready`.
    pub fn change_pay_type(&mut self, pay_type: PayType) -> Result<(), WorkflowError> {
        let payload = context_of(json!({ "pay_type": pay_type }));
        self.machine
            .try_send(CheckoutEvent::ChangePayType, Some(payload))?;
        Ok(())
    }

    /// Enter `Paying`. Call before issuing the payment request.
    pub fn begin_payment(&mut self) -> Result<(), WorkflowError> {
        match self.machine.try_send(CheckoutEvent::Pay, None) {
            Ok(()) => {
                info!(
                    machine = %self.machine.label(),
                    pay_type = ?self.pay_type(),
                    "payment submitted"
                );
                Ok(())
            }
            Err(_) if *self.machine.state() == CheckoutState::Paying => {
                self.notifier.notify(Notice::warning(
                    "payment already in progress, please wait",
                ));
                Err(WorkflowError::PaymentInProgress)
            }
            Err(rejection) => Err(rejection.into()),
        }
    }

    /// Settle the payment. A failed payment returns to `Ready` so the user
    /// can pay again.
    pub fn finish_payment(&mut self, outcome: Result<R, FetchError>) -> Result<&R, WorkflowError> {
        match outcome {
            Ok(receipt) => {
                self.machine
                    .try_send(CheckoutEvent::PaySuccess, Some(cleared_error()))?;
                info!(machine = %self.machine.label(), "payment succeeded");
                Ok(&*self.receipt.insert(receipt))
            }
            Err(error) => {
                self.machine
                    .try_send(CheckoutEvent::PayError, Some(error_payload(&error)))?;
                warn!(machine = %self.machine.label(), %error, "payment failed");
                self.notifier
                    .notify(Notice::error(format!("payment failed: {error}")));
                Err(error.into())
            }
        }
    }

    pub async fn pay<Env>(&mut self, env: &Env, request: Fetch<R, Env>) -> Result<&R, WorkflowError>
    where
        R: Send + 'static,
        Env: Clone + Send + Sync + 'static,
    {
        self.begin_payment()?;
        let outcome = request.run(env).await;
        self.finish_payment(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notify::{NoticeLevel, RecordingNotifier};
    use stillwater::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Order {
        total_cents: u64,
    }

    fn ready() -> Checkout<Order, String> {
        let mut checkout = Checkout::new(MachineOptions::default());
        checkout.begin_load().unwrap();
        checkout.finish_load(Ok(Order { total_cents: 1999 })).unwrap();
        checkout
    }

    #[tokio::test]
    async fn load_choose_and_pay() {
        let mut checkout: Checkout<Order, String> = Checkout::new(MachineOptions::default());

        let order = checkout
            .load(&(), pure(Order { total_cents: 1999 }).boxed())
            .await
            .unwrap();
        assert_eq!(order.total_cents, 1999);
        assert!(checkout.can_pay());

        checkout.change_pay_type(PayType::Card).unwrap();
        assert_eq!(checkout.pay_type(), Some(PayType::Card));

        let receipt = checkout
            .pay(&(), pure("rcpt-1".to_string()).boxed())
            .await
            .unwrap();
        assert_eq!(receipt, "rcpt-1");
        assert_eq!(checkout.state(), &CheckoutState::Success);
        assert!(checkout.machine().is_final());
    }

    #[test]
    fn double_pay_is_refused_with_notice() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut checkout = ready().with_notifier(notifier.clone());

        checkout.begin_payment().unwrap();
        assert!(!checkout.can_pay());
        assert_eq!(checkout.begin_payment(), Err(WorkflowError::PaymentInProgress));

        assert_eq!(checkout.state(), &CheckoutState::Paying);
        let pays = checkout
            .machine()
            .history()
            .iter()
            .filter(|e| e.event == CheckoutEvent::Pay)
            .count();
        assert_eq!(pays, 1);
        assert_eq!(
            notifier.notices(),
            vec![Notice::warning("payment already in progress, please wait")]
        );
    }

    #[test]
    fn failed_payment_returns_to_ready() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut checkout = ready().with_notifier(notifier.clone());
        checkout.begin_payment().unwrap();

        let result = checkout.finish_payment(Err(FetchError::Request("declined".to_string())));

        assert!(matches!(result, Err(WorkflowError::Fetch(_))));
        assert_eq!(checkout.state(), &CheckoutState::Ready);
        assert!(checkout.can_pay());
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Error);
        assert!(checkout.receipt().is_none());
    }

    #[test]
    fn pay_type_only_changes_when_ready() {
        let mut checkout: Checkout<Order, String> = Checkout::new(MachineOptions::default());

        let result = checkout.change_pay_type(PayType::Balance);

        assert!(matches!(result, Err(WorkflowError::Rejected(_))));
        assert_eq!(checkout.pay_type(), None);
    }

    #[test]
    fn failed_load_retries() {
        let mut checkout: Checkout<Order, String> = Checkout::new(MachineOptions::default());
        checkout.begin_load().unwrap();
        let _ = checkout.finish_load(Err(FetchError::Request("offline".to_string())));
        assert_eq!(checkout.state(), &CheckoutState::Error);
        assert_eq!(checkout.error(), Some("request failed: offline"));

        checkout.begin_load().unwrap();
        assert_eq!(
            checkout.machine().history().last().map(|e| e.event),
            Some(CheckoutEvent::Retry)
        );
    }

    #[test]
    fn pay_before_load_is_rejected() {
        let mut checkout: Checkout<Order, String> = Checkout::new(MachineOptions::default());

        assert!(matches!(checkout.begin_payment(), Err(WorkflowError::Rejected(_))));
    }

    #[test]
    fn pay_type_serializes_snake_case() {
        assert_eq!(serde_json::to_value(PayType::Balance).unwrap(), json!("balance"));
    }
}
