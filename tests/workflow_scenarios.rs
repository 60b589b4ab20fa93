//! End-to-end scenarios over the canonical workflows and their adapters.

use flowstate::adapters::{
    Checkout, Fetch, FetchError, FormSubmission, Listing, Loader, Notice, Page, PayType,
    RecordingNotifier, WorkflowError,
};
use flowstate::core::{context_of, ContextUpdate, HISTORY_CAPACITY};
use flowstate::engine::{Machine, MachineDefinition, MachineOptions, RecordingDiagnostics};
use flowstate::validation::RulesBuilder;
use flowstate::workflows::{
    checkout_machine, checkout_table, loading_machine, loading_table, CheckoutEvent,
    CheckoutState, LoadEvent, LoadState,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stillwater::prelude::*;

fn ready_checkout() -> Machine<CheckoutState, CheckoutEvent> {
    let mut machine = checkout_machine(MachineOptions::default());
    assert!(machine.send(CheckoutEvent::Load));
    assert!(machine.send(CheckoutEvent::LoadSuccess));
    machine
}

#[test]
fn scenario_a_reload_from_success() {
    let mut machine = loading_machine(MachineOptions::default());
    assert_eq!(machine.state(), &LoadState::Idle);

    assert!(machine.send(LoadEvent::Load));
    assert_eq!(machine.state(), &LoadState::Loading);
    assert!(machine.send(LoadEvent::Success));
    assert_eq!(machine.state(), &LoadState::Success);

    assert!(machine.send(LoadEvent::Load));
    assert_eq!(machine.state(), &LoadState::Loading);
}

#[test]
fn scenario_b_double_submit_is_refused() {
    let mut machine = ready_checkout();

    assert!(machine.send(CheckoutEvent::Pay));
    assert_eq!(machine.state(), &CheckoutState::Paying);

    assert!(!machine.send(CheckoutEvent::Pay));
    assert_eq!(machine.state(), &CheckoutState::Paying);
    assert_eq!(machine.history().len(), 3);
}

#[test]
fn scenario_c_payment_failure_returns_to_ready() {
    let mut machine = ready_checkout();
    machine.send(CheckoutEvent::Pay);

    assert!(machine.send(CheckoutEvent::PayError));
    assert_eq!(machine.state(), &CheckoutState::Ready);
    assert!(machine.send(CheckoutEvent::Pay));
    assert_eq!(machine.state(), &CheckoutState::Paying);
}

#[test]
fn scenario_d_self_transition_is_recorded() {
    let mut machine = ready_checkout();

    assert!(machine.send_with(
        CheckoutEvent::ChangePayType,
        context_of(json!({ "payType": "score" }))
    ));

    assert_eq!(machine.state(), &CheckoutState::Ready);
    assert_eq!(machine.context()["payType"], "score");
    let self_transitions: Vec<_> = machine
        .history()
        .into_iter()
        .filter(|entry| entry.from == CheckoutState::Ready && entry.to == CheckoutState::Ready)
        .collect();
    assert_eq!(self_transitions.len(), 1);
    assert_eq!(self_transitions[0].event, CheckoutEvent::ChangePayType);
}

#[test]
fn oldest_transition_is_evicted_after_fifty_one() {
    let mut machine = loading_machine(MachineOptions::default());

    // Load/Success pairs: odd transitions enter Loading, even ones leave it.
    for i in 0..51 {
        let event = if i % 2 == 0 { LoadEvent::Load } else { LoadEvent::Success };
        assert!(machine.send(event));
    }

    let history = machine.history();
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history[0].event, LoadEvent::Success);
    assert_eq!(history[0].from, LoadState::Loading);
    assert_eq!(history[HISTORY_CAPACITY - 1].event, LoadEvent::Load);
}

#[test]
fn set_context_merges_shallowly() {
    let mut machine = loading_machine(MachineOptions::default());
    machine.merge_context(context_of(json!({ "a": 1, "b": 2 })));

    machine.set_context(ContextUpdate::merge(context_of(json!({ "b": 3 }))));

    assert_eq!(machine.context(), &context_of(json!({ "a": 1, "b": 3 })));
    assert!(machine.history().is_empty());
}

#[test]
fn set_context_derives_from_previous() {
    let mut machine = loading_machine(MachineOptions::default());
    machine.merge_context(context_of(json!({ "attempts": 1 })));

    machine.update_context(|previous| {
        let attempts = previous["attempts"].as_i64().unwrap_or(0);
        context_of(json!({ "attempts": attempts + 1 }))
    });

    assert_eq!(machine.context()["attempts"], 2);
}

#[test]
fn machines_share_one_table() {
    let first = checkout_machine(MachineOptions::default());
    let second = checkout_machine(MachineOptions::default().labeled("second"));

    assert!(first.shares_table(&second));
    assert!(Arc::ptr_eq(first.table(), &checkout_table()));
    assert_ne!(first.id(), second.id());
}

#[test]
fn debug_machine_reports_commits_and_rejections() {
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let definition = MachineDefinition::new(LoadState::Idle, loading_table())
        .with_options(MachineOptions::debug().labeled("catalog"))
        .with_diagnostics(diagnostics.clone());
    let mut machine = Machine::create(definition);

    machine.send(LoadEvent::Load);
    machine.send(LoadEvent::Load);
    machine.set_state(LoadState::Idle);

    assert_eq!(diagnostics.infos().len(), 1);
    assert_eq!(diagnostics.warnings().len(), 2);
    assert!(diagnostics.records().iter().all(|record| record.label == "catalog"));
    assert_eq!(machine.history().len(), 1);
}

#[test]
fn quiet_machine_reports_nothing() {
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let definition = MachineDefinition::new(LoadState::Idle, loading_table())
        .with_diagnostics(diagnostics.clone());
    let mut machine = Machine::create(definition);

    machine.send(LoadEvent::Success);
    machine.send(LoadEvent::Load);

    assert!(diagnostics.records().is_empty());
}

#[derive(Clone)]
struct Storefront {
    charges: Arc<AtomicUsize>,
    decline: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: u32,
}

fn charge() -> Fetch<String, Storefront> {
    from_fn(|env: &Storefront| {
        let n = env.charges.fetch_add(1, Ordering::SeqCst) + 1;
        if env.decline {
            Err(FetchError::Status {
                status: 402,
                message: "card declined".to_string(),
            })
        } else {
            Ok(format!("receipt-{n}"))
        }
    })
    .boxed()
}

#[tokio::test]
async fn checkout_charges_once_and_recovers_from_decline() {
    let notifier = Arc::new(RecordingNotifier::new());
    let declining = Storefront {
        charges: Arc::new(AtomicUsize::new(0)),
        decline: true,
    };
    let mut checkout: Checkout<Order, String> = Checkout::new(MachineOptions::default())
        .with_notifier(notifier.clone());

    let order = checkout.load(&declining, pure(Order { id: 7 }).boxed()).await.unwrap();
    assert_eq!(order.id, 7);
    checkout.change_pay_type(PayType::Score).unwrap();

    let declined = checkout.pay(&declining, charge()).await;
    assert!(matches!(declined, Err(WorkflowError::Fetch(FetchError::Status { status: 402, .. }))));
    assert_eq!(checkout.state(), &CheckoutState::Ready);
    assert_eq!(checkout.pay_type(), Some(PayType::Score));

    let accepting = Storefront {
        charges: declining.charges.clone(),
        decline: false,
    };
    let receipt = checkout.pay(&accepting, charge()).await.unwrap().clone();
    assert_eq!(receipt, "receipt-2");

    // A late tap after success never reaches the gateway.
    assert!(!checkout.can_pay());
    assert!(checkout.pay(&accepting, charge()).await.is_err());
    assert_eq!(accepting.charges.load(Ordering::SeqCst), 2);
    assert_eq!(notifier.notices().len(), 1);
}

#[tokio::test]
async fn pay_while_paying_is_refused_before_the_gateway() {
    let notifier = Arc::new(RecordingNotifier::new());
    let env = Storefront {
        charges: Arc::new(AtomicUsize::new(0)),
        decline: false,
    };
    let mut checkout: Checkout<Order, String> =
        Checkout::new(MachineOptions::default()).with_notifier(notifier.clone());
    checkout.load(&env, pure(Order { id: 1 }).boxed()).await.unwrap();

    checkout.begin_payment().unwrap();
    let second = checkout.pay(&env, charge()).await;

    assert_eq!(second, Err(WorkflowError::PaymentInProgress));
    assert_eq!(env.charges.load(Ordering::SeqCst), 0);
    assert_eq!(
        notifier.notices(),
        vec![Notice::warning("payment already in progress, please wait")]
    );
}

#[tokio::test]
async fn loader_reloads_after_success() {
    let mut loader = Loader::new(MachineOptions::default());

    loader.load(&(), pure(1_u32).boxed()).await.unwrap();
    let second = *loader.load(&(), pure(2_u32).boxed()).await.unwrap();

    assert_eq!(second, 2);
    assert_eq!(loader.machine().history().len(), 4);
}

#[tokio::test]
async fn listing_pages_through_results() {
    let mut listing = Listing::new(MachineOptions::default());
    let fetch = |page: u32| -> Fetch<Page<u32>, ()> {
        match page {
            1 => pure(Page::new(vec![1, 2], true)).boxed(),
            2 => fail(FetchError::Request("timeout".to_string())).boxed(),
            _ => pure(Page::last(vec![3])).boxed(),
        }
    };

    listing.refresh(&(), fetch).await.unwrap();
    assert!(listing.load_more(&(), fetch).await.is_err());
    assert_eq!(listing.items(), &[1, 2]);

    // The failed page is requested again.
    let retry = |page: u32| -> Fetch<Page<u32>, ()> {
        assert_eq!(page, 2);
        pure(Page::last(vec![3])).boxed()
    };
    assert_eq!(listing.load_more(&(), retry).await, Ok(1));
    assert_eq!(listing.items(), &[1, 2, 3]);
    assert_eq!(listing.load_more(&(), fetch).await, Err(WorkflowError::Exhausted));
}

struct Contact {
    email: String,
}

#[tokio::test]
async fn form_validates_then_submits() {
    let rules = RulesBuilder::new()
        .require_pred("email", |c: &Contact| c.email.contains('@'), "is not an address")
        .build();
    let mut form = FormSubmission::new(MachineOptions::default()).with_rules(rules);

    let rejected = form
        .submit(&(), &Contact { email: "nobody".to_string() }, pure(()).boxed())
        .await;
    assert!(matches!(rejected, Err(WorkflowError::Invalid(ref v)) if v[0].field == "email"));

    form.submit(&(), &Contact { email: "a@b.c".to_string() }, pure(()).boxed())
        .await
        .unwrap();
    assert!(form.violations().is_empty());
    assert!(form.reset());
}
