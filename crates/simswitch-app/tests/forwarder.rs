//! Forwarder scenarios against the testkit mock.
//!
//! These live as integration tests because `simswitch-testkit` depends on
//! `simswitch-app`: inside the lib's own `#[cfg(test)]` build the trait would
//! resolve to a second copy of the crate.

use std::sync::Arc;

use tokio::sync::mpsc;

use simswitch_app::{spawn_change_forwarder, ChangeEvent, SwitchController};
use simswitch_core::{SubscriptionId, SubscriptionInfo};
use simswitch_testkit::MockSubscriptionService;

#[tokio::test]
async fn forwarder_applies_events_in_order() {
    let service = MockSubscriptionService::new();
    service.add_embedded(SubscriptionId::new(1), "Carrier A");
    let service = Arc::new(service);

    let controller = SwitchController::new(service.clone(), SubscriptionId::new(1));
    controller.attach().await.unwrap();
    assert!(controller.state().visible);

    let (tx, rx) = mpsc::channel(8);
    let task = spawn_change_forwarder(controller.clone(), rx);

    // Remove the subscription, then notify; the switch must hide.
    service.set_subscriptions(Vec::<SubscriptionInfo>::new());
    tx.send(ChangeEvent::SubscriptionsChanged).await.unwrap();
    drop(tx);
    task.await.unwrap();

    assert!(!controller.state().visible);
}
