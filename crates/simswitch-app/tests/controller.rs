//! Controller unit scenarios against the testkit mock.
//!
//! These live as integration tests because `simswitch-testkit` depends on
//! `simswitch-app`: inside the lib's own `#[cfg(test)]` build the trait would
//! resolve to a second copy of the crate.

use std::sync::Arc;

use simswitch_app::{ChangeEvent, SubscriptionId, SwitchController, SwitchError, ToggleState};
use simswitch_testkit::MockSubscriptionService;

#[tokio::test]
async fn set_checked_before_attach_is_an_error() {
    let service = MockSubscriptionService::new();
    let controller = SwitchController::new(Arc::new(service), SubscriptionId::new(1));

    let err = controller.set_checked(true).await.unwrap_err();
    assert_eq!(err, SwitchError::NotAttached);
}

#[tokio::test]
async fn attach_with_invalid_target_is_an_error() {
    let service = MockSubscriptionService::new();
    let controller = SwitchController::new(Arc::new(service), SubscriptionId::INVALID);

    let err = controller.attach().await.unwrap_err();
    assert_eq!(err, SwitchError::UnknownSubscription(SubscriptionId::INVALID));
}

#[tokio::test]
async fn detach_resets_published_state() {
    let service = MockSubscriptionService::new();
    service.add_embedded(SubscriptionId::new(1), "Carrier A");
    service.set_active(SubscriptionId::new(1), true);

    let controller = SwitchController::new(Arc::new(service), SubscriptionId::new(1));
    controller.attach().await.unwrap();
    assert!(controller.state().visible);

    controller.detach().await;
    assert_eq!(controller.state(), ToggleState::hidden());

    // After detach, change events are ignored.
    controller
        .handle_change(ChangeEvent::SubscriptionsChanged)
        .await;
    assert_eq!(controller.state(), ToggleState::hidden());
}

#[tokio::test]
async fn set_checked_to_current_value_is_a_noop() {
    let service = MockSubscriptionService::new();
    service.add_embedded(SubscriptionId::new(1), "Carrier A");
    service.set_active(SubscriptionId::new(1), true);
    let service = Arc::new(service);

    let controller = SwitchController::new(service.clone(), SubscriptionId::new(1));
    controller.attach().await.unwrap();

    assert!(!controller.set_checked(true).await.unwrap());
    assert!(service.set_enabled_calls().is_empty());
}
