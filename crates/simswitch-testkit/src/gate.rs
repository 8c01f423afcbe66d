//! Services that control when `set_enabled` resolves

use async_trait::async_trait;
use parking_lot::Mutex;
use simswitch_app::SubscriptionService;
use simswitch_core::{SubscriptionId, SubscriptionSnapshot};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Wrapper that holds every `set_enabled` call until the test releases it.
///
/// Snapshot, activation, and capability reads pass straight through to the
/// wrapped mock; only the enable/disable request is gated. This is how tests
/// open the in-flight window deterministically.
#[derive(Clone)]
pub struct GatedService {
    mock: super::MockSubscriptionService,
    waiters: Arc<Mutex<Vec<oneshot::Sender<bool>>>>,
}

impl GatedService {
    /// Gate `set_enabled` calls against the given mock.
    #[must_use]
    pub fn new(mock: super::MockSubscriptionService) -> Self {
        Self {
            mock,
            waiters: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The wrapped mock, for seeding state and inspecting calls.
    #[must_use]
    pub fn mock(&self) -> &super::MockSubscriptionService {
        &self.mock
    }

    /// Number of `set_enabled` calls currently held.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.waiters.lock().len()
    }

    /// Resolve the oldest held call with the given outcome. Returns false if
    /// no call was held.
    pub fn release(&self, accepted: bool) -> bool {
        let waiter = {
            let mut waiters = self.waiters.lock();
            if waiters.is_empty() {
                return false;
            }
            waiters.remove(0)
        };
        waiter.send(accepted).is_ok()
    }
}

#[async_trait]
impl SubscriptionService for GatedService {
    async fn available_subscriptions(&self) -> SubscriptionSnapshot {
        self.mock.available_subscriptions().await
    }

    async fn is_active(&self, id: SubscriptionId) -> bool {
        self.mock.is_active(id).await
    }

    async fn set_enabled(&self, id: SubscriptionId, enabled: bool) -> bool {
        self.mock.record_set_enabled(id, enabled);
        let (tx, rx) = oneshot::channel();
        self.waiters.lock().push(tx);
        // A dropped gate counts as rejection.
        rx.await.unwrap_or(false)
    }

    async fn can_disable_physical_subscription(&self) -> bool {
        self.mock.can_disable_physical_subscription().await
    }
}

/// Wrapper that can stall `is_active` replies.
///
/// The answer is computed from the wrapped mock when the call arrives and
/// delivered only when the test releases it, so a re-evaluation's activation
/// read can be interleaved with flips that change the underlying truth.
/// Calls pass through unless armed with [`hold_next`](Self::hold_next).
#[derive(Clone)]
pub struct GatedActivationService {
    mock: super::MockSubscriptionService,
    armed: Arc<Mutex<usize>>,
    held: Arc<Mutex<Vec<oneshot::Sender<()>>>>,
}

impl GatedActivationService {
    /// Gate `is_active` replies against the given mock.
    #[must_use]
    pub fn new(mock: super::MockSubscriptionService) -> Self {
        Self {
            mock,
            armed: Arc::new(Mutex::new(0)),
            held: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The wrapped mock, for seeding state and inspecting calls.
    #[must_use]
    pub fn mock(&self) -> &super::MockSubscriptionService {
        &self.mock
    }

    /// Hold the next `is_active` reply until [`release`](Self::release).
    pub fn hold_next(&self) {
        *self.armed.lock() += 1;
    }

    /// Number of `is_active` replies currently held.
    #[must_use]
    pub fn held(&self) -> usize {
        self.held.lock().len()
    }

    /// Deliver the oldest held reply (with the value captured when the call
    /// arrived). Returns false if none was held.
    pub fn release(&self) -> bool {
        let waiter = {
            let mut held = self.held.lock();
            if held.is_empty() {
                return false;
            }
            held.remove(0)
        };
        waiter.send(()).is_ok()
    }
}

#[async_trait]
impl SubscriptionService for GatedActivationService {
    async fn available_subscriptions(&self) -> SubscriptionSnapshot {
        self.mock.available_subscriptions().await
    }

    async fn is_active(&self, id: SubscriptionId) -> bool {
        let value = self.mock.is_active(id).await;
        let should_hold = {
            let mut armed = self.armed.lock();
            if *armed > 0 {
                *armed -= 1;
                true
            } else {
                false
            }
        };
        if should_hold {
            let (tx, rx) = oneshot::channel();
            self.held.lock().push(tx);
            // A dropped gate releases the captured value as-is.
            let _ = rx.await;
        }
        value
    }

    async fn set_enabled(&self, id: SubscriptionId, enabled: bool) -> bool {
        self.mock.set_enabled(id, enabled).await
    }

    async fn can_disable_physical_subscription(&self) -> bool {
        self.mock.can_disable_physical_subscription().await
    }
}

/// Wrapper whose `set_enabled` never resolves.
///
/// Models the lost-result degraded state: without a pending timeout the
/// switch stays disabled indefinitely; with one, the controller reverts.
#[derive(Clone)]
pub struct HangingService {
    mock: super::MockSubscriptionService,
}

impl HangingService {
    /// Hang `set_enabled` calls against the given mock.
    #[must_use]
    pub fn new(mock: super::MockSubscriptionService) -> Self {
        Self { mock }
    }

    /// The wrapped mock, for seeding state and inspecting calls.
    #[must_use]
    pub fn mock(&self) -> &super::MockSubscriptionService {
        &self.mock
    }
}

#[async_trait]
impl SubscriptionService for HangingService {
    async fn available_subscriptions(&self) -> SubscriptionSnapshot {
        self.mock.available_subscriptions().await
    }

    async fn is_active(&self, id: SubscriptionId) -> bool {
        self.mock.is_active(id).await
    }

    async fn set_enabled(&self, id: SubscriptionId, enabled: bool) -> bool {
        self.mock.record_set_enabled(id, enabled);
        futures::future::pending().await
    }

    async fn can_disable_physical_subscription(&self) -> bool {
        self.mock.can_disable_physical_subscription().await
    }
}
