//! Scriptable in-memory subscription service

use async_trait::async_trait;
use parking_lot::Mutex;
use simswitch_app::SubscriptionService;
use simswitch_core::{SubscriptionId, SubscriptionInfo, SubscriptionSnapshot};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

#[derive(Default)]
struct MockState {
    subscriptions: Vec<SubscriptionInfo>,
    active: HashSet<SubscriptionId>,
    can_disable_physical: bool,
    /// Scripted outcomes for `set_enabled`, consumed front to back; empty
    /// queue means accept.
    scripted_results: VecDeque<bool>,
    calls: Vec<(SubscriptionId, bool)>,
}

/// In-memory [`SubscriptionService`] with scripted behavior.
///
/// Accepted `set_enabled` requests update the activation set, so a
/// controller refresh observes the new truth, as the real service would
/// report it. Rejected requests change nothing (the service fails closed).
#[derive(Clone, Default)]
pub struct MockSubscriptionService {
    state: Arc<Mutex<MockState>>,
}

impl MockSubscriptionService {
    /// Empty service: no subscriptions, nothing active, no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full subscription set.
    pub fn set_subscriptions(&self, subscriptions: impl IntoIterator<Item = SubscriptionInfo>) {
        self.state.lock().subscriptions = subscriptions.into_iter().collect();
    }

    /// Append an embedded (eSIM) subscription.
    pub fn add_embedded(&self, id: SubscriptionId, display_name: impl Into<String>) {
        self.state
            .lock()
            .subscriptions
            .push(SubscriptionInfo::embedded(id, display_name));
    }

    /// Append a physical-SIM subscription.
    pub fn add_physical(&self, id: SubscriptionId, display_name: impl Into<String>) {
        self.state
            .lock()
            .subscriptions
            .push(SubscriptionInfo::physical(id, display_name));
    }

    /// Mark a subscription active or inactive.
    pub fn set_active(&self, id: SubscriptionId, active: bool) {
        let mut state = self.state.lock();
        if active {
            state.active.insert(id);
        } else {
            state.active.remove(&id);
        }
    }

    /// Set the physical-disable capability flag.
    pub fn set_can_disable_physical(&self, can: bool) {
        self.state.lock().can_disable_physical = can;
    }

    /// Script the outcome of the next unscripted `set_enabled` call.
    /// Multiple calls queue outcomes in order.
    pub fn script_set_enabled(&self, accepted: bool) {
        self.state.lock().scripted_results.push_back(accepted);
    }

    /// Every `(id, enabled)` pair `set_enabled` was called with, in order.
    #[must_use]
    pub fn set_enabled_calls(&self) -> Vec<(SubscriptionId, bool)> {
        self.state.lock().calls.clone()
    }

    /// Record a `set_enabled` call without resolving it. Used by the wrapper
    /// services that gate or swallow the result.
    pub fn record_set_enabled(&self, id: SubscriptionId, enabled: bool) {
        self.state.lock().calls.push((id, enabled));
    }
}

#[async_trait]
impl SubscriptionService for MockSubscriptionService {
    async fn available_subscriptions(&self) -> SubscriptionSnapshot {
        SubscriptionSnapshot::new(self.state.lock().subscriptions.clone())
    }

    async fn is_active(&self, id: SubscriptionId) -> bool {
        self.state.lock().active.contains(&id)
    }

    async fn set_enabled(&self, id: SubscriptionId, enabled: bool) -> bool {
        let mut state = self.state.lock();
        state.calls.push((id, enabled));
        let accepted = state.scripted_results.pop_front().unwrap_or(true);
        if accepted {
            if enabled {
                state.active.insert(id);
            } else {
                state.active.remove(&id);
            }
        }
        accepted
    }

    async fn can_disable_physical_subscription(&self) -> bool {
        self.state.lock().can_disable_physical
    }
}
