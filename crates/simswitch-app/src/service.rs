//! Subscription service seam
//!
//! Dependency-inversion boundary between the portable controller and the
//! platform subscription service. The host supplies an implementation backed
//! by the real platform; tests supply the mock from `simswitch-testkit`.

use async_trait::async_trait;
use simswitch_core::{SubscriptionId, SubscriptionSnapshot};
use std::sync::Arc;

/// The platform subscription service as seen by the switch controller.
///
/// Semantics the controller relies on:
/// - `set_enabled` reports accept/reject via its boolean result and carries
///   no distinguished error codes; the service fails closed (a rejected
///   request never partially applies).
/// - Results are delivered one per request, in request order. The controller
///   never issues a second `set_enabled` for the same target while one is
///   outstanding.
/// - Timeout/loss of a request is the service's concern; the controller only
///   defines the degraded state when no result ever arrives.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Snapshot of every subscription currently known to the device.
    async fn available_subscriptions(&self) -> SubscriptionSnapshot;

    /// Whether the given subscription is currently active.
    async fn is_active(&self, id: SubscriptionId) -> bool;

    /// Request enabling or disabling a subscription.
    ///
    /// Returns `true` if the request was accepted, `false` if rejected.
    async fn set_enabled(&self, id: SubscriptionId, enabled: bool) -> bool;

    /// Whether the modem supports disabling a physical subscription.
    async fn can_disable_physical_subscription(&self) -> bool;
}

/// Shared handle to a subscription service implementation.
pub type BoxedSubscriptionService = Arc<dyn SubscriptionService>;
