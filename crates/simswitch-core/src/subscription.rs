//! Subscription identifiers and snapshots
//!
//! A subscription is a logical cellular service identity, either a removable
//! physical SIM or one programmed into embedded (eSIM) hardware. The set of
//! subscriptions is owned by the platform service; this crate only models
//! read-only snapshots of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque integer identifier naming a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(i32);

impl SubscriptionId {
    /// Sentinel for "no subscription", mirroring the platform convention.
    pub const INVALID: SubscriptionId = SubscriptionId(-1);

    /// Wrap a raw platform subscription id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw platform id.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this id names a real subscription.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

impl From<i32> for SubscriptionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// The attributes of one subscription the switch core consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    /// Subscription identifier
    pub id: SubscriptionId,
    /// Carrier-facing display name, surfaced on the switch bar title
    pub display_name: String,
    /// Whether this is an embedded (eSIM) subscription rather than a
    /// removable physical SIM
    pub is_embedded: bool,
}

impl SubscriptionInfo {
    /// Construct an embedded (eSIM) subscription entry.
    #[must_use]
    pub fn embedded(id: SubscriptionId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_embedded: true,
        }
    }

    /// Construct a physical-SIM subscription entry.
    #[must_use]
    pub fn physical(id: SubscriptionId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_embedded: false,
        }
    }
}

/// Ordered snapshot of every subscription currently known to the device.
///
/// Owned by the external subscription service; the switch core only reads it.
/// Recomputed (never patched in place) whenever the service reports a change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    subscriptions: Vec<SubscriptionInfo>,
}

impl SubscriptionSnapshot {
    /// Snapshot over the given subscriptions, preserving service order.
    #[must_use]
    pub fn new(subscriptions: Vec<SubscriptionInfo>) -> Self {
        Self { subscriptions }
    }

    /// Empty snapshot (no SIMs present).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of subscriptions known to the device.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether no subscriptions are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Look up a subscription by id.
    #[must_use]
    pub fn get(&self, id: SubscriptionId) -> Option<&SubscriptionInfo> {
        self.subscriptions.iter().find(|s| s.id == id)
    }

    /// Whether the snapshot contains the given id.
    #[must_use]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate the subscriptions in service order.
    pub fn iter(&self) -> impl Iterator<Item = &SubscriptionInfo> {
        self.subscriptions.iter()
    }
}

impl FromIterator<SubscriptionInfo> for SubscriptionSnapshot {
    fn from_iter<I: IntoIterator<Item = SubscriptionInfo>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Device capability flags read from the subscription service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    /// Whether the modem allows disabling a physical (non-embedded)
    /// subscription. Only consulted for single-physical-SIM devices.
    pub can_disable_physical: bool,
}
