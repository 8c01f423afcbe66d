//! Switch availability rule
//!
//! Decides whether the subscription switch is surfaced on the settings screen
//! at all. Pure function of the subscription snapshot, the target id, and the
//! device capability flags; the controller re-runs it on every
//! subscriptions-changed notification, never caching a previous answer.

use crate::subscription::{CapabilityFlags, SubscriptionId, SubscriptionSnapshot};

/// Whether the switch for `target` should be visible.
///
/// Evaluated in order, first match wins:
/// 1. Two or more subscriptions present: always visible, regardless of
///    embeddedness or capability, so the user can pick which one is active.
/// 2. Single subscription, target is embedded (eSIM): visible.
/// 3. Single physical subscription: visible only if the modem can disable a
///    physical subscription.
///
/// A target that is not in the snapshot is not visible.
#[must_use]
pub fn compute_visibility(
    snapshot: &SubscriptionSnapshot,
    target: SubscriptionId,
    caps: CapabilityFlags,
) -> bool {
    let Some(info) = snapshot.get(target) else {
        return false;
    };
    if snapshot.len() >= 2 {
        return true;
    }
    if info.is_embedded {
        return true;
    }
    caps.can_disable_physical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::SubscriptionInfo;
    use proptest::prelude::*;

    const CAN_DISABLE: CapabilityFlags = CapabilityFlags {
        can_disable_physical: true,
    };
    const NO_DISABLE: CapabilityFlags = CapabilityFlags {
        can_disable_physical: false,
    };

    fn esim(id: i32) -> SubscriptionInfo {
        SubscriptionInfo::embedded(SubscriptionId::new(id), format!("esim-{id}"))
    }

    fn psim(id: i32) -> SubscriptionInfo {
        SubscriptionInfo::physical(SubscriptionId::new(id), format!("psim-{id}"))
    }

    #[test]
    fn single_embedded_is_visible_without_capability() {
        let snapshot = SubscriptionSnapshot::new(vec![esim(1)]);
        assert!(compute_visibility(
            &snapshot,
            SubscriptionId::new(1),
            NO_DISABLE
        ));
    }

    #[test]
    fn single_physical_follows_capability() {
        let snapshot = SubscriptionSnapshot::new(vec![psim(1)]);
        let target = SubscriptionId::new(1);
        assert!(!compute_visibility(&snapshot, target, NO_DISABLE));
        assert!(compute_visibility(&snapshot, target, CAN_DISABLE));
    }

    #[test]
    fn absent_target_is_not_visible() {
        let snapshot = SubscriptionSnapshot::new(vec![esim(1), esim(2)]);
        assert!(!compute_visibility(
            &snapshot,
            SubscriptionId::new(9),
            CAN_DISABLE
        ));
    }

    #[test]
    fn empty_snapshot_is_not_visible() {
        assert!(!compute_visibility(
            &SubscriptionSnapshot::empty(),
            SubscriptionId::new(1),
            CAN_DISABLE
        ));
    }

    proptest! {
        /// With two or more subscriptions, visibility never depends on
        /// embeddedness or the capability flag.
        #[test]
        fn two_or_more_always_visible(
            embedded_flags in proptest::collection::vec(any::<bool>(), 2..6),
            target_index in 0usize..6,
            can_disable in any::<bool>(),
        ) {
            let target_index = target_index % embedded_flags.len();
            let snapshot: SubscriptionSnapshot = embedded_flags
                .iter()
                .enumerate()
                .map(|(i, &is_embedded)| {
                    if is_embedded { esim(i as i32) } else { psim(i as i32) }
                })
                .collect();
            let target = SubscriptionId::new(target_index as i32);
            let caps = CapabilityFlags { can_disable_physical: can_disable };

            prop_assert!(compute_visibility(&snapshot, target, caps));
        }

        /// With exactly one subscription, the rule reduces to
        /// `embedded || can_disable_physical`.
        #[test]
        fn single_subscription_rule(is_embedded in any::<bool>(), can_disable in any::<bool>()) {
            let snapshot = SubscriptionSnapshot::new(vec![
                if is_embedded { esim(0) } else { psim(0) },
            ]);
            let caps = CapabilityFlags { can_disable_physical: can_disable };
            let visible = compute_visibility(&snapshot, SubscriptionId::new(0), caps);

            prop_assert_eq!(visible, is_embedded || can_disable);
        }
    }
}
