//! Switch error types
//!
//! Nothing in the switch core is fatal: rejected operations revert the
//! toggle, stale snapshots are refreshed, and re-entrant flips are gated
//! structurally. The errors here cover API misuse by the hosting screen.

use crate::subscription::SubscriptionId;
use thiserror::Error;

/// Errors surfaced to the hosting screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwitchError {
    /// An operation that requires an attached controller was invoked before
    /// `attach` (or after `detach`).
    #[error("switch controller is not attached to a screen")]
    NotAttached,

    /// The target subscription is not present in the current snapshot.
    #[error("subscription {0} is not known to the device")]
    UnknownSubscription(SubscriptionId),
}
