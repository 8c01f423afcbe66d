//! Simswitch domain layer
//!
//! Pure types and rules for the subscription on/off switch: subscription
//! identifiers and snapshots, device capability flags, and the availability
//! rule that decides whether the switch is surfaced at all. Nothing in this
//! crate touches a runtime or a platform service; the controller layer in
//! `simswitch-app` builds on top of it.

#![forbid(unsafe_code)]

pub mod availability;
pub mod error;
pub mod subscription;

pub use availability::compute_visibility;
pub use error::SwitchError;
pub use subscription::{CapabilityFlags, SubscriptionId, SubscriptionInfo, SubscriptionSnapshot};

/// Result type for switch operations.
pub type SwitchResult<T> = Result<T, SwitchError>;
