//! Test doubles for the simswitch controller
//!
//! [`MockSubscriptionService`] is a scriptable in-memory subscription
//! service: seed subscriptions and activation state, script `set_enabled`
//! outcomes, and inspect the calls the controller made. [`GatedService`],
//! [`GatedActivationService`], and [`HangingService`] wrap it to exercise
//! interleavings: the gated variants hold `set_enabled` (or `is_active`)
//! until the test releases them, the hanging variant never resolves at all.

#![forbid(unsafe_code)]

mod gate;
mod mock;

pub use gate::{GatedActivationService, GatedService, HangingService};
pub use mock::MockSubscriptionService;
