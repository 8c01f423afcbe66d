//! Simswitch controller layer
//!
//! Portable, headless core for the subscription on/off switch on a settings
//! screen. The hosting frontend attaches a [`SwitchController`], binds its
//! widget to the published [`ToggleState`], and forwards user flips and
//! platform change notifications back in; the platform subscription service
//! sits behind the [`SubscriptionService`] trait.
//!
//! # Flow
//!
//! ```text
//! attach → availability rule → Idle/Hidden
//!        → user flip → Pending (optimistic) → confirmed or reverted
//!        → change notification → re-evaluate (queued while Pending)
//! ```
//!
//! This crate is pure with respect to the platform: no framework types, no
//! widget code. Frontends bind to the `tokio::sync::watch` state channel.

#![forbid(unsafe_code)]

pub mod controller;
pub mod forwarder;
pub mod service;
pub mod state;

pub use controller::SwitchController;
pub use forwarder::spawn_change_forwarder;
pub use service::{BoxedSubscriptionService, SubscriptionService};
pub use state::{ChangeEvent, ToggleState};

// Domain types frontends need alongside the controller.
pub use simswitch_core::{
    compute_visibility, CapabilityFlags, SubscriptionId, SubscriptionInfo, SubscriptionSnapshot,
    SwitchError, SwitchResult,
};
