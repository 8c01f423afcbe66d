//! Switch view state and change events

use serde::{Deserialize, Serialize};
use simswitch_core::SubscriptionId;

/// Observable state of the switch widget.
///
/// Published over the controller's watch channel; the frontend binds its
/// widget to this and renders nothing else. `enabled` is false while an
/// enable/disable request is in flight, which is the sole re-entrancy gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    /// Whether the switch is shown at all
    pub visible: bool,
    /// Whether the switch renders as on
    pub checked: bool,
    /// Whether the switch accepts user interaction
    pub enabled: bool,
}

impl ToggleState {
    /// State for a visible switch ready for interaction.
    #[must_use]
    pub fn idle(checked: bool) -> Self {
        Self {
            visible: true,
            checked,
            enabled: true,
        }
    }

    /// State while an enable/disable request is in flight: optimistically
    /// checked to the requested value, interaction gated off.
    #[must_use]
    pub fn pending(requested: bool) -> Self {
        Self {
            visible: true,
            checked: requested,
            enabled: false,
        }
    }

    /// State for a hidden switch.
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Notification from the external collaborator that device state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeEvent {
    /// The set of available subscriptions changed (SIM inserted/removed,
    /// eSIM provisioned, ...)
    SubscriptionsChanged,
    /// Another component changed the activation of the given subscription
    ActivationChanged(SubscriptionId),
}
