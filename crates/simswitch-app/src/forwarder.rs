//! Change notification forwarding
//!
//! The platform layer typically exposes subscription changes as a callback
//! or listener registration. Hosts adapt that to an mpsc channel and let the
//! forwarder pump events into the controller from a background task.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::SwitchController;
use crate::state::ChangeEvent;

/// Drive `controller` from a channel of change events.
///
/// Runs until the sending side is dropped. Events are applied one at a time,
/// in order; the controller itself defers any that arrive while a request is
/// in flight.
pub fn spawn_change_forwarder(
    controller: SwitchController,
    mut events: mpsc::Receiver<ChangeEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            controller.handle_change(event).await;
        }
        debug!("change notification channel closed");
    })
}

// Forwarder tests live in `tests/forwarder.rs`: `simswitch-testkit`
// depends on this crate, so the mock cannot be used from the lib's own
// `#[cfg(test)]` build without linking a second copy of the crate.
