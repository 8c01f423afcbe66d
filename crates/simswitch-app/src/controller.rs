//! Switch reconciler
//!
//! Owns the phase machine that keeps the switch widget synchronized with the
//! target subscription: optimistic update on a user flip, async confirmation
//! against the subscription service, revert on rejection. Change
//! notifications that arrive while a request is in flight are queued and
//! re-applied once the request resolves, so an in-flight result can never
//! clobber a concurrent external change and no two `set_enabled` requests
//! for the same target are ever outstanding together.

use async_lock::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

use simswitch_core::{compute_visibility, CapabilityFlags, SubscriptionId, SwitchError, SwitchResult};

use crate::service::BoxedSubscriptionService;
use crate::state::{ChangeEvent, ToggleState};

/// Where the reconciler is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Not bound to a screen; all inputs ignored.
    Detached,
    /// Bound, but the availability rule says the switch is not shown.
    Hidden,
    /// Visible and ready for interaction.
    Idle { checked: bool },
    /// An enable/disable request is in flight.
    Pending { requested: bool, previous: bool },
}

struct Inner {
    service: BoxedSubscriptionService,
    target: SubscriptionId,
    phase: Phase,
    /// Bumped on every phase transition. A re-evaluation records it before
    /// its unlocked service reads and discards them if it moved, so reads
    /// that interleaved with a flip can never publish stale state.
    generation: u64,
    /// Display name of the target from the latest snapshot, for the switch
    /// bar title.
    target_name: Option<String>,
    /// Change events deferred while a request is in flight.
    queued: VecDeque<ChangeEvent>,
    /// Optional bound on how long a request may stay in flight before it is
    /// treated as rejected. Without it, a lost result leaves the switch
    /// disabled indefinitely.
    pending_timeout: Option<Duration>,
    state_tx: watch::Sender<ToggleState>,
}

impl Inner {
    fn publish(&self, state: ToggleState) {
        self.state_tx.send_replace(state);
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Controller for one subscription switch.
///
/// Cloneable handle; all clones share the same phase machine and state
/// channel. The hosting screen calls [`attach`](Self::attach) /
/// [`detach`](Self::detach) from its lifecycle, forwards user flips via
/// [`set_checked`](Self::set_checked), and pumps platform notifications into
/// [`handle_change`](Self::handle_change). The widget binds to
/// [`subscribe`](Self::subscribe).
#[derive(Clone)]
pub struct SwitchController {
    inner: Arc<RwLock<Inner>>,
    state_rx: watch::Receiver<ToggleState>,
}

impl SwitchController {
    /// Controller for `target` backed by the given service.
    #[must_use]
    pub fn new(service: BoxedSubscriptionService, target: SubscriptionId) -> Self {
        Self::build(service, target, None)
    }

    /// Controller that treats a request still unresolved after `timeout` as
    /// rejected, reverting instead of staying disabled forever.
    #[must_use]
    pub fn with_pending_timeout(
        service: BoxedSubscriptionService,
        target: SubscriptionId,
        timeout: Duration,
    ) -> Self {
        Self::build(service, target, Some(timeout))
    }

    fn build(
        service: BoxedSubscriptionService,
        target: SubscriptionId,
        pending_timeout: Option<Duration>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(ToggleState::hidden());
        let inner = Inner {
            service,
            target,
            phase: Phase::Detached,
            generation: 0,
            target_name: None,
            queued: VecDeque::new(),
            pending_timeout,
            state_tx,
        };
        Self {
            inner: Arc::new(RwLock::new(inner)),
            state_rx,
        }
    }

    /// Current published state.
    #[must_use]
    pub fn state(&self) -> ToggleState {
        *self.state_rx.borrow()
    }

    /// Watch channel carrying every published state, for the widget to bind.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ToggleState> {
        self.state_rx.clone()
    }

    /// Display name of the target subscription from the latest snapshot,
    /// for the switch bar title. `None` while detached or when the target
    /// is not known to the device.
    pub async fn target_display_name(&self) -> Option<String> {
        self.inner.read().await.target_name.clone()
    }

    /// Bind to the screen: run the availability rule and initialize the
    /// switch from the target's current activation status.
    ///
    /// Re-attaching recomputes from scratch, discarding any queued events.
    pub async fn attach(&self) -> SwitchResult<()> {
        let target = {
            let mut inner = self.inner.write().await;
            if !inner.target.is_valid() {
                return Err(SwitchError::UnknownSubscription(inner.target));
            }
            inner.set_phase(Phase::Hidden);
            inner.queued.clear();
            inner.target
        };
        debug!(subscription = %target, "switch controller attached");
        self.reevaluate().await;
        Ok(())
    }

    /// Unbind from the screen. The published state resets to hidden and all
    /// further inputs are ignored until the next attach.
    pub async fn detach(&self) {
        let mut inner = self.inner.write().await;
        inner.set_phase(Phase::Detached);
        inner.target_name = None;
        inner.queued.clear();
        inner.publish(ToggleState::hidden());
        debug!(subscription = %inner.target, "switch controller detached");
    }

    /// User flipped the switch to `requested`.
    ///
    /// Returns `Ok(true)` if a request was submitted (whatever its outcome),
    /// `Ok(false)` if the flip was a no-op: hidden switch, a request already
    /// in flight (the widget is disabled then, so this is the structural
    /// re-entrancy gate), or no actual change.
    pub async fn set_checked(&self, requested: bool) -> SwitchResult<bool> {
        let (service, target, previous, timeout) = {
            let mut inner = self.inner.write().await;
            match inner.phase {
                Phase::Detached => return Err(SwitchError::NotAttached),
                Phase::Hidden | Phase::Pending { .. } => return Ok(false),
                Phase::Idle { checked } if checked == requested => return Ok(false),
                Phase::Idle { checked } => {
                    inner.set_phase(Phase::Pending {
                        requested,
                        previous: checked,
                    });
                    inner.publish(ToggleState::pending(requested));
                    (
                        inner.service.clone(),
                        inner.target,
                        checked,
                        inner.pending_timeout,
                    )
                }
            }
        };

        debug!(subscription = %target, requested, "submitting subscription enable change");
        // Lock released: change notifications arriving now are queued against
        // the Pending phase and re-applied below.
        let accepted = match timeout {
            Some(limit) => match tokio::time::timeout(limit, service.set_enabled(target, requested))
                .await
            {
                Ok(accepted) => accepted,
                Err(_) => {
                    warn!(subscription = %target, requested, ?limit, "enable change timed out, treating as rejected");
                    false
                }
            },
            None => service.set_enabled(target, requested).await,
        };

        let deferred = {
            let mut inner = self.inner.write().await;
            if !matches!(inner.phase, Phase::Pending { .. }) {
                // Detached (or re-attached) while the request was in flight;
                // the resolution is moot.
                return Ok(true);
            }
            let confirmed = if accepted {
                requested
            } else {
                warn!(subscription = %target, requested, "enable change rejected, reverting switch");
                previous
            };
            inner.set_phase(Phase::Idle { checked: confirmed });
            inner.publish(ToggleState::idle(confirmed));
            std::mem::take(&mut inner.queued)
        };

        // One re-evaluation covers any number of deferred events: it reads
        // the service's current truth, which later events already reflect.
        if !deferred.is_empty() {
            debug!(subscription = %target, deferred = deferred.len(), "re-applying deferred change events");
            self.reevaluate().await;
        }
        Ok(true)
    }

    /// User toggled the switch (flip to the opposite of the current state).
    pub async fn toggle(&self) -> SwitchResult<bool> {
        let requested = {
            let inner = self.inner.read().await;
            match inner.phase {
                Phase::Detached => return Err(SwitchError::NotAttached),
                Phase::Hidden | Phase::Pending { .. } => return Ok(false),
                Phase::Idle { checked } => !checked,
            }
        };
        self.set_checked(requested).await
    }

    /// Platform notification: subscriptions or activations changed.
    ///
    /// While a request is in flight the event is queued and re-applied after
    /// resolution; otherwise the availability rule and checked state are
    /// recomputed immediately. Activation changes for other subscriptions
    /// are ignored.
    pub async fn handle_change(&self, event: ChangeEvent) {
        {
            let mut inner = self.inner.write().await;
            let relevant = match event {
                ChangeEvent::SubscriptionsChanged => true,
                ChangeEvent::ActivationChanged(id) => id == inner.target,
            };
            if !relevant {
                return;
            }
            match inner.phase {
                Phase::Detached => return,
                Phase::Pending { .. } => {
                    debug!(subscription = %inner.target, ?event, "deferring change event until request resolves");
                    inner.queued.push_back(event);
                    return;
                }
                Phase::Hidden | Phase::Idle { .. } => {}
            }
        }
        self.reevaluate().await;
    }

    /// Recompute visibility and checked state from a fresh service snapshot.
    ///
    /// The service reads happen without the lock held, so a flip (or another
    /// transition) can land in between. Every transition bumps the
    /// generation; if it moved by write-back time the reads are stale and
    /// are discarded rather than published over the confirmed state.
    async fn reevaluate(&self) {
        loop {
            let (service, target, generation) = {
                let mut inner = self.inner.write().await;
                match inner.phase {
                    Phase::Detached => return,
                    // A flip won the race to the lock; defer instead of
                    // reading state the resolution is about to change.
                    Phase::Pending { .. } => {
                        inner.queued.push_back(ChangeEvent::SubscriptionsChanged);
                        return;
                    }
                    Phase::Hidden | Phase::Idle { .. } => {}
                }
                (inner.service.clone(), inner.target, inner.generation)
            };

            let snapshot = service.available_subscriptions().await;
            let caps = CapabilityFlags {
                can_disable_physical: service.can_disable_physical_subscription().await,
            };
            let visible = compute_visibility(&snapshot, target, caps);
            let checked = if visible {
                service.is_active(target).await
            } else {
                false
            };
            let name = snapshot.get(target).map(|s| s.display_name.clone());

            let mut inner = self.inner.write().await;
            if inner.generation != generation {
                match inner.phase {
                    Phase::Detached => return,
                    // A flip is in flight; defer so resolution re-applies us.
                    Phase::Pending { .. } => {
                        inner.queued.push_back(ChangeEvent::SubscriptionsChanged);
                        return;
                    }
                    // The phase moved under us (e.g. a flip confirmed);
                    // discard the stale reads and re-run against fresh truth.
                    Phase::Hidden | Phase::Idle { .. } => {
                        debug!(subscription = %target, "discarding stale re-evaluation");
                        continue;
                    }
                }
            }
            inner.target_name = name;
            if visible {
                inner.set_phase(Phase::Idle { checked });
                inner.publish(ToggleState::idle(checked));
            } else {
                inner.set_phase(Phase::Hidden);
                inner.publish(ToggleState::hidden());
            }
            debug!(subscription = %target, visible, checked, "switch state re-evaluated");
            return;
        }
    }
}

// Controller tests live in `tests/controller.rs`: `simswitch-testkit`
// depends on this crate, so the mock cannot be used from the lib's own
// `#[cfg(test)]` build without linking a second copy of the crate.
