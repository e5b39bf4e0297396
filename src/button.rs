//! The public wrapper type.

use crate::builder::MagicButtonBuilder;
use crate::config::Configuration;
use crate::core::{Admission, Rejection, Status, StatusHistory};
use crate::effects::{ActionError, Machine, FRAME_INTERVAL};
use crate::host::{ActivationEvent, Element};
use crate::render::{CapturedGeometry, View};
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;
use uuid::Uuid;

/// Wraps one element and shows pending, success and failure icons while its
/// action runs.
///
/// The host forwards activations with [`handle_activation`](Self::handle_activation)
/// and drives deferred work either by calling [`run_frame`](Self::run_frame)
/// once per display frame or by starting [`drive_frames`](Self::drive_frames).
///
/// Dropping the wrapper disposes it: queued frames, timers and the result of
/// a running action are discarded.
pub struct MagicButton<E: Element + 'static> {
    machine: Arc<Machine<E>>,
}

impl<E: Element + 'static> MagicButton<E> {
    pub fn builder() -> MagicButtonBuilder<E> {
        MagicButtonBuilder::new()
    }

    pub(crate) fn from_machine(machine: Arc<Machine<E>>) -> Self {
        Self { machine }
    }

    /// Offer an activation from the host.
    ///
    /// Synthetic events and activations arriving while the wrapper is busy
    /// are ignored.
    pub fn handle_activation(&self, event: ActivationEvent) -> Admission {
        self.machine.handle_activation(event)
    }

    /// Run one frame of deferred work.
    pub fn run_frame(&self) -> usize {
        self.machine.run_frame()
    }

    /// Return to idle now. No effect while an activation is in flight.
    pub fn reset(&self) -> bool {
        self.machine.reset(None)
    }

    /// Weak handle for forwarding activations, e.g. from inside the
    /// element's own event listener.
    pub fn handle(&self) -> ActivationHandle<E> {
        ActivationHandle {
            machine: Arc::downgrade(&self.machine),
        }
    }

    /// Run frames on a timer until the wrapper is dropped or disposed.
    pub fn drive_frames(&self, period: Duration) -> JoinHandle<()> {
        let machine = Arc::downgrade(&self.machine);
        let period = if period.is_zero() { FRAME_INTERVAL } else { period };
        self.machine.runtime().spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                let Some(machine) = machine.upgrade() else {
                    break;
                };
                if machine.is_disposed() {
                    break;
                }
                machine.run_frame();
            }
            trace!("frame driver stopped");
        })
    }

    pub fn dispose(&self) {
        self.machine.dispose();
    }

    pub fn id(&self) -> Uuid {
        self.machine.id()
    }

    pub fn element(&self) -> &Arc<E> {
        self.machine.element()
    }

    pub fn config(&self) -> &Configuration {
        self.machine.config()
    }

    pub fn status(&self) -> Status {
        self.machine.status()
    }

    pub fn geometry(&self) -> Option<CapturedGeometry> {
        self.machine.geometry()
    }

    pub fn history(&self) -> StatusHistory {
        self.machine.history()
    }

    /// Error of the latest settled activation, `None` after a success.
    pub fn last_error(&self) -> Option<ActionError> {
        self.machine.last_error()
    }

    pub fn is_busy(&self) -> bool {
        self.machine.is_in_flight()
    }

    pub fn view(&self) -> View {
        self.machine.view()
    }

    /// Receiver that observes every status change.
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.machine.subscribe()
    }
}

impl<E: Element + 'static> Drop for MagicButton<E> {
    fn drop(&mut self) {
        self.machine.dispose();
    }
}

impl<E: Element + 'static> fmt::Debug for MagicButton<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagicButton")
            .field("id", &self.id())
            .field("status", &self.status())
            .field("busy", &self.is_busy())
            .finish()
    }
}

/// Forwards activations to a wrapper without keeping it alive.
pub struct ActivationHandle<E: Element + 'static> {
    machine: Weak<Machine<E>>,
}

impl<E: Element + 'static> ActivationHandle<E> {
    pub fn handle_activation(&self, event: ActivationEvent) -> Admission {
        match self.machine.upgrade() {
            Some(machine) => machine.handle_activation(event),
            None => Admission::Ignored(Rejection::Disposed),
        }
    }

    pub fn is_live(&self) -> bool {
        self.machine
            .upgrade()
            .is_some_and(|machine| !machine.is_disposed())
    }
}

impl<E: Element + 'static> Clone for ActivationHandle<E> {
    fn clone(&self) -> Self {
        Self {
            machine: Weak::clone(&self.machine),
        }
    }
}

impl<E: Element + 'static> fmt::Debug for ActivationHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationHandle")
            .field("live", &self.is_live())
            .finish()
    }
}
