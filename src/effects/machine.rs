//! Interaction state machine.
//!
//! Owns the status of one wrapped element and sequences
//! `idle -> pending -> success|failure -> idle`:
//!
//! 1. `handle_activation` drops synthetic and busy activations, captures the
//!    element geometry on first use and queues [`Stage::CommitPending`].
//! 2. The next frame commits `pending`, renders it, starts the action on its
//!    own task and queues [`Stage::Replay`].
//! 3. The frame after that dispatches the synthetic copy of the activation.
//! 4. When the action finishes the machine settles on `success` or
//!    `failure` and, unless auto-reset is disabled, schedules the return to
//!    idle.
//!
//! Host callbacks are never made while the state lock is held.

use super::action::ActionError;
use super::frame::{FrameQueue, Stage};
use crate::config::Configuration;
use crate::core::{
    screen, ActivationId, Admission, Rejection, Status, StatusHistory, StatusTransition,
};
use crate::host::{ActivationEvent, Element};
use crate::render::{self, geometry, styles, CapturedGeometry, View};
use chrono::Utc;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, trace, warn};
use uuid::Uuid;

struct Inner {
    status: Status,
    geometry: Option<CapturedGeometry>,
    /// Set from acceptance until the action settles.
    in_flight: bool,
    activation: ActivationId,
    frames: FrameQueue<Stage>,
    history: StatusHistory,
    last_error: Option<ActionError>,
    disposed: bool,
}

/// State machine behind one [`crate::MagicButton`].
pub struct Machine<E: Element + 'static> {
    id: Uuid,
    element: Arc<E>,
    config: Configuration,
    runtime: Handle,
    inner: Mutex<Inner>,
    status_tx: watch::Sender<Status>,
}

impl<E: Element + 'static> Machine<E> {
    pub(crate) fn new(element: Arc<E>, config: Configuration, runtime: Handle) -> Arc<Self> {
        let (status_tx, _) = watch::channel(Status::Idle);
        Arc::new(Self {
            id: Uuid::new_v4(),
            element,
            config,
            runtime,
            inner: Mutex::new(Inner {
                status: Status::Idle,
                geometry: None,
                in_flight: false,
                activation: ActivationId::default(),
                frames: FrameQueue::new(),
                history: StatusHistory::new(),
                last_error: None,
                disposed: false,
            }),
            status_tx,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Render the initial idle view.
    pub(crate) fn mount(&self) {
        debug!(button = %self.id, "mounted");
        self.render_current();
    }

    /// Offer an activation to the machine.
    pub fn handle_activation(self: &Arc<Self>, event: ActivationEvent) -> Admission {
        let (activation, needs_geometry) = {
            let mut inner = self.lock();
            if inner.disposed {
                trace!(button = %self.id, "activation on disposed wrapper ignored");
                return Admission::Ignored(Rejection::Disposed);
            }
            if let Err(reason) = screen(event.origin, inner.status, inner.in_flight) {
                trace!(button = %self.id, ?reason, status = inner.status.name(), "activation ignored");
                return Admission::Ignored(reason);
            }
            inner.activation = inner.activation.next();
            inner.in_flight = true;
            (inner.activation, inner.geometry.is_none())
        };

        // measured before the first pending frame so the size lock is right
        // from the start
        if needs_geometry {
            self.capture_geometry();
        }

        let mut inner = self.lock();
        if inner.disposed {
            return Admission::Ignored(Rejection::Disposed);
        }
        inner
            .frames
            .schedule(Stage::CommitPending { activation, event });
        debug!(button = %self.id, %activation, "activation accepted");
        Admission::Accepted(activation)
    }

    fn capture_geometry(&self) {
        match geometry::capture_once(self.element.as_ref()) {
            Ok(captured) => {
                let mut inner = self.lock();
                if inner.geometry.is_none() {
                    debug!(
                        button = %self.id,
                        width = captured.width,
                        height = captured.height,
                        icon_size = captured.icon_size,
                        "geometry captured"
                    );
                    inner.geometry = Some(captured);
                }
            }
            Err(err) => {
                warn!(button = %self.id, error = %err, "could not measure element, using default icon size and color");
            }
        }
    }

    /// Run the work queued for this frame. Returns the number of stages run.
    pub fn run_frame(self: &Arc<Self>) -> usize {
        let batch = {
            let mut inner = self.lock();
            if inner.disposed {
                return 0;
            }
            inner.frames.take_frame()
        };
        let count = batch.len();
        for stage in batch {
            match stage {
                Stage::CommitPending { activation, event } => {
                    self.commit_pending(activation, event)
                }
                Stage::Replay { activation, event } => self.replay(activation, event),
            }
        }
        count
    }

    fn commit_pending(self: &Arc<Self>, activation: ActivationId, event: ActivationEvent) {
        {
            let mut inner = self.lock();
            if inner.disposed || inner.activation != activation {
                return;
            }
            // accepted while still showing the previous outcome
            if inner.status.is_settled() {
                self.transition(&mut inner, Status::Idle, activation);
            }
            self.transition(&mut inner, Status::Pending, activation);
            inner.frames.schedule(Stage::Replay {
                activation,
                event: event.clone(),
            });
        }
        self.render_current();
        self.invoke_action(activation, event);
    }

    fn replay(&self, activation: ActivationId, event: ActivationEvent) {
        if self.lock().disposed {
            return;
        }
        debug!(button = %self.id, %activation, "replaying activation on element");
        self.element.dispatch(event.replay());
    }

    fn invoke_action(self: &Arc<Self>, activation: ActivationId, event: ActivationEvent) {
        let action = self.config.action.clone();
        let runtime = self.runtime.clone();
        let machine = Arc::downgrade(self);
        self.runtime.spawn(async move {
            // own task, so a panicking action still settles the machine
            let outcome = match runtime.spawn(async move { action.invoke(event).await }).await {
                Ok(result) => result,
                Err(join) if join.is_panic() => {
                    Err(ActionError::Panicked(panic_message(join.into_panic())))
                }
                Err(_) => Err(ActionError::Cancelled),
            };
            if let Some(machine) = machine.upgrade() {
                machine.settle(activation, outcome);
            }
        });
    }

    fn settle(self: &Arc<Self>, activation: ActivationId, outcome: Result<(), ActionError>) {
        let status = {
            let mut inner = self.lock();
            if inner.disposed || inner.activation != activation {
                return;
            }
            inner.in_flight = false;
            let status = match outcome {
                Ok(()) => {
                    inner.last_error = None;
                    Status::Success
                }
                Err(err) => {
                    error!(button = %self.id, %activation, error = %err, "action failed");
                    inner.last_error = Some(err);
                    Status::Failure
                }
            };
            self.transition(&mut inner, status, activation);
            status
        };
        self.render_current();
        self.schedule_reset(activation, status);
    }

    fn schedule_reset(self: &Arc<Self>, activation: ActivationId, settled: Status) {
        let Some(delay) = self.config.reset_delay().duration() else {
            debug!(button = %self.id, %activation, "auto-reset disabled");
            return;
        };
        let on_success = match settled {
            Status::Success => self.config.on_success.clone(),
            _ => None,
        };
        let machine = Arc::downgrade(self);
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(machine) = machine.upgrade() else {
                return;
            };
            if !machine.is_current(activation, settled) {
                trace!(button = %machine.id, %activation, "stale reset timer");
                return;
            }
            let handle = ResetHandle::new(&machine, activation);
            drop(machine);
            match on_success {
                Some(effect) => effect(handle),
                None => {
                    handle.reset();
                }
            }
        });
    }

    fn is_current(&self, activation: ActivationId, status: Status) -> bool {
        let inner = self.lock();
        !inner.disposed && inner.activation == activation && inner.status == status
    }

    /// Return to idle.
    ///
    /// With `Some(activation)` the reset only applies while that activation
    /// is the latest one. Ignored while an activation is in flight. Returns
    /// true if the status changed.
    pub fn reset(&self, activation: Option<ActivationId>) -> bool {
        {
            let mut inner = self.lock();
            if inner.disposed {
                return false;
            }
            if activation.is_some_and(|a| a != inner.activation) {
                trace!(button = %self.id, "reset from an older activation ignored");
                return false;
            }
            if inner.in_flight {
                warn!(button = %self.id, "reset ignored while an activation is in flight");
                return false;
            }
            if inner.status == Status::Idle {
                return false;
            }
            let current = inner.activation;
            self.transition(&mut inner, Status::Idle, current);
        }
        self.render_current();
        true
    }

    fn transition(&self, inner: &mut Inner, to: Status, activation: ActivationId) {
        let from = inner.status;
        if from == to {
            return;
        }
        debug_assert!(
            from.can_transition_to(to),
            "illegal status transition {from} -> {to}"
        );
        inner.history = inner.history.record(StatusTransition {
            from,
            to,
            timestamp: Utc::now(),
            activation,
        });
        inner.status = to;
        self.status_tx.send_replace(to);
        debug!(button = %self.id, %activation, from = from.name(), to = to.name(), "status transition");
    }

    fn render_current(&self) {
        let view = {
            let inner = self.lock();
            if inner.disposed {
                return;
            }
            render::render(inner.status, inner.geometry.as_ref(), self.config.overrides())
        };
        if !view.is_original() {
            styles::ensure_animations_registered(self.element.document());
        }
        self.element.render(&view);
    }

    /// Stop all further work. Queued frames are dropped and every pending
    /// timer, replay and action completion becomes a no-op.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.frames.clear();
        debug!(button = %self.id, status = inner.status.name(), "disposed");
    }

    /// Instance id carried in every log record.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The wrapped element.
    pub fn element(&self) -> &Arc<E> {
        &self.element
    }

    /// Configuration fixed at build time.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub(crate) fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.lock().status
    }

    /// Geometry captured at the first measurable activation.
    pub fn geometry(&self) -> Option<CapturedGeometry> {
        self.lock().geometry.clone()
    }

    /// Snapshot of the status history.
    pub fn history(&self) -> StatusHistory {
        self.lock().history.clone()
    }

    /// Error of the latest settled activation, `None` after a success.
    pub fn last_error(&self) -> Option<ActionError> {
        self.lock().last_error.clone()
    }

    /// Id of the most recently accepted activation.
    pub fn current_activation(&self) -> ActivationId {
        self.lock().activation
    }

    /// True from acceptance until the action settles.
    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// True once `dispose` has run.
    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    /// Stages waiting for the next frame.
    pub fn queued_stages(&self) -> usize {
        self.lock().frames.len()
    }

    /// View for the current status.
    pub fn view(&self) -> View {
        let inner = self.lock();
        render::render(inner.status, inner.geometry.as_ref(), self.config.overrides())
    }

    /// Receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status_tx.subscribe()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

trait Resettable: Send + Sync {
    fn reset_activation(&self, activation: ActivationId) -> bool;
}

impl<E: Element + 'static> Resettable for Machine<E> {
    fn reset_activation(&self, activation: ActivationId) -> bool {
        self.reset(Some(activation))
    }
}

/// Returns a wrapper to idle once its activation has settled.
///
/// Handed to the success effect. A handle only acts on the activation it was
/// created for: after a newer activation starts, or after the wrapper is
/// dropped, `reset` does nothing.
#[derive(Clone)]
pub struct ResetHandle {
    target: Weak<dyn Resettable>,
    activation: ActivationId,
}

impl ResetHandle {
    fn new<E: Element + 'static>(machine: &Arc<Machine<E>>, activation: ActivationId) -> Self {
        let weak = Arc::downgrade(machine);
        let target: Weak<dyn Resettable> = weak;
        Self { target, activation }
    }

    /// Return to idle. Returns true if the status changed.
    pub fn reset(&self) -> bool {
        self.target
            .upgrade()
            .is_some_and(|target| target.reset_activation(self.activation))
    }

    pub fn activation(&self) -> ActivationId {
        self.activation
    }
}

impl fmt::Debug for ResetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetHandle")
            .field("activation", &self.activation)
            .field("live", &(self.target.strong_count() > 0))
            .finish()
    }
}
