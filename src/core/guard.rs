//! Admission checks for incoming activations.
//!
//! Before an activation can start the lifecycle it must pass two guards:
//! the event must be genuine (not a replay the machine dispatched itself)
//! and no other activation may be in flight. Both checks are pure so they
//! can be exercised without a runtime or a host element.

use super::status::Status;
use crate::host::Origin;
use serde::{Deserialize, Serialize};

/// Identifier of one accepted activation.
///
/// Ids increase monotonically per wrapper instance. Timers and reset handles
/// remember the id they were created for and become no-ops once a newer
/// activation has been accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActivationId(pub u64);

impl ActivationId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ActivationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why an activation was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The event was produced by the machine's own replay.
    Synthetic,
    /// Another activation is still in flight.
    Busy,
    /// The wrapper has been torn down.
    Disposed,
}

/// Outcome of offering an activation to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    /// The activation started a new lifecycle.
    Accepted(ActivationId),
    /// The activation was dropped without side effects.
    Ignored(Rejection),
}

impl Admission {
    /// True if the activation started a lifecycle.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Ignored(reason) => Some(*reason),
        }
    }
}

/// Decide whether an activation may start a lifecycle.
///
/// The synthetic check runs first so that a replay is discarded even while
/// the machine is busy, which is always the case when a replay arrives.
///
/// # Example
///
/// ```rust
/// use magic_button::core::{screen, Rejection, Status};
/// use magic_button::host::Origin;
///
/// assert_eq!(screen(Origin::Genuine, Status::Idle, false), Ok(()));
/// assert_eq!(screen(Origin::Synthetic, Status::Idle, false), Err(Rejection::Synthetic));
/// assert_eq!(screen(Origin::Genuine, Status::Pending, true), Err(Rejection::Busy));
/// ```
pub fn screen(origin: Origin, status: Status, in_flight: bool) -> Result<(), Rejection> {
    if origin.is_synthetic() {
        return Err(Rejection::Synthetic);
    }
    if status.is_busy() || in_flight {
        return Err(Rejection::Busy);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genuine_event_on_idle_is_admitted() {
        assert_eq!(screen(Origin::Genuine, Status::Idle, false), Ok(()));
    }

    #[test]
    fn synthetic_events_are_rejected_in_every_state() {
        for status in [
            Status::Idle,
            Status::Pending,
            Status::Success,
            Status::Failure,
        ] {
            for in_flight in [false, true] {
                assert_eq!(
                    screen(Origin::Synthetic, status, in_flight),
                    Err(Rejection::Synthetic)
                );
            }
        }
    }

    #[test]
    fn pending_rejects_genuine_events() {
        assert_eq!(
            screen(Origin::Genuine, Status::Pending, false),
            Err(Rejection::Busy)
        );
    }

    #[test]
    fn queued_activation_counts_as_busy() {
        // accepted but first frame not yet run: status is still idle
        assert_eq!(
            screen(Origin::Genuine, Status::Idle, true),
            Err(Rejection::Busy)
        );
    }

    #[test]
    fn settled_states_admit_new_activations() {
        assert_eq!(screen(Origin::Genuine, Status::Success, false), Ok(()));
        assert_eq!(screen(Origin::Genuine, Status::Failure, false), Ok(()));
    }

    #[test]
    fn activation_ids_increase() {
        let first = ActivationId::default();
        assert!(first.next() > first);
        assert_eq!(first.next().next(), ActivationId(2));
        assert_eq!(ActivationId(7).to_string(), "#7");
    }

    #[test]
    fn admission_reports_rejection() {
        assert!(Admission::Accepted(ActivationId(1)).is_accepted());
        assert_eq!(Admission::Accepted(ActivationId(1)).rejection(), None);
        assert_eq!(
            Admission::Ignored(Rejection::Busy).rejection(),
            Some(Rejection::Busy)
        );
    }
}
