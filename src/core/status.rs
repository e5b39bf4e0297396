//! The four-phase interaction status.
//!
//! A wrapped element is always in exactly one of these phases. All methods
//! here are pure; the only code that changes a status value is the
//! interaction machine in [`crate::effects`].

use serde::{Deserialize, Serialize};

/// Interaction phase of a wrapped element.
///
/// The lifecycle is a cycle with no terminal state:
///
/// ```text
/// Idle -> Pending -> Success -> Idle
///                 -> Failure -> Idle
/// ```
///
/// # Example
///
/// ```rust
/// use magic_button::core::Status;
///
/// let status = Status::default();
/// assert_eq!(status, Status::Idle);
/// assert!(status.can_transition_to(Status::Pending));
/// assert!(!status.can_transition_to(Status::Success));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Element renders exactly as supplied.
    #[default]
    Idle,
    /// The action is in flight.
    Pending,
    /// The action resolved.
    Success,
    /// The action returned an error or panicked.
    Failure,
}

impl Status {
    /// Stable lowercase name, used in logs and styling hooks.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    /// True while an action is running.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once the action has produced an outcome and the element is
    /// waiting to return to idle.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }

    /// True for the failure phase.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Every non-idle phase carries an icon.
    pub fn has_icon(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Whether `next` is a legal successor of this phase.
    ///
    /// Self-transitions are never legal; the machine skips them instead of
    /// recording them.
    pub fn can_transition_to(&self, next: Status) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Status::Pending)
                | (Self::Pending, Status::Success)
                | (Self::Pending, Status::Failure)
                | (Self::Success, Status::Idle)
                | (Self::Failure, Status::Idle)
        )
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Status; 4] = [
        Status::Idle,
        Status::Pending,
        Status::Success,
        Status::Failure,
    ];

    #[test]
    fn default_is_idle() {
        assert_eq!(Status::default(), Status::Idle);
    }

    #[test]
    fn names_are_lowercase() {
        assert_eq!(Status::Idle.name(), "idle");
        assert_eq!(Status::Pending.name(), "pending");
        assert_eq!(Status::Success.name(), "success");
        assert_eq!(Status::Failure.name(), "failure");
        assert_eq!(Status::Failure.to_string(), "failure");
    }

    #[test]
    fn only_pending_is_busy() {
        for status in ALL {
            assert_eq!(status.is_busy(), status == Status::Pending);
        }
    }

    #[test]
    fn settled_states_are_success_and_failure() {
        assert!(!Status::Idle.is_settled());
        assert!(!Status::Pending.is_settled());
        assert!(Status::Success.is_settled());
        assert!(Status::Failure.is_settled());
        assert!(Status::Failure.is_error());
        assert!(!Status::Success.is_error());
    }

    #[test]
    fn idle_has_no_icon() {
        assert!(!Status::Idle.has_icon());
        assert!(Status::Pending.has_icon());
        assert!(Status::Success.has_icon());
        assert!(Status::Failure.has_icon());
    }

    #[test]
    fn lifecycle_edges_are_legal() {
        assert!(Status::Idle.can_transition_to(Status::Pending));
        assert!(Status::Pending.can_transition_to(Status::Success));
        assert!(Status::Pending.can_transition_to(Status::Failure));
        assert!(Status::Success.can_transition_to(Status::Idle));
        assert!(Status::Failure.can_transition_to(Status::Idle));
    }

    #[test]
    fn skipping_phases_is_illegal() {
        assert!(!Status::Idle.can_transition_to(Status::Success));
        assert!(!Status::Idle.can_transition_to(Status::Failure));
        assert!(!Status::Pending.can_transition_to(Status::Idle));
        assert!(!Status::Success.can_transition_to(Status::Pending));
        assert!(!Status::Failure.can_transition_to(Status::Success));
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&Status::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let back: Status = serde_json::from_str("\"failure\"").unwrap();
        assert_eq!(back, Status::Failure);
    }
}
