//! Status transition history.
//!
//! Every status change a wrapper makes is stamped and appended here, which
//! makes the lifecycle observable after the fact (for diagnostics and for
//! asserting ordering in tests).

use super::guard::ActivationId;
use super::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Most recent transitions kept per wrapper. Older entries are dropped.
pub const HISTORY_LIMIT: usize = 256;

/// Record of a single status change.
///
/// # Example
///
/// ```rust
/// use magic_button::core::{ActivationId, Status, StatusTransition};
/// use chrono::Utc;
///
/// let transition = StatusTransition {
///     from: Status::Idle,
///     to: Status::Pending,
///     timestamp: Utc::now(),
///     activation: ActivationId(1),
/// };
/// assert!(transition.from.can_transition_to(transition.to));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusTransition {
    /// Status before the change
    pub from: Status,
    /// Status after the change
    pub to: Status,
    /// When the change was applied
    pub timestamp: DateTime<Utc>,
    /// Activation that caused the change
    pub activation: ActivationId,
}

/// Ordered, bounded history of status changes.
///
/// `record` does not mutate: it returns a new history with the transition
/// appended, dropping the oldest entry once [`HISTORY_LIMIT`] is reached.
///
/// # Example
///
/// ```rust
/// use magic_button::core::{ActivationId, Status, StatusHistory, StatusTransition};
/// use chrono::Utc;
///
/// let step = |from, to| StatusTransition {
///     from,
///     to,
///     timestamp: Utc::now(),
///     activation: ActivationId(1),
/// };
///
/// let history = StatusHistory::new()
///     .record(step(Status::Idle, Status::Pending))
///     .record(step(Status::Pending, Status::Success))
///     .record(step(Status::Success, Status::Idle));
///
/// assert_eq!(
///     history.get_path(),
///     vec![&Status::Idle, &Status::Pending, &Status::Success, &Status::Idle]
/// );
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatusHistory {
    transitions: VecDeque<StatusTransition>,
}

impl StatusHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StatusTransition) -> Self {
        let mut transitions = self.transitions.clone();
        if transitions.len() == HISTORY_LIMIT {
            transitions.pop_front();
        }
        transitions.push_back(transition);
        Self { transitions }
    }

    /// Statuses traversed, in order: the `from` of the oldest retained
    /// transition followed by the `to` of each transition.
    pub fn get_path(&self) -> Vec<&Status> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Statuses traversed by one activation, in order.
    pub fn path_of(&self, activation: ActivationId) -> Vec<Status> {
        let mut steps = self
            .transitions
            .iter()
            .filter(|t| t.activation == activation)
            .peekable();
        let mut path = Vec::new();
        if let Some(first) = steps.peek() {
            path.push(first.from);
        }
        path.extend(steps.map(|t| t.to));
        path
    }

    /// Time between the oldest and newest retained transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StatusTransition> {
        self.transitions.iter()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StatusTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
