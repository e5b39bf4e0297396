//! Frame-deferred work.
//!
//! The pending state must be on screen before the replayed activation fires,
//! otherwise its side effects (a navigation, a form submit) can happen before
//! the user ever sees the spinner. That ordering is expressed as two stages
//! queued one frame apart: [`Stage::CommitPending`] runs at the first frame
//! after acceptance and queues [`Stage::Replay`] for the frame after that.

use crate::core::ActivationId;
use crate::host::ActivationEvent;
use std::collections::VecDeque;
use std::time::Duration;

/// Period of [`crate::MagicButton::drive_frames`] when the host has no
/// paint callback of its own.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Work tagged with the stage of the activation it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    /// Switch to pending, render, start the action, queue the replay.
    CommitPending {
        activation: ActivationId,
        event: ActivationEvent,
    },
    /// Dispatch the synthetic copy of the activation on the element.
    Replay {
        activation: ActivationId,
        event: ActivationEvent,
    },
}

impl Stage {
    pub fn activation(&self) -> ActivationId {
        match self {
            Self::CommitPending { activation, .. } | Self::Replay { activation, .. } => *activation,
        }
    }
}

/// Queue of work deferred to the next frame.
///
/// [`FrameQueue::take_frame`] hands out only what was queued before the
/// frame began; anything scheduled while that batch runs waits for the
/// following frame.
///
/// # Example
///
/// ```rust
/// use magic_button::effects::FrameQueue;
///
/// let mut queue = FrameQueue::new();
/// queue.schedule("first");
///
/// let frame = queue.take_frame();
/// queue.schedule("second"); // scheduled while running frame 1
///
/// assert_eq!(frame, vec!["first"]);
/// assert_eq!(queue.take_frame(), vec!["second"]);
/// assert!(queue.take_frame().is_empty());
/// ```
#[derive(Debug)]
pub struct FrameQueue<T> {
    queued: VecDeque<T>,
    frame: u64,
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            frame: 0,
        }
    }

    /// Defer `task` to the next frame.
    pub fn schedule(&mut self, task: T) {
        self.queued.push_back(task);
    }

    /// Start a frame: remove and return everything queued so far.
    pub fn take_frame(&mut self) -> Vec<T> {
        self.frame += 1;
        self.queued.drain(..).collect()
    }

    /// Drop all queued work.
    pub fn clear(&mut self) {
        self.queued.clear();
    }

    /// Frames started so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_keep_fifo_order_within_a_frame() {
        let mut queue = FrameQueue::new();
        queue.schedule(1);
        queue.schedule(2);
        queue.schedule(3);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.take_frame(), vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn two_stage_work_spans_two_frames() {
        let event = ActivationEvent::click(4.0, 2.0);
        let mut queue = FrameQueue::new();
        queue.schedule(Stage::CommitPending {
            activation: ActivationId(1),
            event: event.clone(),
        });

        let first = queue.take_frame();
        assert!(matches!(first[0], Stage::CommitPending { .. }));
        queue.schedule(Stage::Replay {
            activation: first[0].activation(),
            event,
        });
        assert_eq!(first.len(), 1);

        let second = queue.take_frame();
        assert!(matches!(second[0], Stage::Replay { .. }));
        assert_eq!(second[0].activation(), ActivationId(1));
        assert_eq!(queue.frames(), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let mut queue = FrameQueue::new();
        queue.schedule("a");
        queue.clear();
        assert!(queue.take_frame().is_empty());
    }
}
