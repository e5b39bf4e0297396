//! Effectful shell around the pure core.
//!
//! Everything that touches time, tasks or the host element lives here:
//!
//! - [`Action`]: the user's async action (closures or Stillwater effects)
//! - [`FrameQueue`]: two-stage deferral of the pending commit and the replay
//! - [`Machine`]: the interaction state machine itself

mod action;
mod frame;
mod machine;

pub use action::{Action, ActionError, ActionFuture};
pub use frame::{FrameQueue, Stage, FRAME_INTERVAL};
pub use machine::{Machine, ResetHandle};
