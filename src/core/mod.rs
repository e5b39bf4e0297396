//! Pure core of the interaction lifecycle.
//!
//! - [`Status`]: the four interaction phases and their legal successors
//! - [`screen`]: admission of incoming activations
//! - [`StatusHistory`]: immutable record of status changes
//!
//! Nothing in this module touches a host element, a timer or a runtime.

mod guard;
mod history;
mod status;

pub use guard::{screen, ActivationId, Admission, Rejection};
pub use history::{StatusHistory, StatusTransition, HISTORY_LIMIT};
pub use status::Status;
