//! Magic Button: async action feedback for a single interactive element
//!
//! A [`MagicButton`] wraps one element (typically a button or link) and runs
//! an async action each time the user activates it. While the action runs
//! the element shows a spinner and is locked to its original size; when it
//! finishes a check or cross replaces the spinner, and after a delay the
//! original content comes back.
//!
//! The crate follows a "pure core, effectful shell" layout:
//!
//! - [`core`]: status model, activation screening and history. Pure.
//! - [`render`]: views, icons and geometry capture. Pure apart from the
//!   one-off style registration.
//! - [`effects`]: the state machine, frame deferral and the action itself.
//! - [`host`]: the traits the hosting UI implements.
//!
//! # Example
//!
//! ```rust
//! use magic_button::host::{ActivationEvent, BoxMetrics, Element, Insets, MeasureError};
//! use magic_button::render::View;
//! use magic_button::{Action, MagicButton, Status};
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct SaveButton {
//!     shown: Mutex<Vec<Status>>,
//! }
//!
//! impl Element for SaveButton {
//!     fn measure(&self) -> Result<BoxMetrics, MeasureError> {
//!         Ok(BoxMetrics {
//!             width: 96.0,
//!             height: 32.0,
//!             padding: Insets::symmetric(6.0, 12.0),
//!             color: Some("white".into()),
//!         })
//!     }
//!
//!     fn dispatch(&self, _event: ActivationEvent) {}
//!
//!     fn render(&self, view: &View) {
//!         self.shown.lock().unwrap().push(view.status);
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let element = Arc::new(SaveButton::default());
//! let button = MagicButton::builder()
//!     .child(Arc::clone(&element))
//!     .action(Action::from_async(|_event| async {
//!         // talk to the server here
//!         Ok(())
//!     }))
//!     .reset_after(Duration::from_millis(10))
//!     .build()
//!     .unwrap();
//!
//! button.handle_activation(ActivationEvent::click(4.0, 4.0));
//! button.run_frame();
//!
//! let mut status = button.subscribe();
//! status.wait_for(|s| *s == Status::Idle).await.unwrap();
//! assert_eq!(
//!     element.shown.lock().unwrap().as_slice(),
//!     &[Status::Idle, Status::Pending, Status::Success, Status::Idle]
//! );
//! # }
//! ```

pub mod builder;
pub mod button;
pub mod config;
pub mod core;
pub mod effects;
pub mod host;
pub mod render;

pub use builder::{ConfigError, ConfigErrors, MagicButtonBuilder};
pub use button::{ActivationHandle, MagicButton};
pub use config::{IconOverrides, ResetDelay, WrapperOptions};
pub use core::{ActivationId, Admission, Rejection, Status, StatusHistory};
pub use effects::{Action, ActionError, ResetHandle};
pub use host::{ActivationEvent, Document, Element, Origin};
pub use render::{IconSize, View};
