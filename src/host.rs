//! Host collaborator interface.
//!
//! The lifecycle engine never draws anything itself. The hosting UI supplies
//! an [`Element`] that can be measured, can receive a replayed activation and
//! can apply a [`View`]; the engine decides *what* to show and *when*.

use crate::render::View;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an activation came from.
///
/// Every event carries its origin explicitly. The machine replays the
/// original activation on the element after the pending state is on screen;
/// that replay is tagged [`Origin::Synthetic`] and is discarded when it
/// re-enters the activation handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Produced by the user.
    #[default]
    Genuine,
    /// Produced by the engine's replay.
    Synthetic,
}

impl Origin {
    pub fn is_genuine(&self) -> bool {
        matches!(self, Self::Genuine)
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic)
    }
}

/// Pointer button that triggered the activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    /// Keyboard activation (Enter / Space on a focused element).
    Keyboard,
}

bitflags! {
    /// Modifier keys held during the activation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Pointer position in screen and client (viewport) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub screen_x: f64,
    pub screen_y: f64,
    pub client_x: f64,
    pub client_y: f64,
}

/// Descriptor of a triggering interaction.
///
/// # Example
///
/// ```rust
/// use magic_button::host::{ActivationEvent, Modifiers, Origin};
///
/// let click = ActivationEvent::click(120.0, 48.0).with_modifiers(Modifiers::SHIFT);
/// let replay = click.replay();
///
/// assert_eq!(click.origin, Origin::Genuine);
/// assert_eq!(replay.origin, Origin::Synthetic);
/// assert_eq!(replay.pointer, click.pointer);
/// assert_eq!(replay.modifiers, Modifiers::SHIFT);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivationEvent {
    pub origin: Origin,
    pub pointer: Pointer,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// Click count reported by the host (1 for a single click).
    pub detail: u32,
}

impl ActivationEvent {
    /// A genuine primary-button click at the given client coordinates.
    ///
    /// Screen coordinates are set to the client coordinates; use
    /// [`ActivationEvent::with_pointer`] when the host knows both.
    pub fn click(client_x: f64, client_y: f64) -> Self {
        Self {
            origin: Origin::Genuine,
            pointer: Pointer {
                screen_x: client_x,
                screen_y: client_y,
                client_x,
                client_y,
            },
            button: MouseButton::Primary,
            modifiers: Modifiers::empty(),
            detail: 1,
        }
    }

    /// A genuine keyboard activation.
    pub fn keyboard() -> Self {
        Self {
            button: MouseButton::Keyboard,
            detail: 0,
            ..Self::default()
        }
    }

    pub fn with_pointer(mut self, pointer: Pointer) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_detail(mut self, detail: u32) -> Self {
        self.detail = detail;
        self
    }

    /// A synthetic copy carrying the same spatial, button and modifier data.
    pub fn replay(&self) -> Self {
        Self {
            origin: Origin::Synthetic,
            ..self.clone()
        }
    }

    pub fn is_genuine(&self) -> bool {
        self.origin.is_genuine()
    }
}

/// Padding on each side of a box, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// Same padding on every side.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical and horizontal padding, CSS shorthand order.
    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Rendered box and computed text color of an element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxMetrics {
    /// Border-box width in pixels.
    pub width: f64,
    /// Border-box height in pixels.
    pub height: f64,
    pub padding: Insets,
    /// Computed text color, `None` when the host cannot read it.
    pub color: Option<String>,
}

/// Why an element could not be measured.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeasureError {
    #[error("element is not attached or has no layout yet")]
    Unavailable,

    #[error("element reported a non-finite dimension ({width} x {height})")]
    NonFinite { width: f64, height: f64 },
}

/// Style sink of the document an element lives in.
///
/// Implementations must make `insert_style` idempotent per `id`; the
/// registrar only calls it after `contains_style` returned false.
pub trait Document: Send + Sync {
    /// Whether a style block with this id is already present.
    fn contains_style(&self, id: &str) -> bool;

    /// Insert a style block under `id`.
    fn insert_style(&self, id: &str, css: &str);
}

/// The single interactive element a wrapper decorates.
///
/// All methods take `&self`; hosts use interior mutability. The engine never
/// calls into the element while holding its own lock, so `dispatch` may call
/// straight back into the wrapper's activation handler.
pub trait Element: Send + Sync {
    /// Read the rendered box and computed color.
    fn measure(&self) -> Result<BoxMetrics, MeasureError>;

    /// Deliver a replayed activation so the element's native default
    /// behaviour (navigation, form submission, ...) runs.
    fn dispatch(&self, event: ActivationEvent);

    /// Apply a view produced by the render adapter.
    fn render(&self, view: &View);

    /// Document that receives the icon animation styles.
    fn document(&self) -> &dyn Document {
        crate::render::styles::global()
    }
}
