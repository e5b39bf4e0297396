//! One-time registration of the icon animation keyframes.

use crate::host::Document;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::debug;

/// Id of the style block holding the keyframes.
pub const STYLE_ID: &str = "mb-keyframes";

/// Keyframe names referenced by the icon fragments.
pub const SPIN: &str = "mb-spin";
pub const POP: &str = "mb-pop";
pub const SHAKE: &str = "mb-shake";

/// Keyframes for the three icon animations.
pub const ANIMATIONS_CSS: &str = r#"
@keyframes mb-spin { to { transform: rotate(360deg); } }
@keyframes mb-pop {
  0% { transform: scale(0); opacity: 0; }
  80% { transform: scale(1.1); opacity: 1; }
  100% { transform: scale(1); }
}
@keyframes mb-shake {
  0% { transform: translateX(0); }
  20% { transform: translateX(-3px); }
  40% { transform: translateX(3px); }
  60% { transform: translateX(-3px); }
  80% { transform: translateX(3px); }
  100% { transform: translateX(0); }
}
"#;

/// Insert the animation keyframes into `document` unless already present.
///
/// Returns true if this call inserted them. Safe to call from every wrapper
/// on every render.
///
/// # Example
///
/// ```rust
/// use magic_button::render::styles::{ensure_animations_registered, StyleRegistry, STYLE_ID};
/// use magic_button::host::Document;
///
/// let document = StyleRegistry::new();
/// assert!(ensure_animations_registered(&document));
/// assert!(!ensure_animations_registered(&document));
/// assert!(document.contains_style(STYLE_ID));
/// ```
pub fn ensure_animations_registered(document: &dyn Document) -> bool {
    if document.contains_style(STYLE_ID) {
        return false;
    }
    document.insert_style(STYLE_ID, ANIMATIONS_CSS);
    debug!(id = STYLE_ID, "registered icon animations");
    true
}

/// In-memory [`Document`] keyed by style id.
///
/// `insert_style` is check-and-set under one lock, so concurrent callers
/// cannot insert the same block twice.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    blocks: Mutex<HashMap<String, String>>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// CSS of a registered block.
    pub fn style(&self, id: &str) -> Option<String> {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Document for StyleRegistry {
    fn contains_style(&self, id: &str) -> bool {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    fn insert_style(&self, id: &str, css: &str) {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id.to_string())
            .or_insert_with(|| css.to_string());
    }
}

/// Process-wide registry used by elements that do not name a document.
pub fn global() -> &'static StyleRegistry {
    static GLOBAL: OnceLock<StyleRegistry> = OnceLock::new();
    GLOBAL.get_or_init(StyleRegistry::new)
}
