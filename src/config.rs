//! Wrapper configuration.
//!
//! Plain-data options ([`WrapperOptions`]) are serde types so they can come
//! from a theme or settings file; the action and success effect are closures
//! and are supplied through [`crate::builder::MagicButtonBuilder`].
//! Configuration is fixed once the wrapper is built.

use crate::builder::ConfigError;
use crate::effects::{Action, ResetHandle};
use crate::render::IconSize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default delay before a settled wrapper returns to idle.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(1500);

/// When a settled wrapper returns to idle.
///
/// Serialized as `{"after_millis": 1500}` or `"never"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetDelay {
    /// Reset automatically after this many milliseconds.
    AfterMillis(u64),
    /// Stay settled until reset is called.
    Never,
}

impl ResetDelay {
    pub fn after(delay: Duration) -> Self {
        Self::AfterMillis(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    /// The delay, or `None` when auto-reset is disabled.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::AfterMillis(ms) => Some(Duration::from_millis(*ms)),
            Self::Never => None,
        }
    }
}

impl Default for ResetDelay {
    fn default() -> Self {
        Self::after(DEFAULT_RESET_DELAY)
    }
}

impl From<Duration> for ResetDelay {
    fn from(delay: Duration) -> Self {
        Self::after(delay)
    }
}

/// Caller-supplied icon appearance. `None` falls back to the measured value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconOverrides {
    pub color: Option<String>,
    pub size: Option<IconSize>,
}

/// Serializable part of the configuration.
///
/// # Example
///
/// ```rust
/// use magic_button::config::{ResetDelay, WrapperOptions};
///
/// let options = WrapperOptions::from_json(
///     r#"{ "icon": { "color": "white", "size": 18 }, "reset_delay": "never" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(options.reset_delay, ResetDelay::Never);
/// assert_eq!(options.icon.color.as_deref(), Some("white"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperOptions {
    pub icon: IconOverrides,
    pub reset_delay: ResetDelay,
}

impl WrapperOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidOptions(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidOptions(e.to_string()))
    }
}

/// Hook run when a success is due to reset. It receives the reset handle and
/// decides when to call it.
pub type SuccessEffect = Arc<dyn Fn(ResetHandle) + Send + Sync>;

/// Complete, immutable configuration of one wrapper.
#[derive(Clone)]
pub struct Configuration {
    pub(crate) action: Action,
    pub(crate) on_success: Option<SuccessEffect>,
    pub(crate) options: WrapperOptions,
}

impl Configuration {
    pub fn options(&self) -> &WrapperOptions {
        &self.options
    }

    pub fn reset_delay(&self) -> ResetDelay {
        self.options.reset_delay
    }

    pub fn overrides(&self) -> &IconOverrides {
        &self.options.icon
    }

    pub fn has_success_effect(&self) -> bool {
        self.on_success.is_some()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("options", &self.options)
            .field("on_success", &self.on_success.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reset_delay_is_1500ms() {
        assert_eq!(ResetDelay::default(), ResetDelay::AfterMillis(1500));
        assert_eq!(
            ResetDelay::default().duration(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(ResetDelay::Never.duration(), None);
    }

    #[test]
    fn reset_delay_from_duration() {
        let delay: ResetDelay = Duration::from_secs(2).into();
        assert_eq!(delay, ResetDelay::AfterMillis(2000));
    }

    #[test]
    fn reset_delay_serialization() {
        assert_eq!(serde_json::to_string(&ResetDelay::Never).unwrap(), "\"never\"");
        assert_eq!(
            serde_json::to_string(&ResetDelay::AfterMillis(500)).unwrap(),
            r#"{"after_millis":500}"#
        );
        let back: ResetDelay = serde_json::from_str(r#"{"after_millis":750}"#).unwrap();
        assert_eq!(back, ResetDelay::AfterMillis(750));
    }

    #[test]
    fn empty_json_gives_defaults() {
        let options = WrapperOptions::from_json("{}").unwrap();
        assert_eq!(options, WrapperOptions::default());
        assert_eq!(options.icon, IconOverrides::default());
    }

    #[test]
    fn css_size_override_parses() {
        let options =
            WrapperOptions::from_json(r#"{ "icon": { "size": "1.5rem" }, "reset_delay": { "after_millis": 300 } }"#)
                .unwrap();
        assert_eq!(options.icon.size, Some(IconSize::from("1.5rem")));
        assert_eq!(options.reset_delay, ResetDelay::AfterMillis(300));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = WrapperOptions::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions(_)));
    }

    #[test]
    fn options_round_trip() {
        let options = WrapperOptions {
            icon: IconOverrides {
                color: Some("#fafafa".to_string()),
                size: Some(IconSize::Px(20.0)),
            },
            reset_delay: ResetDelay::Never,
        };
        let json = options.to_json().unwrap();
        assert_eq!(WrapperOptions::from_json(&json).unwrap(), options);
    }
}
