//! Builder for [`MagicButton`].

use crate::builder::error::{ConfigError, ConfigErrors};
use crate::button::MagicButton;
use crate::config::{Configuration, ResetDelay, SuccessEffect, WrapperOptions};
use crate::effects::{Action, Machine, ResetHandle};
use crate::host::Element;
use crate::render::IconSize;
use std::sync::Arc;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tokio::runtime::Handle;

type Check = Validation<(), NonEmptyVec<ConfigError>>;

/// Fluent builder for a wrapper around exactly one element.
///
/// `build` validates everything at once and reports all problems together.
///
/// # Example
///
/// ```rust,no_run
/// # use magic_button::host::{ActivationEvent, BoxMetrics, Element, MeasureError};
/// # use magic_button::render::View;
/// # use std::sync::Arc;
/// # struct Button;
/// # impl Element for Button {
/// #     fn measure(&self) -> Result<BoxMetrics, MeasureError> { Err(MeasureError::Unavailable) }
/// #     fn dispatch(&self, _: ActivationEvent) {}
/// #     fn render(&self, _: &View) {}
/// # }
/// use magic_button::{Action, MagicButton};
/// use std::time::Duration;
///
/// # async fn demo() {
/// let button = MagicButton::builder()
///     .child(Arc::new(Button))
///     .action(Action::from_async(|_| async { Ok(()) }))
///     .reset_after(Duration::from_millis(800))
///     .icon_color("white")
///     .build()
///     .expect("valid configuration");
/// # }
/// ```
pub struct MagicButtonBuilder<E: Element + 'static> {
    children: Vec<Arc<E>>,
    action: Option<Action>,
    on_success: Option<SuccessEffect>,
    options: WrapperOptions,
    runtime: Option<Handle>,
}

impl<E: Element + 'static> MagicButtonBuilder<E> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            action: None,
            on_success: None,
            options: WrapperOptions::default(),
            runtime: None,
        }
    }

    /// Add a child element. Exactly one is required.
    pub fn child(mut self, element: Arc<E>) -> Self {
        self.children.push(element);
        self
    }

    /// Add several child elements.
    pub fn children(mut self, elements: impl IntoIterator<Item = Arc<E>>) -> Self {
        self.children.extend(elements);
        self
    }

    /// Action run on each accepted activation. Defaults to [`Action::noop`].
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Hook run instead of the automatic reset after a success.
    pub fn on_success<F>(mut self, effect: F) -> Self
    where
        F: Fn(ResetHandle) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(effect));
        self
    }

    /// Replace all serializable options at once.
    pub fn options(mut self, options: WrapperOptions) -> Self {
        self.options = options;
        self
    }

    pub fn icon_color(mut self, color: impl Into<String>) -> Self {
        self.options.icon.color = Some(color.into());
        self
    }

    pub fn icon_size(mut self, size: impl Into<IconSize>) -> Self {
        self.options.icon.size = Some(size.into());
        self
    }

    pub fn reset_delay(mut self, delay: impl Into<ResetDelay>) -> Self {
        self.options.reset_delay = delay.into();
        self
    }

    pub fn reset_after(self, delay: Duration) -> Self {
        self.reset_delay(ResetDelay::after(delay))
    }

    /// Stay in success/failure until reset is called.
    pub fn no_auto_reset(self) -> Self {
        self.reset_delay(ResetDelay::Never)
    }

    /// Runtime for the action and reset timers. Defaults to the runtime the
    /// builder runs in.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    fn validate(&self, has_runtime: bool) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        checks.push(if self.children.len() == 1 {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::ChildCount {
                found: self.children.len(),
            })
        });

        if let Some(size) = &self.options.icon.size {
            let valid = match size {
                IconSize::Px(px) => px.is_finite() && *px > 0.0,
                IconSize::Css(css) => !css.trim().is_empty(),
            };
            checks.push(if valid {
                Validation::success(())
            } else {
                Validation::fail(ConfigError::InvalidIconSize {
                    value: size.to_string(),
                })
            });
        }

        if let Some(color) = &self.options.icon.color {
            checks.push(if color.trim().is_empty() {
                Validation::fail(ConfigError::EmptyIconColor)
            } else {
                Validation::success(())
            });
        }

        checks.push(if has_runtime {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::NoRuntime)
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and mount the wrapper.
    ///
    /// The idle view is rendered once before this returns.
    pub fn build(self) -> Result<MagicButton<E>, ConfigErrors> {
        let runtime = self.runtime.clone().or_else(|| Handle::try_current().ok());
        if let Validation::Failure(errors) = self.validate(runtime.is_some()) {
            return Err(ConfigErrors::new(errors.iter().cloned().collect()));
        }

        let mut children = self.children;
        let (Some(element), Some(runtime)) = (children.pop(), runtime) else {
            return Err(ConfigErrors::new(vec![ConfigError::ChildCount { found: 0 }]));
        };

        let config = Configuration {
            action: self.action.unwrap_or_default(),
            on_success: self.on_success,
            options: self.options,
        };
        let machine = Machine::new(element, config, runtime);
        machine.mount();
        Ok(MagicButton::from_machine(machine))
    }
}

impl<E: Element + 'static> Default for MagicButtonBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
