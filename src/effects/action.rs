//! The user-supplied action run on each accepted activation.

use crate::host::ActivationEvent;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use stillwater::effect::{BoxedEffect, Effect};
use thiserror::Error;

/// Future returned by an action invocation.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ActionError>> + Send + 'static>>;

/// Why an action did not succeed. Any of these moves the wrapper to
/// `Failure`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("action failed: {0}")]
    Failed(String),

    #[error("action panicked: {0}")]
    Panicked(String),

    #[error("action was cancelled before it completed")]
    Cancelled,
}

impl ActionError {
    /// Wrap any displayable error.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }
}

/// Asynchronous action invoked with the original activation event.
///
/// Cloning is cheap; clones share the same closure.
///
/// # Example
///
/// ```rust
/// use magic_button::effects::{Action, ActionError};
///
/// let save = Action::from_async(|_event| async {
///     // talk to the server ...
///     Ok(())
/// });
///
/// let reject = Action::from_fn(|_event| Err(ActionError::failed("quota exceeded")));
/// # let _ = (save, reject);
/// ```
#[derive(Clone)]
pub struct Action(Arc<dyn Fn(ActivationEvent) -> ActionFuture + Send + Sync>);

impl Action {
    /// Action from an async closure.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(ActivationEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        Self(Arc::new(move |event| Box::pin(f(event))))
    }

    /// Action from a synchronous closure; resolves on first poll.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&ActivationEvent) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::from_async(move |event| std::future::ready(f(&event)))
    }

    /// Action from a Stillwater effect factory.
    ///
    /// `factory` builds a fresh effect per activation; each one runs against
    /// a clone of `env`.
    pub fn from_effect<Env, F>(env: Env, factory: F) -> Self
    where
        Env: Clone + Send + Sync + 'static,
        F: Fn(ActivationEvent) -> BoxedEffect<(), ActionError, Env> + Send + Sync + 'static,
    {
        Self::from_async(move |event| {
            let effect = factory(event);
            let env = env.clone();
            async move { effect.run(&env).await }
        })
    }

    /// Action that succeeds immediately.
    pub fn noop() -> Self {
        Self::from_fn(|_| Ok(()))
    }

    pub(crate) fn invoke(&self, event: ActivationEvent) -> ActionFuture {
        (self.0)(event)
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
