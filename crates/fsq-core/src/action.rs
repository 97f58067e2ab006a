//! Action seam: the work a task performs.
//!
//! The queue knows nothing about what an action does. It passes the params
//! bundle, awaits the result, and logs a failure. Nothing is retried and
//! nothing is reported back to whoever called `add`.
//!
//! Two ways to supply one:
//! - implement `TaskAction` on a type (useful when the action carries state)
//! - wrap a closure with `action_fn`

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::TaskParams;
use crate::error::ActionError;

/// The work a task performs.
///
/// The queue treats this as opaque: it hands over the params bundle and only
/// looks at whether the call succeeded so it can log failures.
#[async_trait]
pub trait TaskAction: Send + Sync {
    async fn call(&self, params: &TaskParams) -> Result<(), ActionError>;
}

/// Adapter so plain closures can be used as actions.
struct FnAction<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> TaskAction for FnAction<F>
where
    F: Fn(TaskParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    async fn call(&self, params: &TaskParams) -> Result<(), ActionError> {
        (self.f)(params.clone()).await
    }
}

/// Wrap a closure returning a future into a shareable `TaskAction`.
///
/// ```ignore
/// let action = action_fn(|params| async move {
///     println!("{params:?}");
///     Ok(())
/// });
/// ```
pub fn action_fn<F, Fut>(f: F) -> Arc<dyn TaskAction>
where
    F: Fn(TaskParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    Arc::new(FnAction { f })
}
