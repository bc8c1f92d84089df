//! Carrying a `LogContext` along with async tasks and threads.

use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use tokio::task::futures::TaskLocalFuture;
use tokio::task::JoinHandle;

use crate::context::snapshot::LogContext;

tokio::task_local! {
    static TASK_CONTEXT: LogContext;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<LogContext> = RefCell::new(LogContext::default());
}

/// The context visible at this point: the enclosing task's context overlaid
/// with the current thread's context.
pub fn current() -> LogContext {
    let task = TASK_CONTEXT.try_with(LogContext::clone).unwrap_or_default();
    // try_with: logging from another thread-local's destructor must not panic
    let thread = THREAD_CONTEXT
        .try_with(|c| c.borrow().clone())
        .unwrap_or_default();
    task.merge(&thread)
}

/// Run `fut` with `ctx` attached for its whole lifetime, across every
/// suspension point.
pub fn scope<F: Future>(ctx: LogContext, fut: F) -> TaskLocalFuture<LogContext, F> {
    TASK_CONTEXT.scope(ctx, fut)
}

/// Run `fut` with the current context extended by `fields`.
pub fn scope_with<F, I, K, V>(fields: I, fut: F) -> TaskLocalFuture<LogContext, F>
where
    F: Future,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    scope(current().with_all(fields), fut)
}

/// Spawn a tokio task that inherits the caller's current context.
pub fn spawn<F>(fut: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(scope(current(), fut))
}

/// Attach a context to any future.
pub trait WithLogContext: Future + Sized {
    fn with_log_context(self, ctx: LogContext) -> TaskLocalFuture<LogContext, Self> {
        scope(ctx, self)
    }

    /// Attach the context that is current where this is called.
    fn in_current_log_context(self) -> TaskLocalFuture<LogContext, Self> {
        scope(current(), self)
    }
}

impl<F: Future> WithLogContext for F {}

/// Restores the previous thread context on drop.
///
/// Not `Send`: it must be dropped on the thread that created it, which also
/// keeps it from being held across an await inside a spawned task.
#[must_use = "the context is removed as soon as the guard is dropped"]
pub struct ContextGuard {
    previous: Option<LogContext>,
    _not_send: PhantomData<*const ()>,
}

/// Set the thread context for synchronous code until the guard drops.
pub fn enter(ctx: LogContext) -> ContextGuard {
    let previous = THREAD_CONTEXT.with(|c| c.replace(ctx));
    ContextGuard {
        previous: Some(previous),
        _not_send: PhantomData,
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            // try_with: the thread may already be tearing down its locals
            let _ = THREAD_CONTEXT.try_with(|c| c.replace(previous));
        }
    }
}
