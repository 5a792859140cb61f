//! Step observer trait for diagnostics.

use stack_core::ActionId;

/// Callbacks invoked by
/// [`ActionScheduler::step_observed`][crate::ActionScheduler::step_observed]
/// after each lifecycle event.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait StepObserver {
    /// `on_begin` returned for `action`.
    fn on_begin(&mut self, _action: ActionId, _first_time: bool) {}

    /// `on_update` returned for `action`.
    fn on_update(&mut self, _action: ActionId) {}

    /// `action` was superseded by a push (during its own `on_begin` or
    /// `on_update`).  It stays on the stack.
    fn on_interrupted(&mut self, _action: ActionId) {}

    /// `action` completed: `on_end` ran and it left the stack.
    fn on_end(&mut self, _action: ActionId) {}
}

/// A [`StepObserver`] that does nothing.
pub struct NoopStepObserver;

impl StepObserver for NoopStepObserver {}

/// A [`StepObserver`] that logs every lifecycle event at `debug` level.
///
/// `scope` is recorded on each event, e.g. the host label.
pub struct TracingStepObserver<'a> {
    pub scope: &'a str,
}

impl<'a> TracingStepObserver<'a> {
    pub fn new(scope: &'a str) -> Self {
        Self { scope }
    }
}

impl StepObserver for TracingStepObserver<'_> {
    fn on_begin(&mut self, action: ActionId, first_time: bool) {
        tracing::debug!(scope = self.scope, %action, first_time, "action began");
    }

    fn on_update(&mut self, action: ActionId) {
        tracing::trace!(scope = self.scope, %action, "action updated");
    }

    fn on_interrupted(&mut self, action: ActionId) {
        tracing::debug!(scope = self.scope, %action, "action interrupted");
    }

    fn on_end(&mut self, action: ActionId) {
        tracing::debug!(scope = self.scope, %action, "action ended");
    }
}
