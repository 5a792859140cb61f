//! Small ready-made actions.

use crate::{Action, ActionContext};

// ── NoopAction ───────────────────────────────────────────────────────────────

/// An [`Action`] with every hook left at its default: it begins, updates
/// once and completes on its first step.
///
/// Useful as a placeholder or a marker in tests.
pub struct NoopAction;

impl Action for NoopAction {}

// ── Wait ─────────────────────────────────────────────────────────────────────

/// Completes after a fixed number of uninterrupted updates.
///
/// Progress survives interruption: a resumed `Wait` (begun with
/// `first_time = false`) continues counting where it left off.
#[derive(Debug, Clone)]
pub struct Wait {
    ticks:   u32,
    elapsed: u32,
}

impl Wait {
    /// A wait that is done after `n` updates (`0` behaves like `1`).
    pub fn ticks(n: u32) -> Self {
        Self { ticks: n, elapsed: 0 }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn remaining(&self) -> u32 {
        self.ticks.saturating_sub(self.elapsed)
    }
}

impl Action for Wait {
    fn on_begin(&mut self, first_time: bool, _ctx: &mut ActionContext<'_>) {
        if first_time {
            self.elapsed = 0;
        }
    }

    fn on_update(&mut self, _ctx: &mut ActionContext<'_>) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.ticks
    }
}

// ── FnAction ─────────────────────────────────────────────────────────────────

/// Runs a closure once, on its first update, then completes.
///
/// The closure receives the [`ActionContext`], so it can chain further work:
///
/// ```rust,ignore
/// store.insert(FnAction::new("reload", |ctx| {
///     ctx.spawn(Wait::ticks(30));
/// }));
/// ```
///
/// If the closure pushes something ahead, the action is interrupted; when it
/// resumes it has nothing left to run and completes on that update.
pub struct FnAction<F> {
    label: &'static str,
    run:   Option<F>,
}

impl<F> FnAction<F>
where
    F: FnOnce(&mut ActionContext<'_>) + 'static,
{
    pub fn new(label: &'static str, run: F) -> Self {
        Self { label, run: Some(run) }
    }
}

impl<F> Action for FnAction<F>
where
    F: FnOnce(&mut ActionContext<'_>) + 'static,
{
    fn on_update(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(run) = self.run.take() {
            run(ctx);
        }
    }

    fn is_done(&self) -> bool {
        self.run.is_none()
    }

    fn name(&self) -> &str {
        self.label
    }
}
