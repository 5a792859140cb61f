//! The `ActionScheduler` and its step function.

use std::panic::{self, AssertUnwindSafe};

use stack_core::ActionId;
use tracing::trace;

use crate::{
    Action, ActionContext, ActionStore, NoopStepObserver, PendingStack, SchedError, SchedResult,
    StepObserver,
};

#[cfg(not(feature = "fx-hash"))]
type SeenSet = std::collections::HashSet<ActionId>;
#[cfg(feature = "fx-hash")]
type SeenSet = rustc_hash::FxHashSet<ActionId>;

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What the update phase of one step did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing pending and nothing current.  No hook ran.
    Idle,
    /// The action was updated and is not done; it stays current.
    Running(ActionId),
    /// Something was pushed ahead of the action during its `on_update`.
    /// It stays on the stack, not ended.
    Interrupted(ActionId),
    /// The action finished: `on_end` ran and it left the stack.
    Completed(ActionId),
}

impl StepOutcome {
    /// The action the update phase ran on, if any.
    pub fn action(self) -> Option<ActionId> {
        match self {
            StepOutcome::Idle => None,
            StepOutcome::Running(a) | StepOutcome::Interrupted(a) | StepOutcome::Completed(a) => {
                Some(a)
            }
        }
    }
}

// ── ActionScheduler ───────────────────────────────────────────────────────────

/// Stack-based, one-action-at-a-time scheduler.
///
/// Holds handles only: the actions themselves live in a caller-owned
/// [`ActionStore`] passed to every [`step`][Self::step].
///
/// # Step phases
///
/// 1. **Idle check** — nothing current and nothing pending: return.
/// 2. **Resolution** — while there is no current action, make the head
///    current, record it in the seen-set and call `on_begin(first_time)`.
///    If the hook pushed something ahead, the step restarts from phase 1 and
///    the superseded pass does no further work.
/// 3. **Update** — call `on_update`.  If something was pushed ahead, the
///    action is interrupted: no `is_done`, no `on_end`.  Otherwise, if
///    `is_done()`, pop it, call `on_end` and forget it in the seen-set.
///
/// An interrupted action keeps its seen-set entry, so when it comes back to
/// the head its `on_begin` receives `first_time = false`.
#[derive(Default)]
pub struct ActionScheduler {
    pending: PendingStack,
    /// Actions that received `on_begin` since they last completed.
    seen:    SeenSet,
}

impl ActionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Push ──────────────────────────────────────────────────────────────

    /// Schedule `action` ahead of everything else.
    ///
    /// Re-pushing a pending action moves it to the head.  Unless `action` is
    /// the current action, the current marker is cleared and the next step
    /// re-resolves.  No hook runs here.  `ActionId::INVALID` is ignored.
    pub fn push(&mut self, action: ActionId) {
        self.pending.push(action);
    }

    // ── Read-only observers ───────────────────────────────────────────────

    /// Pending actions, head first.
    pub fn pending(&self) -> &[ActionId] {
        self.pending.as_slice()
    }

    pub fn current(&self) -> Option<ActionId> {
        self.pending.current()
    }

    /// `true` iff there is no current action and nothing pending.
    pub fn is_idle(&self) -> bool {
        self.pending.is_idle()
    }

    /// Has `action` begun since it last completed?
    pub fn has_begun(&self, action: ActionId) -> bool {
        self.seen.contains(&action)
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Run one scheduling cycle.
    pub fn step(&mut self, store: &mut ActionStore) -> SchedResult<StepOutcome> {
        self.step_observed(store, &mut NoopStepObserver)
    }

    /// Run one scheduling cycle, reporting lifecycle events to `observer`.
    ///
    /// Panics raised by hooks propagate unchanged.
    pub fn step_observed<O: StepObserver>(
        &mut self,
        store:    &mut ActionStore,
        observer: &mut O,
    ) -> SchedResult<StepOutcome> {
        // ── Resolution ────────────────────────────────────────────────────
        'restart: loop {
            if self.pending.is_idle() {
                return Ok(StepOutcome::Idle);
            }

            while self.pending.current().is_none() {
                let Some(head) = self.pending.head() else { break };
                self.pending.set_current(Some(head));

                let first_time = self.seen.insert(head);
                self.with_action(head, store, "on_begin", |action, ctx| {
                    action.on_begin(first_time, ctx)
                })?;
                observer.on_begin(head, first_time);

                // A push inside on_begin cleared `current` (or moved the head).
                if self.pending.current() != Some(head) || self.pending.head() != Some(head) {
                    trace!(action = %head, "superseded during on_begin, restarting step");
                    self.pending.set_current(None);
                    observer.on_interrupted(head);
                    continue 'restart;
                }
            }
            break;
        }

        // ── Update ────────────────────────────────────────────────────────
        let Some(current) = self.pending.current() else {
            return Ok(StepOutcome::Idle);
        };

        self.with_action(current, store, "on_update", |action, ctx| action.on_update(ctx))?;
        observer.on_update(current);

        if self.pending.current() != Some(current) || self.pending.head() != Some(current) {
            self.pending.set_current(None);
            observer.on_interrupted(current);
            return Ok(StepOutcome::Interrupted(current));
        }

        let Some(action) = store.get_mut(current) else {
            return Err(self.stale(current));
        };
        if !action.is_done() {
            return Ok(StepOutcome::Running(current));
        }

        self.pending.pop_head();
        trace!(action = %current, name = action.name(), "on_end");
        action.on_end();
        self.seen.remove(&current);
        self.pending.set_current(None);
        observer.on_end(current);

        Ok(StepOutcome::Completed(current))
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Lend `id` out of the store, run `hook` on it with a fresh context,
    /// and put it back.  A panicking hook still returns the action to the
    /// store before the panic continues to the caller.
    fn with_action<R>(
        &mut self,
        id:    ActionId,
        store: &mut ActionStore,
        label: &'static str,
        hook:  impl FnOnce(&mut dyn Action, &mut ActionContext<'_>) -> R,
    ) -> SchedResult<R> {
        let Some(mut action) = store.lend(id) else {
            return Err(self.stale(id));
        };
        trace!(action = %id, name = action.name(), hook = label, "invoking hook");

        let out = {
            let mut ctx = ActionContext::new(id, &mut self.pending, store);
            panic::catch_unwind(AssertUnwindSafe(|| hook(&mut *action, &mut ctx)))
        };

        // The action goes back to its slot even when the hook panicked.
        store.restore(id, action);
        match out {
            Ok(out) => Ok(out),
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Forget a handle whose action is gone so the next step can proceed.
    fn stale(&mut self, id: ActionId) -> SchedError {
        tracing::warn!(action = %id, "pending action missing from store, dropping it");
        self.pending.purge(id);
        self.seen.remove(&id);
        SchedError::ActionNotFound(id)
    }
}
