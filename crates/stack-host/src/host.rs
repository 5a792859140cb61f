//! `Host` — one scheduler plus the actions it drives.

use stack_core::ActionId;
use stack_sched::{Action, ActionScheduler, ActionStore, SchedResult, StepObserver, StepOutcome};

/// A named owner of sequenced behavior: a character, a door, a UI panel.
///
/// Each host has its own [`ActionScheduler`] and its own [`ActionStore`];
/// hosts never share actions.  The store and scheduler are public so callers
/// can inspect them or push pre-inserted actions directly.
pub struct Host {
    pub label:     String,
    pub scheduler: ActionScheduler,
    pub actions:   ActionStore,
}

impl Host {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label:     label.into(),
            scheduler: ActionScheduler::new(),
            actions:   ActionStore::new(),
        }
    }

    /// Builder-style [`spawn`][Self::spawn].
    pub fn with_action<A: Action>(mut self, action: A) -> Self {
        self.spawn(action);
        self
    }

    /// Store `action` and push it to the head of this host's stack.
    pub fn spawn<A: Action>(&mut self, action: A) -> ActionId {
        let id = self.actions.insert(action);
        self.scheduler.push(id);
        id
    }

    pub fn push(&mut self, action: ActionId) {
        self.scheduler.push(action);
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Diagnostic name of the current action.
    pub fn current_name(&self) -> Option<&str> {
        self.scheduler
            .current()
            .and_then(|id| self.actions.name_of(id))
    }

    /// Step this host's scheduler once.
    pub fn step_observed<O: StepObserver>(&mut self, observer: &mut O) -> SchedResult<StepOutcome> {
        // Disjoint field borrows: scheduler state vs. the caller-owned actions.
        self.scheduler.step_observed(&mut self.actions, observer)
    }
}
