//! `PendingStack` — the ordered, duplicate-free sequence of pending actions
//! plus the "current" marker.
//!
//! Index 0 is the head: the next action to run.  Push semantics:
//!
//! ```text
//! push(X):  remove X if present  →  insert X at 0
//!           current ≠ X          →  current = None
//! ```
//!
//! Clearing `current` forces the next step to re-resolve the head.  No hook
//! is ever called from here.

use stack_core::ActionId;

/// Pending actions (head first) and the action currently being driven.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingStack {
    stack:   Vec<ActionId>,
    current: Option<ActionId>,
}

impl PendingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `action` to the head, inserting it if absent.
    ///
    /// `ActionId::INVALID` is ignored.
    pub fn push(&mut self, action: ActionId) {
        if !action.is_valid() {
            return;
        }
        self.stack.retain(|&a| a != action);
        self.stack.insert(0, action);

        if self.current.is_some_and(|c| c != action) {
            self.current = None;
        }
    }

    /// The next action to run, if any.
    #[inline]
    pub fn head(&self) -> Option<ActionId> {
        self.stack.first().copied()
    }

    #[inline]
    pub fn current(&self) -> Option<ActionId> {
        self.current
    }

    /// Read-only view, head first.
    #[inline]
    pub fn as_slice(&self) -> &[ActionId] {
        &self.stack
    }

    pub fn contains(&self, action: ActionId) -> bool {
        self.stack.contains(&action)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// No current action and nothing pending.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.stack.is_empty()
    }

    // ── Scheduler-side mutation ──────────────────────────────────────────

    pub(crate) fn set_current(&mut self, current: Option<ActionId>) {
        self.current = current;
    }

    /// Remove the head.  Only used on the completion path.
    pub(crate) fn pop_head(&mut self) -> Option<ActionId> {
        if self.stack.is_empty() {
            return None;
        }
        Some(self.stack.remove(0))
    }

    /// Drop every trace of `action` (stale-handle cleanup).
    pub(crate) fn purge(&mut self, action: ActionId) {
        self.stack.retain(|&a| a != action);
        if self.current == Some(action) {
            self.current = None;
        }
    }
}
