//! Mutable view handed to `on_begin` / `on_update` hooks.

use stack_core::ActionId;

use crate::{Action, ActionStore, PendingStack};

/// The channel through which a running action may schedule other actions.
///
/// `ActionContext` is built by the scheduler for a single hook call.  It
/// borrows the scheduler's pending stack and the caller's action store for
/// exactly that call, so pushes take effect immediately and the scheduler
/// sees them as soon as the hook returns.
///
/// The running action itself is lent out of the store while its hook runs:
/// `store`-level lookups of [`this`][Self::this] would miss it, which is why
/// [`contains`][Self::contains] special-cases it.
pub struct ActionContext<'a> {
    this:    ActionId,
    pending: &'a mut PendingStack,
    store:   &'a mut ActionStore,
}

impl<'a> ActionContext<'a> {
    pub(crate) fn new(
        this:    ActionId,
        pending: &'a mut PendingStack,
        store:   &'a mut ActionStore,
    ) -> Self {
        Self { this, pending, store }
    }

    /// Handle of the action whose hook is running.
    #[inline]
    pub fn this(&self) -> ActionId {
        self.this
    }

    /// Push an existing action to the head of the stack.
    ///
    /// Pushing anything other than [`this`][Self::this] interrupts the
    /// running action.  `ActionId::INVALID` is ignored.
    pub fn push(&mut self, action: ActionId) {
        self.pending.push(action);
    }

    /// Store `action` and push it ahead of everything else.
    pub fn spawn<A: Action>(&mut self, action: A) -> ActionId {
        let id = self.store.insert(action);
        self.pending.push(id);
        id
    }

    /// Store `action` without scheduling it.
    pub fn insert<A: Action>(&mut self, action: A) -> ActionId {
        self.store.insert(action)
    }

    /// Read-only view of the pending stack, head first.
    pub fn pending(&self) -> &[ActionId] {
        self.pending.as_slice()
    }

    /// The scheduler's current action.  `None` once something has been
    /// pushed ahead of the running action.
    pub fn current(&self) -> Option<ActionId> {
        self.pending.current()
    }

    /// Does `action` exist (counting the running action)?
    pub fn contains(&self, action: ActionId) -> bool {
        action == self.this || self.store.contains(action)
    }
}
