//! `ActionStore` — caller-owned arena of actions.
//!
//! # Why an arena?
//!
//! The scheduler tracks actions by identity, never by value, and must not
//! own them.  Handing out `ActionId` handles into an arena gives both:
//!
//! - identity is the slot index, so two actions with equal content are
//!   still distinct;
//! - the caller owns the store and decides when an action is dropped.
//!
//! Slots are never reused.  A removed `ActionId` therefore stays dead
//! forever and can never alias a newer action.

use stack_core::ActionId;

use crate::Action;

/// Slot-per-action storage addressed by [`ActionId`].
#[derive(Default)]
pub struct ActionStore {
    slots: Vec<Option<Box<dyn Action>>>,
    /// Number of actions inserted and not yet removed.  Actions lent to the
    /// scheduler for a hook call still count as live.
    live:  usize,
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `action` and return its handle.
    pub fn insert<A: Action>(&mut self, action: A) -> ActionId {
        self.insert_boxed(Box::new(action))
    }

    /// Store an already boxed action and return its handle.
    pub fn insert_boxed(&mut self, action: Box<dyn Action>) -> ActionId {
        debug_assert!(self.slots.len() < u32::MAX as usize, "action store exhausted");
        let id = ActionId(self.slots.len() as u32);
        self.slots.push(Some(action));
        self.live += 1;
        id
    }

    /// Remove and return the action behind `id`.
    ///
    /// If `id` is still pending in a scheduler, the next step reports
    /// [`SchedError::ActionNotFound`][crate::SchedError::ActionNotFound].
    pub fn remove(&mut self, id: ActionId) -> Option<Box<dyn Action>> {
        let action = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(action)
    }

    pub fn get(&self, id: ActionId) -> Option<&dyn Action> {
        self.slots.get(id.index())?.as_deref()
    }

    pub fn get_mut(&mut self, id: ActionId) -> Option<&mut (dyn Action + 'static)> {
        self.slots.get_mut(id.index())?.as_deref_mut()
    }

    pub fn contains(&self, id: ActionId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Diagnostic name of the action behind `id`, if present.
    pub fn name_of(&self, id: ActionId) -> Option<&str> {
        self.get(id).map(|a| a.name())
    }

    /// Handles of every stored action in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| ActionId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // ── Lending (scheduler only) ─────────────────────────────────────────

    /// Take an action out of its slot for the duration of one hook call, so
    /// the hook can receive `&mut ActionStore` through its context.
    pub(crate) fn lend(&mut self, id: ActionId) -> Option<Box<dyn Action>> {
        self.slots.get_mut(id.index())?.take()
    }

    /// Put a lent action back.
    pub(crate) fn restore(&mut self, id: ActionId, action: Box<dyn Action>) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = Some(action);
        }
    }
}
