//! The `Action` trait — the main extension point for user code.

use crate::ActionContext;

/// An opaque unit of behavior driven by an [`ActionScheduler`][crate::ActionScheduler].
///
/// Implement this trait to define what an action does.  Every hook has a
/// default, so a unit struct with an empty `impl` is a valid action that
/// finishes on its first step.
///
/// # Lifecycle
///
/// ```text
/// push ──► on_begin(first_time) ──► on_update ──► is_done? ──► on_end
///                ▲                      │   no: on_update again next step
///                └──── resumed ◄─ interrupted (something pushed ahead)
/// ```
///
/// - `on_begin` runs every time the action becomes the head of the stack.
///   `first_time` is `true` only for the first begin since the action was
///   last completed (or ever).
/// - `on_end` runs exactly once per completion, immediately before removal.
///
/// # Reentrancy
///
/// `on_begin` and `on_update` receive an [`ActionContext`] and may push
/// actions through it.  Anything pushed ahead of the running action
/// interrupts it; the scheduler notices within the same step.
///
/// # Example
///
/// ```rust,ignore
/// struct OpenDoor { swung: u32 }
///
/// impl Action for OpenDoor {
///     fn on_begin(&mut self, first_time: bool, ctx: &mut ActionContext<'_>) {
///         if first_time {
///             ctx.spawn(Wait::ticks(3)); // unlock first
///         }
///     }
///     fn on_update(&mut self, _ctx: &mut ActionContext<'_>) {
///         self.swung += 1;
///     }
///     fn is_done(&self) -> bool {
///         self.swung >= 10
///     }
/// }
/// ```
pub trait Action: 'static {
    /// Called when the action becomes current.
    fn on_begin(&mut self, _first_time: bool, _ctx: &mut ActionContext<'_>) {}

    /// Called once per step while the action is current.
    fn on_update(&mut self, _ctx: &mut ActionContext<'_>) {}

    /// Called once when the action completes, right before it leaves the stack.
    fn on_end(&mut self) {}

    /// Checked after each uninterrupted `on_update`.
    ///
    /// Default: `true` — the action runs a single update.
    fn is_done(&self) -> bool {
        true
    }

    /// Human-readable name for diagnostics.  Default: the short type name.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// `a::b::Wait<c::D>` → `Wait`.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
