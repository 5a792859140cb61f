//! `stack-sched` — stack-based action scheduling.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`action`]    | `Action` trait (`on_begin`/`on_update`/`on_end`/`is_done`)      |
//! | [`store`]     | `ActionStore` — caller-owned arena addressed by `ActionId`      |
//! | [`pending`]   | `PendingStack` — head-first, duplicate-free pending sequence    |
//! | [`context`]   | `ActionContext<'a>` — push/spawn channel handed to hooks        |
//! | [`scheduler`] | `ActionScheduler`, `StepOutcome`                                |
//! | [`observer`]  | `StepObserver` trait, `NoopStepObserver`, `TracingStepObserver` |
//! | [`builtin`]   | `NoopAction`, `Wait`, `FnAction`                                |
//! | [`error`]     | `SchedError`, `SchedResult<T>`                                  |
//!
//! # Design notes
//!
//! At most one action runs at a time.  `push` always inserts at the head, so
//! the most recently pushed unfinished action runs next (LIFO), and a pushed
//! action pre-empts whatever was current.
//!
//! Hooks may push while they run (that is the only sanctioned reentrancy).
//! `push` itself never calls a hook; all hook calls happen inside
//! `ActionScheduler::step`, which detects a head change after every hook and
//! re-resolves within the same step.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                       |
//! |-----------|----------------------------------------------|
//! | `fx-hash` | Uses `FxHashSet` for the seen-set.           |

pub mod action;
pub mod builtin;
pub mod context;
pub mod error;
pub mod observer;
pub mod pending;
pub mod scheduler;
pub mod store;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use builtin::{FnAction, NoopAction, Wait};
pub use context::ActionContext;
pub use error::{SchedError, SchedResult};
pub use observer::{NoopStepObserver, StepObserver, TracingStepObserver};
pub use pending::PendingStack;
pub use scheduler::{ActionScheduler, StepOutcome};
pub use store::ActionStore;
