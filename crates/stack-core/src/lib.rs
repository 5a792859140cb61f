//! `stack-core` — foundational types for the `action_stack` workspace.
//!
//! This crate is a dependency of every other `stack-*` crate.  It has no
//! `stack-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ActionId`, `HostId`                                  |
//! | [`time`]        | `Tick`, `StepClock`, `RunConfig`                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ActionId, HostId};
pub use time::{RunConfig, StepClock, Tick};
