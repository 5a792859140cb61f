//! `stack-host` — tick driver for the action_stack workspace.
//!
//! # Tick loop
//!
//! ```text
//! for tick in clock..config.end_tick():
//!   for host in hosts (ascending HostId):
//!     host.scheduler.step(&mut host.actions)
//!       begin / update / interrupt / end events → StageObserver
//!   report every config.report_interval_ticks
//! ```
//!
//! Every host owns one scheduler and one action store; "one scheduler per
//! object" is an explicit `Host` value rather than a global.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                             |
//! |-----------|----------------------------------------------------|
//! | `fx-hash` | Enables `stack-sched/fx-hash` for every scheduler. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use stack_core::RunConfig;
//! use stack_host::{Host, NoopObserver, StageBuilder};
//! use stack_sched::Wait;
//!
//! let mut stage = StageBuilder::new(RunConfig::default())
//!     .host(Host::new("npc").with_action(Wait::ticks(30)))
//!     .build()?;
//! stage.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod host;
pub mod observer;
pub mod stage;


pub use builder::StageBuilder;
pub use error::{StageError, StageResult};
pub use host::Host;
pub use observer::{LoggingObserver, NoopObserver, StageObserver};
pub use stage::Stage;
