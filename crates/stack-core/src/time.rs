//! Step time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one call
//! of every scheduler's step function.  The mapping to wall-clock time is
//! held in `StepClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Schedulers themselves never look at time; the clock exists so that drivers
//! and observers can report progress in human units.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to elapsed milliseconds.
///
/// `StepClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// How many milliseconds one tick represents (e.g. 16 for ~60 Hz).
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `StepClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl StepClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// How many ticks span `ms` milliseconds? (rounds up)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms.max(1) as u64)
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{} (+{}.{:03}s)", self.current_tick, ms / 1_000, ms % 1_000)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Top-level driver configuration.
///
/// Typically loaded from a JSON file by the application crate (enable the
/// `serde` feature) and passed to the stage builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Milliseconds per tick.  Must be non-zero.  Default: 16.
    pub tick_duration_ms: u32,

    /// Total ticks to run.  `Stage::run` stops at this tick.
    pub total_ticks: u64,

    /// Report to observers every N ticks.  0 disables periodic reports.
    pub report_interval_ticks: u64,

    /// Seed handed to applications that want deterministic randomness.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:      16,
            total_ticks:           600,
            report_interval_ticks: 60,
            seed:                  0,
        }
    }
}

impl RunConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `StepClock` pre-configured for this run.
    pub fn make_clock(&self) -> StepClock {
        StepClock::new(self.tick_duration_ms)
    }

    /// Reject configurations the driver cannot honor.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be non-zero".into()));
        }
        if self.report_interval_ticks > self.total_ticks && self.total_ticks > 0 {
            return Err(CoreError::Config(format!(
                "report_interval_ticks ({}) exceeds total_ticks ({})",
                self.report_interval_ticks, self.total_ticks,
            )));
        }
        Ok(())
    }
}
