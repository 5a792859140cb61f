//! The `Stage` struct and its tick loop.

use stack_core::{HostId, RunConfig, StepClock, Tick};
use stack_sched::StepOutcome;
use tracing::{debug, trace, warn};

use crate::observer::Forward;
use crate::{Host, StageError, StageObserver, StageResult};

/// The per-tick driver.
///
/// `Stage` owns every [`Host`] and steps each host's scheduler exactly once
/// per tick, in ascending [`HostId`] order:
///
/// 1. `on_tick_start`
/// 2. for each host: `step` (lifecycle events forwarded), then `on_step`
/// 3. `on_tick_end` with the number of hosts that were not idle
/// 4. `on_report` every `config.report_interval_ticks` ticks
///
/// A host whose step fails gets no `on_step`.  The tick still runs to the
/// end and the clock advances; the first host error is returned afterwards.
///
/// Create via [`StageBuilder`][crate::StageBuilder].
pub struct Stage {
    /// Run configuration (tick duration, total ticks, report interval).
    pub config: RunConfig,

    /// Tracks the current tick.
    pub clock: StepClock,

    /// Hosts indexed by `HostId`.
    pub hosts: Vec<Host>,
}

impl Stage {
    // ── Host access ───────────────────────────────────────────────────────

    pub fn host(&self, id: HostId) -> Option<&Host> {
        self.hosts.get(id.index())
    }

    pub fn host_mut(&mut self, id: HostId) -> Option<&mut Host> {
        self.hosts.get_mut(id.index())
    }

    /// Look up a host by label.
    pub fn host_id(&self, label: &str) -> Option<HostId> {
        self.hosts
            .iter()
            .position(|h| h.label == label)
            .map(|i| HostId(i as u32))
    }

    /// `true` when every host is idle.
    pub fn is_idle(&self) -> bool {
        self.hosts.iter().all(Host::is_idle)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: StageObserver>(&mut self, observer: &mut O) -> StageResult<()> {
        debug!(hosts = self.hosts.len(), end = %self.config.end_tick(), "stage run starting");
        while self.clock.current_tick < self.config.end_tick() {
            self.advance(observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: StageObserver>(&mut self, n: u64, observer: &mut O) -> StageResult<()> {
        for _ in 0..n {
            self.advance(observer)?;
        }
        Ok(())
    }

    /// Run until every host is idle or `max_ticks` ticks have passed.
    ///
    /// Returns the tick at which the stage stopped.
    pub fn run_until_idle<O: StageObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> StageResult<Tick> {
        let limit = Tick(self.clock.current_tick.0.saturating_add(max_ticks));
        while !self.is_idle() && self.clock.current_tick < limit {
            self.advance(observer)?;
        }
        Ok(self.clock.current_tick)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn advance<O: StageObserver>(&mut self, observer: &mut O) -> StageResult<()> {
        let now = self.clock.current_tick;

        observer.on_tick_start(now);
        let (active, failure) = self.process_tick(now, observer);
        observer.on_tick_end(now, active);

        let interval = self.config.report_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_report(now, &self.hosts);
        }

        // The tick is complete even if a host failed, so it is never replayed.
        self.clock.advance();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Step every host once.  Returns the number of active hosts and the
    /// first host error; hosts after a failing one are still stepped.
    fn process_tick<O: StageObserver>(
        &mut self,
        now:      Tick,
        observer: &mut O,
    ) -> (usize, Option<StageError>) {
        let mut active = 0;
        let mut failure = None;

        for (i, host) in self.hosts.iter_mut().enumerate() {
            let id = HostId(i as u32);

            let stepped = {
                let mut forward = Forward { tick: now, host: id, inner: &mut *observer };
                host.step_observed(&mut forward)
            };
            let outcome = match stepped {
                Ok(outcome) => outcome,
                Err(source) => {
                    warn!(tick = %now, host = %host.label, error = %source, "host step failed");
                    if failure.is_none() {
                        failure = Some(StageError::Sched { host: host.label.clone(), source });
                    }
                    continue;
                }
            };

            if outcome != StepOutcome::Idle {
                active += 1;
            }
            trace!(tick = %now, host = %host.label, ?outcome, "stepped");
            observer.on_step(now, id, outcome);
        }

        (active, failure)
    }
}
