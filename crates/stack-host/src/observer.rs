//! Stage observer trait for progress reporting and diagnostics.

use stack_core::{ActionId, HostId, Tick};
use stack_sched::{StepObserver, StepOutcome};

use crate::Host;

/// Callbacks invoked by [`Stage::run`][crate::Stage::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl StageObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, active: usize) {
///         println!("{tick}: {active} hosts busy");
///     }
/// }
/// ```
pub trait StageObserver {
    /// Called at the very start of each tick, before any host steps.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// An action on `host` received `on_begin`.
    fn on_begin(&mut self, _tick: Tick, _host: HostId, _action: ActionId, _first_time: bool) {}

    /// An action on `host` was superseded by a push.
    fn on_interrupted(&mut self, _tick: Tick, _host: HostId, _action: ActionId) {}

    /// An action on `host` completed.
    fn on_end(&mut self, _tick: Tick, _host: HostId, _action: ActionId) {}

    /// Called once per host per tick with the result of its step.
    fn on_step(&mut self, _tick: Tick, _host: HostId, _outcome: StepOutcome) {}

    /// Called at the end of each tick.
    ///
    /// `active` is the number of hosts whose step was not idle.
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {}

    /// Called every `config.report_interval_ticks` ticks with read-only
    /// access to every host.
    fn on_report(&mut self, _tick: Tick, _hosts: &[Host]) {}

    /// Called once after the final tick completes.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`StageObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl StageObserver for NoopObserver {}

/// A [`StageObserver`] that logs through `tracing`: lifecycle events at
/// `debug`, periodic reports at `info`.
pub struct LoggingObserver;

impl StageObserver for LoggingObserver {
    fn on_begin(&mut self, tick: Tick, host: HostId, action: ActionId, first_time: bool) {
        tracing::debug!(%tick, %host, %action, first_time, "begin");
    }

    fn on_interrupted(&mut self, tick: Tick, host: HostId, action: ActionId) {
        tracing::debug!(%tick, %host, %action, "interrupted");
    }

    fn on_end(&mut self, tick: Tick, host: HostId, action: ActionId) {
        tracing::debug!(%tick, %host, %action, "end");
    }

    fn on_report(&mut self, tick: Tick, hosts: &[Host]) {
        let busy = hosts.iter().filter(|h| !h.is_idle()).count();
        tracing::info!(%tick, busy, total = hosts.len(), "stage report");
        for host in hosts {
            tracing::debug!(
                %tick,
                host = %host.label,
                current = host.current_name().unwrap_or("-"),
                pending = host.scheduler.pending().len(),
                "host state",
            );
        }
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        tracing::info!(%final_tick, "run finished");
    }
}

// ── Scheduler → stage event forwarding ────────────────────────────────────────

/// Adapts a [`StageObserver`] to the per-scheduler [`StepObserver`] hooks,
/// stamping each event with the tick and host.
pub(crate) struct Forward<'a, O: StageObserver> {
    pub tick:  Tick,
    pub host:  HostId,
    pub inner: &'a mut O,
}

impl<O: StageObserver> StepObserver for Forward<'_, O> {
    fn on_begin(&mut self, action: ActionId, first_time: bool) {
        self.inner.on_begin(self.tick, self.host, action, first_time);
    }

    fn on_interrupted(&mut self, action: ActionId) {
        self.inner.on_interrupted(self.tick, self.host, action);
    }

    fn on_end(&mut self, action: ActionId) {
        self.inner.on_end(self.tick, self.host, action);
    }
}
