//! Unit tests for stack-sched.

use std::cell::RefCell;
use std::rc::Rc;

use stack_core::ActionId;

use crate::{Action, ActionContext, ActionScheduler, ActionStore, StepObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Begin(&'static str, bool),
    Update(&'static str),
    End(&'static str),
}

type Log = Rc<RefCell<Vec<Event>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn drain(log: &Log) -> Vec<Event> {
    std::mem::take(&mut *log.borrow_mut())
}

use Event::{Begin, End, Update};

/// Scriptable action that records every hook call.
struct Probe {
    tag:         &'static str,
    log:         Log,
    updates:     u32,
    done_after:  u32,
    begin_push:  Option<ActionId>,
    update_push: Option<(u32, ActionId)>,
}

impl Probe {
    /// Never done unless `done_after` is set.
    fn new(tag: &'static str, log: &Log) -> Self {
        Self {
            tag,
            log:         Rc::clone(log),
            updates:     0,
            done_after:  u32::MAX,
            begin_push:  None,
            update_push: None,
        }
    }

    fn done_after(mut self, n: u32) -> Self {
        self.done_after = n;
        self
    }

    /// Push `id` from the first-time `on_begin`.
    fn push_on_begin(mut self, id: ActionId) -> Self {
        self.begin_push = Some(id);
        self
    }

    /// Push `id` from the `nth` (1-based) `on_update`.
    fn push_on_update(mut self, nth: u32, id: ActionId) -> Self {
        self.update_push = Some((nth, id));
        self
    }
}

impl Action for Probe {
    fn on_begin(&mut self, first_time: bool, ctx: &mut ActionContext<'_>) {
        self.log.borrow_mut().push(Begin(self.tag, first_time));
        if first_time {
            if let Some(id) = self.begin_push.take() {
                ctx.push(id);
            }
        }
    }

    fn on_update(&mut self, ctx: &mut ActionContext<'_>) {
        self.updates += 1;
        self.log.borrow_mut().push(Update(self.tag));
        if let Some((nth, id)) = self.update_push {
            if self.updates == nth {
                self.update_push = None;
                ctx.push(id);
            }
        }
    }

    fn on_end(&mut self) {
        self.log.borrow_mut().push(End(self.tag));
    }

    fn is_done(&self) -> bool {
        self.updates >= self.done_after
    }

    fn name(&self) -> &str {
        self.tag
    }
}

/// Observer that records events as strings.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl StepObserver for Recorder {
    fn on_begin(&mut self, action: ActionId, first_time: bool) {
        self.events.push(format!("begin {} {first_time}", action.0));
    }
    fn on_update(&mut self, action: ActionId) {
        self.events.push(format!("update {}", action.0));
    }
    fn on_interrupted(&mut self, action: ActionId) {
        self.events.push(format!("interrupted {}", action.0));
    }
    fn on_end(&mut self, action: ActionId) {
        self.events.push(format!("end {}", action.0));
    }
}

// ── PendingStack ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod pending_tests {
    use std::collections::HashSet;

    use super::*;
    use crate::PendingStack;

    #[test]
    fn push_inserts_at_head() {
        let mut p = PendingStack::new();
        p.push(ActionId(1));
        p.push(ActionId(2));
        assert_eq!(p.as_slice(), &[ActionId(2), ActionId(1)]);
        assert_eq!(p.head(), Some(ActionId(2)));
    }

    #[test]
    fn repush_moves_without_duplicating() {
        let mut p = PendingStack::new();
        for id in [1, 2, 3, 1] {
            p.push(ActionId(id));
        }
        assert_eq!(p.as_slice(), &[ActionId(1), ActionId(3), ActionId(2)]);
    }

    #[test]
    fn never_holds_duplicates() {
        let mut p = PendingStack::new();
        for id in [4, 1, 4, 4, 2, 1, 3, 2, 4, 0, 0] {
            p.push(ActionId(id));
        }
        let unique: HashSet<_> = p.as_slice().iter().copied().collect();
        assert_eq!(unique.len(), p.len());
        assert_eq!(p.len(), 5);
        assert_eq!(p.head(), Some(ActionId(0)));
    }

    #[test]
    fn invalid_push_is_noop() {
        let mut p = PendingStack::new();
        p.push(ActionId(1));
        p.set_current(Some(ActionId(1)));
        p.push(ActionId::INVALID);
        assert_eq!(p.as_slice(), &[ActionId(1)]);
        assert_eq!(p.current(), Some(ActionId(1)));
    }

    #[test]
    fn push_of_other_clears_current() {
        let mut p = PendingStack::new();
        p.push(ActionId(1));
        p.set_current(Some(ActionId(1)));
        p.push(ActionId(2));
        assert_eq!(p.current(), None);
        assert!(!p.is_idle());
    }

    #[test]
    fn push_of_current_keeps_current() {
        let mut p = PendingStack::new();
        p.push(ActionId(1));
        p.push(ActionId(2));
        p.set_current(Some(ActionId(1)));
        p.push(ActionId(1));
        assert_eq!(p.current(), Some(ActionId(1)));
        assert_eq!(p.as_slice(), &[ActionId(1), ActionId(2)]);
    }

    #[test]
    fn purge_drops_entry_and_current() {
        let mut p = PendingStack::new();
        p.push(ActionId(1));
        p.push(ActionId(2));
        p.set_current(Some(ActionId(2)));
        p.purge(ActionId(2));
        assert_eq!(p.as_slice(), &[ActionId(1)]);
        assert_eq!(p.current(), None);
    }
}

// ── ActionStore ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::{NoopAction, Wait};

    #[test]
    fn insert_hands_out_sequential_ids() {
        let mut store = ActionStore::new();
        assert_eq!(store.insert(NoopAction), ActionId(0));
        assert_eq!(store.insert(Wait::ticks(2)), ActionId(1));
        assert_eq!(store.len(), 2);
        assert!(store.contains(ActionId(1)));
        assert!(!store.contains(ActionId(2)));
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut store = ActionStore::new();
        let a = store.insert(NoopAction);
        let b = store.insert(NoopAction);
        assert!(store.remove(a).is_some());
        assert!(store.remove(a).is_none());
        let c = store.insert(NoopAction);
        assert_ne!(c, a);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn names_default_to_short_type_name() {
        let mut store = ActionStore::new();
        let noop = store.insert(NoopAction);
        let wait = store.insert(Wait::ticks(1));
        assert_eq!(store.name_of(noop), Some("NoopAction"));
        assert_eq!(store.name_of(wait), Some("Wait"));
        assert_eq!(store.name_of(ActionId(99)), None);
    }

    #[test]
    fn identical_content_is_distinct_identity() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Wait::ticks(5));
        let b = store.insert(Wait::ticks(5));
        sched.push(a);
        sched.push(b);
        assert_eq!(sched.pending(), &[b, a]);
    }
}

// ── ActionScheduler ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler_tests {
    use super::*;
    use crate::{SchedError, StepOutcome};

    #[test]
    fn idle_step_calls_nothing() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let mut rec = Recorder::default();
        assert!(sched.is_idle());
        assert_eq!(sched.step_observed(&mut store, &mut rec).unwrap(), StepOutcome::Idle);
        assert!(rec.events.is_empty());
        assert!(sched.is_idle());
        assert!(sched.pending().is_empty());
        assert_eq!(sched.current(), None);
    }

    #[test]
    fn begin_update_end_lifecycle() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Probe::new("a", &log).done_after(2));

        sched.push(a);
        assert_eq!(sched.current(), None);
        assert!(!sched.is_idle());

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(a));
        assert_eq!(drain(&log), vec![Begin("a", true), Update("a")]);
        assert_eq!(sched.current(), Some(a));
        assert!(sched.has_begun(a));

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(a));
        assert_eq!(drain(&log), vec![Update("a"), End("a")]);
        assert!(sched.is_idle());
        assert!(!sched.has_begun(a));

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Idle);
        assert!(drain(&log).is_empty());
        // The caller still owns the finished action.
        assert!(store.contains(a));
    }

    #[test]
    fn pushed_action_takes_precedence_over_current() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Probe::new("a", &log));
        let b = store.insert(Probe::new("b", &log).done_after(1));

        sched.push(a);
        sched.step(&mut store).unwrap();
        drain(&log);

        sched.push(b);
        assert_eq!(sched.pending(), &[b, a]);
        assert_eq!(sched.current(), None);

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(b));
        assert_eq!(drain(&log), vec![Begin("b", true), Update("b"), End("b")]);

        // `a` resumes and is not treated as new.
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(a));
        assert_eq!(drain(&log), vec![Begin("a", false), Update("a")]);
    }

    #[test]
    fn repushing_current_keeps_it_current() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Probe::new("a", &log));

        sched.push(a);
        sched.step(&mut store).unwrap();
        sched.push(a);
        assert_eq!(sched.current(), Some(a));
        assert_eq!(sched.pending(), &[a]);

        drain(&log);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(a));
        assert_eq!(drain(&log), vec![Update("a")]);
    }

    #[test]
    fn push_during_update_interrupts_without_ending() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let b = store.insert(Probe::new("b", &log).done_after(1));
        let a = store.insert(Probe::new("a", &log).push_on_update(2, b));

        sched.push(a);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(a));
        drain(&log);

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Interrupted(a));
        assert_eq!(drain(&log), vec![Update("a")]);
        assert_eq!(sched.pending(), &[b, a]);
        assert_eq!(sched.current(), None);
        assert!(sched.has_begun(a));

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(b));
        assert_eq!(drain(&log), vec![Begin("b", true), Update("b"), End("b")]);

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(a));
        assert_eq!(drain(&log), vec![Begin("a", false), Update("a")]);
    }

    #[test]
    fn push_during_begin_restarts_step() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let b = store.insert(Probe::new("b", &log).done_after(1));
        let a = store.insert(Probe::new("a", &log).done_after(1).push_on_begin(b));
        let mut rec = Recorder::default();

        sched.push(a);
        assert_eq!(sched.step_observed(&mut store, &mut rec).unwrap(), StepOutcome::Completed(b));
        assert_eq!(
            drain(&log),
            vec![Begin("a", true), Begin("b", true), Update("b"), End("b")],
        );
        assert_eq!(
            rec.events,
            vec!["begin 1 true", "interrupted 1", "begin 0 true", "update 0", "end 0"],
        );
        assert_eq!(sched.pending(), &[a]);
        assert!(sched.has_begun(a));

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(a));
        assert_eq!(drain(&log), vec![Begin("a", false), Update("a"), End("a")]);
        assert!(sched.is_idle());
    }

    #[test]
    fn nested_begin_pushes_settle_on_innermost() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let c = store.insert(Probe::new("c", &log));
        let b = store.insert(Probe::new("b", &log).push_on_begin(c));
        let a = store.insert(Probe::new("a", &log).push_on_begin(b));

        sched.push(a);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(c));
        assert_eq!(
            drain(&log),
            vec![Begin("a", true), Begin("b", true), Begin("c", true), Update("c")],
        );
        assert_eq!(sched.pending(), &[c, b, a]);
        assert_eq!(sched.current(), Some(c));
    }

    #[test]
    fn end_runs_exactly_once_and_resets_first_time() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Probe::new("a", &log).done_after(1));

        sched.push(a);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(a));
        for _ in 0..3 {
            assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Idle);
        }
        let ends = drain(&log).into_iter().filter(|e| *e == End("a")).count();
        assert_eq!(ends, 1);

        // Pushed again after completion: a fresh first-time begin.
        sched.push(a);
        sched.step(&mut store).unwrap();
        assert_eq!(drain(&log)[0], Begin("a", true));
    }

    #[test]
    fn invalid_push_is_ignored() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        sched.push(ActionId::INVALID);
        assert!(sched.is_idle());
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Idle);
    }

    #[test]
    fn stale_handle_is_reported_once_and_purged() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Probe::new("a", &log));
        let b = store.insert(Probe::new("b", &log).done_after(1));

        sched.push(a);
        sched.push(b);
        store.remove(a);

        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(b));
        let err = sched.step(&mut store).unwrap_err();
        assert!(matches!(err, SchedError::ActionNotFound(id) if id == a));
        assert!(sched.is_idle());
        assert!(!sched.has_begun(a));
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Idle);
    }

    #[test]
    fn outcome_exposes_action() {
        assert_eq!(StepOutcome::Idle.action(), None);
        assert_eq!(StepOutcome::Running(ActionId(3)).action(), Some(ActionId(3)));
        assert_eq!(StepOutcome::Completed(ActionId(4)).action(), Some(ActionId(4)));
    }

    #[test]
    fn tracing_observer_drives_same_lifecycle() {
        let log = new_log();
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let b = store.insert(Probe::new("b", &log).done_after(1));
        let a = store.insert(Probe::new("a", &log).done_after(1).push_on_begin(b));
        let mut obs = crate::TracingStepObserver::new("test");

        sched.push(a);
        assert_eq!(sched.step_observed(&mut store, &mut obs).unwrap(), StepOutcome::Completed(b));
        assert_eq!(sched.step_observed(&mut store, &mut obs).unwrap(), StepOutcome::Completed(a));
        assert_eq!(obs.scope, "test");
    }

    struct SelfPusher {
        updates: u32,
    }

    impl Action for SelfPusher {
        fn on_update(&mut self, ctx: &mut ActionContext<'_>) {
            self.updates += 1;
            ctx.push(ctx.this());
        }
        fn is_done(&self) -> bool {
            self.updates >= 3
        }
    }

    #[test]
    fn self_push_from_hook_is_not_an_interruption() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(SelfPusher { updates: 0 });

        sched.push(a);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(a));
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(a));
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(a));
        assert!(sched.is_idle());
    }

    struct Panicky;

    impl Action for Panicky {
        fn on_update(&mut self, _ctx: &mut ActionContext<'_>) {
            panic!("hook exploded");
        }
    }

    #[test]
    #[should_panic(expected = "hook exploded")]
    fn hook_panics_propagate() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Panicky);
        sched.push(a);
        let _ = sched.step(&mut store);
    }

    /// Panics on its first update only.
    struct FlakyOnce {
        updates: u32,
    }

    impl Action for FlakyOnce {
        fn on_update(&mut self, _ctx: &mut ActionContext<'_>) {
            self.updates += 1;
            if self.updates == 1 {
                panic!("first update failed");
            }
        }
    }

    #[test]
    fn action_survives_a_caught_hook_panic() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(FlakyOnce { updates: 0 });
        sched.push(a);

        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sched.step(&mut store)
        }));
        assert!(caught.is_err());

        assert!(store.contains(a));
        assert_eq!(store.len(), 1);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![a]);
        assert_eq!(sched.current(), Some(a));

        // Resumes where it left off: updated again, no second begin.
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(a));
        assert!(sched.is_idle());
    }
}

// ── ActionContext ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;
    use crate::{NoopAction, StepOutcome};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Seen {
        this:          Option<ActionId>,
        contains_self: bool,
        pending:       Vec<ActionId>,
        current:       Option<ActionId>,
        inserted:      Option<ActionId>,
    }

    struct Inspector {
        seen: Rc<RefCell<Seen>>,
    }

    impl Action for Inspector {
        fn on_update(&mut self, ctx: &mut ActionContext<'_>) {
            let inserted = ctx.insert(NoopAction);
            *self.seen.borrow_mut() = Seen {
                this:          Some(ctx.this()),
                contains_self: ctx.contains(ctx.this()),
                pending:       ctx.pending().to_vec(),
                current:       ctx.current(),
                inserted:      Some(inserted),
            };
        }
    }

    #[test]
    fn hook_sees_its_own_state() {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(Inspector { seen: Rc::clone(&seen) });

        sched.push(a);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(a));

        let seen = seen.borrow().clone();
        assert_eq!(seen.this, Some(a));
        assert!(seen.contains_self);
        assert_eq!(seen.pending, vec![a]);
        assert_eq!(seen.current, Some(a));

        // Inserted but not scheduled.
        let inserted = seen.inserted.unwrap();
        assert!(store.contains(inserted));
        assert!(sched.is_idle());
    }
}

// ── Built-in actions ──────────────────────────────────────────────────────────

#[cfg(test)]
mod builtin_tests {
    use std::cell::Cell;

    use super::*;
    use crate::{FnAction, NoopAction, StepOutcome, Wait};

    #[test]
    fn noop_completes_in_one_step() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let a = store.insert(NoopAction);
        sched.push(a);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(a));
    }

    #[test]
    fn wait_counts_updates() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let w = store.insert(Wait::ticks(3));
        sched.push(w);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(w));
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Running(w));
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(w));
    }

    #[test]
    fn wait_keeps_progress_across_interruption() {
        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let w = store.insert(Wait::ticks(3));
        let n = store.insert(NoopAction);

        sched.push(w);
        sched.step(&mut store).unwrap();
        sched.step(&mut store).unwrap();

        sched.push(n);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(n));
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(w));
    }

    #[test]
    fn wait_helpers() {
        let w = Wait::ticks(4);
        assert_eq!(w.elapsed(), 0);
        assert_eq!(w.remaining(), 4);
    }

    #[test]
    fn fn_action_runs_once_and_can_chain() {
        let runs = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&runs);

        let mut store = ActionStore::new();
        let mut sched = ActionScheduler::new();
        let f = store.insert(FnAction::new("chain", move |ctx| {
            counter.set(counter.get() + 1);
            ctx.spawn(NoopAction);
        }));
        assert_eq!(store.name_of(f), Some("chain"));

        sched.push(f);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Interrupted(f));
        let spawned = sched.pending()[0];
        assert_ne!(spawned, f);
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(spawned));
        assert_eq!(sched.step(&mut store).unwrap(), StepOutcome::Completed(f));
        assert_eq!(runs.get(), 1);
        assert!(sched.is_idle());
    }
}
