//! Guard and door behaviors for the patrol demo.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use stack_sched::{Action, ActionContext, Wait};
use tracing::info;

// ── Patrol ────────────────────────────────────────────────────────────────────

/// Walks a loop of waypoints.  Each step there is a chance of hearing a
/// noise, which pushes an [`Investigate`] ahead of the patrol.
pub struct Patrol {
    waypoints: Vec<&'static str>,
    next:      usize,
    laps_left: u32,
    rng:       SmallRng,
    noise_p:   f64,
}

impl Patrol {
    pub fn new(waypoints: Vec<&'static str>, laps: u32, seed: u64, noise_p: f64) -> Self {
        Self {
            waypoints,
            next: 0,
            laps_left: laps,
            rng: SmallRng::seed_from_u64(seed),
            noise_p,
        }
    }
}

impl Action for Patrol {
    fn on_begin(&mut self, first_time: bool, _ctx: &mut ActionContext<'_>) {
        if first_time {
            info!(laps = self.laps_left, "patrol starting");
        } else {
            info!(at = self.waypoints[self.next], "patrol resuming");
        }
    }

    fn on_update(&mut self, ctx: &mut ActionContext<'_>) {
        let here = self.waypoints[self.next];
        self.next = (self.next + 1) % self.waypoints.len();
        if self.next == 0 {
            self.laps_left = self.laps_left.saturating_sub(1);
        }

        if self.rng.gen_bool(self.noise_p) {
            info!(at = here, "heard a noise");
            ctx.spawn(Investigate::new(here));
        }
    }

    fn is_done(&self) -> bool {
        self.laps_left == 0
    }

    fn on_end(&mut self) {
        info!("patrol finished");
    }
}

// ── Investigate ───────────────────────────────────────────────────────────────

/// Walks to a spot, then looks around for a few steps.
pub struct Investigate {
    spot:  &'static str,
    looks: u32,
}

impl Investigate {
    const WALK_TICKS: u32 = 3;
    const LOOKS:      u32 = 2;

    pub fn new(spot: &'static str) -> Self {
        Self { spot, looks: 0 }
    }
}

impl Action for Investigate {
    fn on_begin(&mut self, first_time: bool, ctx: &mut ActionContext<'_>) {
        if first_time {
            // Walk there first; we resume once the walk completes.
            ctx.spawn(Wait::ticks(Self::WALK_TICKS));
        } else {
            info!(spot = self.spot, "arrived, looking around");
        }
    }

    fn on_update(&mut self, _ctx: &mut ActionContext<'_>) {
        self.looks += 1;
    }

    fn is_done(&self) -> bool {
        self.looks >= Self::LOOKS
    }

    fn on_end(&mut self) {
        info!(spot = self.spot, "nothing found");
    }
}

// ── Door ──────────────────────────────────────────────────────────────────────

/// Swings open over a number of steps.
#[derive(Default)]
pub struct OpenDoor {
    angle: u32,
}

impl OpenDoor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Action for OpenDoor {
    fn on_update(&mut self, _ctx: &mut ActionContext<'_>) {
        self.angle = (self.angle + 15).min(90);
    }

    fn is_done(&self) -> bool {
        self.angle >= 90
    }

    fn on_end(&mut self) {
        info!("door open");
    }
}
