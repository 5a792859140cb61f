//! patrol — a guard and a door driven by per-host action stacks.
//!
//! The guard patrols a loop of waypoints; random noises push an
//! `Investigate` ahead of the patrol, which itself pushes a walk ahead of
//! its own look-around.  The door waits, unlocks, then swings open.
//!
//! ```text
//! cargo run -p patrol                 # default config
//! cargo run -p patrol -- run.json     # RunConfig from JSON
//! RUST_LOG=debug cargo run -p patrol  # lifecycle events
//! ```

mod actions;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stack_core::RunConfig;
use stack_host::{Host, LoggingObserver, StageBuilder};
use stack_sched::{FnAction, Wait};

use actions::{OpenDoor, Patrol};

// ── Constants ─────────────────────────────────────────────────────────────────

const WAYPOINTS: [&str; 4] = ["gate", "yard", "tower", "barracks"];
const LAPS:      u32       = 3;
const NOISE_P:   f64       = 0.15;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None       => RunConfig::default(),
    };
    info!(?config, "configuration");

    let guard = Host::new("guard")
        .with_action(Patrol::new(WAYPOINTS.to_vec(), LAPS, config.seed, NOISE_P));

    // Pushed in reverse: the last push runs first.
    let door = Host::new("door")
        .with_action(OpenDoor::new())
        .with_action(FnAction::new("unlock", |_ctx| info!("door unlocked")))
        .with_action(Wait::ticks(5));

    let mut stage = StageBuilder::new(config)
        .host(guard)
        .host(door)
        .build()?;

    let limit = stage.config.total_ticks;
    let stopped = stage.run_until_idle(limit, &mut LoggingObserver)?;

    if stage.is_idle() {
        println!("all hosts idle at {} ({})", stopped, stage.clock);
    } else {
        println!("tick limit {} reached with work pending ({})", limit, stage.clock);
    }
    for host in &stage.hosts {
        println!("  {:<8} {} actions created", host.label, host.actions.len());
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: RunConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
