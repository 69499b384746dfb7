//! Headless level runner.
//!
//! Loads a level (and optionally a config), drives it with a scripted player
//! and logs what happened. Run with: `cargo run -p dungeon-sim -- --level data/levels/dungeon.ron`

mod pilot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{ConfigLoader, LevelLoader};
use game_core::{Combatant, GameConfig};
use runtime::{EncounterEvent, Session, SessionState};
use tracing::{debug, info};

/// Runs a dungeon level without a window
#[derive(Parser, Debug)]
#[command(name = "dungeon-sim")]
#[command(about = "Headless dungeon level runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Level file (RON)
    #[arg(short, long, value_name = "FILE")]
    level: PathBuf,

    /// Tuning overrides (TOML); built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "3600")]
    frames: u32,

    /// Overrides the configured RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds per frame
    #[arg(long, value_name = "SECS", default_value = "0.016666668")]
    frame_dt: f32,
}

#[derive(Debug, Default)]
struct Tally {
    frames: u32,
    spawned: usize,
    killed: usize,
    hits_landed: usize,
    damage_taken: i32,
    respawns: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !(cli.frame_dt.is_finite() && cli.frame_dt > 0.0) {
        anyhow::bail!("--frame-dt must be a positive number of seconds, got {}", cli.frame_dt);
    }

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let level = LevelLoader::load(&cli.level)?;
    info!(
        level = %cli.level.display(),
        rooms = level.rooms.len(),
        spawns = level.spawns.len(),
        seed = config.rng_seed,
        "starting simulation"
    );

    let mut session = Session::new(config, level).context("failed to start session")?;
    let tally = simulate(&mut session, cli.frames, cli.frame_dt);

    info!(
        state = ?session.state(),
        frames = tally.frames,
        spawned = tally.spawned,
        killed = tally.killed,
        hits_landed = tally.hits_landed,
        damage_taken = tally.damage_taken,
        respawns = tally.respawns,
        health = session.player().health(),
        lives = session.player().lives(),
        remaining = session.encounter().active().len() + session.encounter().pending().len(),
        "simulation finished"
    );
    Ok(())
}

fn simulate(session: &mut Session, frames: u32, frame_dt: f32) -> Tally {
    let mut tally = Tally::default();
    for frame in 0..frames {
        let input = pilot::scripted_input(session);
        let report = session.frame(frame_dt, &input);

        tally.frames += 1;
        tally.killed += report.died.len();
        tally.hits_landed += report.hits_landed;
        tally.damage_taken += report.damage_taken;
        if report.player_respawned {
            tally.respawns += 1;
        }
        for event in &report.events {
            if matches!(event, EncounterEvent::Spawned { .. }) {
                tally.spawned += 1;
            }
            debug!(frame, ?event, "encounter event");
        }

        if report.state != SessionState::Playing {
            break;
        }
    }
    tally
}
