//! Headless driver for the character animation engine.
//!
//! Plays the role of the game loop: it loads an action library and an
//! animation config, registers a crowd of characters and monsters, flips
//! their behavioral states at random, and ticks the engine on a fixed step.
//! Resolved layers are logged so the playback can be followed from the
//! terminal.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --actors 6 --ticks 120 --seed 7
//! ```

use std::path::PathBuf;
use std::time::Duration;

use charanim::components::actor::{ActorDescriptor, ActorId, Gender};
use charanim::components::behavior::BehavioralState;
use charanim::engine::AnimationEngine;
use charanim::loader::JsonActionLibrary;
use charanim::resources::animconfig::AnimationConfig;
use clap::Parser;
use log::{info, warn};

/// States the demo cycles actors through.
const DEMO_STATES: [BehavioralState; 4] = [
    BehavioralState::Idle,
    BehavioralState::Walking,
    BehavioralState::Sitting,
    BehavioralState::Attacking,
];

/// Character animation engine demo
#[derive(Parser)]
#[command(version, about = "Drives the character animation engine on a simulated clock.")]
struct Cli {
    /// JSON action library to load sprites from.
    #[arg(long, value_name = "PATH", default_value = "assets/actions.json")]
    library: PathBuf,

    /// INI animation config. Defaults are used if it cannot be read.
    #[arg(long, value_name = "PATH", default_value = "assets/config.ini")]
    config: PathBuf,

    /// Number of actors to register; odd ids are monsters.
    #[arg(long, default_value_t = 4)]
    actors: u64,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 60)]
    ticks: u64,

    /// Simulated milliseconds between ticks.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Seed for the state changes; random if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let library = match JsonActionLibrary::load_from_file(&cli.library) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut config = AnimationConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }

    let mut engine = AnimationEngine::new(config, library);
    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    for id in 0..cli.actors {
        let descriptor = if id % 2 == 0 {
            let gender = if rng.bool() { Gender::Male } else { Gender::Female };
            ActorDescriptor::character(gender, 0, rng.u16(1..=2))
        } else {
            ActorDescriptor::monster("poring")
        };
        if let Err(e) = engine.register(ActorId(id), descriptor) {
            warn!("Skipping actor {}: {}", id, e);
        }
    }
    info!("Tracking {} actors", engine.len());

    for tick in 1..=cli.ticks {
        let now = Duration::from_millis(tick * cli.tick_ms);

        for actor in engine.actors() {
            if rng.u8(0..10) == 0 {
                let state = DEMO_STATES[rng.usize(0..DEMO_STATES.len())];
                if let Err(e) = engine.set_state(actor, state) {
                    warn!("tick {}: {}", tick, e);
                }
            }
        }

        if let Err(errors) = engine.tick(now) {
            for error in errors {
                warn!("tick {}: {}", tick, error);
            }
        }

        if tick % 10 == 0 {
            for actor in engine.actors() {
                match engine.current_sprites(actor) {
                    Ok(sprites) => {
                        let state = engine
                            .animation_state(actor)
                            .map(|s| s.previous_state)
                            .unwrap_or_default();
                        for (attachment, layers) in sprites {
                            let frames: Vec<u32> = layers.iter().map(|l| l.frame).collect();
                            info!(
                                "t={:>5}ms actor {} {:?} {:?}: {} layers {:?}",
                                now.as_millis(),
                                actor,
                                state,
                                attachment,
                                layers.len(),
                                frames
                            );
                        }
                    }
                    Err(e) => warn!("actor {}: {}", actor, e),
                }
            }
        }
    }
}
