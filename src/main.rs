//! Robo Dash headless runner
//!
//! Plays a run with the autopilot and logs the result. Rendering and real
//! input belong to the host engine; this is for balance checks and demos.
//!
//! Usage: `robo-dash [tuning.json] [seed]`

use robo_dash::consts::{DEFAULT_SEED, MAX_SUBSTEPS, SIM_DT};
use robo_dash::sim::{GameEvent, GameState, TickInput, tick};
use robo_dash::{ConfigError, Tuning};

/// Host frame time fed to the accumulator (30 fps host, 60 Hz sim)
const FRAME_DT: f32 = 1.0 / 30.0;
/// Stop after this many simulated seconds even if the robot survives
const MAX_RUN_SECONDS: f64 = 300.0;

fn load_tuning(path: Option<&str>) -> Result<Tuning, ConfigError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_string(),
                source,
            })?;
            log::info!("Loaded tuning from {}", path);
            Tuning::from_json(&json)
        }
        None => Ok(Tuning::default()),
    }
}

fn run(tuning: Tuning, seed: u64) -> Result<(), ConfigError> {
    let mut state = GameState::new(tuning, seed)?;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut accumulator = 0.0f32;
    let mut shots_hit = 0u32;
    let mut charges = 0u32;

    while !state.is_game_over() && state.elapsed < MAX_RUN_SECONDS {
        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in state.drain_events() {
            match event {
                GameEvent::HazardDestroyed { .. } => shots_hit += 1,
                GameEvent::PowerUpCollected { .. } => charges += 1,
                _ => {}
            }
        }

        if state.time_ticks > 0 && state.time_ticks % 600 == 0 {
            let hud = state.hud();
            log::info!("[{:>6.1}s] {} | {}", state.elapsed, hud.score, hud.shots);
        }
    }

    let hud = state.hud();
    log::info!(
        "Run finished after {:.1}s: {} ({} hazards shot, {} charges collected) {}",
        state.elapsed,
        hud.score,
        shots_hit,
        charges,
        hud.message
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.get(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed {:?}: {}", args[1], e);
            std::process::exit(2);
        }
        None => DEFAULT_SEED,
    };

    log::info!("Robo Dash (headless) starting...");
    let result = load_tuning(args.first().map(String::as_str)).and_then(|tuning| run(tuning, seed));
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven by the host engine through the library API
}
