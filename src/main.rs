//! Headless demo: plays random shots until something is potted or the
//! shot limit runs out.
//!
//! Usage: `one-red [seed] [settings.json]`

use one_red::sim::{GameState, ShotCommand, Table, play_shot};
use one_red::{ConfigError, Settings};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Shots per episode before giving up (truncation)
const SHOT_LIMIT: u32 = 100;

fn load_settings(path: Option<String>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);

    let state = load_settings(args.next()).and_then(|s| GameState::new(s, Table::standard()));
    let mut state = match state {
        Ok(state) => state,
        Err(e) => {
            log::error!("Bad configuration: {e}");
            std::process::exit(1);
        }
    };

    log::info!("One Red starting with seed: {}", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    for _ in 0..SHOT_LIMIT {
        let shot = ShotCommand::random(&mut rng, &state.settings);
        let outcome = match play_shot(&mut state, &shot) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Shot refused: {e}");
                break;
            }
        };

        log::info!(
            "angle={:3} force={:3} -> delta={:+} positions={:?}",
            shot.angle,
            shot.force,
            outcome.score_delta,
            outcome.positions
        );

        if outcome.done {
            break;
        }
    }

    let player = state.current_player();
    log::info!(
        "Episode over after {} shots ({} ticks): {} scored {}",
        state.shots_played,
        state.time_ticks,
        player.name,
        player.points
    );
}
