//! Ghost Run headless runner
//!
//! Plays one session with a simple autopilot on a virtual 60 Hz clock and
//! prints the final snapshot as JSON.
//!
//! Usage: `ghost-run [seed] [tuning.json]`

use ghost_run::sim::{GameEvent, GamePhase, Grid, TileKind, final_message};
use ghost_run::{Game, Tuning};

/// Host frame length in seconds
const FRAME_DT: f64 = 1.0 / 60.0;
/// Give up after this many virtual seconds
const MAX_SECONDS: f64 = 600.0;

/// Pick a direction whose next cell is not a cross, preferring candy
fn autopilot(grid: &Grid, current_right: bool) -> bool {
    let kind = |x, y| grid.tile_at(x, y).map(|t| t.kind).unwrap_or_default();
    let right = kind(0, 1);
    let left = kind(1, 0);
    match (right, left) {
        (TileKind::Hazard, TileKind::Hazard) => current_right,
        (TileKind::Hazard, _) => false,
        (_, TileKind::Hazard) => true,
        (TileKind::Reward, _) => true,
        (_, TileKind::Reward) => false,
        _ => current_right,
    }
}

fn main() {
    env_logger::init();
    log::info!("Ghost Run (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default tuning", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let mut game = match seed {
        Some(seed) => Game::with_tuning(tuning, seed),
        None => Game::from_entropy(tuning),
    };
    game.start();

    while game.phase() == GamePhase::Running && game.now() < MAX_SECONDS {
        let right = autopilot(game.grid(), game.state().direction_right);
        game.set_direction(right);
        for event in game.advance(FRAME_DT) {
            match event {
                GameEvent::RewardCollected { score } => log::info!("Candy! score={}", score),
                GameEvent::HazardHit => log::info!("Cross at t={:.2}s", game.now()),
                _ => log::trace!("{:?}", event),
            }
        }
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
    println!("{}", final_message(game.score()));
}
