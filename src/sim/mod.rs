//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (the host feeds elapsed time)
//! - Injected RNG only
//! - Stable iteration order (by tile ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod expression;
pub mod generator;
pub mod grid;
pub mod rng;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::check;
pub use expression::{Expression, ExpressionController, ExpressionState, final_message};
pub use generator::{hazard_threshold, populate, roll, seed};
pub use grid::{Direction, Grid, Tile, TileKind};
pub use rng::UniformSource;
pub use schedule::{Scheduler, Timer, TimerHandle};
pub use state::{GamePhase, GameState, Snapshot, TileSnapshot};
pub use tick::{Game, GameEvent};
