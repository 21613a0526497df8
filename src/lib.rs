//! Ghost Run - An endless-runner board with a reactive ghost
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, obstacles, game loop, ghost face)
//! - `tuning`: Data-driven game balance
//! - `view`: Pure helpers a renderer uses to place tiles

pub mod sim;
pub mod tuning;
pub mod view;

pub use sim::{Game, GameEvent, GamePhase, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playable tiles per board side
    pub const BOARD_SIZE: usize = 5;

    /// Seconds between logical steps at the start of a session
    pub const INITIAL_TICK_INTERVAL: f64 = 0.4;
    /// Interval shrink per survived step
    pub const TICK_DECREMENT: f64 = 0.002;
    /// Fastest the board will ever scroll
    pub const MIN_TICK_INTERVAL: f64 = 0.15;
    /// Wall-clock delay between steps, relative to the logical interval
    pub const TICK_DELAY_FACTOR: f64 = 1.5;

    /// Hazard threshold at score 0 (draws above it spawn a cross)
    pub const HAZARD_BASE_THRESHOLD: f32 = 0.8;
    /// Score-to-difficulty slope
    pub const HAZARD_SCORE_SLOPE: f32 = 0.01;
    /// How far the threshold can drop at full difficulty
    pub const HAZARD_THRESHOLD_SPAN: f32 = 0.2;
    /// Second draw above this spawns a candy
    pub const REWARD_THRESHOLD: f32 = 0.9;
    /// Tiles with both coordinates above this get obstacles in the opening layout
    pub const SAFE_ZONE_EXTENT: i32 = 2;

    /// Chance per step that the ghost considers pulling a face
    pub const REACT_CHANCE: f32 = 0.3;
    /// Seconds an expression is held before the mouth closes
    pub const EXPRESSION_HOLD: f64 = 0.8;
    /// Seconds before the ghost may pull another face
    pub const EXPRESSION_COOLDOWN: f64 = 1.5;
    /// Final score at which the ghost leaves happy
    pub const HAPPY_ENDING_SCORE: u32 = 100;
}
