//! Game state and read-only snapshots
//!
//! `GameState` is the per-session record the game loop mutates. `Snapshot`
//! is everything a renderer needs for one frame, detached from the live game.

use serde::{Deserialize, Serialize};

use super::expression::ExpressionState;
use super::grid::{Direction, Grid, TileKind};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, board idle
    #[default]
    Intro,
    /// Board scrolling
    Running,
    /// Run ended
    Finished,
}

/// Per-session game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Candies collected
    pub score: u32,
    /// Logical step length in seconds; shrinks as the run goes on
    pub tick_interval: f64,
    /// Scroll direction chosen by the player
    pub direction_right: bool,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Intro,
            score: 0,
            tick_interval: tuning.initial_tick_interval,
            direction_right: true,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_right(self.direction_right)
    }

    /// Shorten the step after a survived tick
    pub fn ramp(&mut self, tuning: &Tuning) {
        self.tick_interval =
            (self.tick_interval - tuning.tick_decrement).max(tuning.min_tick_interval);
    }
}

/// One tile as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
}

/// Frame-ready copy of everything observable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board_size: usize,
    pub tiles: Vec<TileSnapshot>,
    pub phase: GamePhase,
    pub score: u32,
    pub tick_interval: f64,
    pub direction_right: bool,
    pub mouth_openness: f32,
    pub mood_bias: f32,
}

impl Snapshot {
    pub fn capture(grid: &Grid, state: &GameState, face: ExpressionState) -> Self {
        Self {
            board_size: grid.size(),
            tiles: grid
                .tiles()
                .iter()
                .map(|t| TileSnapshot {
                    id: t.id,
                    x: t.x,
                    y: t.y,
                    kind: t.kind,
                })
                .collect(),
            phase: state.phase,
            score: state.score,
            tick_interval: state.tick_interval,
            direction_right: state.direction_right,
            mouth_openness: face.mouth_openness,
            mood_bias: face.mood_bias,
        }
    }
}
