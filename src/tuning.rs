//! Data-driven game balance
//!
//! Every knob defaults to the values in [`crate::consts`]. A JSON file may
//! override any subset of them; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Largest board a tuning file may ask for
pub const MAX_BOARD_SIZE: usize = 1024;

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playable tiles per board side
    pub board_size: usize,

    // === Pacing ===
    pub initial_tick_interval: f64,
    pub tick_decrement: f64,
    pub min_tick_interval: f64,
    /// Wall-clock delay per step as a multiple of the logical interval
    pub tick_delay_factor: f64,

    // === Obstacles ===
    pub hazard_base: f32,
    pub hazard_score_slope: f32,
    pub hazard_span: f32,
    pub reward_threshold: f32,

    // === Ghost ===
    pub react_chance: f32,
    pub expression_hold: f64,
    pub expression_cooldown: f64,
    pub happy_ending_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,

            initial_tick_interval: INITIAL_TICK_INTERVAL,
            tick_decrement: TICK_DECREMENT,
            min_tick_interval: MIN_TICK_INTERVAL,
            tick_delay_factor: TICK_DELAY_FACTOR,

            hazard_base: HAZARD_BASE_THRESHOLD,
            hazard_score_slope: HAZARD_SCORE_SLOPE,
            hazard_span: HAZARD_THRESHOLD_SPAN,
            reward_threshold: REWARD_THRESHOLD,

            react_chance: REACT_CHANCE,
            expression_hold: EXPRESSION_HOLD,
            expression_cooldown: EXPRESSION_COOLDOWN,
            happy_ending_score: HAPPY_ENDING_SCORE,
        }
    }
}

/// Why a tuning file was rejected
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("cannot read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

fn check(ok: bool, msg: &str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid(msg.to_string()))
    }
}

fn unit(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        check(
            (1..=MAX_BOARD_SIZE).contains(&self.board_size),
            "board_size must be between 1 and 1024",
        )?;
        check(
            self.min_tick_interval > 0.0,
            "min_tick_interval must be positive",
        )?;
        check(
            self.initial_tick_interval >= self.min_tick_interval,
            "initial_tick_interval must not be below min_tick_interval",
        )?;
        check(
            self.tick_decrement >= 0.0,
            "tick_decrement must not be negative",
        )?;
        check(
            self.tick_delay_factor > 0.0,
            "tick_delay_factor must be positive",
        )?;
        check(
            unit(self.hazard_base) && unit(self.hazard_span) && self.hazard_span <= self.hazard_base,
            "hazard_base and hazard_span must be probabilities with span <= base",
        )?;
        check(
            self.hazard_score_slope >= 0.0,
            "hazard_score_slope must not be negative",
        )?;
        check(
            unit(self.reward_threshold) && unit(self.react_chance),
            "reward_threshold and react_chance must be in [0, 1]",
        )?;
        check(
            self.expression_hold >= 0.0 && self.expression_cooldown >= self.expression_hold,
            "expression_cooldown must not be shorter than expression_hold",
        )?;
        Ok(())
    }
}
