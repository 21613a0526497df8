//! Ghost face state machine
//!
//! Every step the ghost gets a chance to pull a face: happy when the way
//! ahead is clear, distressed when a cross is coming. A face is held for a
//! moment, relaxes back to neutral, then a cooldown passes before the next
//! one. All of that runs on scheduler timers, never on the render clock.

use serde::{Deserialize, Serialize};

use super::grid::TileKind;
use super::rng::UniformSource;
use super::schedule::{Scheduler, Timer, TimerHandle};
use crate::tuning::Tuning;

/// Face presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Expression {
    /// Mouth nearly closed
    #[default]
    Neutral,
    /// Small smile
    Happy,
    /// Wide-open roar
    Distressed,
}

impl Expression {
    /// Mouth height relative to the ghost's height
    pub fn mouth_openness(self) -> f32 {
        match self {
            Expression::Neutral => 0.05,
            Expression::Happy => 0.1,
            Expression::Distressed => 0.2,
        }
    }

    /// 0 = smiling, 1 = frowning
    pub fn mood_bias(self) -> f32 {
        match self {
            Expression::Neutral => 0.5,
            Expression::Happy => 0.1,
            Expression::Distressed => 0.9,
        }
    }
}

/// What the renderer reads to draw the face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpressionState {
    pub mouth_openness: f32,
    pub mood_bias: f32,
    /// A face sequence is in flight
    pub busy: bool,
}

impl Default for ExpressionState {
    fn default() -> Self {
        Self {
            mouth_openness: Expression::Neutral.mouth_openness(),
            mood_bias: Expression::Neutral.mood_bias(),
            busy: false,
        }
    }
}

/// Long-lived owner of the ghost's face
#[derive(Debug, Clone)]
pub struct ExpressionController {
    state: ExpressionState,
    expression: Expression,
    /// Timers of the sequence in flight
    pending: Vec<TimerHandle>,
    react_chance: f32,
    hold: f64,
    cooldown: f64,
}

impl ExpressionController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            state: ExpressionState::default(),
            expression: Expression::Neutral,
            pending: Vec::with_capacity(2),
            react_chance: tuning.react_chance,
            hold: tuning.expression_hold,
            cooldown: tuning.expression_cooldown,
        }
    }

    pub fn state(&self) -> ExpressionState {
        self.state
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    fn apply(&mut self, expression: Expression) {
        self.expression = expression;
        self.state.mouth_openness = expression.mouth_openness();
        self.state.mood_bias = expression.mood_bias();
    }

    fn cancel_pending(&mut self, scheduler: &mut Scheduler) {
        for handle in self.pending.drain(..) {
            scheduler.cancel(handle);
        }
    }

    /// Maybe start a face sequence based on what lies ahead
    ///
    /// Returns the face shown, if one was started.
    pub fn maybe_react(
        &mut self,
        lookahead: &[TileKind],
        rng: &mut impl UniformSource,
        scheduler: &mut Scheduler,
    ) -> Option<Expression> {
        if self.state.busy {
            return None;
        }
        if rng.next_uniform() >= self.react_chance {
            return None;
        }

        let expression = if lookahead.contains(&TileKind::Hazard) {
            Expression::Distressed
        } else {
            Expression::Happy
        };
        self.play(expression, scheduler);
        Some(expression)
    }

    /// Show a face now, relax it after the hold, unlock after the cooldown
    pub fn play(&mut self, expression: Expression, scheduler: &mut Scheduler) {
        self.cancel_pending(scheduler);
        self.state.busy = true;
        self.apply(expression);
        self.pending
            .push(scheduler.schedule(self.hold, Timer::ExpressionRevert));
        self.pending
            .push(scheduler.schedule(self.cooldown, Timer::ExpressionRelease));
        log::debug!("Ghost face: {:?}", expression);
    }

    /// Run one of this controller's timers; returns the new face if it changed
    pub fn on_timer(&mut self, timer: Timer) -> Option<Expression> {
        match timer {
            Timer::ExpressionRevert => {
                self.apply(Expression::Neutral);
                Some(Expression::Neutral)
            }
            Timer::ExpressionRelease => {
                self.state.busy = false;
                self.pending.clear();
                None
            }
            Timer::Tick | Timer::Finish => None,
        }
    }

    /// Closing face for a finished run; stays until the next reset
    pub fn show_final(
        &mut self,
        score: u32,
        happy_score: u32,
        scheduler: &mut Scheduler,
    ) -> Expression {
        self.cancel_pending(scheduler);
        self.state.busy = false;
        let expression = if score < happy_score {
            Expression::Distressed
        } else {
            Expression::Happy
        };
        self.apply(expression);
        expression
    }

    /// Back to a neutral, idle face
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.cancel_pending(scheduler);
        self.state = ExpressionState::default();
        self.expression = Expression::Neutral;
    }
}

/// Line shown on the end screen for a final score
pub fn final_message(score: u32) -> String {
    match score {
        0 => "You cannot rest in peace without candies.".to_string(),
        1..=19 => format!("You feel restless with only {} candies.", score),
        20..=49 => format!("You feel happy with {} candies but want more!", score),
        _ => format!(
            "You collected {} candies and conquered this game.\nYou may rest in peace now!",
            score
        ),
    }
}
