//! Game loop
//!
//! `Game` owns a session: the board, the per-session state, the ghost and
//! the timer queue. The host feeds elapsed time through [`Game::advance`];
//! every step after that is a scheduled [`Timer`], so pacing, the end of a
//! run and the ghost's face all share one clock and one ordering.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision;
use super::expression::{Expression, ExpressionController, ExpressionState};
use super::generator;
use super::grid::{Grid, TileKind};
use super::rng::{self, UniformSource};
use super::schedule::{Scheduler, Timer};
use super::state::{GamePhase, GameState, Snapshot};
use crate::tuning::Tuning;

/// Change notifications for observers, drained by [`Game::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new session began
    Started,
    /// The board scrolled one cell
    Stepped { direction_right: bool },
    /// The ghost ate a candy
    RewardCollected { score: u32 },
    /// The ghost ran into a cross; the run ends after one more interval
    HazardHit,
    /// The run is over
    Finished { score: u32 },
    /// The ghost's face changed
    ExpressionChanged(Expression),
}

/// A play session plus the long-lived ghost
#[derive(Debug)]
pub struct Game<R: UniformSource = Pcg32> {
    tuning: Tuning,
    state: GameState,
    grid: Grid,
    ghost: ExpressionController,
    scheduler: Scheduler,
    rng: R,
    events: Vec<GameEvent>,
}

impl Game<Pcg32> {
    /// Game with default tuning and a fixed seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        log::info!("Game created with seed: {}", seed);
        Self::with_source(tuning, rng::seeded(seed))
    }

    /// Game seeded from OS entropy
    pub fn from_entropy(tuning: Tuning) -> Self {
        Self::with_tuning(tuning, rng::random_seed())
    }
}

impl<R: UniformSource> Game<R> {
    /// Game drawing from an arbitrary uniform source
    pub fn with_source(tuning: Tuning, mut rng: R) -> Self {
        let mut grid = Grid::new(tuning.board_size);
        generator::seed(&mut grid, 0, &tuning, &mut rng);
        Self {
            state: GameState::new(&tuning),
            ghost: ExpressionController::new(&tuning),
            grid,
            scheduler: Scheduler::new(),
            rng,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn expression(&self) -> ExpressionState {
        self.ghost.state()
    }

    /// Virtual seconds elapsed
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.grid, &self.state, self.ghost.state())
    }

    /// Player input: scroll right (true) or left (false)
    pub fn set_direction(&mut self, right: bool) {
        self.state.direction_right = right;
    }

    /// Begin a fresh session, discarding everything from the previous one
    pub fn start(&mut self) {
        self.ghost.reset(&mut self.scheduler);
        self.scheduler.reset();

        self.grid = Grid::new(self.tuning.board_size);
        generator::seed(&mut self.grid, 0, &self.tuning, &mut self.rng);
        self.state = GameState {
            phase: GamePhase::Running,
            ..GameState::new(&self.tuning)
        };
        self.scheduler.schedule(0.0, Timer::Tick);

        log::info!("Session {} started", self.scheduler.generation());
        self.events.push(GameEvent::Started);
    }

    /// Move the clock forward, running every timer that comes due
    ///
    /// Returns the events produced since the last call.
    pub fn advance(&mut self, dt: f64) -> Vec<GameEvent> {
        let until = self.scheduler.now() + dt.max(0.0);
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.dispatch(timer);
        }
        self.scheduler.settle(until);
        std::mem::take(&mut self.events)
    }

    fn dispatch(&mut self, timer: Timer) {
        match timer {
            Timer::Tick => self.tick(),
            Timer::Finish => self.finish(),
            Timer::ExpressionRevert | Timer::ExpressionRelease => {
                if let Some(face) = self.ghost.on_timer(timer) {
                    self.events.push(GameEvent::ExpressionChanged(face));
                }
            }
        }
    }

    /// One simulation step
    fn tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            log::trace!("Tick outside a running session ignored");
            return;
        }

        // Nothing left in the -1 lane may wrap back around
        self.grid.clear_staging();

        let lookahead = self.grid.lookahead();
        if let Some(face) = self
            .ghost
            .maybe_react(&lookahead, &mut self.rng, &mut self.scheduler)
        {
            self.events.push(GameEvent::ExpressionChanged(face));
        }

        let direction = self.state.direction();
        self.grid.step(direction);
        generator::populate(
            self.grid.tiles_entering_next(direction),
            self.state.score,
            &self.tuning,
            &mut self.rng,
        );
        self.events.push(GameEvent::Stepped {
            direction_right: direction.is_right(),
        });

        let interval = self.state.tick_interval;
        match collision::check(&self.grid) {
            TileKind::Hazard => {
                log::info!("Hit a cross at score {}", self.state.score);
                self.events.push(GameEvent::HazardHit);
                self.scheduler.schedule(interval, Timer::Finish);
                return;
            }
            TileKind::Reward => {
                self.state.score += 1;
                self.events.push(GameEvent::RewardCollected {
                    score: self.state.score,
                });
            }
            TileKind::None => {}
        }

        self.scheduler
            .schedule(interval * self.tuning.tick_delay_factor, Timer::Tick);
        self.state.ramp(&self.tuning);
        log::debug!(
            "Step done: score={} interval={:.3}",
            self.state.score,
            self.state.tick_interval
        );
    }

    fn finish(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.phase = GamePhase::Finished;
        let face = self.ghost.show_final(
            self.state.score,
            self.tuning.happy_ending_score,
            &mut self.scheduler,
        );
        log::info!("Run finished with score {}", self.state.score);
        self.events.push(GameEvent::Finished {
            score: self.state.score,
        });
        self.events.push(GameEvent::ExpressionChanged(face));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedSource;

    /// Draws of 0.5 never spawn anything and never trigger a face
    fn quiet_game() -> Game<ScriptedSource> {
        Game::with_source(Tuning::default(), ScriptedSource::constant(0.5))
    }

    fn place(game: &mut Game<ScriptedSource>, x: i32, y: i32, kind: TileKind) {
        game.grid.tile_at_mut(x, y).unwrap().kind = kind;
    }

    #[test]
    fn test_intro_is_idle() {
        let mut game = quiet_game();
        assert_eq!(game.phase(), GamePhase::Intro);
        assert!(game.advance(10.0).is_empty());
        assert_eq!(game.phase(), GamePhase::Intro);
        assert_eq!(game.expression(), ExpressionState::default());
    }

    #[test]
    fn test_start_runs_first_step_immediately() {
        let mut game = quiet_game();
        game.start();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.scheduler.pending_of(Timer::Tick), 1);

        let events = game.advance(0.0);
        assert_eq!(
            events,
            vec![
                GameEvent::Started,
                GameEvent::Stepped {
                    direction_right: true
                }
            ]
        );
        assert!((game.scheduler.next_due_in().unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_hazard_finishes_after_one_interval() {
        let mut game = quiet_game();
        game.start();
        place(&mut game, 0, 1, TileKind::Hazard);

        let events = game.advance(0.0);
        assert!(events.contains(&GameEvent::HazardHit));
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.scheduler.pending_of(Timer::Tick), 0);
        assert_eq!(game.scheduler.pending_of(Timer::Finish), 1);
        // No ramp on the fatal step
        assert_eq!(game.state().tick_interval, 0.4);

        game.advance(0.39);
        assert_eq!(game.phase(), GamePhase::Running);

        let events = game.advance(0.02);
        assert_eq!(game.phase(), GamePhase::Finished);
        assert_eq!(
            events,
            vec![
                GameEvent::Finished { score: 0 },
                GameEvent::ExpressionChanged(Expression::Distressed)
            ]
        );
        assert_eq!(game.scheduler.pending(), 0);
        assert!(game.advance(30.0).is_empty());
    }

    #[test]
    fn test_reward_scores_and_ramps() {
        let mut game = quiet_game();
        game.start();
        place(&mut game, 0, 1, TileKind::Reward);

        let events = game.advance(0.0);
        assert!(events.contains(&GameEvent::RewardCollected { score: 1 }));
        assert_eq!(game.score(), 1);
        assert!((game.state().tick_interval - 0.398).abs() < 1e-12);

        // Next step waits 1.5x the interval that was active
        let events = game.advance(0.59);
        assert!(events.is_empty());
        let events = game.advance(0.02);
        assert_eq!(events.len(), 1);
        assert_eq!(game.score(), 1);
        assert!((game.state().tick_interval - 0.396).abs() < 1e-12);
    }

    #[test]
    fn test_left_scrolls_along_x() {
        let mut game = quiet_game();
        game.start();
        game.set_direction(false);
        place(&mut game, 1, 0, TileKind::Reward);
        place(&mut game, 0, 1, TileKind::Hazard);

        let events = game.advance(0.0);
        assert!(events.contains(&GameEvent::Stepped {
            direction_right: false
        }));
        assert_eq!(game.score(), 1);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_interval_floor() {
        let tuning = Tuning {
            initial_tick_interval: 0.151,
            ..Default::default()
        };
        let mut game = Game::with_source(tuning, ScriptedSource::constant(0.5));
        game.start();
        game.advance(0.0);
        assert_eq!(game.state().tick_interval, 0.15);
        game.advance(5.0);
        assert_eq!(game.state().tick_interval, 0.15);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut once = quiet_game();
        once.start();

        let mut twice = quiet_game();
        twice.start();
        place(&mut twice, 0, 1, TileKind::Reward);
        twice.advance(3.0);
        assert!(twice.score() > 0);
        twice.start();
        twice.start();

        assert_eq!(twice.state(), once.state());
        assert_eq!(twice.snapshot(), once.snapshot());
        assert_eq!(twice.scheduler.pending(), 1);
        assert_eq!(twice.scheduler.pending_of(Timer::Tick), 1);
    }

    #[test]
    fn test_restart_discards_pending_finish() {
        let mut game = quiet_game();
        game.start();
        place(&mut game, 0, 1, TileKind::Hazard);
        game.advance(0.0);
        assert_eq!(game.scheduler.pending_of(Timer::Finish), 1);

        game.start();
        game.advance(1.0);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_restart_after_finish() {
        let mut game = quiet_game();
        game.start();
        place(&mut game, 0, 1, TileKind::Hazard);
        game.advance(1.0);
        assert_eq!(game.phase(), GamePhase::Finished);

        game.start();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.expression(), ExpressionState::default());
    }

    #[test]
    fn test_ghost_reacts_to_hazard_ahead() {
        // Draws of 0.0 always trigger a face but never spawn anything
        let mut game = Game::with_source(Tuning::default(), ScriptedSource::constant(0.0));
        game.start();
        place(&mut game, 2, 2, TileKind::Hazard);

        let events = game.advance(0.0);
        assert!(events.contains(&GameEvent::ExpressionChanged(Expression::Distressed)));
        assert!(game.expression().busy);

        let events = game.advance(0.8);
        assert!(events.contains(&GameEvent::ExpressionChanged(Expression::Neutral)));
    }

    #[test]
    fn test_seeded_run_invariants() {
        let mut game = Game::new(31337);
        game.start();

        let mut last_score = 0;
        let mut last_interval = game.state().tick_interval;
        let mut finished_score = None;
        for _ in 0..(60 * 120) {
            game.advance(1.0 / 60.0);
            let state = game.state();
            assert!(state.tick_interval <= last_interval);
            assert!(state.tick_interval >= game.tuning().min_tick_interval);
            assert!(state.score >= last_score);
            if let Some(score) = finished_score {
                assert_eq!(state.score, score);
            } else if state.phase == GamePhase::Finished {
                finished_score = Some(state.score);
            }
            last_score = state.score;
            last_interval = state.tick_interval;
        }
        assert_eq!(game.phase(), GamePhase::Finished);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Game::new(99999);
        let mut b = Game::new(99999);
        a.start();
        b.start();
        for i in 0..600 {
            if i % 37 == 0 {
                a.set_direction(i % 2 == 0);
                b.set_direction(i % 2 == 0);
            }
            assert_eq!(a.advance(0.05), b.advance(0.05));
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
