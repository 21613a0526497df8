//! Obstacle generation
//!
//! Decides what appears on tiles as they wrap into the far border. Crosses
//! get more likely as the score climbs; candies are a rarer second roll.

use super::grid::{Grid, Tile, TileKind, in_safe_zone};
use super::rng::UniformSource;
use crate::tuning::Tuning;

/// Draw threshold above which a tile becomes a hazard
///
/// Starts at `hazard_base` and slides down by at most `hazard_span` as the
/// score grows, so crosses get denser but never exceed the floor odds.
pub fn hazard_threshold(score: u32, tuning: &Tuning) -> f32 {
    let difficulty = (score as f32 * tuning.hazard_score_slope).min(1.0);
    tuning.hazard_base - difficulty * tuning.hazard_span
}

/// Pick a kind for one tile
pub fn roll(score: u32, tuning: &Tuning, rng: &mut impl UniformSource) -> TileKind {
    if rng.next_uniform() > hazard_threshold(score, tuning) {
        TileKind::Hazard
    } else if rng.next_uniform() > tuning.reward_threshold {
        TileKind::Reward
    } else {
        TileKind::None
    }
}

/// Roll every given tile independently
pub fn populate<'a>(
    tiles: impl IntoIterator<Item = &'a mut Tile>,
    score: u32,
    tuning: &Tuning,
    rng: &mut impl UniformSource,
) {
    for tile in tiles {
        tile.kind = roll(score, tuning, rng);
    }
}

/// Opening layout: obstacles only beyond the safe zone
pub fn seed(grid: &mut Grid, score: u32, tuning: &Tuning, rng: &mut impl UniformSource) {
    // Tiles are visited in creation order so a seed always gives the same board
    for (x, y, kind) in grid.kinds_mut() {
        *kind = if in_safe_zone(x, y) {
            TileKind::None
        } else {
            roll(score, tuning, rng)
        };
    }
    log::debug!(
        "Seeded board: {} hazards, {} rewards",
        grid.tiles().iter().filter(|t| t.kind == TileKind::Hazard).count(),
        grid.tiles().iter().filter(|t| t.kind == TileKind::Reward).count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Direction;
    use crate::sim::rng::{ScriptedSource, seeded};

    #[test]
    fn test_hazard_threshold_ramp() {
        let tuning = Tuning::default();
        assert!((hazard_threshold(0, &tuning) - 0.8).abs() < 1e-6);
        assert!((hazard_threshold(50, &tuning) - 0.7).abs() < 1e-6);
        assert!((hazard_threshold(100, &tuning) - 0.6).abs() < 1e-6);
        assert!((hazard_threshold(10_000, &tuning) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_roll_branches() {
        let tuning = Tuning::default();

        let mut rng = ScriptedSource::constant(0.85);
        assert_eq!(roll(0, &tuning, &mut rng), TileKind::Hazard);

        // First draw safe, second draw above the candy cut
        let mut rng = ScriptedSource::new(&[0.5, 0.95]);
        assert_eq!(roll(0, &tuning, &mut rng), TileKind::Reward);

        let mut rng = ScriptedSource::new(&[0.5, 0.5]);
        assert_eq!(roll(0, &tuning, &mut rng), TileKind::None);

        // 0.7 is safe at score 0 but a hazard once the threshold has dropped
        let mut rng = ScriptedSource::new(&[0.7, 0.0]);
        assert_eq!(roll(0, &tuning, &mut rng), TileKind::None);
        let mut rng = ScriptedSource::new(&[0.7, 0.0]);
        assert_eq!(roll(100, &tuning, &mut rng), TileKind::Hazard);
    }

    #[test]
    fn test_populate_touches_only_given_tiles() {
        let tuning = Tuning::default();
        let mut grid = Grid::new(5);
        let mut rng = ScriptedSource::constant(0.99);
        populate(grid.tiles_entering_next(Direction::Right), 0, &tuning, &mut rng);

        for tile in grid.tiles() {
            let expected = if tile.y == 5 {
                TileKind::Hazard
            } else {
                TileKind::None
            };
            assert_eq!(tile.kind, expected);
        }
    }

    #[test]
    fn test_seed_respects_safe_zone() {
        let tuning = Tuning::default();
        let mut grid = Grid::new(5);
        let mut rng = ScriptedSource::constant(0.99);
        seed(&mut grid, 0, &tuning, &mut rng);

        for tile in grid.tiles() {
            if tile.x > 2 && tile.y > 2 {
                assert_eq!(tile.kind, TileKind::Hazard);
            } else {
                assert_eq!(tile.kind, TileKind::None);
            }
        }

        grid.clear();
        assert!(
            grid.tiles()
                .iter()
                .filter(|t| t.x <= 2 || t.y <= 2)
                .all(|t| t.kind == TileKind::None)
        );
    }

    #[test]
    fn test_seed_is_reproducible() {
        let tuning = Tuning::default();
        let mut a = Grid::new(5);
        let mut b = Grid::new(5);
        seed(&mut a, 0, &tuning, &mut seeded(3));
        seed(&mut b, 0, &tuning, &mut seeded(3));
        assert_eq!(a.tiles(), b.tiles());
    }

    #[test]
    fn test_hazard_frequency_matches_threshold() {
        let tuning = Tuning::default();
        let mut rng = seeded(2024);
        let trials = 20_000;

        for score in [0u32, 40, 100] {
            let mut hazards = 0;
            let mut rewards = 0;
            for _ in 0..trials {
                match roll(score, &tuning, &mut rng) {
                    TileKind::Hazard => hazards += 1,
                    TileKind::Reward => rewards += 1,
                    TileKind::None => {}
                }
            }
            let t = hazard_threshold(score, &tuning);
            let expected_hazard = 1.0 - t;
            let expected_reward = t * (1.0 - tuning.reward_threshold);
            let hazard_rate = hazards as f32 / trials as f32;
            let reward_rate = rewards as f32 / trials as f32;
            assert!(
                (hazard_rate - expected_hazard).abs() < 0.015,
                "score {score}: hazard rate {hazard_rate} vs {expected_hazard}"
            );
            assert!(
                (reward_rate - expected_reward).abs() < 0.015,
                "score {score}: reward rate {reward_rate} vs {expected_reward}"
            );
        }
    }
}
