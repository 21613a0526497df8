//! Collision detection against the player cell
//!
//! The ghost never moves; the board moves under it. Whatever kind the tile
//! at (0, 0) carries after a step is what the ghost touched.

use super::grid::{Grid, TileKind};

/// Kind of the tile under the ghost
#[inline]
pub fn check(grid: &Grid) -> TileKind {
    grid.player_tile().kind
}
