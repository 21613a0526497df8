//! Pure helpers for placing tiles on screen
//!
//! The board is drawn as a diamond: +x runs up-left, +y runs up-right, and
//! the player's cell (0, 0) sits at the bottom point. None of this touches
//! simulation state.

use glam::Vec2;

/// Scale applied to tiles in the border ring
pub const BORDER_SCALE: f32 = 0.3;

/// Screen position of a tile's center
///
/// `viewport` is the area reserved for the board; `size` is the playable
/// board size N.
pub fn project(x: i32, y: i32, size: usize, viewport: Vec2) -> Vec2 {
    let n = size.max(1) as f32;
    let dx = viewport.x / 2.0 / n;
    let dy = viewport.y / 2.0 / n;

    let step_x = Vec2::new(-dx, -dy);
    let step_y = Vec2::new(dx, -dy);
    let origin = Vec2::new(viewport.x / 2.0, viewport.y - dy);

    origin + step_x * x as f32 + step_y * y as f32
}

/// Board area for a screen: a 3:2 box on the shorter side
pub fn board_viewport(screen: Vec2) -> Vec2 {
    let side = screen.x.min(screen.y);
    Vec2::new(side, side * 0.666)
}

#[inline]
fn on_border(x: i32, y: i32, size: usize) -> bool {
    let n = size as i32;
    x == -1 || y == -1 || x == n || y == n
}

/// Border tiles shrink so they can grow in as they scroll into play
pub fn tile_scale(x: i32, y: i32, size: usize) -> f32 {
    if on_border(x, y, size) { BORDER_SCALE } else { 1.0 }
}

/// Border tiles are invisible
pub fn tile_opacity(x: i32, y: i32, size: usize) -> f32 {
    if on_border(x, y, size) { 0.0 } else { 1.0 }
}

/// Painter's order: larger values are further back
pub fn draw_depth(x: i32, y: i32) -> i32 {
    x + y
}
