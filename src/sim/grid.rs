//! Scrolling board topology
//!
//! The board is an (N+2)×(N+2) set of tiles: N playable tiles per side plus
//! a one-tile border ring at coordinates -1 and N. Tiles never change slots;
//! a step rewrites each tile's coordinate in place, wrapping -1 back to N so
//! the ring doubles as the staging lane for freshly generated obstacles.

use serde::{Deserialize, Serialize};

use crate::consts::SAFE_ZONE_EXTENT;

/// What sits on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    None,
    /// A cross; touching it ends the run
    Hazard,
    /// A candy; worth one point
    Reward,
}

/// Scroll direction chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn from_right(right: bool) -> Self {
        if right { Direction::Right } else { Direction::Left }
    }

    pub fn is_right(self) -> bool {
        self == Direction::Right
    }
}

/// A single board tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Creation index, stable for the tile's lifetime
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
}

impl Tile {
    /// Coordinate along the axis the board scrolls in
    #[inline]
    pub fn scroll_coord(&self, direction: Direction) -> i32 {
        match direction {
            Direction::Right => self.y,
            Direction::Left => self.x,
        }
    }

    /// Tile sits in the area kept free of obstacles when a session opens
    pub fn in_safe_zone(&self) -> bool {
        in_safe_zone(self.x, self.y)
    }
}

/// Coordinate lies within reach of the player's corner
#[inline]
pub fn in_safe_zone(x: i32, y: i32) -> bool {
    x <= SAFE_ZONE_EXTENT || y <= SAFE_ZONE_EXTENT
}

/// The board: every tile plus a coordinate index
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    /// All tiles in creation order
    tiles: Vec<Tile>,
    /// Slot of the tile at each coordinate, row-major from (-1, -1)
    index: Vec<usize>,
}

impl Grid {
    /// Build a board with `size` playable tiles per side
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "board needs at least one playable tile");
        let n = size as i32;
        let mut tiles = Vec::with_capacity((size + 2) * (size + 2));
        for y in -1..=n {
            for x in -1..=n {
                tiles.push(Tile {
                    id: tiles.len() as u32,
                    x,
                    y,
                    kind: TileKind::None,
                });
            }
        }

        let mut grid = Self {
            size,
            tiles,
            index: Vec::new(),
        };
        grid.rebuild_index();
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Tiles per side including the border ring
    #[inline]
    fn span(&self) -> usize {
        self.size + 2
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    fn slot_of(&self, x: i32, y: i32) -> Option<usize> {
        let n = self.size as i32;
        if !(-1..=n).contains(&x) || !(-1..=n).contains(&y) {
            return None;
        }
        Some((y + 1) as usize * self.span() + (x + 1) as usize)
    }

    /// Recompute the coordinate index, panicking if coordinates stopped
    /// being a bijection with tiles
    fn rebuild_index(&mut self) {
        let mut index = vec![usize::MAX; self.span() * self.span()];
        for (i, tile) in self.tiles.iter().enumerate() {
            let Some(slot) = self.slot_of(tile.x, tile.y) else {
                panic!("tile {} left the board at ({}, {})", tile.id, tile.x, tile.y);
            };
            if index[slot] != usize::MAX {
                panic!(
                    "tiles {} and {} both claim ({}, {})",
                    self.tiles[index[slot]].id, tile.id, tile.x, tile.y
                );
            }
            index[slot] = i;
        }
        // Tile count equals slot count, so no duplicate also means no gap
        debug_assert!(index.iter().all(|&i| i != usize::MAX));
        self.index = index;
    }

    /// Tile at a coordinate, if it is on the board
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        let slot = self.slot_of(x, y)?;
        self.tiles.get(self.index[slot])
    }

    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let slot = self.slot_of(x, y)?;
        let i = self.index[slot];
        self.tiles.get_mut(i)
    }

    /// The fixed cell the ghost occupies
    pub fn player_tile(&self) -> &Tile {
        let Some(tile) = self.tile_at(0, 0) else {
            panic!("player cell (0, 0) missing from a {}x{} board", self.size, self.size);
        };
        tile
    }

    /// Scroll every tile one cell along the direction's axis
    ///
    /// Each coordinate is remapped independently (`c > -1 ? c - 1 : N`); the
    /// other axis is untouched. Together this is a one-cell toroidal shift.
    pub fn step(&mut self, direction: Direction) {
        let n = self.size as i32;
        for tile in &mut self.tiles {
            let coord = match direction {
                Direction::Right => &mut tile.y,
                Direction::Left => &mut tile.x,
            };
            *coord = if *coord > -1 { *coord - 1 } else { n };
        }
        self.rebuild_index();
    }

    /// Tiles sitting at the far border on the scroll axis
    ///
    /// Right after a step these are the tiles that just wrapped around;
    /// they stay invisible there and are the ones to fill with new obstacles.
    pub fn tiles_entering_next(&mut self, direction: Direction) -> impl Iterator<Item = &mut Tile> {
        let n = self.size as i32;
        self.tiles
            .iter_mut()
            .filter(move |t| t.scroll_coord(direction) == n)
    }

    /// Every tile's coordinate with mutable access to its kind only
    pub fn kinds_mut(&mut self) -> impl Iterator<Item = (i32, i32, &mut TileKind)> {
        self.tiles.iter_mut().map(|t| (t.x, t.y, &mut t.kind))
    }

    /// Wipe the -1 lane so nothing stale wraps back in
    pub fn clear_staging(&mut self) {
        for tile in self.tiles.iter_mut().filter(|t| t.x == -1 || t.y == -1) {
            tile.kind = TileKind::None;
        }
    }

    /// Wipe every tile in the safe zone around the player
    pub fn clear(&mut self) {
        for tile in self.tiles.iter_mut().filter(|t| t.in_safe_zone()) {
            tile.kind = TileKind::None;
        }
    }

    /// Kinds in the 3×3 block in front of the player, excluding its own cell
    pub fn lookahead(&self) -> Vec<TileKind> {
        let reach = 2.min(self.size as i32);
        let mut kinds = Vec::with_capacity(8);
        for y in 0..=reach {
            for x in 0..=reach {
                if (x, y) == (0, 0) {
                    continue;
                }
                if let Some(tile) = self.tile_at(x, y) {
                    kinds.push(tile.kind);
                }
            }
        }
        kinds
    }

    /// Set of occupied coordinates, sorted (test and debugging aid)
    pub fn coordinates(&self) -> Vec<(i32, i32)> {
        let mut coords: Vec<_> = self.tiles.iter().map(|t| (t.x, t.y)).collect();
        coords.sort_unstable();
        coords
    }
}
