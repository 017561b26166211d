//! The shuffled wall.
//!
//! ```text
//! [ live wall ..................... | dead wall (reserve) ]
//!   ^ next draw         live end ^
//! ```
//!
//! Ordinary draws come from the front. After a quad the next draw is served
//! from the reserve instead, and the live end moves one tile closer so the
//! total number of draws in a hand stays the same.

use crate::core::{GameRng, Tile};

/// Replacement draws served per hand at most.
pub const MAX_REPLACEMENTS: usize = 4;

#[derive(Clone, Debug)]
pub struct Wall {
    tiles: Vec<Tile>,
    next: usize,
    live_end: usize,
    next_replacement: usize,
    replacement_due: bool,
    replacements: usize,
}

impl Wall {
    /// A full set of 136 tiles, shuffled.
    pub fn new(rng: &mut GameRng, dead_wall: usize) -> Self {
        let mut tiles: Vec<Tile> = Tile::all()
            .flat_map(|tile| std::iter::repeat(tile).take(Tile::COPIES))
            .collect();
        rng.shuffle(&mut tiles);
        Self::from_tiles(tiles, dead_wall)
    }

    /// A wall with a fixed order. The last `dead_wall` tiles are the reserve.
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>, dead_wall: usize) -> Self {
        let live_end = tiles.len().saturating_sub(dead_wall);
        Self {
            next: 0,
            next_replacement: live_end,
            live_end,
            replacement_due: false,
            replacements: 0,
            tiles,
        }
    }

    /// Tiles left for ordinary draws.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.live_end - self.next
    }

    /// Take `count` tiles from the live wall (fewer if it runs out).
    pub fn deal(&mut self, count: usize) -> Vec<Tile> {
        (0..count).map_while(|_| self.draw_live()).collect()
    }

    fn draw_live(&mut self) -> Option<Tile> {
        if self.next >= self.live_end {
            return None;
        }
        let tile = self.tiles[self.next];
        self.next += 1;
        Some(tile)
    }

    /// Draw the next tile. `None` once the live wall is exhausted.
    pub fn draw(&mut self) -> Option<Tile> {
        if self.replacement_due {
            self.replacement_due = false;
            if let Some(&tile) = self.tiles.get(self.next_replacement) {
                self.next_replacement += 1;
                return Some(tile);
            }
        }
        self.draw_live()
    }

    /// A quad was declared: serve the next draw from the reserve.
    ///
    /// Returns `false` when the reserve has nothing left to give, in which
    /// case the next draw is an ordinary one.
    pub fn ack_kong(&mut self) -> bool {
        if self.replacements >= MAX_REPLACEMENTS || self.next_replacement >= self.tiles.len() {
            return false;
        }
        self.replacements += 1;
        self.replacement_due = true;
        if self.live_end > self.next {
            self.live_end -= 1;
        }
        true
    }
}
