//! Concealed hand storage and claim queries.
//!
//! A hand keeps one sorted run of [`HandEntry`] values per suit. Entries are
//! immutable `(face, count)` pairs: changing a count replaces the entry, and
//! an entry whose count reaches zero is removed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

use crate::core::{HandError, Suit, Tile};

/// One held face and how many copies of it the hand holds (1-4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandEntry {
    tile: Tile,
    count: u8,
}

impl HandEntry {
    /// The face.
    #[must_use]
    pub fn tile(self) -> Tile {
        self.tile
    }

    /// Copies held.
    #[must_use]
    pub fn count(self) -> u8 {
        self.count
    }

    fn with_count(self, count: u8) -> Self {
        Self { tile: self.tile, count }
    }
}

/// Which runs through a tile can be completed from held tiles.
///
/// Bit `HIGH` marks the run where the tile is the top member (`t-2, t-1, t`),
/// `MIDDLE` the run around it and `LOW` the run it starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceMask(u8);

impl SequenceMask {
    /// Tile completes `t-2, t-1, t`.
    pub const HIGH: u8 = 0b001;
    /// Tile completes `t-1, t, t+1`.
    pub const MIDDLE: u8 = 0b010;
    /// Tile completes `t, t+1, t+2`.
    pub const LOW: u8 = 0b100;

    /// Raw bits.
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// No run is available.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Is the given bit set?
    #[must_use]
    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    /// The run selected by a single `bit`, sorted low to high.
    #[must_use]
    pub fn run(self, bit: u8, tile: Tile) -> Option<[Tile; 3]> {
        if !self.contains(bit) {
            return None;
        }
        let (_, offsets) = RUN_OFFSETS.iter().find(|(b, _)| *b == bit)?;
        Some([
            tile.offset(offsets[0])?,
            tile.offset(offsets[1])?,
            tile.offset(offsets[2])?,
        ])
    }

    /// The available runs through `tile` in `HIGH`, `MIDDLE`, `LOW` order.
    pub fn runs(self, tile: Tile) -> impl Iterator<Item = [Tile; 3]> {
        RUN_OFFSETS
            .iter()
            .filter_map(move |(bit, _)| self.run(*bit, tile))
    }
}

static RUN_OFFSETS: [(u8, [i8; 3]); 3] = [
    (SequenceMask::HIGH, [-2, -1, 0]),
    (SequenceMask::MIDDLE, [-1, 0, 1]),
    (SequenceMask::LOW, [0, 1, 2]),
];

/// A concealed hand, partitioned by suit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    /// At most nine distinct ranks per suit, so entries never spill to the heap.
    suits: [SmallVec<[HandEntry; 9]>; 4],
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding the given tiles.
    #[must_use]
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut hand = Self::new();
        for &tile in tiles {
            hand.add(tile);
        }
        hand
    }

    fn position(&self, tile: Tile) -> Result<usize, usize> {
        self.suits[tile.suit().index()].binary_search_by_key(&tile, |e| e.tile)
    }

    /// Add one copy of `tile`.
    ///
    /// A face is held at most four times; callers must not add a fifth copy.
    pub fn add(&mut self, tile: Tile) {
        let pos = self.position(tile);
        let entries = &mut self.suits[tile.suit().index()];
        match pos {
            Ok(i) => {
                debug_assert!(
                    (entries[i].count as usize) < Tile::COPIES,
                    "fifth copy of {}",
                    tile
                );
                entries[i] = entries[i].with_count(entries[i].count + 1);
            }
            Err(i) => entries.insert(i, HandEntry { tile, count: 1 }),
        }
    }

    /// Remove one copy of `tile`.
    pub fn discard(&mut self, tile: Tile) -> Result<(), HandError> {
        let i = self.position(tile).map_err(|_| HandError::TileNotHeld(tile))?;
        let entries = &mut self.suits[tile.suit().index()];
        if entries[i].count > 1 {
            entries[i] = entries[i].with_count(entries[i].count - 1);
        } else {
            entries.remove(i);
        }
        Ok(())
    }

    /// Swap one held `old` for `new`. Leaves the hand untouched on failure.
    pub fn replace(&mut self, old: Tile, new: Tile) -> Result<(), HandError> {
        self.discard(old)?;
        self.add(new);
        Ok(())
    }

    /// Copies of `tile` held.
    #[must_use]
    pub fn count(&self, tile: Tile) -> u8 {
        self.position(tile)
            .map(|i| self.suits[tile.suit().index()][i].count)
            .unwrap_or(0)
    }

    /// Is at least one copy of `tile` held?
    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.position(tile).is_ok()
    }

    /// Total tiles held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().map(|e| e.count as usize).sum()
    }

    /// Is the hand empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suits.iter().all(|s| s.is_empty())
    }

    /// Entries of one suit, ascending by rank.
    #[must_use]
    pub fn suit_entries(&self, suit: Suit) -> &[HandEntry] {
        &self.suits[suit.index()]
    }

    /// All entries in suit-then-rank order.
    pub fn entries(&self) -> impl Iterator<Item = HandEntry> + '_ {
        self.suits.iter().flat_map(|s| s.iter().copied())
    }

    /// Every held tile, one element per copy, in suit-then-rank order.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        self.entries()
            .flat_map(|e| std::iter::repeat(e.tile).take(e.count as usize))
            .collect()
    }

    /// Suits that still hold at least one entry.
    #[must_use]
    pub fn occupied_suits(&self) -> usize {
        self.suits.iter().filter(|s| !s.is_empty()).count()
    }

    /// Runs through `tile` that two other held tiles would complete.
    ///
    /// Each neighbour only needs to be held once; the same held tile may
    /// back more than one run. Honours never form runs.
    #[must_use]
    pub fn sequence_claimable(&self, tile: Tile) -> SequenceMask {
        if tile.is_honor() {
            return SequenceMask::default();
        }
        let held = |offset: i8| tile.offset(offset).is_some_and(|t| self.contains(t));

        let mut bits = 0;
        if held(-2) && held(-1) {
            bits |= SequenceMask::HIGH;
        }
        if held(-1) && held(1) {
            bits |= SequenceMask::MIDDLE;
        }
        if held(1) && held(2) {
            bits |= SequenceMask::LOW;
        }
        SequenceMask(bits)
    }

    /// Would the offered tile complete a triplet?
    #[must_use]
    pub fn triplet_claimable(&self, tile: Tile) -> bool {
        self.count(tile) >= 2
    }

    /// Would the offered tile complete a quad?
    #[must_use]
    pub fn quad_claimable(&self, tile: Tile) -> bool {
        self.count(tile) == 3
    }

    /// Remove one copy of each tile if all are held.
    fn take_run(&mut self, run: [Tile; 3]) {
        for tile in run {
            let _ = self.discard(tile);
        }
    }

    /// Strip runs of three consecutive entries out of a numeric suit.
    ///
    /// Scans left to right (`forward`) or right to left; after a strip the
    /// scan resumes at the same position.
    pub(crate) fn strip_runs(&mut self, suit: Suit, forward: bool) {
        if !suit.is_numeric() {
            return;
        }
        let run_at = |entries: &[HandEntry], i: usize| -> Option<[Tile; 3]> {
            let (a, b, c) = (entries[i].tile, entries[i + 1].tile, entries[i + 2].tile);
            (a.index() + 1 == b.index() && b.index() + 1 == c.index()).then_some([a, b, c])
        };

        if forward {
            let mut i = 0;
            while i + 2 < self.suits[suit.index()].len() {
                match run_at(&self.suits[suit.index()], i) {
                    Some(run) => self.take_run(run),
                    None => i += 1,
                }
            }
        } else {
            let mut from_end = 3;
            while from_end <= self.suits[suit.index()].len() {
                let i = self.suits[suit.index()].len() - from_end;
                match run_at(&self.suits[suit.index()], i) {
                    Some(run) => self.take_run(run),
                    None => from_end += 1,
                }
            }
        }
    }

    /// Strip one group of `size` copies from every entry holding that many.
    pub(crate) fn strip_groups(&mut self, size: u8) {
        for suit in &mut self.suits {
            let mut i = 0;
            while i < suit.len() {
                if suit[i].count >= size {
                    if suit[i].count == size {
                        suit.remove(i);
                        continue;
                    }
                    suit[i] = suit[i].with_count(suit[i].count - size);
                }
                i += 1;
            }
        }
    }
}

impl FromStr for Hand {
    type Err = HandError;

    /// Parse compact notation such as `"123m 456p 789s 11z"`.
    ///
    /// Digits are 1-based ranks and are flushed by the suit letter after them.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || HandError::InvalidNotation(text.to_string());
        let mut hand = Hand::new();
        let mut pending: Vec<u8> = Vec::new();

        for c in text.chars() {
            if let Some(digit) = c.to_digit(10) {
                pending.push(digit as u8);
            } else if let Some(suit) = Suit::from_letter(c) {
                for rank in pending.drain(..) {
                    let tile = rank
                        .checked_sub(1)
                        .and_then(|r| Tile::new(suit, r))
                        .ok_or_else(invalid)?;
                    hand.add(tile);
                }
            } else if !c.is_whitespace() {
                return Err(invalid());
            }
        }

        if pending.is_empty() {
            Ok(hand)
        } else {
            Err(invalid())
        }
    }
}

impl std::fmt::Display for Hand {
    /// Compact notation, one block per non-empty suit.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for suit in Suit::ALL {
            let entries = self.suit_entries(suit);
            if entries.is_empty() {
                continue;
            }
            for entry in entries {
                for _ in 0..entry.count {
                    write!(f, "{}", entry.tile.rank() + 1)?;
                }
            }
            write!(f, "{}", suit.letter())?;
        }
        Ok(())
    }
}
