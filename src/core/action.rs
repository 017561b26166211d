//! Action representation: kind + ordered tile list.
//!
//! An action is what a seat hands back to the turn engine after deciding.
//! The first tile is the tile leaving the hand (or, for kongs and wins, the
//! face the action is about); the rest are the tiles laid open on the table.
//!
//! | Kind | `tiles[0]` | `tiles[1..]` |
//! |---|---|---|
//! | Draw | discarded tile | - |
//! | Chow | discarded tile | the run, low to high |
//! | Pong | discarded tile | three identical tiles |
//! | Kong kinds | the quad face | four identical tiles |
//! | Riichi | discarded tile | - |
//! | Ron / Hu | winning tile | the whole winning hand |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{DecisionPoint, EngineError};
use super::seat::Seat;
use super::tile::Tile;

/// Action kind.
///
/// The numeric values encode claim priority: when several seats claim the
/// same discard, the largest value wins (Ron > Kong > Pong > Chow).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionKind {
    /// Plain discard after a draw.
    Draw = 0,
    /// Claim a discard into a run.
    Chow = 1,
    /// Claim a discard into a triplet.
    Pong = 2,
    /// Claim a discard into a quad.
    Kong = 3,
    /// Upgrade an exposed triplet with a drawn fourth tile.
    AddedKong = 4,
    /// Declare a quad held entirely in hand.
    ConcealedKong = 5,
    /// Declare a ready hand while discarding.
    Riichi = 6,
    /// Win on another seat's discard.
    Ron = 7,
    /// Win on a self-drawn tile.
    Hu = 8,
}

impl ActionKind {
    /// Raw kind value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Kong of any flavour.
    #[must_use]
    pub const fn is_kong(self) -> bool {
        matches!(self, ActionKind::Kong | ActionKind::AddedKong | ActionKind::ConcealedKong)
    }

    /// Ron or Hu.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, ActionKind::Ron | ActionKind::Hu)
    }

    /// Kinds that end with a tile going to the discard pool.
    #[must_use]
    pub const fn discards(self) -> bool {
        matches!(
            self,
            ActionKind::Draw | ActionKind::Chow | ActionKind::Pong | ActionKind::Riichi
        )
    }

    /// Kinds a seat may answer with when offered another seat's discard.
    #[must_use]
    pub const fn is_claim(self) -> bool {
        matches!(
            self,
            ActionKind::Chow | ActionKind::Pong | ActionKind::Kong | ActionKind::Ron
        )
    }

    /// Kinds a seat may answer with after its own draw.
    #[must_use]
    pub const fn is_own_turn(self) -> bool {
        matches!(
            self,
            ActionKind::Draw
                | ActionKind::AddedKong
                | ActionKind::ConcealedKong
                | ActionKind::Riichi
                | ActionKind::Hu
        )
    }

    /// Change to the acting seat's concealed tile count once the action is
    /// fully played out (claimed tile, replacement draw and discard included).
    #[must_use]
    pub const fn concealed_delta(self) -> isize {
        match self {
            ActionKind::Chow | ActionKind::Pong | ActionKind::Kong | ActionKind::ConcealedKong => -3,
            _ => 0,
        }
    }

    /// Number of tiles the kind carries, or `None` for win kinds whose length
    /// follows the winning hand.
    #[must_use]
    pub const fn tile_count(self) -> Option<usize> {
        match self {
            ActionKind::Draw | ActionKind::Riichi => Some(1),
            ActionKind::Chow | ActionKind::Pong => Some(4),
            ActionKind::Kong | ActionKind::AddedKong | ActionKind::ConcealedKong => Some(5),
            ActionKind::Ron | ActionKind::Hu => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::Draw => "discard",
            ActionKind::Chow => "chow",
            ActionKind::Pong => "pong",
            ActionKind::Kong => "kong",
            ActionKind::AddedKong => "added kong",
            ActionKind::ConcealedKong => "concealed kong",
            ActionKind::Riichi => "riichi",
            ActionKind::Ron => "ron",
            ActionKind::Hu => "tsumo",
        }
    }
}

impl TryFrom<u8> for ActionKind {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => ActionKind::Draw,
            1 => ActionKind::Chow,
            2 => ActionKind::Pong,
            3 => ActionKind::Kong,
            4 => ActionKind::AddedKong,
            5 => ActionKind::ConcealedKong,
            6 => ActionKind::Riichi,
            7 => ActionKind::Ron,
            8 => ActionKind::Hu,
            _ => {
                return Err(EngineError::InvalidActionKind {
                    seat: None,
                    value,
                    point: DecisionPoint::Raw,
                })
            }
        })
    }
}

/// A decision returned by a seat.
///
/// Immutable once built; construct through the kind-specific constructors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    kind: ActionKind,
    /// SmallVec holds every kind except wins without heap allocation.
    tiles: SmallVec<[Tile; 5]>,
}

impl Action {
    /// Build an action from raw parts.
    #[must_use]
    pub fn from_parts(kind: ActionKind, tiles: &[Tile]) -> Self {
        Self {
            kind,
            tiles: SmallVec::from_slice(tiles),
        }
    }

    /// Discard after a draw.
    #[must_use]
    pub fn draw(discard: Tile) -> Self {
        Self::from_parts(ActionKind::Draw, &[discard])
    }

    /// Claim into a run, then discard. `run` is sorted low to high.
    #[must_use]
    pub fn chow(discard: Tile, mut run: [Tile; 3]) -> Self {
        run.sort();
        Self::from_parts(ActionKind::Chow, &[discard, run[0], run[1], run[2]])
    }

    /// Claim into a triplet, then discard.
    #[must_use]
    pub fn pong(discard: Tile, tile: Tile) -> Self {
        Self::from_parts(ActionKind::Pong, &[discard, tile, tile, tile])
    }

    /// Quad of any kong kind.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is not a kong kind.
    #[must_use]
    pub fn kong(kind: ActionKind, tile: Tile) -> Self {
        assert!(kind.is_kong(), "{:?} is not a kong kind", kind);
        Self::from_parts(kind, &[tile, tile, tile, tile, tile])
    }

    /// Declare ready while discarding.
    #[must_use]
    pub fn riichi(discard: Tile) -> Self {
        Self::from_parts(ActionKind::Riichi, &[discard])
    }

    /// Win on a discard, revealing the full hand.
    #[must_use]
    pub fn ron(winning: Tile, hand: &[Tile]) -> Self {
        Self::win(ActionKind::Ron, winning, hand)
    }

    /// Win on a self-drawn tile, revealing the full hand.
    #[must_use]
    pub fn hu(winning: Tile, hand: &[Tile]) -> Self {
        Self::win(ActionKind::Hu, winning, hand)
    }

    fn win(kind: ActionKind, winning: Tile, hand: &[Tile]) -> Self {
        let mut tiles = SmallVec::with_capacity(hand.len() + 1);
        tiles.push(winning);
        tiles.extend_from_slice(hand);
        Self { kind, tiles }
    }

    /// The action kind.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// All tiles in order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile this action sends to the discard pool, if any.
    #[must_use]
    pub fn discard(&self) -> Option<Tile> {
        if self.kind.discards() {
            self.tiles.first().copied()
        } else {
            None
        }
    }

    /// The first tile: discard, quad face or winning tile.
    #[must_use]
    pub fn subject(&self) -> Option<Tile> {
        self.tiles.first().copied()
    }

    /// Tiles laid open as a meld (empty for non-meld kinds).
    #[must_use]
    pub fn meld(&self) -> &[Tile] {
        match self.kind {
            ActionKind::Chow | ActionKind::Pong => self.tail(),
            kind if kind.is_kong() => self.tail(),
            _ => &[],
        }
    }

    /// The winning hand for Ron/Hu (empty otherwise).
    #[must_use]
    pub fn revealed(&self) -> &[Tile] {
        if self.kind.is_win() {
            self.tail()
        } else {
            &[]
        }
    }

    fn tail(&self) -> &[Tile] {
        self.tiles.get(1..).unwrap_or(&[])
    }

    /// Does the tile list have the shape its kind requires?
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self.kind.tile_count() {
            Some(expected) => self.tiles.len() == expected,
            None => self.tiles.len() >= 2,
        }
    }

    /// The meld this action exposes, if any.
    #[must_use]
    pub fn to_meld(&self) -> Option<Meld> {
        let tiles = self.meld();
        if tiles.is_empty() {
            None
        } else {
            Some(Meld {
                kind: self.kind,
                tiles: SmallVec::from_slice(tiles),
            })
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.label())?;
        for tile in &self.tiles {
            write!(f, " {}", tile)?;
        }
        Ok(())
    }
}

/// An exposed meld on the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meld {
    /// The action that exposed it.
    pub kind: ActionKind,
    /// The tiles, low to high.
    pub tiles: SmallVec<[Tile; 4]>,
}

impl Meld {
    /// Is this an exposed triplet of `tile`?
    #[must_use]
    pub fn is_pong_of(&self, tile: Tile) -> bool {
        self.kind == ActionKind::Pong && self.tiles.first() == Some(&tile)
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub seat: Seat,

    /// The action taken.
    pub action: Action,

    /// Turn number (one per draw) when the action was taken.
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(seat: Seat, action: Action, turn: u32) -> Self {
        Self { seat, action, turn }
    }
}
