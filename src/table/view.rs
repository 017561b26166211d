//! Public table state and the presentation contract.
//!
//! ## TableView
//!
//! Everything a spectator may see:
//! - Prevailing wind, hand number, dealer, active seat
//! - Discard pool and exposed melds
//! - Concealed tile counts and ready flags per seat
//! - Tiles left in the live wall
//! - Action history
//!
//! Collections use `im` persistent structures so observers can keep every
//! snapshot they receive without copying the whole table.
//!
//! ## TableObserver
//!
//! Renderers implement [`TableObserver`]. Every method has a no-op default.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ActionKind, ActionRecord, Meld, Relative, Seat, SeatMap, Tile};

/// Observable table state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Prevailing wind (0 = East).
    pub wind: u8,

    /// Hand number within the wind.
    pub game: u8,

    /// Dealer of this hand.
    pub dealer: Seat,

    /// Seat whose turn it is, if any.
    pub active: Option<Seat>,

    /// Tiles discarded and not claimed, oldest first.
    pub discards: Vector<Tile>,

    /// Exposed melds per seat.
    pub melds: SeatMap<Vector<Meld>>,

    /// Concealed tiles per seat between turns.
    pub concealed: SeatMap<usize>,

    /// Seats that declared ready.
    pub ready: SeatMap<bool>,

    /// Scores per seat.
    pub scores: SeatMap<i32>,

    /// Tiles left in the live wall.
    pub wall_remaining: usize,

    /// Every action taken this hand.
    pub history: Vector<ActionRecord>,
}

impl TableView {
    /// Fresh view for a hand about to be dealt.
    #[must_use]
    pub fn new(wind: u8, game: u8, dealer: Seat) -> Self {
        Self {
            wind,
            game,
            dealer,
            active: None,
            discards: Vector::new(),
            melds: SeatMap::with_default(),
            concealed: SeatMap::with_value(0),
            ready: SeatMap::with_value(false),
            scores: SeatMap::with_value(0),
            wall_remaining: 0,
            history: Vector::new(),
        }
    }

    /// Add a meld, or upgrade the exposed pong of the same face for an
    /// added kong.
    pub fn expose(&mut self, seat: Seat, meld: Meld) {
        let melds = &mut self.melds[seat];
        if meld.kind == ActionKind::AddedKong {
            if let Some(face) = meld.tiles.first().copied() {
                if let Some(index) = melds.iter().position(|m| m.is_pong_of(face)) {
                    melds.set(index, meld);
                    return;
                }
            }
        }
        melds.push_back(meld);
    }
}

/// How a hand ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandEnd {
    /// A seat won by Ron or Hu.
    Win { winner: Seat, kind: ActionKind },
    /// The live wall ran out.
    Exhausted,
}

/// Result of one hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOutcome {
    pub end: HandEnd,

    /// Dealer of the hand.
    pub dealer: Seat,

    /// The tile that completed the hand.
    pub winning_tile: Option<Tile>,

    /// The winner's full hand.
    pub revealed: Vec<Tile>,

    /// Draws made during the hand.
    pub turns: u32,
}

impl HandOutcome {
    /// The winning seat, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        match self.end {
            HandEnd::Win { winner, .. } => Some(winner),
            HandEnd::Exhausted => None,
        }
    }

    /// Did the dealer keep the deal?
    #[must_use]
    pub fn dealer_repeats(&self) -> bool {
        self.winner().map_or(true, |winner| winner == self.dealer)
    }

    /// The notice sent to one seat.
    #[must_use]
    pub fn notice_for(&self, seat: Seat) -> HandEnded {
        match self.end {
            HandEnd::Win { winner, kind } => HandEnded {
                kind: Some(kind),
                winner: Some(seat.relative(winner)),
            },
            HandEnd::Exhausted => HandEnded {
                kind: None,
                winner: None,
            },
        }
    }
}

/// Hand-end notice as one seat sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandEnded {
    /// Ron or Hu; `None` for an exhausted wall.
    pub kind: Option<ActionKind>,

    /// Winner relative to the receiving seat.
    pub winner: Option<Relative>,
}

/// Presentation contract. Implement only what you render.
pub trait TableObserver {
    /// Called after every change to the table.
    fn on_view(&mut self, _view: &TableView) {}

    /// Called when the active seat changes.
    fn on_active(&mut self, _seat: Option<Seat>) {}

    /// Called once per hand.
    fn on_hand_ended(&mut self, _outcome: &HandOutcome) {}
}
