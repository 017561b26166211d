//! Claim arbitration for a single discard.
//!
//! Offers go to the other three seats in play order after the discarder.
//! Every response is collected first and reconciled afterwards:
//!
//! 1. The first response is selected
//! 2. A later response replaces it only if its kind ranks strictly higher
//! 3. Every other responder lost and must roll back

use smallvec::SmallVec;

use crate::core::{Action, Seat, Tile};

/// Outcome of a claim window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimResolution {
    /// The seat taking the discard and what it does with it.
    pub winner: Option<(Seat, Action)>,

    /// Seats whose claim was overridden, in response order.
    pub losers: SmallVec<[Seat; 3]>,
}

/// Responses collected for one discard.
#[derive(Clone, Debug)]
pub struct ClaimWindow {
    discarder: Seat,
    tile: Tile,
    responses: SmallVec<[(Seat, Action); 3]>,
}

impl ClaimWindow {
    #[must_use]
    pub fn new(discarder: Seat, tile: Tile) -> Self {
        Self {
            discarder,
            tile,
            responses: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn discarder(&self) -> Seat {
        self.discarder
    }

    #[must_use]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Seats to offer the discard to, in order.
    pub fn offer_order(&self) -> impl Iterator<Item = Seat> {
        self.discarder.others()
    }

    /// Record a seat's claim.
    pub fn respond(&mut self, seat: Seat, action: Action) {
        self.responses.push((seat, action));
    }

    /// Number of claims received.
    #[must_use]
    pub fn response_count(&self) -> usize {
        self.responses.len()
    }

    /// Pick the winning claim.
    #[must_use]
    pub fn resolve(self) -> ClaimResolution {
        let mut best: Option<usize> = None;
        for (i, (_, action)) in self.responses.iter().enumerate() {
            match best {
                Some(b) if action.kind() <= self.responses[b].1.kind() => {}
                _ => best = Some(i),
            }
        }

        let losers = self
            .responses
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != best)
            .map(|(_, (seat, _))| *seat)
            .collect();
        let winner = best.map(|b| self.responses[b].clone());

        ClaimResolution { winner, losers }
    }
}
