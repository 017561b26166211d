//! Per-seat state shared by every decision policy.
//!
//! `PlayerCore` owns the concealed hand, the seat's own exposed melds, its
//! ready status, and the claim awaiting arbitration. Policies mutate the
//! hand optimistically when they claim; `rollback` undoes that if another
//! seat's claim takes priority.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionKind, HandError, Meld, Tile};
use crate::hand::Hand;

/// Ready status of a seat within one hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Normal play.
    #[default]
    Free,
    /// Ready declared; the hand is locked until it wins.
    ReadyDeclared,
    /// Declared a win.
    Won,
}

/// A claim sent to the board but not yet confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingClaim {
    action: Action,
    claimed: Tile,
    /// Status before the claim, restored on rollback.
    prior: PlayerStatus,
}

/// State every player implementation carries.
#[derive(Clone, Debug)]
pub struct PlayerCore {
    hand: Hand,
    melds: Vec<Meld>,
    status: PlayerStatus,
    score: i32,
    pending: Option<PendingClaim>,
}

impl PlayerCore {
    /// Create an empty seat with a starting score.
    #[must_use]
    pub fn new(score: i32) -> Self {
        Self {
            hand: Hand::new(),
            melds: Vec::new(),
            status: PlayerStatus::Free,
            score,
            pending: None,
        }
    }

    /// Start a new hand with the dealt tiles.
    pub fn init_hand(&mut self, tiles: &[Tile]) {
        self.hand = Hand::from_tiles(tiles);
        self.reset();
    }

    /// Clear per-hand state. The hand itself is kept for inspection.
    pub fn reset(&mut self) {
        self.melds.clear();
        self.status = PlayerStatus::Free;
        self.pending = None;
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Melds this seat exposed during the hand.
    #[must_use]
    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    #[must_use]
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// No tile taken from another seat. Concealed quads keep the hand closed.
    #[must_use]
    pub fn is_concealed(&self) -> bool {
        self.melds.iter().all(|m| m.kind == ActionKind::ConcealedKong)
    }

    /// Ready has been declared.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == PlayerStatus::ReadyDeclared
    }

    /// Forget any claim left over from an earlier offer.
    pub fn begin_decision(&mut self) {
        self.pending = None;
    }

    /// Mark the seat ready. Only a concealed, free seat may declare.
    pub fn declare_ready(&mut self) -> bool {
        if self.status != PlayerStatus::Free || !self.is_concealed() {
            return false;
        }
        self.status = PlayerStatus::ReadyDeclared;
        true
    }

    /// Take `tile` into the hand and build the winning action.
    pub fn win(&mut self, kind: ActionKind, tile: Tile) -> Action {
        self.hand.add(tile);
        let tiles = self.hand.tiles();
        let action = if kind == ActionKind::Ron {
            let action = Action::ron(tile, &tiles);
            self.record_claim(action.clone(), tile);
            action
        } else {
            Action::hu(tile, &tiles)
        };
        self.status = PlayerStatus::Won;
        action
    }

    /// Take the claimed tile and move `meld` out of the hand.
    ///
    /// The hand is left untouched if any meld tile is missing.
    pub fn take_meld(&mut self, claimed: Tile, kind: ActionKind, meld: &[Tile]) -> Result<(), HandError> {
        let mut next = self.hand.clone();
        next.add(claimed);
        for &tile in meld {
            next.discard(tile)?;
        }
        self.hand = next;
        self.melds.push(Meld {
            kind,
            tiles: meld.iter().copied().collect(),
        });
        Ok(())
    }

    /// Turn the exposed pong of `tile` into an added quad.
    pub fn upgrade_pong(&mut self, tile: Tile) -> bool {
        match self.melds.iter_mut().find(|m| m.is_pong_of(tile)) {
            Some(meld) => {
                meld.kind = ActionKind::AddedKong;
                meld.tiles.push(tile);
                true
            }
            None => false,
        }
    }

    /// Remember a claim so it can be undone.
    pub fn record_claim(&mut self, action: Action, claimed: Tile) {
        self.pending = Some(PendingClaim {
            action,
            claimed,
            prior: self.status,
        });
    }

    /// Undo the pending claim after losing arbitration.
    pub fn rollback(&mut self) {
        let Some(PendingClaim { action, claimed, prior }) = self.pending.take() else {
            return;
        };

        if action.kind() == ActionKind::Ron {
            let _ = self.hand.discard(claimed);
            self.status = prior;
            return;
        }

        if let Some(discard) = action.discard() {
            self.hand.add(discard);
        }
        for &tile in action.meld() {
            self.hand.add(tile);
        }
        let _ = self.hand.discard(claimed);
        self.melds.pop();
    }
}
