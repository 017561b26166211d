//! Greedy automated policy.
//!
//! ## Own draw
//!
//! 1. Win if the drawn tile completes the hand.
//! 2. Once ready, throw the drawn tile.
//! 3. Declare ready when concealed and one discard away.
//! 4. Otherwise throw the lowest-scoring tile.
//!
//! ## Claims
//!
//! Win > pass when ready > pong > chow (previous seat only) > pass.
//! Sets are only claimed when the claimed tile is not already part of a run
//! the hand can make on its own.

use log::debug;

use super::core::PlayerCore;
use super::discard::choose_discard;
use super::Player;
use crate::core::{Action, ActionKind, Relative, Tile};
use crate::hand::Hand;
use crate::table::HandEnded;

/// Hand plus `tile`, with runs stripped left to right from the tile's suit.
fn without_runs(hand: &Hand, tile: Tile) -> Hand {
    let mut rest = hand.clone();
    rest.add(tile);
    rest.strip_runs(tile.suit(), true);
    rest
}

/// Claim `tile` into a triplet?
#[must_use]
pub fn should_pong(hand: &Hand, tile: Tile) -> bool {
    hand.triplet_claimable(tile) && without_runs(hand, tile).count(tile) >= 3
}

/// The run to claim `tile` into, if any.
#[must_use]
pub fn chow_run(hand: &Hand, tile: Tile) -> Option<[Tile; 3]> {
    let mask = hand.sequence_claimable(tile);
    if mask.is_empty() || without_runs(hand, tile).contains(tile) {
        return None;
    }
    mask.runs(tile).next()
}

/// Automated seat.
#[derive(Clone, Debug)]
pub struct AutoPlayer {
    name: String,
    core: PlayerCore,
}

impl AutoPlayer {
    #[must_use]
    pub fn new(name: impl Into<String>, score: i32) -> Self {
        Self {
            name: name.into(),
            core: PlayerCore::new(score),
        }
    }

    /// Per-hand state, for inspection.
    #[must_use]
    pub fn core(&self) -> &PlayerCore {
        &self.core
    }

    fn decide_own(&mut self, tile: Tile) -> Option<Action> {
        let readiness = self.core.hand().ready_tiles(tile);
        if readiness.is_complete() {
            return Some(self.core.win(ActionKind::Hu, tile));
        }

        if self.core.is_ready() {
            return Some(Action::draw(tile));
        }

        if let Some(&discard) = readiness.faces().first() {
            if self.core.declare_ready() {
                let hand = self.core.hand_mut();
                hand.add(tile);
                hand.discard(discard).ok()?;
                return Some(Action::riichi(discard));
            }
        }

        let hand = self.core.hand_mut();
        hand.add(tile);
        let discard = choose_discard(hand)?;
        hand.discard(discard).ok()?;
        Some(Action::draw(discard))
    }

    fn decide_claim(&mut self, from: Relative, tile: Tile) -> Option<Action> {
        if self.core.hand().completes_with(tile) {
            return Some(self.core.win(ActionKind::Ron, tile));
        }

        if self.core.is_ready() {
            return None;
        }

        if should_pong(self.core.hand(), tile) {
            return self.claim(tile, ActionKind::Pong, [tile; 3]);
        }

        if from == Relative::Previous {
            if let Some(run) = chow_run(self.core.hand(), tile) {
                return self.claim(tile, ActionKind::Chow, run);
            }
        }

        None
    }

    fn claim(&mut self, tile: Tile, kind: ActionKind, meld: [Tile; 3]) -> Option<Action> {
        self.core.take_meld(tile, kind, &meld).ok()?;
        let hand = self.core.hand_mut();
        let discard = choose_discard(hand)?;
        hand.discard(discard).ok()?;

        let action = match kind {
            ActionKind::Chow => Action::chow(discard, meld),
            _ => Action::pong(discard, tile),
        };
        self.core.record_claim(action.clone(), tile);
        Some(action)
    }
}

impl Player for AutoPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn init_hand(&mut self, tiles: &[Tile]) {
        self.core.init_hand(tiles);
    }

    fn decide(&mut self, from: Relative, tile: Tile) -> Option<Action> {
        self.core.begin_decision();
        let action = if from == Relative::Own {
            self.decide_own(tile)
        } else {
            self.decide_claim(from, tile)
        };
        debug!("{} {:?} {} -> {:?}", self.name, from, tile, action.as_ref().map(Action::kind));
        action
    }

    fn on_claim_failed(&mut self) {
        self.core.rollback();
    }

    fn on_hand_ended(&mut self, _ended: &HandEnded) {
        self.core.reset();
    }

    fn score(&self) -> i32 {
        self.core.score()
    }

    fn is_ready(&self) -> bool {
        self.core.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::PlayerStatus;

    fn hand(notation: &str) -> Hand {
        notation.parse().unwrap()
    }

    fn t(notation: &str) -> Tile {
        hand(notation).tiles()[0]
    }

    fn player(notation: &str) -> AutoPlayer {
        let mut player = AutoPlayer::new("bot", 25_000);
        player.init_hand(&hand(notation).tiles());
        player
    }

    #[test]
    fn test_should_pong_skips_tiles_in_runs() {
        // 5m is a loose pair: take it.
        assert!(should_pong(&hand("55m19p"), t("5m")));
        // 3455m: the claimed 5m is needed by 345, leaving only 55.
        assert!(!should_pong(&hand("3455m"), t("5m")));
        assert!(!should_pong(&hand("5m"), t("5m")));
    }

    #[test]
    fn test_chow_run_prefers_high_member() {
        assert_eq!(chow_run(&hand("3467m"), t("5m")), Some([t("3m"), t("4m"), t("5m")]));
        assert_eq!(chow_run(&hand("67m"), t("5m")), Some([t("5m"), t("6m"), t("7m")]));
        assert_eq!(chow_run(&hand("5z"), t("5z")), None);
    }

    #[test]
    fn test_chow_run_rejects_leftover_tile() {
        // 345m + 5m: the run strips but the held 5m stays.
        assert_eq!(chow_run(&hand("345m"), t("5m")), None);
    }

    #[test]
    fn test_self_drawn_win() {
        let mut p = player("123m456p789s111z5z");
        let action = p.decide(Relative::Own, t("5z")).unwrap();
        assert_eq!(action.kind(), ActionKind::Hu);
        assert_eq!(action.revealed().len(), 14);
        assert_eq!(p.core().status(), PlayerStatus::Won);
    }

    #[test]
    fn test_riichi_then_tsumogiri() {
        // Pair of 1z and 55z after the draw: throwing 7z leaves a two-pair wait.
        let mut p = player("123m456p789s11z57z");
        let action = p.decide(Relative::Own, t("5z")).unwrap();
        assert_eq!(action, Action::riichi(t("7z")));
        assert!(p.is_ready());
        assert_eq!(p.core().hand().len(), 13);

        let held = p.core().hand().clone();
        let next = p.decide(Relative::Own, t("8m")).unwrap();
        assert_eq!(next, Action::draw(t("8m")));
        assert_eq!(p.core().hand(), &held);

        assert_eq!(p.decide(Relative::Previous, t("1m")), None);
    }

    #[test]
    fn test_plain_discard_keeps_thirteen() {
        let mut p = player("19m19p19s1234567z");
        let action = p.decide(Relative::Own, t("5m")).unwrap();
        assert_eq!(action.kind(), ActionKind::Draw);
        assert_eq!(action.discard(), Some(t("1z")));
        assert_eq!(p.core().hand().len(), 13);
    }

    #[test]
    fn test_pong_claim_and_rollback() {
        let mut p = player("55m19p2479s12367z");
        let before = p.core().hand().clone();

        let action = p.decide(Relative::Opposite, t("5m")).unwrap();
        assert_eq!(action.kind(), ActionKind::Pong);
        assert_eq!(action.meld(), &[t("5m"), t("5m"), t("5m")]);
        assert_eq!(p.core().hand().len(), 10);

        p.on_claim_failed();
        assert_eq!(p.core().hand(), &before);
        assert!(p.core().is_concealed());
    }

    #[test]
    fn test_chow_only_from_previous() {
        let mut p = player("46m19p2479s12367z");
        assert_eq!(p.decide(Relative::Opposite, t("5m")), None);

        let action = p.decide(Relative::Previous, t("5m")).unwrap();
        assert_eq!(action.kind(), ActionKind::Chow);
        assert_eq!(action.meld(), &[t("4m"), t("5m"), t("6m")]);
    }

    #[test]
    fn test_ron_and_failed_ron() {
        let mut p = player("123m456p789s111z5z");
        let before = p.core().hand().clone();

        let action = p.decide(Relative::Next, t("5z")).unwrap();
        assert_eq!(action.kind(), ActionKind::Ron);

        p.on_claim_failed();
        assert_eq!(p.core().hand(), &before);
        assert_eq!(p.core().status(), PlayerStatus::Free);
    }

    #[test]
    fn test_lost_ron_stays_ready() {
        let mut p = player("123m456p789s11z57z");
        assert_eq!(p.decide(Relative::Own, t("5z")), Some(Action::riichi(t("7z"))));
        assert!(p.is_ready());

        let action = p.decide(Relative::Next, t("1z")).unwrap();
        assert_eq!(action.kind(), ActionKind::Ron);

        p.on_claim_failed();
        assert!(p.is_ready());
        assert_eq!(p.core().hand().len(), 13);
        // Still locked: the drawn tile goes straight out.
        assert_eq!(p.decide(Relative::Own, t("2z")), Some(Action::draw(t("2z"))));
        assert!(!p.core.declare_ready());
    }

    #[test]
    fn test_hand_end_resets_status() {
        let mut p = player("123m456p789s11z57z");
        p.decide(Relative::Own, t("5z")).unwrap();
        assert!(p.is_ready());

        p.on_hand_ended(&HandEnded { kind: None, winner: None });
        assert!(!p.is_ready());
    }
}
