//! The turn engine.
//!
//! A hand runs as a loop over the active seat:
//!
//! ```text
//! Dealing → Active(dealer) → draw → decide
//!     discard ─→ ClaimOffer ─→ claimed: Active(claimant), handle its action
//!                          └→ unclaimed: Active(next seat), draw
//!     quad    ─→ replacement draw for the same seat
//!     win     ─→ HandEnd
//!   no draw   ─→ HandEnd (exhausted)
//! ```
//!
//! Seats are only ever touched through the [`Player`] trait and observers
//! only ever see [`TableView`] snapshots.

use log::{debug, error, info};
use smallvec::SmallVec;

use super::claims::ClaimWindow;
use super::round::RoundState;
use super::view::{HandEnd, HandOutcome, TableObserver, TableView};
use super::wall::Wall;
use crate::core::{
    Action, ActionKind, ActionRecord, DecisionPoint, EngineError, GameRng, Relative, Seat,
    SeatMap, TableConfig, Tile, SEATS,
};
use crate::players::{AutoPlayer, Player};

/// Seat names used by [`Board::with_auto_players`].
pub const SEAT_NAMES: [&str; SEATS] = ["East", "South", "West", "North"];

/// Per-hand bookkeeping.
struct HandState {
    view: TableView,
    wall: Wall,
    turns: u32,
}

/// Four seats, their observers and the rules they play under.
pub struct Board {
    config: TableConfig,
    players: SeatMap<Box<dyn Player>>,
    observers: Vec<Box<dyn TableObserver>>,
}

impl Board {
    /// Create a board with the given seats, seat 0 first.
    #[must_use]
    pub fn new(config: TableConfig, players: [Box<dyn Player>; SEATS]) -> Self {
        Self {
            config,
            players: SeatMap::from_array(players),
            observers: Vec::new(),
        }
    }

    /// Create a board with four automated seats.
    #[must_use]
    pub fn with_auto_players(config: TableConfig) -> Self {
        let score = config.initial_score;
        let players = SEAT_NAMES.map(|name| Box::new(AutoPlayer::new(name, score)) as Box<dyn Player>);
        Self::new(config, players)
    }

    /// Attach an observer.
    pub fn add_observer(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> &dyn Player {
        self.players[seat].as_ref()
    }

    /// Play hands until the match is over.
    pub fn play_match(&mut self) -> Result<(RoundState, Vec<HandOutcome>), EngineError> {
        let mut round = RoundState::new(&self.config);
        let mut outcomes = Vec::new();
        while !round.is_match_over(&self.config) {
            let (next, outcome) = self.play_hand(&round)?;
            outcomes.push(outcome);
            round = next;
        }
        info!("match over after {} hands", round.hands_played);
        Ok((round, outcomes))
    }

    /// Shuffle a wall from the round's RNG and play one hand.
    pub fn play_hand(&mut self, round: &RoundState) -> Result<(RoundState, HandOutcome), EngineError> {
        let mut rng = GameRng::from_state(&round.rng);
        let wall = Wall::new(&mut rng, self.config.dead_wall);
        let outcome = self.play_hand_with_wall(round, wall)?;
        let next = round.advance(&outcome, &self.config, rng.state());
        Ok((next, outcome))
    }

    /// Play one hand on a prepared wall.
    pub fn play_hand_with_wall(&mut self, round: &RoundState, wall: Wall) -> Result<HandOutcome, EngineError> {
        let dealer = round.dealer(&self.config);
        let mut hand = HandState {
            view: TableView::new(round.wind, round.game, dealer),
            wall,
            turns: 0,
        };
        debug!("wind {} hand {}: {} deals", round.wind, round.game, dealer);

        for seat in Seat::all() {
            let tiles = hand.wall.deal(self.config.hand_size);
            hand.view.concealed[seat] = tiles.len();
            hand.view.scores[seat] = self.players[seat].score();
            self.players[seat].init_hand(&tiles);
        }
        hand.view.wall_remaining = hand.wall.remaining();
        self.publish(&hand.view);

        let mut current = dealer;
        while let Some(tile) = hand.wall.draw() {
            hand.turns += 1;
            hand.view.wall_remaining = hand.wall.remaining();
            self.activate(&mut hand.view, Some(current));

            let mut action = self.players[current]
                .decide(Relative::Own, tile)
                .ok_or(EngineError::MissingDecision { seat: current })
                .inspect_err(|e| error!("{}", e))?;
            Self::validate_own(current, &action)?;

            loop {
                debug!("{} {}", self.players[current].name(), action);
                self.record(&mut hand, current, &action);

                if action.kind().is_win() {
                    return Ok(self.finish(&mut hand, current, &action));
                }

                if action.kind().is_kong() {
                    hand.wall.ack_kong();
                    break;
                }

                let discard = action
                    .discard()
                    .ok_or(EngineError::MalformedAction { seat: current, kind: action.kind() })?;
                self.publish(&hand.view);

                match self.offer(current, discard)? {
                    Some((claimant, claim)) => {
                        current = claimant;
                        action = claim;
                        self.activate(&mut hand.view, Some(current));
                    }
                    None => {
                        hand.view.discards.push_back(discard);
                        current = current.next();
                        break;
                    }
                }
            }
            self.publish(&hand.view);
        }

        Ok(self.exhaust(&mut hand))
    }

    /// Apply an action's effects on the public table.
    fn record(&mut self, hand: &mut HandState, seat: Seat, action: &Action) {
        let kind = action.kind();
        if let Some(meld) = action.to_meld() {
            hand.view.expose(seat, meld);
        }
        hand.view.concealed[seat] = hand.view.concealed[seat].saturating_add_signed(kind.concealed_delta());
        hand.view.ready[seat] = self.players[seat].is_ready();
        hand.view
            .history
            .push_back(ActionRecord::new(seat, action.clone(), hand.turns));
    }

    /// Offer a discard to the other seats and settle competing claims.
    fn offer(&mut self, discarder: Seat, tile: Tile) -> Result<Option<(Seat, Action)>, EngineError> {
        let mut window = ClaimWindow::new(discarder, tile);
        let order: SmallVec<[Seat; 3]> = window.offer_order().collect();
        for seat in order {
            let from = seat.relative(discarder);
            if let Some(claim) = self.players[seat].decide(from, tile) {
                Self::validate_claim(seat, from, &claim)?;
                debug!("{} claims {} with {}", self.players[seat].name(), tile, claim.kind().label());
                window.respond(seat, claim);
            }
        }

        if window.response_count() > 1 {
            debug!(
                "{} claims on {} discarded by {}",
                window.response_count(),
                window.tile(),
                window.discarder()
            );
        }

        let resolution = window.resolve();
        for &loser in &resolution.losers {
            debug!("{} loses the claim on {}", self.players[loser].name(), tile);
            self.players[loser].on_claim_failed();
        }
        Ok(resolution.winner)
    }

    fn validate_own(seat: Seat, action: &Action) -> Result<(), EngineError> {
        if !action.kind().is_own_turn() {
            return Err(Self::invalid(seat, action, DecisionPoint::OwnDraw));
        }
        Self::validate_shape(seat, action)
    }

    fn validate_claim(seat: Seat, from: Relative, action: &Action) -> Result<(), EngineError> {
        let kind = action.kind();
        if !kind.is_claim() || (kind == ActionKind::Chow && from != Relative::Previous) {
            return Err(Self::invalid(seat, action, DecisionPoint::Claim));
        }
        Self::validate_shape(seat, action)
    }

    fn validate_shape(seat: Seat, action: &Action) -> Result<(), EngineError> {
        if action.is_well_formed() {
            Ok(())
        } else {
            let err = EngineError::MalformedAction { seat, kind: action.kind() };
            error!("{}", err);
            Err(err)
        }
    }

    fn invalid(seat: Seat, action: &Action, point: DecisionPoint) -> EngineError {
        let err = EngineError::InvalidActionKind {
            seat: Some(seat),
            value: action.kind().value(),
            point,
        };
        error!("{}", err);
        err
    }

    fn finish(&mut self, hand: &mut HandState, winner: Seat, action: &Action) -> HandOutcome {
        let outcome = HandOutcome {
            end: HandEnd::Win { winner, kind: action.kind() },
            dealer: hand.view.dealer,
            winning_tile: action.subject(),
            revealed: action.revealed().to_vec(),
            turns: hand.turns,
        };
        info!(
            "{} wins by {} after {} draws",
            self.players[winner].name(),
            action.kind().label(),
            hand.turns
        );
        self.conclude(hand, outcome)
    }

    fn exhaust(&mut self, hand: &mut HandState) -> HandOutcome {
        let outcome = HandOutcome {
            end: HandEnd::Exhausted,
            dealer: hand.view.dealer,
            winning_tile: None,
            revealed: Vec::new(),
            turns: hand.turns,
        };
        info!("wall exhausted after {} draws", hand.turns);
        self.conclude(hand, outcome)
    }

    fn conclude(&mut self, hand: &mut HandState, outcome: HandOutcome) -> HandOutcome {
        for (seat, player) in self.players.iter_mut() {
            player.on_hand_ended(&outcome.notice_for(seat));
        }
        hand.view.ready = SeatMap::with_value(false);
        self.activate(&mut hand.view, None);
        self.publish(&hand.view);
        for observer in &mut self.observers {
            observer.on_hand_ended(&outcome);
        }
        outcome
    }

    fn activate(&mut self, view: &mut TableView, seat: Option<Seat>) {
        view.active = seat;
        for observer in &mut self.observers {
            observer.on_active(seat);
        }
    }

    fn publish(&mut self, view: &TableView) {
        for observer in &mut self.observers {
            observer.on_view(view);
        }
    }
}
