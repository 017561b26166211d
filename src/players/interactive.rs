//! Channel-backed seat for a human front end.
//!
//! Each decision is sent as a [`Prompt`] and the seat blocks on the reply.
//! The front end holds the other end of both channels in an
//! [`InteractiveHandle`], typically on its own thread.
//!
//! An illegal [`Choice`] is logged and the prompt is sent again. If the
//! front end hangs up, the seat plays passively: it throws whatever it drew
//! and passes on every offer.

use log::warn;
use std::sync::mpsc::{channel, Receiver, RecvError, SendError, Sender};

use super::core::PlayerCore;
use super::discard::choose_discard;
use super::Player;
use crate::core::{Action, ActionKind, Relative, Tile};
use crate::hand::{Hand, SequenceMask};
use crate::table::HandEnded;

/// What the seat may do with the tile on offer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimOptions {
    /// Ron or Hu.
    pub win: bool,
    /// Legal ready-declaration discards (own draw only).
    pub riichi: Vec<Tile>,
    /// Runs the tile can be claimed into (previous seat only).
    pub chow: SequenceMask,
    pub pong: bool,
    /// Claimed quad, or concealed/added quad on an own draw.
    pub kong: bool,
}

impl ClaimOptions {
    /// Nothing but passing is possible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.win && self.riichi.is_empty() && self.chow.is_empty() && !self.pong && !self.kong
    }
}

/// Message to the front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// A drawn (`from == Own`) or offered tile needs a decision.
    Decide {
        hand: Hand,
        tile: Tile,
        from: Relative,
        options: ClaimOptions,
    },
    /// Choose the discard that completes a claim.
    Discard { hand: Hand },
    /// The hand is over.
    HandEnded(HandEnded),
}

/// Reply from the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Pass on an offer, or throw the drawn tile.
    Pass,
    /// Throw a held tile.
    Discard(Tile),
    /// Declare ready while throwing this tile.
    Riichi(Tile),
    Win,
    Pong,
    /// Claim into the run named by one [`SequenceMask`] bit.
    Chow(u8),
    Kong,
}

/// Front-end end of the channels.
#[derive(Debug)]
pub struct InteractiveHandle {
    prompts: Receiver<Prompt>,
    choices: Sender<Choice>,
}

impl InteractiveHandle {
    /// Block until the seat asks something. Fails once the seat is dropped.
    pub fn recv(&self) -> Result<Prompt, RecvError> {
        self.prompts.recv()
    }

    /// Answer the last prompt.
    pub fn send(&self, choice: Choice) -> Result<(), SendError<Choice>> {
        self.choices.send(choice)
    }
}

/// Seat driven by a front end.
#[derive(Debug)]
pub struct InteractivePlayer {
    name: String,
    core: PlayerCore,
    prompts: Sender<Prompt>,
    choices: Receiver<Choice>,
}

impl InteractivePlayer {
    /// Create a seat and the handle that drives it.
    #[must_use]
    pub fn new(name: impl Into<String>, score: i32) -> (Self, InteractiveHandle) {
        let (prompt_tx, prompt_rx) = channel();
        let (choice_tx, choice_rx) = channel();
        let player = Self {
            name: name.into(),
            core: PlayerCore::new(score),
            prompts: prompt_tx,
            choices: choice_rx,
        };
        let handle = InteractiveHandle {
            prompts: prompt_rx,
            choices: choice_tx,
        };
        (player, handle)
    }

    /// Per-hand state, for inspection.
    #[must_use]
    pub fn core(&self) -> &PlayerCore {
        &self.core
    }

    /// Send a prompt and wait. `None` once the front end is gone.
    fn ask(&self, prompt: Prompt) -> Option<Choice> {
        self.prompts.send(prompt).ok()?;
        self.choices.recv().ok()
    }

    fn decide_prompt(&self, tile: Tile, from: Relative, options: &ClaimOptions) -> Prompt {
        Prompt::Decide {
            hand: self.core.hand().clone(),
            tile,
            from,
            options: options.clone(),
        }
    }

    /// Options after drawing `tile`. Once ready only the win remains.
    fn own_options(&self, tile: Tile) -> ClaimOptions {
        let hand = self.core.hand();
        let readiness = hand.ready_tiles(tile);
        if self.core.is_ready() {
            return ClaimOptions {
                win: readiness.is_complete(),
                ..ClaimOptions::default()
            };
        }

        let can_declare = self.core.is_concealed() && !readiness.is_complete();
        ClaimOptions {
            win: readiness.is_complete(),
            riichi: if can_declare { readiness.faces().to_vec() } else { Vec::new() },
            kong: hand.quad_claimable(tile) || self.core.melds().iter().any(|m| m.is_pong_of(tile)),
            ..ClaimOptions::default()
        }
    }

    /// Options when offered another seat's discard.
    fn claim_options(&self, from: Relative, tile: Tile) -> ClaimOptions {
        let hand = self.core.hand();
        let win = hand.completes_with(tile);
        if self.core.is_ready() {
            return ClaimOptions {
                win,
                ..ClaimOptions::default()
            };
        }

        ClaimOptions {
            win,
            chow: if from == Relative::Previous {
                hand.sequence_claimable(tile)
            } else {
                SequenceMask::default()
            },
            pong: hand.triplet_claimable(tile),
            kong: hand.quad_claimable(tile),
            ..ClaimOptions::default()
        }
    }

    fn decide_own(&mut self, tile: Tile) -> Action {
        let options = self.own_options(tile);
        if self.core.is_ready() && !options.win {
            return Action::draw(tile);
        }

        loop {
            let Some(choice) = self.ask(self.decide_prompt(tile, Relative::Own, &options)) else {
                return Action::draw(tile);
            };
            match self.apply_own(choice, tile, &options) {
                Some(action) => return action,
                None => warn!("{} chose {:?} for drawn {}, asking again", self.name, choice, tile),
            }
        }
    }

    /// Apply a choice made on an own draw. `None` if it is not legal.
    fn apply_own(&mut self, choice: Choice, tile: Tile, options: &ClaimOptions) -> Option<Action> {
        match choice {
            Choice::Win if options.win => Some(self.core.win(ActionKind::Hu, tile)),
            Choice::Pass => Some(Action::draw(tile)),
            Choice::Discard(discard) if !self.core.is_ready() => {
                if discard != tile && !self.core.hand().contains(discard) {
                    return None;
                }
                let hand = self.core.hand_mut();
                hand.add(tile);
                hand.discard(discard).ok()?;
                Some(Action::draw(discard))
            }
            Choice::Riichi(discard) if options.riichi.contains(&discard) => {
                if !self.core.declare_ready() {
                    return None;
                }
                let hand = self.core.hand_mut();
                hand.add(tile);
                hand.discard(discard).ok()?;
                Some(Action::riichi(discard))
            }
            Choice::Kong if options.kong => {
                if self.core.upgrade_pong(tile) {
                    return Some(Action::kong(ActionKind::AddedKong, tile));
                }
                self.core
                    .take_meld(tile, ActionKind::ConcealedKong, &[tile; 4])
                    .ok()?;
                Some(Action::kong(ActionKind::ConcealedKong, tile))
            }
            _ => None,
        }
    }

    fn decide_claim(&mut self, from: Relative, tile: Tile) -> Option<Action> {
        let options = self.claim_options(from, tile);
        if options.is_empty() {
            return None;
        }

        loop {
            let choice = self.ask(self.decide_prompt(tile, from, &options))?;
            match choice {
                Choice::Pass => return None,
                Choice::Win if options.win => return Some(self.core.win(ActionKind::Ron, tile)),
                Choice::Pong if options.pong => {
                    return self.claim_with_discard(tile, ActionKind::Pong, [tile; 3]);
                }
                Choice::Chow(bit) if options.chow.contains(bit) => {
                    if let Some(run) = options.chow.run(bit, tile) {
                        return self.claim_with_discard(tile, ActionKind::Chow, run);
                    }
                }
                Choice::Kong if options.kong => {
                    self.core.take_meld(tile, ActionKind::Kong, &[tile; 4]).ok()?;
                    let action = Action::kong(ActionKind::Kong, tile);
                    self.core.record_claim(action.clone(), tile);
                    return Some(action);
                }
                _ => {}
            }
            warn!("{} chose {:?} for offered {}, asking again", self.name, choice, tile);
        }
    }

    fn claim_with_discard(&mut self, tile: Tile, kind: ActionKind, meld: [Tile; 3]) -> Option<Action> {
        self.core.take_meld(tile, kind, &meld).ok()?;
        let discard = self.choose_claim_discard()?;
        self.core.hand_mut().discard(discard).ok()?;

        let action = match kind {
            ActionKind::Chow => Action::chow(discard, meld),
            _ => Action::pong(discard, tile),
        };
        self.core.record_claim(action.clone(), tile);
        Some(action)
    }

    /// Ask for the discard after a claim. Falls back to the automated pick.
    fn choose_claim_discard(&self) -> Option<Tile> {
        loop {
            let prompt = Prompt::Discard {
                hand: self.core.hand().clone(),
            };
            match self.ask(prompt) {
                Some(Choice::Discard(tile)) if self.core.hand().contains(tile) => return Some(tile),
                Some(choice) => warn!("{} chose {:?} as claim discard, asking again", self.name, choice),
                None => return choose_discard(self.core.hand()),
            }
        }
    }
}

impl Player for InteractivePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn init_hand(&mut self, tiles: &[Tile]) {
        self.core.init_hand(tiles);
    }

    fn decide(&mut self, from: Relative, tile: Tile) -> Option<Action> {
        self.core.begin_decision();
        if from == Relative::Own {
            Some(self.decide_own(tile))
        } else {
            self.decide_claim(from, tile)
        }
    }

    fn on_claim_failed(&mut self) {
        self.core.rollback();
    }

    fn on_hand_ended(&mut self, ended: &HandEnded) {
        self.core.reset();
        let _ = self.prompts.send(Prompt::HandEnded(*ended));
    }

    fn score(&self) -> i32 {
        self.core.score()
    }

    fn is_ready(&self) -> bool {
        self.core.is_ready()
    }
}
