//! Seat decision policies.
//!
//! The board talks to every seat through the [`Player`] trait. Two policies
//! are provided:
//!
//! - [`AutoPlayer`]: greedy automated play
//! - [`InteractivePlayer`]: forwards each decision to a front end over a
//!   channel and blocks until it answers
//!
//! Both keep their per-hand state in a [`PlayerCore`].

pub mod core;
pub mod discard;
pub mod auto;
pub mod interactive;

pub use self::core::{PlayerCore, PlayerStatus};
pub use auto::AutoPlayer;
pub use discard::choose_discard;
pub use interactive::{Choice, ClaimOptions, InteractiveHandle, InteractivePlayer, Prompt};

use crate::core::{Action, Relative, Tile};
use crate::table::HandEnded;

/// A seat's decision policy.
///
/// ## Contract
///
/// - `decide` with `from == Relative::Own` is the seat's own draw and must
///   return an action. The tile has not been added to the hand yet.
/// - `decide` with any other origin is a claim offer; `None` passes.
/// - A policy that claims updates its hand immediately. If the board picks
///   another claim it calls `on_claim_failed`, which must restore the hand.
pub trait Player {
    /// Display name.
    fn name(&self) -> &str;

    /// Receive the dealt tiles and reset per-hand state.
    fn init_hand(&mut self, tiles: &[Tile]);

    /// Decide what to do with a drawn or offered tile.
    fn decide(&mut self, from: Relative, tile: Tile) -> Option<Action>;

    /// The last claim lost arbitration.
    fn on_claim_failed(&mut self);

    /// The hand is over.
    fn on_hand_ended(&mut self, ended: &HandEnded);

    /// Current score.
    fn score(&self) -> i32;

    /// Has this seat declared ready?
    fn is_ready(&self) -> bool;
}
