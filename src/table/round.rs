//! Match progress between hands.
//!
//! A `RoundState` is passed into every hand and a new one comes back out.
//! It carries the RNG position, so replaying a match from its first state
//! deals exactly the same walls.

use serde::{Deserialize, Serialize};

use super::view::HandOutcome;
use crate::core::{GameRngState, Seat, TableConfig};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Prevailing wind (0 = East).
    pub wind: u8,

    /// Hand number within the wind; also the dealer offset.
    pub game: u8,

    /// Hands played so far, repeats included.
    pub hands_played: u32,

    /// Wall RNG position for the next hand.
    pub rng: GameRngState,
}

impl RoundState {
    /// State before the first hand of a match.
    #[must_use]
    pub fn new(config: &TableConfig) -> Self {
        Self {
            wind: 0,
            game: 0,
            hands_played: 0,
            rng: GameRngState::seeded(config.seed),
        }
    }

    /// Dealer of the next hand.
    #[must_use]
    pub fn dealer(&self, config: &TableConfig) -> Seat {
        config.starting_dealer.after(self.game as usize)
    }

    /// Has the last wind been played out?
    #[must_use]
    pub fn is_match_over(&self, config: &TableConfig) -> bool {
        self.wind >= config.winds_per_match
    }

    /// State after `outcome`. The deal passes only when someone other than
    /// the dealer wins.
    #[must_use]
    pub fn advance(&self, outcome: &HandOutcome, config: &TableConfig, rng: GameRngState) -> Self {
        let mut next = Self {
            hands_played: self.hands_played + 1,
            rng,
            ..self.clone()
        };

        if !outcome.dealer_repeats() {
            next.game += 1;
            if next.game >= config.hands_per_wind {
                next.wind += 1;
                next.game = 0;
            }
        }
        next
    }
}
