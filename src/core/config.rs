//! Table configuration.
//!
//! Everything that was a process-wide constant in a typical Mahjong client
//! (starting score, match length, dealer, wall layout) is set here once and
//! handed to the [`Board`](crate::table::Board).

use serde::{Deserialize, Serialize};

use super::seat::Seat;

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Seed for wall shuffling.
    pub seed: u64,

    /// Score every seat starts the match with.
    pub initial_score: i32,

    /// Prevailing winds played before the match ends (1 = East only).
    pub winds_per_match: u8,

    /// Hands each prevailing wind lasts when no dealer repeats.
    pub hands_per_wind: u8,

    /// Tiles dealt to each seat.
    pub hand_size: usize,

    /// Tiles kept back as the quad replacement reserve.
    pub dead_wall: usize,

    /// Seat dealing the first hand.
    pub starting_dealer: Seat,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            initial_score: 25_000,
            winds_per_match: 1,
            hands_per_wind: 4,
            hand_size: 13,
            dead_wall: 14,
            starting_dealer: Seat::new(0),
        }
    }
}

impl TableConfig {
    /// Create a configuration with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting score.
    #[must_use]
    pub fn with_initial_score(mut self, score: i32) -> Self {
        self.initial_score = score;
        self
    }

    /// Set the number of prevailing winds in a match.
    #[must_use]
    pub fn with_winds(mut self, winds: u8) -> Self {
        assert!((1..=4).contains(&winds), "Match must last 1-4 winds");
        self.winds_per_match = winds;
        self
    }

    /// Set the dead wall size.
    #[must_use]
    pub fn with_dead_wall(mut self, tiles: usize) -> Self {
        self.dead_wall = tiles;
        self
    }

    /// Set the first dealer.
    #[must_use]
    pub fn with_dealer(mut self, seat: Seat) -> Self {
        self.starting_dealer = seat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::new();
        assert_eq!(config.initial_score, 25_000);
        assert_eq!(config.winds_per_match, 1);
        assert_eq!(config.hand_size, 13);
        assert_eq!(config.dead_wall, 14);
        assert_eq!(config.starting_dealer, Seat::new(0));
    }

    #[test]
    fn test_builder() {
        let config = TableConfig::new()
            .with_seed(9)
            .with_initial_score(30_000)
            .with_winds(2)
            .with_dead_wall(0)
            .with_dealer(Seat::new(3));

        assert_eq!(config.seed, 9);
        assert_eq!(config.initial_score, 30_000);
        assert_eq!(config.winds_per_match, 2);
        assert_eq!(config.dead_wall, 0);
        assert_eq!(config.starting_dealer, Seat::new(3));
    }

    #[test]
    #[should_panic(expected = "Match must last 1-4 winds")]
    fn test_zero_winds() {
        let _ = TableConfig::new().with_winds(0);
    }

    #[test]
    fn test_config_serde() {
        let config = TableConfig::new().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let restored: TableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
