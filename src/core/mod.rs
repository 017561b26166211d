//! Core value types: tiles, seats, actions, RNG, configuration, errors.
//!
//! Everything here is a plain value: cheap to copy or clone, serializable,
//! and free of references to the table or the players.

pub mod tile;
pub mod seat;
pub mod action;
pub mod rng;
pub mod config;
pub mod error;

pub use tile::{Suit, Tile};
pub use seat::{Relative, Seat, SeatMap, SEATS};
pub use action::{Action, ActionKind, ActionRecord, Meld};
pub use rng::{GameRng, GameRngState};
pub use config::TableConfig;
pub use error::{DecisionPoint, EngineError, HandError};
