//! # rust-mahjong
//!
//! A four-player Mahjong rules engine.
//!
//! ## Design Principles
//!
//! 1. **Values, not aliases**: Tiles are `Copy` faces; hands store immutable
//!    `(face, count)` entries. Nothing on the table is shared mutably.
//!
//! 2. **Explicit round state**: Dealer, wind and wall RNG position live in a
//!    `RoundState` value passed into and out of every hand.
//!
//! 3. **Pluggable seats**: The turn engine only knows the `Player` trait.
//!    Automated and channel-driven seats mix freely at one table.
//!
//! ## Architecture
//!
//! - **Turn engine**: A hand is a loop over the active seat. Discards are
//!   offered to the other seats in play order and competing claims are
//!   settled by kind priority (win > quad > triplet > run).
//!
//! - **Persistent snapshots**: Observers receive `TableView`s backed by
//!   `im-rs`, so keeping every snapshot is cheap.
//!
//! - **Heuristic hand analysis**: Win and ready detection use a greedy
//!   four-sets-plus-pair decomposition.
//!
//! ## Modules
//!
//! - `core`: Tiles, seats, actions, RNG, configuration, errors
//! - `hand`: Concealed hands, claim queries, win and ready detection
//! - `players`: The `Player` trait, automated and interactive seats
//! - `table`: Wall, turn engine, claim arbitration, observer contract

pub mod core;
pub mod hand;
pub mod players;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    Suit, Tile,
    Relative, Seat, SeatMap, SEATS,
    Action, ActionKind, ActionRecord, Meld,
    GameRng, GameRngState,
    TableConfig,
    DecisionPoint, EngineError, HandError,
};

pub use crate::hand::{Hand, HandEntry, Readiness, SequenceMask};

pub use crate::players::{
    Player, PlayerCore, PlayerStatus,
    AutoPlayer,
    InteractivePlayer, InteractiveHandle, Prompt, Choice, ClaimOptions,
};

pub use crate::table::{
    Board, Wall, RoundState,
    ClaimWindow, ClaimResolution,
    TableView, TableObserver, HandEnd, HandEnded, HandOutcome,
};
