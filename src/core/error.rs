//! Error types.
//!
//! Hand errors are local and recoverable: the caller gets a failure value
//! and carries on. Engine errors mean a decision policy broke the turn
//! contract; the turn loop stops and returns them.

use super::action::ActionKind;
use super::seat::Seat;
use super::tile::Tile;

/// Failure of a hand mutation or hand parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandError {
    /// The tile to remove is not held.
    TileNotHeld(Tile),
    /// Compact notation could not be parsed.
    InvalidNotation(String),
}

impl std::fmt::Display for HandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandError::TileNotHeld(tile) => write!(f, "tile not held: {}", tile),
            HandError::InvalidNotation(text) => write!(f, "invalid hand notation: {}", text),
        }
    }
}

impl std::error::Error for HandError {}

/// Where in the turn a decision was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionPoint {
    /// After the seat drew a tile.
    OwnDraw,
    /// When offered another seat's discard.
    Claim,
    /// Converting a raw kind value.
    Raw,
}

impl std::fmt::Display for DecisionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionPoint::OwnDraw => write!(f, "own draw"),
            DecisionPoint::Claim => write!(f, "claim"),
            DecisionPoint::Raw => write!(f, "raw value"),
        }
    }
}

/// Fatal turn-loop error caused by a decision policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A decision returned a kind that is not valid at this point.
    InvalidActionKind {
        seat: Option<Seat>,
        value: u8,
        point: DecisionPoint,
    },
    /// A seat returned no action after drawing.
    MissingDecision { seat: Seat },
    /// An action's tile list does not match its kind.
    MalformedAction { seat: Seat, kind: ActionKind },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidActionKind { seat: Some(seat), value, point } => {
                write!(f, "{} returned action kind {} at {}", seat, value, point)
            }
            EngineError::InvalidActionKind { seat: None, value, point } => {
                write!(f, "unknown action kind {} ({})", value, point)
            }
            EngineError::MissingDecision { seat } => {
                write!(f, "{} made no decision after drawing", seat)
            }
            EngineError::MalformedAction { seat, kind } => {
                write!(f, "{} returned a malformed {:?} action", seat, kind)
            }
        }
    }
}

impl std::error::Error for EngineError {}
