//! Concealed hands: storage, claim queries and win detection.

#[allow(clippy::module_inception)]
pub mod hand;
pub mod ready;

pub use hand::{Hand, HandEntry, SequenceMask};
pub use ready::Readiness;
