//! The table: wall, turn engine, claim arbitration and what observers see.

pub mod wall;
pub mod claims;
pub mod round;
pub mod view;
pub mod board;

pub use wall::Wall;
pub use claims::{ClaimResolution, ClaimWindow};
pub use round::RoundState;
pub use view::{HandEnd, HandEnded, HandOutcome, TableObserver, TableView};
pub use board::Board;
