//! Win and ready detection.
//!
//! The search only recognises the four-sets-plus-pair shape and is greedy:
//! triplets are always stripped before runs, and runs are stripped in one
//! direction per suit. Some legal hands with overlapping shapes are missed.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::hand::{Hand, HandEntry};
use crate::core::{Suit, Tile};

/// Outcome of [`Hand::ready_tiles`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    /// Hand plus the tile is a winning shape.
    Complete,
    /// Faces whose discard from hand plus the tile leaves a ready hand.
    /// Empty when the hand is not one tile away.
    Waiting(Vec<Tile>),
}

impl Readiness {
    /// Is this a winning shape?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Readiness::Complete)
    }

    /// The reported faces (empty for `Complete`).
    #[must_use]
    pub fn faces(&self) -> &[Tile] {
        match self {
            Readiness::Complete => &[],
            Readiness::Waiting(faces) => faces,
        }
    }

    /// Is the hand one discard away from ready?
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.faces().is_empty()
    }
}

/// Faces collected during the search, in discovery order.
#[derive(Default)]
struct Found {
    seen: FxHashSet<Tile>,
    faces: Vec<Tile>,
}

impl Found {
    fn push(&mut self, tile: Tile) {
        if self.seen.insert(tile) {
            self.faces.push(tile);
        }
    }
}

fn consecutive(a: HandEntry, b: HandEntry) -> bool {
    a.tile().suit() == b.tile().suit()
        && a.tile().suit().is_numeric()
        && a.tile().index() + 1 == b.tile().index()
}

/// Read candidate faces off the tiles a decomposition left behind.
fn read_leftover(rest: &Hand, paired: bool, found: &mut Found) {
    let left: SmallVec<[HandEntry; 4]> = rest.entries().take(4).collect();
    let singles = left.iter().all(|e| e.count() == 1);

    match (paired, left.as_slice()) {
        (true, [a, b]) => {
            if (a.count(), b.count()) == (2, 1) {
                found.push(b.tile());
            }
            if (a.count(), b.count()) == (1, 2) {
                found.push(a.tile());
            }
        }
        (true, [a, b, c]) if singles => {
            if consecutive(*a, *b) {
                found.push(c.tile());
            }
            if consecutive(*b, *c) {
                found.push(a.tile());
            }
        }
        (false, [a, b]) if singles => {
            found.push(a.tile());
            found.push(b.tile());
        }
        _ => {}
    }
}

impl Hand {
    /// Check the hand with `tile` added.
    ///
    /// Returns [`Readiness::Complete`] when the 14 tiles decompose into four
    /// sets and a pair. Otherwise lists the faces that could be discarded to
    /// leave a ready hand; for a single-wait hand this is the waiting face.
    /// A face already held four times is never a legal fifth copy and yields
    /// an empty list.
    ///
    /// ```
    /// use rust_mahjong::hand::{Hand, Readiness};
    /// use rust_mahjong::core::{Suit, Tile};
    ///
    /// let hand: Hand = "123m456p789s111z5z".parse().unwrap();
    /// let red = Tile::new(Suit::Honor, 4).unwrap();
    /// assert_eq!(hand.ready_tiles(red), Readiness::Complete);
    /// ```
    #[must_use]
    pub fn ready_tiles(&self, tile: Tile) -> Readiness {
        if self.count(tile) as usize >= Tile::COPIES {
            return Readiness::Waiting(Vec::new());
        }

        let mut full = self.clone();
        full.add(tile);

        let pairs: SmallVec<[Option<Tile>; 8]> = full
            .entries()
            .filter(|e| e.count() >= 2)
            .map(|e| Some(e.tile()))
            .chain(std::iter::once(None))
            .collect();

        let mut found = Found::default();
        for pair in pairs {
            let mut base = full.clone();
            if let Some(face) = pair {
                if base.discard(face).and_then(|()| base.discard(face)).is_err() {
                    continue;
                }
            }
            base.strip_groups(3);

            for directions in 0..8u8 {
                let mut rest = base.clone();
                for suit in Suit::NUMERIC {
                    rest.strip_runs(suit, directions & (1 << suit.index()) == 0);
                }

                match rest.occupied_suits() {
                    0 => return Readiness::Complete,
                    1 | 2 => read_leftover(&rest, pair.is_some(), &mut found),
                    _ => {}
                }
            }
        }

        Readiness::Waiting(found.faces)
    }

    /// Is the hand plus `tile` a winning shape?
    #[must_use]
    pub fn completes_with(&self, tile: Tile) -> bool {
        self.ready_tiles(tile).is_complete()
    }
}
