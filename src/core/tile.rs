//! Tile faces and suits.
//!
//! A [`Tile`] is an immutable face identifier: `suit * 9 + rank`, giving 34
//! distinct faces. How many copies of a face a hand holds is tracked by the
//! hand itself, never by the tile.

use serde::{Deserialize, Serialize};

/// Tile suit.
///
/// The three numeric suits carry ranks 0-8; honours carry ranks 0-6
/// (the four winds followed by the three dragons).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    /// Characters (萬).
    Wan = 0,
    /// Circles (筒).
    Tong = 1,
    /// Bamboo (條).
    Tiao = 2,
    /// Winds and dragons (字).
    Honor = 3,
}

impl Suit {
    /// All suits, numeric first.
    pub const ALL: [Suit; 4] = [Suit::Wan, Suit::Tong, Suit::Tiao, Suit::Honor];

    /// The numeric suits.
    pub const NUMERIC: [Suit; 3] = [Suit::Wan, Suit::Tong, Suit::Tiao];

    /// Suit from its index (0-3).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Wan),
            1 => Some(Suit::Tong),
            2 => Some(Suit::Tiao),
            3 => Some(Suit::Honor),
            _ => None,
        }
    }

    /// Suit index (0-3).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of ranks in this suit.
    #[must_use]
    pub const fn ranks(self) -> u8 {
        match self {
            Suit::Honor => 7,
            _ => 9,
        }
    }

    /// Is this one of the three numeric suits?
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Suit::Honor)
    }

    /// Compact notation letter (`m`, `p`, `s`, `z`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Wan => 'm',
            Suit::Tong => 'p',
            Suit::Tiao => 's',
            Suit::Honor => 'z',
        }
    }

    /// Suit from a compact notation letter.
    #[must_use]
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'm' => Some(Suit::Wan),
            'p' => Some(Suit::Tong),
            's' => Some(Suit::Tiao),
            'z' => Some(Suit::Honor),
            _ => None,
        }
    }
}

/// One of the 34 tile faces.
///
/// Equality and ordering follow the face index, so sorting tiles sorts them
/// by suit and then by rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tile(u8);

const NUMERALS: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];
const SUIT_GLYPHS: [&str; 3] = ["萬", "筒", "條"];
const HONOR_GLYPHS: [&str; 7] = ["東", "南", "西", "北", "中", "發", "白"];

impl Tile {
    /// Number of distinct faces.
    pub const FACES: usize = 34;

    /// Copies of each face in a full set.
    pub const COPIES: usize = 4;

    /// Create a tile from suit and 0-based rank.
    ///
    /// Returns `None` if the rank is out of range for the suit.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Option<Self> {
        if rank >= suit.ranks() {
            return None;
        }
        Some(Self(suit as u8 * 9 + rank))
    }

    /// Create a tile from its face index (0-33).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::FACES {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Face index (`suit * 9 + rank`).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Suit of this face.
    #[must_use]
    pub const fn suit(self) -> Suit {
        match self.0 / 9 {
            0 => Suit::Wan,
            1 => Suit::Tong,
            2 => Suit::Tiao,
            _ => Suit::Honor,
        }
    }

    /// 0-based rank within the suit.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 % 9
    }

    /// Is this a wind or dragon?
    #[must_use]
    pub const fn is_honor(self) -> bool {
        !self.suit().is_numeric()
    }

    /// Is this a numeric 1 or 9?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.suit().is_numeric() && (self.rank() == 0 || self.rank() == 8)
    }

    /// The face `offset` ranks away in the same suit, if it exists.
    #[must_use]
    pub fn offset(self, offset: i8) -> Option<Self> {
        let rank = self.rank() as i8 + offset;
        if rank < 0 {
            return None;
        }
        Self::new(self.suit(), rank as u8)
    }

    /// Iterate over all 34 faces in index order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..Self::FACES as u8).map(Tile)
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.suit() {
            Suit::Honor => write!(f, "{}", HONOR_GLYPHS[self.rank() as usize]),
            suit => write!(
                f,
                "{}{}",
                NUMERALS[self.rank() as usize],
                SUIT_GLYPHS[suit.index()]
            ),
        }
    }
}
