//! Seats around the table and per-seat storage.
//!
//! ## Seat
//!
//! One of the four seats, 0-based. Play rotates `0 → 1 → 2 → 3 → 0`.
//!
//! ## Relative
//!
//! Where a tile came from, seen from the seat receiving it. The raw value is
//! `(origin - receiver) mod 4`, so `Previous` (3) is the seat that plays
//! immediately before the receiver.
//!
//! ## SeatMap
//!
//! Fixed four-entry storage indexed by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at a table.
pub const SEATS: usize = 4;

/// Seat identifier (0-3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat(u8);

impl Seat {
    /// Create a seat, wrapping the index into 0-3.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % SEATS as u8)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat `steps` positions later in play order.
    #[must_use]
    pub const fn after(self, steps: usize) -> Self {
        Self(((self.0 as usize + steps) % SEATS) as u8)
    }

    /// The next seat in play order.
    #[must_use]
    pub const fn next(self) -> Self {
        self.after(1)
    }

    /// Where `origin` sits as seen from this seat.
    #[must_use]
    pub const fn relative(self, origin: Seat) -> Relative {
        Relative::from_offset((origin.0 as usize + SEATS - self.0 as usize) % SEATS)
    }

    /// Iterate over all four seats.
    ///
    /// ```
    /// use rust_mahjong::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all().collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], Seat::new(3));
    /// ```
    pub fn all() -> impl Iterator<Item = Seat> {
        (0..SEATS as u8).map(Seat)
    }

    /// The other three seats, in play order after this one.
    pub fn others(self) -> impl Iterator<Item = Seat> {
        (1..SEATS).map(move |step| self.after(step))
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Origin of an offered tile, relative to the receiving seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Relative {
    /// Drawn by the receiver itself.
    Own = 0,
    /// Discarded by the seat after the receiver.
    Next = 1,
    /// Discarded by the seat across the table.
    Opposite = 2,
    /// Discarded by the seat before the receiver.
    Previous = 3,
}

impl Relative {
    /// Relative position from a raw offset (taken mod 4).
    #[must_use]
    pub const fn from_offset(offset: usize) -> Self {
        match offset % SEATS {
            0 => Relative::Own,
            1 => Relative::Next,
            2 => Relative::Opposite,
            _ => Relative::Previous,
        }
    }

    /// Raw offset value.
    #[must_use]
    pub const fn offset(self) -> u8 {
        self as u8
    }
}

/// Per-seat data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; SEATS],
}

impl<T> SeatMap<T> {
    /// Create a SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            data: [
                factory(Seat(0)),
                factory(Seat(1)),
                factory(Seat(2)),
                factory(Seat(3)),
            ],
        }
    }

    /// Create a SeatMap from values in seat order.
    pub fn from_array(data: [T; SEATS]) -> Self {
        Self { data }
    }

    /// Create a SeatMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a SeatMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over (Seat, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}
