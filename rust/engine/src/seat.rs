use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::TokenError;

/// Number of seat slots carried by every hand.
pub const MAX_SEATS: usize = 10;

/// A table position, 1-based as printed in hand histories.
/// `Unknown` is never a valid table position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum Seat {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Unknown,
}

const SEATS: [Seat; MAX_SEATS] = [
    Seat::One,
    Seat::Two,
    Seat::Three,
    Seat::Four,
    Seat::Five,
    Seat::Six,
    Seat::Seven,
    Seat::Eight,
    Seat::Nine,
    Seat::Ten,
];

impl Seat {
    /// Maps 1..=10 to a seat, anything else to `Unknown`.
    pub fn from_int(n: u32) -> Seat {
        match n {
            1..=10 => SEATS[n as usize - 1],
            _ => Seat::Unknown,
        }
    }

    /// 1-based seat number, `0` for `Unknown`.
    pub fn to_int(self) -> u32 {
        self.to_index().map_or(0, |i| i as u32 + 1)
    }

    /// Maps a 0-based array index to a seat.
    pub fn from_index(index: usize) -> Seat {
        SEATS.get(index).copied().unwrap_or(Seat::Unknown)
    }

    /// 0-based array index into a 10-slot seat array.
    pub fn to_index(self) -> Option<usize> {
        SEATS.iter().position(|&s| s == self)
    }

    pub fn is_valid(self) -> bool {
        self != Seat::Unknown
    }

    pub fn all() -> [Seat; MAX_SEATS] {
        SEATS
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Unknown => write!(f, "unknown"),
            s => write!(f, "{}", s.to_int()),
        }
    }
}

impl FromStr for Seat {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "unknown" {
            return Ok(Seat::Unknown);
        }
        match s.parse::<u32>() {
            Ok(n @ 1..=10) => Ok(Seat::from_int(n)),
            _ => Err(TokenError::new("seat", s)),
        }
    }
}
