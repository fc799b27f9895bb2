use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::errors::TokenError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Suit {
    /// Clubs suit (c)
    Clubs,
    /// Diamonds suit (d)
    Diamonds,
    /// Hearts suit (h)
    Hearts,
    /// Spades suit (s)
    Spades,
}

impl Suit {
    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A single playing card as it appears in hand history text, e.g. `Ah` or `Td`.
///
/// The "no card" slot of fixed-size card arrays is `Option<Card>::None`; see
/// [`card_token`] and [`parse_card_token`] for the 53-symbol form.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
}

/// Token used for an empty card slot.
pub const NO_CARD: &str = "none";

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => match (Rank::from_char(r), Suit::from_char(su)) {
                (Some(rank), Some(suit)) => Ok(Card { rank, suit }),
                _ => Err(TokenError::new("card", s)),
            },
            _ => Err(TokenError::new("card", s)),
        }
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Renders a card slot, `"none"` for an empty one.
pub fn card_token(card: Option<Card>) -> String {
    match card {
        Some(c) => c.to_string(),
        None => NO_CARD.to_string(),
    }
}

/// Serializes a row of card slots as tokens, `"none"` for empty slots.
pub fn serialize_card_slots<S: Serializer>(
    slots: &[Option<Card>; 5],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(slots.iter().map(|c| card_token(*c)))
}

/// Inverse of [`card_token`].
pub fn parse_card_token(token: &str) -> Result<Option<Card>, TokenError> {
    if token == NO_CARD {
        return Ok(None);
    }
    token.parse().map(Some)
}

/// Splits the inside of a `[...]` group into cards and pads the result to a
/// fixed five-slot array. Extra cards beyond five are dropped.
pub fn parse_card_group(group: &str, delimiter: &str) -> Result<[Option<Card>; 5], TokenError> {
    let mut slots = [None; 5];
    let tokens = group
        .split(delimiter)
        .map(str::trim)
        .filter(|t| !t.is_empty());
    for (slot, token) in slots.iter_mut().zip(tokens) {
        *slot = Some(token.parse()?);
    }
    Ok(slots)
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
