use std::fmt;
use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::ModelError;
use crate::hand::Hand;

/// Poker variant. `None` is the lenient fallback for an unrecognised label.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    None,
    Holdem,
    Omaha,
    Omaha5,
}

impl Variant {
    /// Recognises variant labels from headers (`Holdem no limit`,
    /// `Hold'em No Limit`, `5 Card Omaha Pot Limit`) and filenames (`omaha5`).
    pub fn from_label(label: &str) -> Variant {
        let l = label.to_ascii_lowercase();
        if l.contains("omaha5") || l.contains("5 card omaha") || l.contains("omaha 5") {
            Variant::Omaha5
        } else if l.contains("omaha") {
            Variant::Omaha
        } else if l.contains("holdem") || l.contains("hold'em") {
            Variant::Holdem
        } else {
            Variant::None
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Variant::None => "none",
            Variant::Holdem => "holdem",
            Variant::Omaha => "omaha",
            Variant::Omaha5 => "omaha5",
        };
        f.write_str(s)
    }
}

/// Betting limit. `None` is the lenient fallback for an unrecognised label.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Limit {
    None,
    NoLimit,
    PotLimit,
}

impl Limit {
    /// Recognises `no limit`, `No Limit`, `no-limit`, `pot limit`, `pot-limit`.
    pub fn from_label(label: &str) -> Limit {
        let l = label.to_ascii_lowercase().replace('-', " ");
        if l.contains("no limit") {
            Limit::NoLimit
        } else if l.contains("pot limit") {
            Limit::PotLimit
        } else {
            Limit::None
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Limit::None => "none",
            Limit::NoLimit => "no-limit",
            Limit::PotLimit => "pot-limit",
        };
        f.write_str(s)
    }
}

/// A sequence of hands played at one table or in one tournament, as stored in
/// one history file. Hands keep parse order.
#[derive(Debug, Serialize)]
pub struct Game {
    id: String,
    site_name: String,
    name: String,
    variant: Variant,
    limit: Limit,
    is_real_money: bool,
    max_seats: u32,
    start_date: DateTime<Utc>,
    hands: Vec<Hand>,
}

impl Game {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        site_name: &str,
        name: &str,
        variant: Variant,
        limit: Limit,
        is_real_money: bool,
        max_seats: u32,
        start_date: DateTime<Utc>,
    ) -> Result<Self, ModelError> {
        for (field, value) in [("id", id), ("site_name", site_name), ("name", name)] {
            if value.is_empty() {
                return Err(ModelError::EmptyField {
                    entity: "Game",
                    field,
                });
            }
        }
        if max_seats == 0 {
            return Err(ModelError::MaxSeatsUndefined {
                game_id: id.to_string(),
            });
        }
        Ok(Self {
            id: id.to_string(),
            site_name: site_name.to_string(),
            name: name.to_string(),
            variant,
            limit,
            is_real_money,
            max_seats,
            start_date,
            hands: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn limit(&self) -> Limit {
        self.limit
    }
    pub fn is_real_money(&self) -> bool {
        self.is_real_money
    }
    pub fn max_seats(&self) -> u32 {
        self.max_seats
    }
    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }
    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    /// Appends a hand, taking ownership of it.
    pub fn add_hand(&mut self, hand: Hand) {
        self.hands.push(hand);
    }
}

fn non_negative(value: f64, entity: &'static str, field: &'static str) -> Result<f64, ModelError> {
    if value < 0.0 {
        Err(ModelError::NegativeAmount { entity, field })
    } else {
        Ok(value)
    }
}

/// A cash table session: a [`Game`] plus its blinds.
#[derive(Debug, Serialize)]
pub struct CashGame {
    #[serde(flatten)]
    game: Game,
    small_blind: f64,
    big_blind: f64,
}

impl CashGame {
    pub fn new(game: Game, small_blind: f64, big_blind: f64) -> Result<Self, ModelError> {
        Ok(Self {
            small_blind: non_negative(small_blind, "CashGame", "small_blind")?,
            big_blind: non_negative(big_blind, "CashGame", "big_blind")?,
            game,
        })
    }

    pub fn small_blind(&self) -> f64 {
        self.small_blind
    }
    pub fn big_blind(&self) -> f64 {
        self.big_blind
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
}

impl Deref for CashGame {
    type Target = Game;
    fn deref(&self) -> &Game {
        &self.game
    }
}

impl DerefMut for CashGame {
    fn deref_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}

/// A tournament: a [`Game`] plus its total buy-in.
#[derive(Debug, Serialize)]
pub struct Tournament {
    #[serde(flatten)]
    game: Game,
    buy_in: f64,
}

impl Tournament {
    pub fn new(game: Game, buy_in: f64) -> Result<Self, ModelError> {
        Ok(Self {
            buy_in: non_negative(buy_in, "Tournament", "buy_in")?,
            game,
        })
    }

    pub fn buy_in(&self) -> f64 {
        self.buy_in
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
}

impl Deref for Tournament {
    type Target = Game;
    fn deref(&self) -> &Game {
        &self.game
    }
}

impl DerefMut for Tournament {
    fn deref_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}

/// The game produced from one history file.
#[derive(Debug)]
pub enum ParsedGame {
    Cash(CashGame),
    Tournament(Tournament),
}

impl Deref for ParsedGame {
    type Target = Game;
    fn deref(&self) -> &Game {
        match self {
            ParsedGame::Cash(g) => g,
            ParsedGame::Tournament(t) => t,
        }
    }
}

impl DerefMut for ParsedGame {
    fn deref_mut(&mut self) -> &mut Game {
        match self {
            ParsedGame::Cash(g) => g,
            ParsedGame::Tournament(t) => t,
        }
    }
}
