use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::action::Action;
use crate::cards::{serialize_card_slots, Card};
use crate::errors::ModelError;
use crate::seat::{Seat, MAX_SEATS};

/// Whether a hand was dealt at a cash table or in a tournament.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    CashGame,
    Tournament,
}

/// Field bundle gathered by a hand builder before the [`Hand`] is checked
/// and assembled.
#[derive(Debug)]
pub struct HandData {
    pub id: String,
    pub game_type: GameType,
    pub site_name: String,
    pub table_name: String,
    pub button_seat: Seat,
    pub max_seats: u32,
    pub level: u32,
    pub ante: f64,
    pub start_time: DateTime<Utc>,
    pub hero_cards: [Option<Card>; 5],
    pub board_cards: [Option<Card>; 5],
    /// Player name per seat, empty string for an empty seat.
    pub seats: [String; MAX_SEATS],
    pub actions: Vec<Action>,
    pub winners: [String; MAX_SEATS],
}

/// One complete dealt round, from blinds through showdown or fold-out.
#[derive(Debug, Serialize)]
pub struct Hand {
    id: String,
    game_type: GameType,
    site_name: String,
    table_name: String,
    button_seat: Seat,
    max_seats: u32,
    level: u32,
    ante: f64,
    start_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_card_slots")]
    hero_cards: [Option<Card>; 5],
    #[serde(serialize_with = "serialize_card_slots")]
    board_cards: [Option<Card>; 5],
    seats: [String; MAX_SEATS],
    actions: Vec<Action>,
    winners: [String; MAX_SEATS],
}

impl Hand {
    pub fn new(data: HandData) -> Result<Self, ModelError> {
        for (field, value) in [
            ("id", &data.id),
            ("site_name", &data.site_name),
            ("table_name", &data.table_name),
        ] {
            if value.is_empty() {
                return Err(ModelError::EmptyField {
                    entity: "Hand",
                    field,
                });
            }
        }
        if data.ante < 0.0 {
            return Err(ModelError::NegativeAmount {
                entity: "Hand",
                field: "ante",
            });
        }
        if data.seats.iter().all(String::is_empty) {
            return Err(ModelError::NoOccupiedSeat { hand_id: data.id });
        }

        Ok(Self {
            id: data.id,
            game_type: data.game_type,
            site_name: data.site_name,
            table_name: data.table_name,
            button_seat: data.button_seat,
            max_seats: data.max_seats,
            level: data.level,
            ante: data.ante,
            start_time: data.start_time,
            hero_cards: data.hero_cards,
            board_cards: data.board_cards,
            seats: data.seats,
            actions: data.actions,
            winners: data.winners,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn game_type(&self) -> GameType {
        self.game_type
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
    pub fn button_seat(&self) -> Seat {
        self.button_seat
    }
    pub fn max_seats(&self) -> u32 {
        self.max_seats
    }
    pub fn level(&self) -> u32 {
        self.level
    }
    pub fn ante(&self) -> f64 {
        self.ante
    }
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
    pub fn hero_cards(&self) -> &[Option<Card>; 5] {
        &self.hero_cards
    }
    pub fn board_cards(&self) -> &[Option<Card>; 5] {
        &self.board_cards
    }
    pub fn seats(&self) -> &[String; MAX_SEATS] {
        &self.seats
    }

    /// Name of the player at `seat`, `None` when empty or invalid.
    pub fn player_at(&self, seat: Seat) -> Option<&str> {
        let name = &self.seats[seat.to_index()?];
        (!name.is_empty()).then_some(name.as_str())
    }

    /// Names of all occupied seats in seat order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.seats
            .iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn winners(&self) -> impl Iterator<Item = &str> {
        self.winners
            .iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(seats: [String; MAX_SEATS]) -> HandData {
        HandData {
            id: "123-1-1".into(),
            game_type: GameType::CashGame,
            site_name: "Winamax".into(),
            table_name: "Nice 04".into(),
            button_seat: Seat::One,
            max_seats: 5,
            level: 0,
            ante: 0.0,
            start_time: DateTime::<Utc>::UNIX_EPOCH,
            hero_cards: [None; 5],
            board_cards: [None; 5],
            seats,
            actions: Vec::new(),
            winners: Default::default(),
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = Hand::new(data(Default::default())).unwrap_err();
        assert!(matches!(err, ModelError::NoOccupiedSeat { .. }));
    }

    #[test]
    fn player_at_reads_seat_slot() {
        let mut seats: [String; MAX_SEATS] = Default::default();
        seats[2] = "alice".into();
        let hand = Hand::new(data(seats)).unwrap();
        assert_eq!(hand.player_at(Seat::Three), Some("alice"));
        assert_eq!(hand.player_at(Seat::One), None);
        assert_eq!(hand.player_at(Seat::Unknown), None);
        assert_eq!(hand.players().collect::<Vec<_>>(), vec!["alice"]);
    }

    #[test]
    fn negative_ante_is_rejected() {
        let mut seats: [String; MAX_SEATS] = Default::default();
        seats[0] = "bob".into();
        let mut d = data(seats);
        d.ante = -1.0;
        assert!(Hand::new(d).is_err());
    }
}
