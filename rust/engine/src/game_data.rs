use chrono::{DateTime, Utc};

use crate::errors::ModelError;
use crate::game::{CashGame, Game, Limit, ParsedGame, Tournament, Variant};
use crate::hand::GameType;

/// Game-level metadata discovered while parsing the first hand of a file
/// (and, for some formats, from the file name). Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GameData {
    pub game_type: GameType,
    pub game_id: String,
    pub game_name: String,
    pub table_name: String,
    pub max_seats: u32,
    pub variant: Variant,
    pub limit: Limit,
    pub small_blind: f64,
    pub big_blind: f64,
    pub buy_in: f64,
    pub is_real_money: bool,
    pub start_date: DateTime<Utc>,
}

impl GameData {
    /// Overwrites the fields a file name carries. File name values win.
    pub fn fill_from_file_stem(&mut self, info: &FileStemInfo) {
        self.is_real_money = info.is_real_money;
        self.game_name = info.game_name.clone();
        self.variant = info.variant;
        self.limit = info.limit;
    }

    /// Builds the empty game this metadata describes.
    pub fn into_game(self, site_name: &str) -> Result<ParsedGame, ModelError> {
        let game = Game::new(
            &self.game_id,
            site_name,
            &self.game_name,
            self.variant,
            self.limit,
            self.is_real_money,
            self.max_seats,
            self.start_date,
        )?;
        match self.game_type {
            GameType::CashGame => Ok(ParsedGame::Cash(CashGame::new(
                game,
                self.small_blind,
                self.big_blind,
            )?)),
            GameType::Tournament => Ok(ParsedGame::Tournament(Tournament::new(
                game,
                self.buy_in,
            )?)),
        }
    }
}

/// Metadata a file name encodes as underscore-delimited fields, e.g.
/// `20141116_Double or Nothing(100679030)_real_holdem_no-limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStemInfo {
    pub is_real_money: bool,
    pub game_name: String,
    pub variant: Variant,
    pub limit: Limit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(game_type: GameType) -> GameData {
        GameData {
            game_type,
            game_id: "100679030".into(),
            game_name: "Double or Nothing".into(),
            table_name: "Double or Nothing(100679030)#0".into(),
            max_seats: 6,
            variant: Variant::Omaha,
            limit: Limit::PotLimit,
            small_blind: 10.0,
            big_blind: 20.0,
            buy_in: 0.5,
            is_real_money: false,
            start_date: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn file_stem_overrides_hand_values() {
        let mut d = data(GameType::Tournament);
        d.fill_from_file_stem(&FileStemInfo {
            is_real_money: true,
            game_name: "Double or Nothing(100679030)".into(),
            variant: Variant::Holdem,
            limit: Limit::NoLimit,
        });
        assert!(d.is_real_money);
        assert_eq!(d.variant, Variant::Holdem);
        assert_eq!(d.limit, Limit::NoLimit);
        assert_eq!(d.game_name, "Double or Nothing(100679030)");
        assert_eq!(d.max_seats, 6);
    }

    #[test]
    fn tournament_data_builds_tournament() {
        match data(GameType::Tournament).into_game("Winamax").unwrap() {
            ParsedGame::Tournament(t) => assert_eq!(t.buy_in(), 0.5),
            ParsedGame::Cash(_) => panic!("expected a tournament"),
        }
    }

    #[test]
    fn cash_data_builds_cash_game() {
        match data(GameType::CashGame).into_game("Winamax").unwrap() {
            ParsedGame::Cash(c) => assert_eq!(c.big_blind(), 20.0),
            ParsedGame::Tournament(_) => panic!("expected a cash game"),
        }
    }
}
