//! PokerStars hand histories.
//!
//! ```text
//! PokerStars Hand #125916315040:  Hold'em No Limit ($0.01/$0.02 USD) - 2014/10/31 0:45:01 CET [2014/10/30 19:45:01 ET]
//! Table 'Aase II' 9-max Seat #1 is the button
//! ```
//!
//! File names carry no metadata; everything comes from the first hand.

use std::path::{Path, PathBuf};

use super::{
    file_stem, has_txt_extension, parse_blinds, parse_table_fields, parse_timestamp,
    HandHeader, HistoryFormat, TableLine,
};
use crate::errors::ParseError;
use crate::game::{Limit, Variant};
use crate::game_data::GameData;
use crate::hand::GameType;
use crate::lexer::{between, roman_to_int, to_buy_in, wildcard_match};

pub const SITE_NAME: &str = "PokerStars";

const HAND_STARTS: [&str; 3] = [
    "PokerStars Hand #",
    "PokerStars Game #",
    "PokerStars Zoom Hand #",
];

/// Summaries and client-made copies sit next to the histories.
const EXCLUDED_STEMS: [&str; 3] = ["*_summary", "TS*", "* (*)"];

#[derive(Debug, Default, Clone, Copy)]
pub struct PokerStars;

impl HistoryFormat for PokerStars {
    fn site_name(&self) -> &'static str {
        SITE_NAME
    }

    fn is_hand_start(&self, line: &str) -> bool {
        HAND_STARTS.iter().any(|s| line.starts_with(s))
    }

    fn parse_header(&self, line: &str, file: &str) -> Result<HandHeader, ParseError> {
        let missing = |anchor| ParseError::MissingAnchor {
            file: file.to_string(),
            anchor,
            text: line.to_string(),
        };

        let hand_id = between(line, "#", ":")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("#"))?
            .to_string();

        let Some((body, date)) = line.rsplit_once(" - ") else {
            return Err(missing("YYYY/MM/DD H:MM:SS"));
        };
        let start_time = parse_timestamp(date).ok_or_else(|| missing("YYYY/MM/DD H:MM:SS"))?;

        let (small_blind, big_blind) = body
            .rfind('(')
            .and_then(|open| between(&body[open..], "(", ")"))
            .map_or((0.0, 0.0), parse_blinds);

        let (game_type, tournament_id, buy_in, level) =
            match line.split_once(" Tournament #") {
                Some((_, rest)) => {
                    let (id, after) = rest.split_once(',').unwrap_or((rest, ""));
                    let buy_in = after.split_whitespace().next().map_or(0.0, to_buy_in);
                    let level = between(line, "Level ", " (").map_or(0, |l| roman_to_int(l.trim()));
                    (GameType::Tournament, Some(id.trim().to_string()), buy_in, level)
                }
                None => (GameType::CashGame, None, 0.0, 0),
            };

        Ok(HandHeader {
            hand_id,
            game_type,
            tournament_name: tournament_id.as_ref().map(|id| format!("Tournament {}", id)),
            tournament_id,
            start_time,
            small_blind,
            big_blind,
            buy_in,
            level,
            variant: Variant::from_label(body),
            limit: Limit::from_label(body),
        })
    }

    fn parse_table_line(&self, line: &str, file: &str) -> Result<TableLine, ParseError> {
        if !line.starts_with("Table '") {
            return Err(ParseError::MissingAnchor {
                file: file.to_string(),
                anchor: "Table '",
                text: line.to_string(),
            });
        }
        let (table_name, max_seats, button_seat) = parse_table_fields(line, file)?;
        Ok(TableLine {
            table_name,
            max_seats,
            button_seat,
            is_real_money: Some(!line.contains("(Play Money)")),
        })
    }

    fn game_data(&self, header: &HandHeader, table: &TableLine, file_stem: &str) -> GameData {
        let game_id = match &header.tournament_id {
            Some(id) => id.clone(),
            None if file_stem.is_empty() => table.table_name.clone(),
            None => file_stem.to_string(),
        };
        GameData {
            game_type: header.game_type,
            game_id,
            game_name: header
                .tournament_name
                .clone()
                .unwrap_or_else(|| table.table_name.clone()),
            table_name: table.table_name.clone(),
            max_seats: table.max_seats,
            variant: header.variant,
            limit: header.limit,
            small_blind: header.small_blind,
            big_blind: header.big_blind,
            buy_in: header.buy_in,
            is_real_money: table.is_real_money.unwrap_or(true),
            start_date: header.start_time,
        }
    }

    fn history_dir(&self, dir: &Path) -> Option<PathBuf> {
        dir.is_dir().then(|| dir.to_path_buf())
    }

    fn is_eligible_file(&self, path: &Path) -> bool {
        let stem = file_stem(path);
        has_txt_extension(path) && !EXCLUDED_STEMS.iter().any(|p| wildcard_match(p, &stem))
    }
}
