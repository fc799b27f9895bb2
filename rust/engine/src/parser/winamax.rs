//! Winamax hand histories.
//!
//! ```text
//! Winamax Poker - CashGame - HandId: #5486312-79-1415836185 - Holdem no limit (0.01€/0.02€) - 2014/11/12 23:49:45 UTC
//! Table: 'Nice 04' 5-max (real money) Seat #3 is the button
//! ```
//!
//! Tournament headers carry `Tournament "<name>" buyIn: 0.45€ + 0.05€ level: 1`
//! before the hand id. File names encode the money type, variant and limit:
//! `20141116_Double or Nothing(100679030)_real_holdem_no-limit.txt`, and those
//! values take precedence over what the first hand says.

use std::path::{Path, PathBuf};

use super::{
    file_stem, has_txt_extension, parse_blinds, parse_table_fields, parse_timestamp,
    HandHeader, HistoryFormat, TableLine,
};
use crate::errors::ParseError;
use crate::game::{Limit, Variant};
use crate::game_data::{FileStemInfo, GameData};
use crate::hand::GameType;
use crate::lexer::{between, to_amount, to_buy_in, wildcard_match};

pub const SITE_NAME: &str = "Winamax";

const HAND_START: &str = "Winamax Poker - ";
const HISTORY_SUBDIR: &str = "history";
// Shortest stem that still carries date, name, money, variant and limit.
const SHORTEST_STEM: &str = "00000000_x_real_omaha_no-limit";

#[derive(Debug, Default, Clone, Copy)]
pub struct Winamax;

/// Splits a Winamax file stem into the metadata it encodes. Returns `None`
/// for stems that are too short, duplicate copies (`..._no-limit(1)`), or
/// carry an ambiguous money marker.
pub fn parse_file_stem(stem: &str) -> Option<FileStemInfo> {
    if stem.len() < SHORTEST_STEM.len() || is_duplicate_stem(stem) {
        return None;
    }
    if stem.contains("_real_") && stem.contains("_play_") {
        return None;
    }

    let parts: Vec<&str> = stem.split('_').collect();
    let n = parts.len();
    if n < 5 {
        return None;
    }
    let is_real_money = match parts[n - 3] {
        "real" => true,
        "play" => false,
        _ => return None,
    };

    Some(FileStemInfo {
        is_real_money,
        game_name: parts[1..n - 3].join("_"),
        variant: Variant::from_label(parts[n - 2]),
        limit: Limit::from_label(parts[n - 1]),
    })
}

/// Copies written by the client end with a `(N)` counter after the limit.
pub fn is_duplicate_stem(stem: &str) -> bool {
    stem.ends_with(')')
        && stem
            .rsplit('_')
            .next()
            .is_some_and(|last| last.contains('('))
}

impl HistoryFormat for Winamax {
    fn site_name(&self) -> &'static str {
        SITE_NAME
    }

    fn is_hand_start(&self, line: &str) -> bool {
        line.starts_with(HAND_START)
    }

    fn parse_header(&self, line: &str, file: &str) -> Result<HandHeader, ParseError> {
        let missing = |anchor| ParseError::MissingAnchor {
            file: file.to_string(),
            anchor,
            text: line.to_string(),
        };

        let id_start = line.find("HandId: #").ok_or_else(|| missing("HandId: #"))?;
        let segments: Vec<&str> = line[id_start + "HandId: #".len()..].split(" - ").collect();
        let hand_id = segments[0].trim().to_string();
        if hand_id.is_empty() || segments.len() < 2 {
            return Err(missing("HandId: #"));
        }
        let start_time = segments
            .last()
            .and_then(|s| parse_timestamp(s))
            .ok_or_else(|| missing("YYYY/MM/DD HH:MM:SS"))?;

        // Game label and blinds sit between the hand id and the date.
        let game = if segments.len() >= 3 { segments[1] } else { "" };
        let label = game.split(" (").next().unwrap_or_default();
        let (small_blind, big_blind) = between(game, "(", ")").map_or((0.0, 0.0), parse_blinds);

        let prefix = &line[..id_start];
        let (game_type, tournament_id, tournament_name, buy_in, level) =
            if prefix.contains("Tournament \"") {
                let buy_in = between(prefix, "buyIn: ", " level: ")
                    .or_else(|| between(prefix, "buyIn: ", " - "))
                    .map_or(0.0, to_buy_in);
                let level = between(prefix, "level: ", " - ").map_or(0, |l| to_amount(l) as u32);
                (
                    GameType::Tournament,
                    hand_id.split('-').next().map(str::to_string),
                    between(prefix, "Tournament \"", "\"").map(str::to_string),
                    buy_in,
                    level,
                )
            } else {
                (GameType::CashGame, None, None, 0.0, 0)
            };

        Ok(HandHeader {
            hand_id,
            game_type,
            tournament_id,
            tournament_name,
            start_time,
            small_blind,
            big_blind,
            buy_in,
            level,
            variant: Variant::from_label(label),
            limit: Limit::from_label(label),
        })
    }

    fn parse_table_line(&self, line: &str, file: &str) -> Result<TableLine, ParseError> {
        if !line.starts_with("Table: ") {
            return Err(ParseError::MissingAnchor {
                file: file.to_string(),
                anchor: "Table: ",
                text: line.to_string(),
            });
        }
        let (table_name, max_seats, button_seat) = parse_table_fields(line, file)?;
        let is_real_money = if line.contains("(real money)") {
            Some(true)
        } else if line.contains("(play money)") {
            Some(false)
        } else {
            None
        };
        Ok(TableLine {
            table_name,
            max_seats,
            button_seat,
            is_real_money,
        })
    }

    /// Hand values first, then the file name overwrites variant, limit,
    /// money type and game name.
    fn game_data(&self, header: &HandHeader, table: &TableLine, file_stem: &str) -> GameData {
        let game_id = match &header.tournament_id {
            Some(id) => id.clone(),
            None if file_stem.is_empty() => table.table_name.clone(),
            None => file_stem.to_string(),
        };
        let mut data = GameData {
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
        };
        if let Some(info) = parse_file_stem(file_stem) {
            data.fill_from_file_stem(&info);
        }
        data
    }

    fn accepts_file_stem(&self, file_stem: &str) -> bool {
        parse_file_stem(file_stem).is_some()
    }

    /// Accepts either an account directory holding `history/` or the
    /// `history/` directory itself.
    fn history_dir(&self, dir: &Path) -> Option<PathBuf> {
        if !dir.is_dir() {
            return None;
        }
        if dir.file_name().is_some_and(|n| n == HISTORY_SUBDIR) {
            return Some(dir.to_path_buf());
        }
        let sub = dir.join(HISTORY_SUBDIR);
        sub.is_dir().then_some(sub)
    }

    fn is_eligible_file(&self, path: &Path) -> bool {
        let stem = file_stem(path);
        has_txt_extension(path) && !wildcard_match("*_summary", &stem) && !is_duplicate_stem(&stem)
    }
}
