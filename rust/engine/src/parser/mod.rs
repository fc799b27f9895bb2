//! Hand history parsers, one per poker site format.
//!
//! Each format implements [`HistoryFormat`]: it supplies the pieces that
//! differ between sites (hand header, table line, file naming, directory
//! layout, precedence of file name metadata) and inherits the hand, game and
//! file builders that drive a [`LineCursor`] through the shared section
//! grammar in [`sections`].

mod sections;

pub mod pokerstars;
pub mod winamax;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cursor::LineCursor;
use crate::errors::ParseError;
use crate::game::{Limit, ParsedGame, Variant};
use crate::game_data::GameData;
use crate::hand::{GameType, Hand};
use crate::player_cache::PlayerCache;
use crate::seat::Seat;

pub use pokerstars::PokerStars;
pub use winamax::Winamax;

/// Fields read from the first line of a hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandHeader {
    pub hand_id: String,
    pub game_type: GameType,
    /// Tournament identifier, when the header carries one.
    pub tournament_id: Option<String>,
    pub tournament_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub small_blind: f64,
    pub big_blind: f64,
    pub buy_in: f64,
    pub level: u32,
    pub variant: Variant,
    pub limit: Limit,
}

/// Fields read from the table line that follows the header.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLine {
    pub table_name: String,
    pub max_seats: u32,
    pub button_seat: Seat,
    pub is_real_money: Option<bool>,
}

/// Capabilities of one site's hand history format.
pub trait HistoryFormat: Send + Sync {
    /// Site name stamped on every entity the format produces.
    fn site_name(&self) -> &'static str;

    /// Whether `line` is the first line of a hand.
    fn is_hand_start(&self, line: &str) -> bool;

    /// Separator between cards inside a `[...]` group.
    fn card_delimiter(&self) -> &'static str {
        " "
    }

    fn parse_header(&self, line: &str, file: &str) -> Result<HandHeader, ParseError>;

    fn parse_table_line(&self, line: &str, file: &str) -> Result<TableLine, ParseError>;

    /// Combines first-hand metadata with whatever the file name carries,
    /// following this format's precedence.
    fn game_data(&self, header: &HandHeader, table: &TableLine, file_stem: &str) -> GameData;

    /// Guard run before a file is read. Rejected files produce no game.
    fn accepts_file_stem(&self, _file_stem: &str) -> bool {
        true
    }

    /// Directory holding the history files, or `None` when `dir` does not
    /// have the shape this site writes.
    fn history_dir(&self, dir: &Path) -> Option<PathBuf>;

    /// Enumeration filter applied to every file of the history directory.
    fn is_eligible_file(&self, path: &Path) -> bool;

    /// Builds the next hand starting at or after the cursor position.
    fn build_hand(&self, cursor: &mut LineCursor, cache: &PlayerCache) -> Result<Hand, ParseError> {
        sections::build_hand(self, cursor, cache).map(|parts| parts.hand)
    }

    /// Builds the first hand of a file together with its game metadata.
    fn build_hand_and_game_data(
        &self,
        cursor: &mut LineCursor,
        cache: &PlayerCache,
        file_stem: &str,
    ) -> Result<(Hand, GameData), ParseError> {
        let parts = sections::build_hand(self, cursor, cache)?;
        let data = self.game_data(&parts.header, &parts.table, file_stem);
        Ok((parts.hand, data))
    }

    /// Parses every hand the cursor yields into one game. Returns `Ok(None)`
    /// when the input holds no hand at all.
    fn parse_game(
        &self,
        cursor: &mut LineCursor,
        cache: &PlayerCache,
        file_stem: &str,
    ) -> Result<Option<ParsedGame>, ParseError> {
        if !cursor.seek(|l| self.is_hand_start(l)) {
            debug!(file = cursor.file_name(), "no hand found");
            return Ok(None);
        }

        let (first, data) = self.build_hand_and_game_data(cursor, cache, file_stem)?;
        let mut game = data
            .into_game(self.site_name())
            .map_err(|source| ParseError::Model {
                file: cursor.file_name().to_string(),
                source,
            })?;
        game.add_hand(first);

        while cursor.seek(|l| self.is_hand_start(l)) {
            let hand = self.build_hand(cursor, cache)?;
            game.add_hand(hand);
        }
        Ok(Some(game))
    }

    /// Parses one history file into one game.
    fn parse_file(&self, path: &Path, cache: &PlayerCache) -> Result<Option<ParsedGame>, ParseError> {
        let stem = file_stem(path);
        if !self.accepts_file_stem(&stem) {
            warn!(file = %path.display(), "file name rejected");
            return Ok(None);
        }
        let mut cursor = LineCursor::open(path)?;
        self.parse_game(&mut cursor, cache, &stem)
    }
}

/// File name without directory and extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `true` for `.txt` files (case-insensitive).
pub(crate) fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Parses the `YYYY/MM/DD H:MM:SS` timestamp at the start of `text`.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let mut parts = text.split_whitespace();
    let date = parts.next()?;
    let time = parts.next()?;
    chrono::NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y/%m/%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Table name between the first and last quote, max seat count before
/// `-max`, button seat between `Seat #` and ` is the button`.
pub(crate) fn parse_table_fields(
    line: &str,
    file: &str,
) -> Result<(String, u32, Seat), ParseError> {
    let missing = |anchor| ParseError::MissingAnchor {
        file: file.to_string(),
        anchor,
        text: line.to_string(),
    };

    let open = line.find('\'').ok_or_else(|| missing("'"))?;
    let close = line.rfind('\'').filter(|&c| c > open).ok_or_else(|| missing("'"))?;
    let table_name = line[open + 1..close].to_string();

    let rest = &line[close + 1..];
    let max_pos = rest.find("-max").ok_or_else(|| missing("-max"))?;
    let digits_start = rest[..max_pos]
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);
    let max_seats = rest[digits_start..max_pos]
        .parse::<u32>()
        .map_err(|_| missing("-max"))?;

    let button_seat = crate::lexer::between(rest, "Seat #", " is the button")
        .and_then(|s| s.trim().parse::<u32>().ok())
        .map_or(Seat::Unknown, Seat::from_int);

    Ok((table_name, max_seats, button_seat))
}

/// Small and big blind from a `(sb/bb)` or `(ante/sb/bb)` group.
pub(crate) fn parse_blinds(group: &str) -> (f64, f64) {
    let amounts: Vec<f64> = group
        .split('/')
        .map(|p| crate::lexer::amount_token(p.trim()).unwrap_or(0.0))
        .collect();
    match amounts.as_slice() {
        [.., sb, bb] => (*sb, *bb),
        [bb] => (0.0, *bb),
        [] => (0.0, 0.0),
    }
}
