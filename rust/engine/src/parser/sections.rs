//! Section grammar shared by both formats: seat list, antes, hole cards,
//! street markers with board cards, action lines and winner lines.

use tracing::debug;

use super::{HandHeader, HistoryFormat, TableLine};
use crate::action::{Action, ActionType, Street};
use crate::cards::{parse_card_group, Card};
use crate::cursor::LineCursor;
use crate::errors::{ModelError, ParseError};
use crate::hand::{Hand, HandData};
use crate::lexer::{last_amount, last_bracket_group, trim};
use crate::player_cache::PlayerCache;
use crate::seat::{Seat, MAX_SEATS};

/// Action tokens in match order. The set is disjoint, so the first hit wins.
const ACTION_TOKENS: [(&str, ActionType); 7] = [
    (" is all-in ", ActionType::Raise),
    (" is all-In ", ActionType::Raise),
    (" folds", ActionType::Fold),
    (" checks", ActionType::Check),
    (" bets ", ActionType::Bet),
    (" calls ", ActionType::Call),
    (" raises ", ActionType::Raise),
];

const ALL_IN_SUFFIXES: [&str; 2] = [" and is all-in", " and is all-In"];

const WINNER_TOKENS: [&str; 2] = [" collected ", " wins "];

const SUMMARY_MARKER: &str = "*** SUMMARY ***";

pub(super) struct HandParts {
    pub header: HandHeader,
    pub table: TableLine,
    pub hand: Hand,
}

/// Mutable state of one hand while its body lines are consumed.
struct HandState<'a> {
    file: &'a str,
    hand_id: &'a str,
    delimiter: &'static str,
    seats_open: bool,
    in_summary: bool,
    street: Street,
    ante: f64,
    seats: [String; MAX_SEATS],
    hero_cards: [Option<Card>; 5],
    board: [Option<Card>; 5],
    actions: Vec<Action>,
    winners: [String; MAX_SEATS],
}

impl<'a> HandState<'a> {
    fn new(file: &'a str, hand_id: &'a str, delimiter: &'static str) -> Self {
        Self {
            file,
            hand_id,
            delimiter,
            seats_open: true,
            in_summary: false,
            street: Street::None,
            ante: 0.0,
            seats: Default::default(),
            hero_cards: [None; 5],
            board: [None; 5],
            actions: Vec::new(),
            winners: Default::default(),
        }
    }

    fn model_error(&self, source: ModelError) -> ParseError {
        ParseError::Model {
            file: self.file.to_string(),
            source,
        }
    }

    fn cards(&self, group: &str) -> Result<[Option<Card>; 5], ParseError> {
        parse_card_group(group, self.delimiter).map_err(|e| ParseError::InvalidCard {
            file: self.file.to_string(),
            token: e.token,
        })
    }

    fn is_seated(&self, name: &str) -> bool {
        self.seats.iter().any(|s| s == name)
    }

    fn consume(&mut self, raw: &str, cache: &PlayerCache) -> Result<(), ParseError> {
        let line = trim(raw);
        if line.is_empty() || self.in_summary {
            return Ok(());
        }
        if line.starts_with(SUMMARY_MARKER) {
            self.in_summary = true;
            return Ok(());
        }

        if self.seats_open {
            if line.starts_with("Seat ") {
                return self.seat_line(line, cache);
            }
            self.seats_open = false;
        }

        if line.starts_with("*** ") {
            return self.street_marker(line);
        }
        if line.contains(" posts ante") || line.contains(" posts the ante") {
            self.ante = last_amount(line);
            return Ok(());
        }
        if line.contains(" posts ") {
            return Ok(());
        }
        if let Some(rest) = line.strip_prefix("Dealt to ") {
            return self.dealt_line(rest, cache);
        }
        if let Some(token) = WINNER_TOKENS.iter().find(|t| line.contains(*t)) {
            return self.winner_line(line, token, cache);
        }
        self.action_line(line, cache)
    }

    /// `Seat N: name (stack...) [trailing status]`
    fn seat_line(&mut self, line: &str, cache: &PlayerCache) -> Result<(), ParseError> {
        let Some(colon) = line.find(": ") else {
            return Ok(());
        };
        let Some(number) = line.get("Seat ".len()..colon) else {
            return Ok(());
        };
        let seat = number
            .trim()
            .parse::<u32>()
            .map_or(Seat::Unknown, Seat::from_int);
        let name = seat_name(&line[colon + 2..]);

        match seat.to_index() {
            Some(index) if !name.is_empty() => {
                self.seats[index] = name.to_string();
                cache
                    .insert_if_missing(name)
                    .map_err(|e| self.model_error(e))?;
            }
            _ => debug!(file = self.file, line, "seat line skipped"),
        }
        Ok(())
    }

    fn street_marker(&mut self, line: &str) -> Result<(), ParseError> {
        if line.contains("PRE-FLOP") || line.contains("HOLE CARDS") {
            self.street = Street::Preflop;
        } else if line.contains("FLOP") {
            self.street = Street::Flop;
            if let Some(group) = last_bracket_group(line) {
                let cards = self.cards(group)?;
                self.board[..3].copy_from_slice(&cards[..3]);
            }
        } else if line.contains("TURN") {
            self.street = Street::Turn;
            if let Some(group) = last_bracket_group(line) {
                self.board[3] = self.cards(group)?[0];
            }
        } else if line.contains("RIVER") {
            self.street = Street::River;
            if let Some(group) = last_bracket_group(line) {
                self.board[4] = self.cards(group)?[0];
            }
        }
        Ok(())
    }

    /// `Dealt to <name> [c1 c2 ...]`
    fn dealt_line(&mut self, rest: &str, cache: &PlayerCache) -> Result<(), ParseError> {
        let Some(open) = rest.find(" [") else {
            return Ok(());
        };
        let name = trim(&rest[..open]);
        if let Some(group) = last_bracket_group(rest) {
            self.hero_cards = self.cards(group)?;
        }
        if !name.is_empty() {
            cache.mark_hero(name).map_err(|e| self.model_error(e))?;
        }
        if self.street == Street::None {
            self.street = Street::Preflop;
        }
        Ok(())
    }

    fn winner_line(&mut self, line: &str, token: &str, cache: &PlayerCache) -> Result<(), ParseError> {
        let Some(pos) = line.find(token) else {
            return Ok(());
        };
        let name = player_name(&line[..pos]);
        if !self.is_seated(name) {
            debug!(file = self.file, line, "winner line for unseated player skipped");
            return Ok(());
        }
        cache
            .insert_if_missing(name)
            .map_err(|e| self.model_error(e))?;
        if self.winners.iter().any(|w| w == name) {
            return Ok(());
        }
        if let Some(slot) = self.winners.iter_mut().find(|w| w.is_empty()) {
            *slot = name.to_string();
        }
        Ok(())
    }

    fn action_line(&mut self, line: &str, cache: &PlayerCache) -> Result<(), ParseError> {
        let line = ALL_IN_SUFFIXES
            .iter()
            .find_map(|s| line.strip_suffix(s))
            .unwrap_or(line);
        // Tokens ending in a space also match at end of line.
        let padded = format!("{} ", line);

        let Some((pos, token, action_type)) = ACTION_TOKENS
            .iter()
            .find_map(|&(token, kind)| padded.find(token).map(|pos| (pos, token, kind)))
        else {
            return Ok(());
        };

        let name = player_name(&padded[..pos]);
        if !self.is_seated(name) {
            debug!(file = self.file, line, "action line for unseated player skipped");
            return Ok(());
        }

        let amount = match action_type {
            ActionType::Bet | ActionType::Call | ActionType::Raise => {
                last_amount(&padded[pos + token.len()..])
            }
            _ => 0.0,
        };
        self.push_action(name, action_type, amount, cache)
    }

    fn push_action(
        &mut self,
        name: &str,
        action_type: ActionType,
        amount: f64,
        cache: &PlayerCache,
    ) -> Result<(), ParseError> {
        if self.street == Street::None {
            self.street = Street::Preflop;
        }
        cache
            .insert_if_missing(name)
            .map_err(|e| self.model_error(e))?;
        let action = Action::new(
            self.hand_id,
            name,
            self.street,
            action_type,
            self.actions.len(),
            amount,
        )
        .map_err(|e| self.model_error(e))?;
        self.actions.push(action);
        Ok(())
    }

    /// Every winner without an explicit action gets a `none` action so each
    /// winner appears in the action sequence.
    fn synthesize_winner_actions(&mut self, cache: &PlayerCache) -> Result<(), ParseError> {
        let silent: Vec<String> = self
            .winners
            .iter()
            .filter(|w| !w.is_empty())
            .filter(|w| !self.actions.iter().any(|a| a.player_name() == w.as_str()))
            .cloned()
            .collect();
        for name in silent {
            self.push_action(&name, ActionType::None, 0.0, cache)?;
        }
        Ok(())
    }
}

/// Name part of a seat line body. The stack group is the first ` (` that
/// opens on a digit or a currency glyph; PokerStars may append more
/// parenthesised status after it, e.g. `bob ($2 in chips) out of hand (moved
/// from another table into small blind)`.
fn seat_name(rest: &str) -> &str {
    let stack = rest.match_indices(" (").map(|(p, _)| p).find(|&p| {
        rest[p + 2..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '$' | '€' | '£'))
    });
    let end = stack.or_else(|| rest.rfind(" (")).unwrap_or(rest.len());
    trim(&rest[..end])
}

/// Player name in front of an action or winner token. PokerStars writes
/// `name: folds`, so a trailing colon is dropped.
fn player_name(prefix: &str) -> &str {
    trim(trim(prefix).trim_end_matches(':'))
}

/// Reads one hand: header, table line, then body lines up to the next hand
/// header or end of input. The cursor is left on the hand's last line.
pub(super) fn build_hand<F: HistoryFormat + ?Sized>(
    format: &F,
    cursor: &mut LineCursor,
    cache: &PlayerCache,
) -> Result<HandParts, ParseError> {
    let file = cursor.file_name().to_string();
    if !cursor.seek(|l| format.is_hand_start(l)) {
        return Err(ParseError::UnexpectedEof {
            file,
            context: "hand header",
        });
    }
    let header = format.parse_header(cursor.current(), &file)?;

    if !cursor.next_line() {
        return Err(ParseError::UnexpectedEof {
            file,
            context: "table line",
        });
    }
    let table = format.parse_table_line(cursor.current(), &file)?;

    let mut state = HandState::new(&file, &header.hand_id, format.card_delimiter());
    while let Some(next) = cursor.peek() {
        if format.is_hand_start(next) {
            break;
        }
        cursor.next_line();
        state.consume(cursor.current(), cache)?;
    }
    state.synthesize_winner_actions(cache)?;

    let HandState {
        ante,
        seats,
        hero_cards,
        board,
        actions,
        winners,
        ..
    } = state;

    let hand = Hand::new(HandData {
        id: header.hand_id.clone(),
        game_type: header.game_type,
        site_name: format.site_name().to_string(),
        table_name: table.table_name.clone(),
        button_seat: table.button_seat,
        max_seats: table.max_seats,
        level: header.level,
        ante,
        start_time: header.start_time,
        hero_cards,
        board_cards: board,
        seats,
        actions,
        winners,
    })
    .map_err(|source| ParseError::Model {
        file: file.clone(),
        source,
    })?;

    Ok(HandParts {
        header,
        table,
        hand,
    })
}
