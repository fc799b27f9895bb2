use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{ModelError, TokenError};

/// Represents a betting street in a hand.
/// `None` only exists as the "not yet dealt" state of a parser.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    None,
    Preflop,
    Flop,
    Turn,
    River,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::None => "none",
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(s)
    }
}

impl FromStr for Street {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Street::None),
            "preflop" => Ok(Street::Preflop),
            "flop" => Ok(Street::Flop),
            "turn" => Ok(Street::Turn),
            "river" => Ok(Street::River),
            _ => Err(TokenError::new("street", s)),
        }
    }
}

/// Kind of a recorded action. `None` marks an action synthesized for a
/// winner who never acted explicitly.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    None,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionType::None => "none",
            ActionType::Fold => "fold",
            ActionType::Check => "check",
            ActionType::Call => "call",
            ActionType::Bet => "bet",
            ActionType::Raise => "raise",
        };
        f.write_str(s)
    }
}

impl FromStr for ActionType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ActionType::None),
            "fold" => Ok(ActionType::Fold),
            "check" => Ok(ActionType::Check),
            "call" => Ok(ActionType::Call),
            "bet" => Ok(ActionType::Bet),
            "raise" => Ok(ActionType::Raise),
            _ => Err(TokenError::new("action", s)),
        }
    }
}

/// One action taken by one player during a hand. Immutable once built.
#[derive(Debug, PartialEq, Serialize)]
pub struct Action {
    hand_id: String,
    player_name: String,
    street: Street,
    action_type: ActionType,
    index: usize,
    bet_amount: f64,
}

impl Action {
    pub fn new(
        hand_id: &str,
        player_name: &str,
        street: Street,
        action_type: ActionType,
        index: usize,
        bet_amount: f64,
    ) -> Result<Self, ModelError> {
        if hand_id.is_empty() {
            return Err(ModelError::EmptyField {
                entity: "Action",
                field: "hand_id",
            });
        }
        if player_name.is_empty() {
            return Err(ModelError::EmptyField {
                entity: "Action",
                field: "player_name",
            });
        }
        if street == Street::None {
            return Err(ModelError::StreetNone);
        }
        if bet_amount < 0.0 {
            return Err(ModelError::NegativeAmount {
                entity: "Action",
                field: "bet_amount",
            });
        }
        Ok(Self {
            hand_id: hand_id.to_string(),
            player_name: player_name.to_string(),
            street,
            action_type,
            index,
            bet_amount,
        })
    }

    pub fn hand_id(&self) -> &str {
        &self.hand_id
    }
    pub fn player_name(&self) -> &str {
        &self.player_name
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }
    /// Zero-based position within the hand, across all streets.
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_street_none() {
        let err = Action::new("1", "alice", Street::None, ActionType::Fold, 0, 0.0).unwrap_err();
        assert_eq!(err, ModelError::StreetNone);
    }

    #[test]
    fn rejects_negative_bet() {
        let err = Action::new("1", "alice", Street::Flop, ActionType::Bet, 0, -1.0).unwrap_err();
        assert!(matches!(err, ModelError::NegativeAmount { .. }));
    }

    #[test]
    fn rejects_empty_player() {
        assert!(Action::new("1", "", Street::Flop, ActionType::Bet, 0, 1.0).is_err());
        assert!(Action::new("", "bob", Street::Flop, ActionType::Bet, 0, 1.0).is_err());
    }
}
