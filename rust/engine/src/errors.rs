use std::path::PathBuf;

use thiserror::Error;

/// A token outside the alphabet of one of the lexical mappers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} token `{token}`")]
pub struct TokenError {
    pub kind: &'static str,
    pub token: String,
}

impl TokenError {
    pub fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_string(),
        }
    }
}

/// Invariant violations raised by the domain entity constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{entity} field `{field}` must not be empty")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity} field `{field}` must not be negative")]
    NegativeAmount {
        entity: &'static str,
        field: &'static str,
    },
    #[error("Action street must not be none")]
    StreetNone,
    #[error("Hand {hand_id} has no occupied seat")]
    NoOccupiedSeat { hand_id: String },
    #[error("Game {game_id} has no max seat count")]
    MaxSeatsUndefined { game_id: String },
    #[error("Cannot merge site {other} into site {this}")]
    SiteMismatch { this: String, other: String },
}

/// Structural failures while reading one hand history file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{file}: expected `{anchor}` in line: {text}")]
    MissingAnchor {
        file: String,
        anchor: &'static str,
        text: String,
    },
    #[error("{file}: unexpected end of input ({context})")]
    UnexpectedEof { file: String, context: &'static str },
    #[error("{file}: invalid card token `{token}`")]
    InvalidCard { file: String, token: String },
    #[error("{file}: {source}")]
    Model {
        file: String,
        #[source]
        source: ModelError,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The process-global worker pool could not be started.
#[derive(Debug, Error)]
#[error("thread pool unavailable: {reason}")]
pub struct PoolError {
    pub reason: String,
}
