//! # handscope-engine: Poker Hand History Ingestion
//!
//! Reads the hand history text files written by poker clients and turns
//! them into an owned entity graph: a [`site::Site`] holding players and
//! games, each game holding its hands in file order, each hand holding its
//! actions in play order.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card tokens (`Ah`, `Td`, `none`)
//! - [`seat`] - Table positions 1..10
//! - [`lexer`] - Lenient amount parsing and string helpers
//! - [`action`], [`hand`], [`game`], [`player`], [`site`] - Domain entities
//! - [`player_cache`] - Thread-safe player registry shared by a batch
//! - [`cursor`] - Line cursor over one file
//! - [`parser`] - Site formats ([`parser::Winamax`], [`parser::PokerStars`])
//! - [`pool`] - Process-global worker pool
//! - [`loader`] - Concurrent directory loader with progress and cancellation
//! - [`logging`] - Subscriber setup and test capture
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use handscope_engine::loader::{HistoryLoader, NoProgress};
//! use handscope_engine::parser::Winamax;
//!
//! let loader = HistoryLoader::new(Winamax);
//! let site = loader.load_directory(Path::new("/home/me/winamax/accounts/me"), Arc::new(NoProgress));
//! println!("{} hands from {} games", site.hand_count(), site.game_count());
//! ```
//!
//! ## Parsing Text Directly
//!
//! ```rust
//! use handscope_engine::cursor::LineCursor;
//! use handscope_engine::parser::{HistoryFormat, Winamax};
//! use handscope_engine::player_cache::PlayerCache;
//!
//! let text = "Winamax Poker - CashGame - HandId: #1-1-1 - Holdem no limit (0.01€/0.02€) - 2014/10/31 00:45:01 UTC\n\
//!             Table: 'Nice 04' 5-max (real money) Seat #1 is the button\n\
//!             Seat 1: alice (2€)\n\
//!             Seat 2: bob (2€)\n\
//!             alice folds\n\
//!             bob wins 0.03€\n";
//! let cache = PlayerCache::new("Winamax");
//! let mut cursor = LineCursor::from_text("demo.txt", text);
//! let game = Winamax.parse_game(&mut cursor, &cache, "").unwrap().unwrap();
//! assert_eq!(game.hand_count(), 1);
//! assert_eq!(cache.len(), 2);
//! ```

pub mod action;
pub mod cards;
pub mod cursor;
pub mod errors;
pub mod game;
pub mod game_data;
pub mod hand;
pub mod lexer;
pub mod loader;
pub mod logging;
pub mod parser;
pub mod player;
pub mod player_cache;
pub mod pool;
pub mod seat;
pub mod site;
