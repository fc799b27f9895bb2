use std::path::{Path, PathBuf};

use handscope_engine::action::{ActionType, Street};
use handscope_engine::cards::Card;
use handscope_engine::cursor::LineCursor;
use handscope_engine::errors::ParseError;
use handscope_engine::game::{Limit, ParsedGame, Variant};
use handscope_engine::hand::GameType;
use handscope_engine::parser::winamax::parse_file_stem;
use handscope_engine::parser::{HistoryFormat, Winamax};
use handscope_engine::player_cache::PlayerCache;
use handscope_engine::seat::Seat;

const TOURNAMENT_FILE: &str =
    "20141116_Double or Nothing(100679030)_real_holdem_no-limit.txt";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn card(s: &str) -> Option<Card> {
    Some(s.parse().unwrap())
}

#[test]
fn two_seat_hand_synthesizes_winner_action() {
    let text = "Winamax Poker - CashGame - HandId: #123-1-1 - 2014/10/31 00:45:01 UTC\n\
                Table: 'Nice 04' 5-max (real money) Seat #1 is the button\n\
                Seat 1: alice (2€)\n\
                Seat 2: bob (2€)\n\
                alice folds\n\
                bob wins 10\n";
    let cache = PlayerCache::new("Winamax");
    let mut cursor = LineCursor::from_text("scenario.txt", text);
    let hand = Winamax.build_hand(&mut cursor, &cache).unwrap();

    let actions: Vec<_> = hand
        .actions()
        .iter()
        .map(|a| (a.player_name(), a.action_type(), a.street(), a.bet_amount()))
        .collect();
    assert_eq!(
        actions,
        vec![
            ("alice", ActionType::Fold, Street::Preflop, 0.0),
            ("bob", ActionType::None, Street::Preflop, 0.0),
        ]
    );
    assert_eq!(hand.winners().collect::<Vec<_>>(), vec!["bob"]);
    assert_eq!(hand.id(), "123-1-1");
    assert_eq!(hand.start_time().to_rfc3339(), "2014-10-31T00:45:01+00:00");
}

#[test]
fn file_stem_encodes_tournament_metadata() {
    let info = parse_file_stem("20141116_Double or Nothing(100679030)_real_holdem_no-limit").unwrap();
    assert!(info.is_real_money);
    assert_eq!(info.game_name, "Double or Nothing(100679030)");
    assert_eq!(info.variant, Variant::Holdem);
    assert_eq!(info.limit, Limit::NoLimit);
}

#[test]
fn tournament_file_builds_one_game() {
    let cache = PlayerCache::new("Winamax");
    let game = Winamax
        .parse_file(&fixture(TOURNAMENT_FILE), &cache)
        .unwrap()
        .expect("a game");

    let ParsedGame::Tournament(ref tournament) = game else {
        panic!("expected a tournament");
    };
    assert_eq!(tournament.id(), "100679030");
    assert_eq!(tournament.name(), "Double or Nothing(100679030)");
    assert!((tournament.buy_in() - 0.5).abs() < 1e-9);
    assert!(tournament.is_real_money());
    assert_eq!(tournament.max_seats(), 6);
    assert_eq!(tournament.variant(), Variant::Holdem);
    assert_eq!(tournament.hand_count(), 2);

    let first = &tournament.hands()[0];
    assert_eq!(first.game_type(), GameType::Tournament);
    assert_eq!(first.button_seat(), Seat::One);
    assert_eq!(first.level(), 1);
    assert_eq!(first.table_name(), "Double or Nothing(100679030)#0");
    assert_eq!(first.hero_cards()[..2], [card("Ah"), card("Kd")]);
    assert_eq!(
        first.board_cards(),
        &[card("2c"), card("7h"), card("Jd"), card("Qs"), card("3h")]
    );
    let kinds: Vec<_> = first.actions().iter().map(|a| a.action_type()).collect();
    assert_eq!(
        kinds,
        vec![
            ActionType::Raise,
            ActionType::Fold,
            ActionType::Call,
            ActionType::Check,
            ActionType::Bet,
            ActionType::Raise,
            ActionType::Call,
        ]
    );
    let all_in = &first.actions()[5];
    assert_eq!((all_in.player_name(), all_in.street(), all_in.bet_amount()), ("Hero", Street::Flop, 240.0));
    assert_eq!(first.winners().collect::<Vec<_>>(), vec!["alice"]);

    let second = &tournament.hands()[1];
    assert_eq!(second.level(), 2);
    let shove = &second.actions()[1];
    assert_eq!((shove.action_type(), shove.bet_amount()), (ActionType::Raise, 890.0));

    assert_eq!(cache.len(), 3);
    assert!(cache.is_hero("Hero"));
    assert!(!cache.is_hero("alice"));
}

#[test]
fn action_indexes_follow_file_order() {
    let cache = PlayerCache::new("Winamax");
    let game = Winamax
        .parse_file(&fixture(TOURNAMENT_FILE), &cache)
        .unwrap()
        .unwrap();
    for hand in game.hands() {
        let indexes: Vec<_> = hand.actions().iter().map(|a| a.index()).collect();
        assert_eq!(indexes, (0..hand.actions().len()).collect::<Vec<_>>());
        for winner in hand.winners() {
            assert!(hand.actions().iter().any(|a| a.player_name() == winner));
        }
    }
}

#[test]
fn missing_table_line_is_structural_error() {
    let text = "Winamax Poker - CashGame - HandId: #123-1-1 - Holdem no limit (1/2) - 2014/10/31 00:45:01 UTC\n\
                Seat 1: alice (2€)\n";
    let cache = PlayerCache::new("Winamax");
    let mut cursor = LineCursor::from_text("broken.txt", text);
    let err = Winamax.parse_game(&mut cursor, &cache, "").unwrap_err();
    match err {
        ParseError::MissingAnchor { file, anchor, .. } => {
            assert_eq!(file, "broken.txt");
            assert_eq!(anchor, "Table: ");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_input_produces_no_game() {
    let cache = PlayerCache::new("Winamax");
    let mut cursor = LineCursor::from_text("empty.txt", "");
    assert!(Winamax.parse_game(&mut cursor, &cache, "").unwrap().is_none());
}

#[test]
fn rejected_stem_is_not_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("20141116_Nice 04_real_holdem_no-limit(1).txt");
    std::fs::write(&path, "garbage").unwrap();
    let cache = PlayerCache::new("Winamax");
    assert!(Winamax.parse_file(&path, &cache).unwrap().is_none());
}

#[test]
fn file_name_overrides_hand_variant() {
    let text = "Winamax Poker - CashGame - HandId: #9-1-1 - Omaha pot limit (1/2) - 2014/10/31 00:45:01 UTC\n\
                Table: 'Nice 04' 5-max (play money) Seat #1 is the button\n\
                Seat 1: alice (200)\n\
                Seat 2: bob (200)\n\
                alice folds\n\
                bob collected 3 from pot\n";
    let cache = PlayerCache::new("Winamax");
    let mut cursor = LineCursor::from_text("f.txt", text);
    let game = Winamax
        .parse_game(&mut cursor, &cache, "20141031_Nice 04_real_holdem_no-limit")
        .unwrap()
        .unwrap();
    assert_eq!(game.variant(), Variant::Holdem);
    assert_eq!(game.limit(), Limit::NoLimit);
    assert!(game.is_real_money());
    assert_eq!(game.id(), "20141031_Nice 04_real_holdem_no-limit");
    let ParsedGame::Cash(cash) = game else {
        panic!("expected a cash game");
    };
    assert_eq!((cash.small_blind(), cash.big_blind()), (1.0, 2.0));
}

#[test]
fn history_dir_shapes() {
    let root = tempfile::tempdir().unwrap();
    assert!(Winamax.history_dir(root.path()).is_none());
    let history = root.path().join("history");
    std::fs::create_dir(&history).unwrap();
    assert_eq!(Winamax.history_dir(root.path()), Some(history.clone()));
    assert_eq!(Winamax.history_dir(&history), Some(history));
}
