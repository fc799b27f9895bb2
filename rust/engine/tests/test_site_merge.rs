use chrono::{DateTime, Utc};
use handscope_engine::errors::ModelError;
use handscope_engine::game::{CashGame, Game, Limit, Tournament, Variant};
use handscope_engine::player::Player;
use handscope_engine::site::Site;

fn game(id: &str) -> Game {
    Game::new(
        id,
        "Winamax",
        "Nice 04",
        Variant::Holdem,
        Limit::NoLimit,
        true,
        5,
        DateTime::<Utc>::UNIX_EPOCH,
    )
    .unwrap()
}

fn populated() -> Site {
    let mut site = Site::new("Winamax");
    site.add_player(Player::new("alice", "Winamax").unwrap());
    site.add_player(Player::new("bob", "Winamax").unwrap());
    site.add_cash_game(CashGame::new(game("c1"), 0.01, 0.02).unwrap());
    site.add_tournament(Tournament::new(game("t1"), 0.5).unwrap());
    site
}

#[test]
fn merging_empty_site_changes_nothing() {
    let mut site = populated();
    site.merge(Site::new("Winamax")).unwrap();
    assert_eq!(site.player_count(), 2);
    assert_eq!(site.cash_games().len(), 1);
    assert_eq!(site.tournaments().len(), 1);
}

#[test]
fn merge_appends_games_and_dedups_players() {
    let mut site = populated();
    let mut other = Site::new("Winamax");
    let mut hero = Player::new("carol", "Winamax").unwrap();
    hero.set_hero(true);
    other.add_player(hero);
    other.add_player(Player::new("alice", "Winamax").unwrap());
    other.add_cash_game(CashGame::new(game("c2"), 0.05, 0.10).unwrap());

    site.merge(other).unwrap();
    assert_eq!(site.player_count(), 3);
    assert_eq!(site.hero().map(|p| p.name()), Some("carol"));
    let ids: Vec<_> = site.cash_games().iter().map(|g| g.id()).collect();
    assert_eq!(ids, vec!["c1", "c2"]);
}

#[test]
fn merge_across_sites_fails() {
    let mut site = populated();
    let err = site.merge(Site::new("PokerStars")).unwrap_err();
    assert!(matches!(err, ModelError::SiteMismatch { .. }));
    assert_eq!(site.game_count(), 2);
}

#[test]
fn site_serializes_to_json() {
    let json = serde_json::to_value(populated()).unwrap();
    assert_eq!(json["name"], "Winamax");
    assert_eq!(json["cash_games"][0]["big_blind"], 0.02);
    assert_eq!(json["tournaments"][0]["limit"], "no-limit");
}
