use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::ModelError;
use crate::game::{CashGame, ParsedGame, Tournament};
use crate::player::Player;

/// Aggregate root for one poker room's parsed history.
#[derive(Debug, Serialize)]
pub struct Site {
    name: String,
    players: BTreeMap<String, Player>,
    cash_games: Vec<CashGame>,
    tournaments: Vec<Tournament>,
}

impl Site {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            players: BTreeMap::new(),
            cash_games: Vec::new(),
            tournaments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a player unless one with the same name is already present.
    /// Returns whether the player was inserted.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.players.contains_key(player.name()) {
            return false;
        }
        self.players.insert(player.name().to_string(), player);
        true
    }

    pub fn add_cash_game(&mut self, game: CashGame) {
        self.cash_games.push(game);
    }

    pub fn add_tournament(&mut self, tournament: Tournament) {
        self.tournaments.push(tournament);
    }

    pub fn add_game(&mut self, game: ParsedGame) {
        match game {
            ParsedGame::Cash(g) => self.add_cash_game(g),
            ParsedGame::Tournament(t) => self.add_tournament(t),
        }
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Moves every player out of the site, leaving its games in place.
    pub fn take_players(&mut self) -> Vec<Player> {
        std::mem::take(&mut self.players).into_values().collect()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn hero(&self) -> Option<&Player> {
        self.players.values().find(|p| p.is_hero())
    }

    pub fn cash_games(&self) -> &[CashGame] {
        &self.cash_games
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn game_count(&self) -> usize {
        self.cash_games.len() + self.tournaments.len()
    }

    pub fn hand_count(&self) -> usize {
        self.cash_games.iter().map(|g| g.hand_count()).sum::<usize>()
            + self.tournaments.iter().map(|t| t.hand_count()).sum::<usize>()
    }

    pub fn action_count(&self) -> usize {
        let cash = self.cash_games.iter().flat_map(|g| g.hands());
        let tour = self.tournaments.iter().flat_map(|t| t.hands());
        cash.chain(tour).map(|h| h.actions().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.game_count() == 0
    }

    /// Folds `other` into this site. Players already present are kept as
    /// they are; games are appended in `other`'s order.
    pub fn merge(&mut self, other: Site) -> Result<(), ModelError> {
        if other.name != self.name {
            return Err(ModelError::SiteMismatch {
                this: self.name.clone(),
                other: other.name,
            });
        }
        for (_, player) in other.players {
            self.add_player(player);
        }
        self.cash_games.extend(other.cash_games);
        self.tournaments.extend(other.tournaments);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_players_are_skipped() {
        let mut site = Site::new("Winamax");
        assert!(site.add_player(Player::new("alice", "Winamax").unwrap()));
        let mut again = Player::new("alice", "Winamax").unwrap();
        again.set_comments("second");
        assert!(!site.add_player(again));
        assert_eq!(site.player_count(), 1);
        assert_eq!(site.player("alice").unwrap().comments(), "");
    }

    #[test]
    fn merge_rejects_other_site() {
        let mut site = Site::new("Winamax");
        let err = site.merge(Site::new("PokerStars")).unwrap_err();
        assert!(matches!(err, ModelError::SiteMismatch { .. }));
    }

    #[test]
    fn merge_folds_players() {
        let mut a = Site::new("Winamax");
        a.add_player(Player::new("alice", "Winamax").unwrap());
        let mut b = Site::new("Winamax");
        b.add_player(Player::new("alice", "Winamax").unwrap());
        b.add_player(Player::new("bob", "Winamax").unwrap());
        a.merge(b).unwrap();
        assert_eq!(a.player_count(), 2);
    }
}
