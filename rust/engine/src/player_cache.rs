use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::ModelError;
use crate::player::Player;
use crate::site::Site;

/// Deduplicating registry of the players discovered while parsing a batch of
/// files for one site. Every operation takes the lock once, so a hero mark is
/// visible to every later lookup of the same name from any thread.
#[derive(Debug)]
pub struct PlayerCache {
    site_name: String,
    players: Mutex<HashMap<String, Player>>,
}

impl PlayerCache {
    pub fn new(site_name: &str) -> Self {
        Self {
            site_name: site_name.to_string(),
            players: Mutex::new(HashMap::new()),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Player>> {
        self.players.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `name` if it is not cached yet. Returns whether it was added.
    pub fn insert_if_missing(&self, name: &str) -> Result<bool, ModelError> {
        let mut players = self.lock();
        if players.contains_key(name) {
            return Ok(false);
        }
        let player = Player::new(name, &self.site_name)?;
        players.insert(name.to_string(), player);
        Ok(true)
    }

    /// Flags `name` as the hero, registering the player first if needed.
    pub fn mark_hero(&self, name: &str) -> Result<(), ModelError> {
        let mut players = self.lock();
        if let Some(p) = players.get_mut(name) {
            p.set_hero(true);
            return Ok(());
        }
        let mut player = Player::new(name, &self.site_name)?;
        player.set_hero(true);
        players.insert(name.to_string(), player);
        Ok(())
    }

    pub fn erase(&self, name: &str) -> Option<Player> {
        self.lock().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn is_hero(&self, name: &str) -> bool {
        self.lock().get(name).is_some_and(Player::is_hero)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Folds players gathered elsewhere into the cache. A hero flag carried
    /// by an incoming player sticks to the cached entry.
    pub fn absorb(&self, players: impl IntoIterator<Item = Player>) {
        let mut cached = self.lock();
        for player in players {
            let hero = player.is_hero();
            cached
                .entry(player.name().to_string())
                .and_modify(|p| {
                    if hero {
                        p.set_hero(true);
                    }
                })
                .or_insert(player);
        }
    }

    /// Moves every cached player into `site`, leaving the cache empty.
    /// Returns how many players the site did not already know.
    pub fn drain_into(&self, site: &mut Site) -> usize {
        let drained: Vec<Player> = self.lock().drain().map(|(_, p)| p).collect();
        drained
            .into_iter()
            .map(|p| site.add_player(p))
            .filter(|&added| added)
            .count()
    }
}
