use serde::Serialize;

use crate::errors::ModelError;

/// A player seen in a site's hand histories. Unique per site by name.
#[derive(Debug, PartialEq, Serialize)]
pub struct Player {
    name: String,
    site_name: String,
    comments: String,
    is_hero: bool,
}

impl Player {
    pub fn new(name: &str, site_name: &str) -> Result<Self, ModelError> {
        if name.is_empty() {
            return Err(ModelError::EmptyField {
                entity: "Player",
                field: "name",
            });
        }
        if site_name.is_empty() {
            return Err(ModelError::EmptyField {
                entity: "Player",
                field: "site_name",
            });
        }
        Ok(Self {
            name: name.to_string(),
            site_name: site_name.to_string(),
            comments: String::new(),
            is_hero: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn comments(&self) -> &str {
        &self.comments
    }
    pub fn set_comments(&mut self, comments: &str) {
        self.comments = comments.to_string();
    }
    pub fn is_hero(&self) -> bool {
        self.is_hero
    }
    pub fn set_hero(&mut self, is_hero: bool) {
        self.is_hero = is_hero;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_flag_is_mutable() {
        let mut p = Player::new("alice", "Winamax").unwrap();
        assert!(!p.is_hero());
        p.set_hero(true);
        assert!(p.is_hero());
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(Player::new("", "Winamax").is_err());
        assert!(Player::new("alice", "").is_err());
    }
}
