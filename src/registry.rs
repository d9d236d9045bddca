use std::collections::HashMap;

use crate::types::Player;

/// Players keyed by name. Insert-only: the first player seen under a name is
/// kept and later ones are discarded, even when age or country differ.
#[derive(Debug, Default)]
pub struct PlayerRegistry(HashMap<String, Player>);

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many of `players` were new.
    pub fn merge(&mut self, players: Vec<Player>) -> usize {
        let mut inserted = 0;
        for player in players {
            if !self.0.contains_key(&player.name) {
                self.0.insert(player.name.clone(), player);
                inserted += 1;
            }
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens the registry into a list sorted by name (byte order).
    pub fn into_sorted(self) -> Vec<Player> {
        let mut players: Vec<Player> = self.0.into_values().collect();
        players.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        players
    }
}
