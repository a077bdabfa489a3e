use crate::game::player::Role;
use crate::game::GameResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A player's win record, split by the role they played.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Debug)]
pub struct PlayerStats {
    pub cultist_wins: u32,
    pub cultist_losses: u32,
    pub investigator_wins: u32,
    pub investigator_losses: u32,
}

impl PlayerStats {
    pub fn games_played(&self) -> u32 {
        self.cultist_wins + self.cultist_losses + self.investigator_wins + self.investigator_losses
    }

    fn record(&mut self, role: Role, won: bool) {
        let tally = match (role, won) {
            (Role::Cultist, true) => &mut self.cultist_wins,
            (Role::Cultist, false) => &mut self.cultist_losses,
            (Role::Investigator, true) => &mut self.investigator_wins,
            (Role::Investigator, false) => &mut self.investigator_losses,
        };
        *tally += 1;
    }
}

/// Tallies results of finished games, keyed by player id.
#[derive(Clone, Serialize, Deserialize, Default, Debug)]
pub struct StatsLedger {
    players: HashMap<String, PlayerStats>,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished game. Games without a winner are not counted.
    pub fn record(&mut self, result: &GameResult) {
        let Some(winner) = result.winner else {
            log::debug!("Skipping stats for a game with no winner");
            return;
        };
        for player in &result.players {
            self.players
                .entry(player.id.clone())
                .or_default()
                .record(player.role, player.role == winner);
        }
    }

    pub fn get(&self, id: &str) -> PlayerStats {
        self.players.get(id).copied().unwrap_or_default()
    }
}
