use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Number of cards dealt to each active player at the start of every round.
pub const CARDS_PER_PLAYER: usize = 5;
/// The smallest table the deck and role tables support.
pub const MIN_PLAYERS: usize = 3;
/// The largest table the deck and role tables support.
pub const MAX_PLAYERS: usize = 10;

/// Options for customising a game of Don't Mess with Cthulhu.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct GameOptions {
    /// Fewest active players the game will start with.
    pub min_players: usize,
    /// Most active players the game will start with.
    pub max_players: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
        }
    }
}

impl GameOptions {
    /// Returns a `GameError` if a game cannot be played with `num_players` active players.
    pub fn validate_player_count(&self, num_players: usize) -> Result<(), GameError> {
        let min = self.min_players.max(MIN_PLAYERS);
        let max = self.max_players.min(MAX_PLAYERS);
        if min > max {
            return Err(GameError::Configuration(format!(
                "player limits {}..={} leave no playable table size",
                self.min_players, self.max_players
            )));
        }
        if !(min..=max).contains(&num_players) {
            return Err(GameError::Configuration(format!(
                "{} players is outside the supported range {}..={}",
                num_players, min, max
            )));
        }
        Ok(())
    }
}
