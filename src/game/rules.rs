//! Lookup tables the engine consults but does not own: card metadata and
//! the number of each role dealt for a given table size.

use super::card::{CardInfo, CardKind};
use crate::error::GameError;
use std::fmt::Debug;

/// Resolves display metadata for a kind of card.
pub trait CardCatalog: Debug + Send + Sync {
    fn card_info(&self, kind: CardKind) -> Result<CardInfo, GameError>;
}

/// How many role cards of each team go into the role pool.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RoleCounts {
    pub investigators: usize,
    pub cultists: usize,
}

impl RoleCounts {
    pub fn total(&self) -> usize {
        self.investigators + self.cultists
    }
}

/// Resolves the role distribution for a number of active players.
pub trait RoleTable: Debug + Send + Sync {
    fn role_counts(&self, num_players: usize) -> Option<RoleCounts>;
}

/// The rules as printed in the base game.
#[derive(Clone, Copy, Default, Debug)]
pub struct StandardRules;

impl CardCatalog for StandardRules {
    fn card_info(&self, kind: CardKind) -> Result<CardInfo, GameError> {
        let (title, description, symbol) = match kind {
            CardKind::Cthulhu => (
                "Cthulhu",
                "Revealing this card ends the game in victory for the Cultists.",
                "octopus",
            ),
            CardKind::ElderSign => (
                "Elder Sign",
                "Reveal one per player to win the game for the Investigators.",
                "star",
            ),
            CardKind::Blank => ("Blank", "Nothing happens, for now.", "white_circle"),
        };
        Ok(CardInfo {
            title: title.into(),
            description: description.into(),
            symbol: symbol.into(),
        })
    }
}

impl RoleTable for StandardRules {
    fn role_counts(&self, num_players: usize) -> Option<RoleCounts> {
        // One role card more than the number of players; the spare is left undealt
        let (investigators, cultists) = match num_players {
            3 => (2, 2),
            4 => (3, 2),
            5 | 6 => (4, 2),
            7 => (5, 3),
            8 => (6, 3),
            9 | 10 => (7, 4),
            _ => return None,
        };
        Some(RoleCounts { investigators, cultists })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_pool_always_covers_the_table() {
        for n in 3..=10 {
            let counts = StandardRules.role_counts(n).unwrap();
            assert!(counts.total() >= n, "{} players need at least {} roles", n, n);
            assert!(counts.cultists >= 1);
        }
        assert_eq!(StandardRules.role_counts(2), None);
        assert_eq!(StandardRules.role_counts(11), None);
    }

    #[test]
    fn every_kind_has_metadata() {
        for kind in CardKind::ALL {
            let info = StandardRules.card_info(kind).unwrap();
            assert_eq!(info.title, kind.token());
        }
    }
}
