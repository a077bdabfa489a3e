use super::card::{Card, CardKind};
use super::claim::Claim;
use super::rules::RoleCounts;
use crate::error::GameError;
use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::repeat;

/// The two opposing teams.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    Investigator,
    Cultist,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Investigator => "Investigator",
            Role::Cultist => "Cultist",
        })
    }
}

/// How a player relates to the game they are seated at.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Participation {
    Idle,
    Playing,
    Spectating,
}

/// Per-game state, attached when the game starts.
#[derive(Clone, Serialize, Deserialize, Debug)]
struct PlayerGameData {
    role: Role,
    cards: Vec<Card>,
    can_claim: bool,
    claim: Option<Claim>,
    has_flashlight: bool,
}

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    id: String,
    nickname: Option<String>,
    status: Participation,
    game: Option<PlayerGameData>,
}

impl Player {
    /// Creates an idle player who is not yet part of any game.
    pub fn new(id: impl Into<String>, nickname: Option<String>) -> Self {
        Self {
            id: id.into(),
            nickname,
            status: Participation::Idle,
            game: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The nickname, or the id if the player has none.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.id)
    }

    pub fn status(&self) -> Participation {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: Participation) {
        self.status = status;
    }

    pub fn is_playing(&self) -> bool {
        self.status == Participation::Playing
    }

    /// Attaches fresh game data with an empty hand.
    pub fn start_playing(&mut self, role: Role) -> Result<(), GameError> {
        if self.game.is_some() {
            return Err(GameError::AlreadyStarted);
        }
        self.game = Some(PlayerGameData {
            role,
            cards: vec![],
            can_claim: true,
            claim: None,
            has_flashlight: false,
        });
        self.status = Participation::Playing;
        Ok(())
    }

    /// Drops any game data and returns the player to idle.
    pub fn reset(&mut self) {
        self.game = None;
        self.status = Participation::Idle;
    }

    pub fn role(&self) -> Option<Role> {
        self.game.as_ref().map(|g| g.role)
    }

    /// The player's role, provided they are playing a game.
    pub fn role_summary(&self) -> Result<Role, GameError> {
        match (&self.game, self.status) {
            (Some(game), Participation::Playing) => Ok(game.role),
            _ => Err(GameError::NotInGame),
        }
    }

    pub fn hand(&self) -> &[Card] {
        self.game.as_ref().map(|g| &g.cards[..]).unwrap_or(&[])
    }

    pub fn can_claim(&self) -> bool {
        self.game.as_ref().map(|g| g.can_claim).unwrap_or(false)
    }

    pub fn claim(&self) -> Option<Claim> {
        self.game.as_ref().and_then(|g| g.claim)
    }

    pub fn has_flashlight(&self) -> bool {
        self.game.as_ref().map(|g| g.has_flashlight).unwrap_or(false)
    }

    /// Counts the cards of each kind in hand, ignoring kinds that are absent.
    pub fn hand_summary(&self) -> Vec<(CardKind, usize)> {
        CardKind::ALL
            .into_iter()
            .map(|kind| (kind, self.hand().iter().filter(|c| c.kind() == kind).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Records the player's claim. Only one claim may be made per turn granted.
    pub fn set_claim(&mut self, claim: Claim) -> Result<(), GameError> {
        let game = self.game_mut()?;
        if !game.can_claim {
            return Err(GameError::NotYourTurn);
        }
        if claim.total() > game.cards.len() {
            return Err(GameError::InvalidClaim);
        }
        game.claim = Some(claim);
        game.can_claim = false;
        Ok(())
    }

    pub(crate) fn clear_claim(&mut self) {
        if let Some(game) = &mut self.game {
            game.claim = None;
        }
    }

    pub(crate) fn set_can_claim(&mut self, can_claim: bool) {
        if let Some(game) = &mut self.game {
            game.can_claim = can_claim;
        }
    }

    pub fn give_card(&mut self, card: Card) -> Result<(), GameError> {
        self.game_mut()?.cards.push(card);
        Ok(())
    }

    pub fn set_hand(&mut self, hand: Vec<Card>) -> Result<(), GameError> {
        self.game_mut()?.cards = hand;
        Ok(())
    }

    /// Empties the hand, returning the cards that were in it.
    pub(crate) fn take_hand(&mut self) -> Vec<Card> {
        self.game
            .as_mut()
            .map(|g| std::mem::take(&mut g.cards))
            .unwrap_or_default()
    }

    /// Finds the card a reveal would flip, without flipping it.
    pub fn revealable(&self, position: Option<usize>) -> Result<usize, GameError> {
        let cards = &self.game.as_ref().ok_or(GameError::NotInGame)?.cards;
        match position {
            Some(pos) => match cards.get(pos) {
                None => Err(GameError::InvalidState("no card at that position")),
                Some(card) if card.is_face_up() => Err(GameError::InvalidState("card is already revealed")),
                Some(_) => Ok(pos),
            },
            None => cards
                .iter()
                .position(|c| !c.is_face_up())
                .ok_or(GameError::AllRevealed),
        }
    }

    /// Flips the card at `position`, or the first face-down card, and returns its kind.
    pub fn reveal_card(&mut self, position: Option<usize>) -> Result<CardKind, GameError> {
        let idx = self.revealable(position)?;
        let card = &mut self.game_mut()?.cards[idx];
        card.flip_up();
        Ok(card.kind())
    }

    pub fn toggle_flashlight(&mut self) {
        if let Some(game) = &mut self.game {
            game.has_flashlight = !game.has_flashlight;
        }
    }

    pub(crate) fn set_flashlight(&mut self, has_flashlight: bool) {
        if let Some(game) = &mut self.game {
            game.has_flashlight = has_flashlight;
        }
    }

    #[cfg(test)]
    pub(crate) fn hand_mut(&mut self) -> &mut Vec<Card> {
        &mut self.game.as_mut().expect("player is not in a game").cards
    }

    fn game_mut(&mut self) -> Result<&mut PlayerGameData, GameError> {
        self.game.as_mut().ok_or(GameError::NotInGame)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Shuffles the role pool and deals one role to each of `num_players` players.
/// Any roles left over are discarded unseen.
pub fn assign_roles(
    counts: RoleCounts,
    num_players: usize,
    rng: &mut impl rand::Rng,
) -> Result<Vec<Role>, GameError> {
    if counts.total() < num_players {
        return Err(GameError::Configuration(format!(
            "{} roles cannot cover {} players",
            counts.total(),
            num_players
        )));
    }
    let mut roles = repeat(Role::Investigator)
        .take(counts.investigators)
        .chain(repeat(Role::Cultist).take(counts.cultists))
        .collect::<Vec<_>>();
    roles.shuffle(rng);
    roles.truncate(num_players);
    Ok(roles)
}
