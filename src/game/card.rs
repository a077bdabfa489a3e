use super::rules::CardCatalog;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of card found in the deck.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum CardKind {
    Cthulhu,
    ElderSign,
    Blank,
}

impl CardKind {
    pub const ALL: [CardKind; 3] = [CardKind::Cthulhu, CardKind::ElderSign, CardKind::Blank];

    /// The token used to key card metadata.
    pub fn token(self) -> &'static str {
        match self {
            CardKind::Cthulhu => "Cthulhu",
            CardKind::ElderSign => "Elder Sign",
            CardKind::Blank => "Blank",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CardKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.token() == s)
            .ok_or_else(|| GameError::Lookup(s.to_string()))
    }
}

/// Display metadata for a kind of card.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct CardInfo {
    pub title: String,
    pub description: String,
    pub symbol: String,
}

/// A single physical card. Only the face-up flag changes after creation.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Card {
    kind: CardKind,
    face_up: bool,
}

impl Card {
    /// Creates a face-down card, provided the catalog knows how to describe it.
    pub fn new(kind: CardKind, catalog: &dyn CardCatalog) -> Result<Self, GameError> {
        catalog.card_info(kind)?;
        Ok(Self { kind, face_up: false })
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    pub fn flip_down(&mut self) {
        self.face_up = false;
    }
}
