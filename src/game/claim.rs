use super::card::{Card, CardKind};
use super::rules::CardCatalog;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::iter::repeat;

/// A player's declared (and possibly false) count of each kind of card in their hand.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Debug)]
pub struct Claim {
    pub blank: usize,
    pub elder_sign: usize,
    pub cthulhu: usize,
}

impl Claim {
    pub fn new(blank: usize, elder_sign: usize, cthulhu: usize) -> Self {
        Self { blank, elder_sign, cthulhu }
    }

    /// Total number of cards covered by the claim.
    pub fn total(&self) -> usize {
        self.blank + self.elder_sign + self.cthulhu
    }

    /// Builds face-up stand-in cards for showing the claim. These never enter the deck.
    pub fn cards(&self, catalog: &dyn CardCatalog) -> Result<Vec<Card>, GameError> {
        let kinds = repeat(CardKind::Blank)
            .take(self.blank)
            .chain(repeat(CardKind::ElderSign).take(self.elder_sign))
            .chain(repeat(CardKind::Cthulhu).take(self.cthulhu));
        kinds
            .map(|kind| {
                Card::new(kind, catalog).map(|mut card| {
                    card.flip_up();
                    card
                })
            })
            .collect()
    }
}
