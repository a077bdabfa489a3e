use super::card::{Card, CardKind};
use super::options::{CARDS_PER_PLAYER, MAX_PLAYERS, MIN_PLAYERS};
use super::rules::CardCatalog;
use crate::error::GameError;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::iter::repeat;

/// The shared card piles: the draw deck, and the discard pile of cards revealed in earlier rounds.
#[derive(Clone, Serialize, Deserialize, Default, Debug)]
pub struct Deck {
    /// The current draw deck
    deck: Vec<Card>,
    /// Revealed cards set aside at the end of a round
    discard: Vec<Card>,
}

impl Deck {
    /// Builds the deck for a table of `num_players`: one Cthulhu (two above eight players),
    /// an Elder Sign per player, and blanks up to five cards per player.
    pub fn new(num_players: usize, catalog: &dyn CardCatalog) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::Configuration(format!(
                "cannot build a deck for {} players",
                num_players
            )));
        }
        let cthulhus = if num_players > 8 { 2 } else { 1 };
        let blanks = num_players * CARDS_PER_PLAYER - cthulhus - num_players;

        let deck = repeat(CardKind::Cthulhu)
            .take(cthulhus)
            .chain(repeat(CardKind::ElderSign).take(num_players))
            .chain(repeat(CardKind::Blank).take(blanks))
            .map(|kind| Card::new(kind, catalog))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { deck, discard: vec![] })
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.deck.shuffle(rng);
    }

    /// Shuffles the draw deck and deals all of it out, one card to each hand in turn.
    pub fn deal(&mut self, num_hands: usize, rng: &mut impl Rng) -> Vec<Vec<Card>> {
        let mut hands = vec![vec![]; num_hands];
        if num_hands == 0 {
            return hands;
        }
        self.shuffle(rng);
        let mut seat = 0;
        while let Some(card) = self.deck.pop() {
            hands[seat].push(card);
            seat = (seat + 1) % num_hands;
        }
        hands
    }

    /// Returns a hand to the piles: revealed cards are discarded, the rest go back in the deck.
    /// Discarded cards keep their face-up state.
    pub fn recollect(&mut self, hand: Vec<Card>) {
        for mut card in hand {
            if card.is_face_up() {
                self.discard.push(card);
            } else {
                card.flip_down();
                self.deck.push(card);
            }
        }
    }

    /// The number of cards in the draw pile.
    pub fn count(&self) -> usize {
        self.deck.len()
    }

    /// The number of cards in the discard pile.
    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }

    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// Every card in either pile.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.deck.iter().chain(self.discard.iter())
    }
}
