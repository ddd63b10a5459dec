//! Attack modifier deck - a draw pile with a discard pile and consumable cards
//!
//! Unlike the rotating [`Deck`](super::deck::Deck), drawn cards leave the
//! draw pile. Ordinary cards go to the discard pile and come back on reset;
//! curse and bless cards are removed from play once drawn.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::deck::{DeckCard, DeckError};

/// Maximum number of curse (or bless) cards in the draw pile at once
pub const MAX_CONSUMABLES: usize = 10;

/// One attack modifier card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ModifierCard {
    /// Flat bonus or penalty to the attack
    Modifier(i32),
    /// Double the attack; forces a reshuffle at end of round
    Double,
    /// Attack deals no damage; forces a reshuffle at end of round
    Null,
    /// Consumable null
    Curse,
    /// Consumable double
    Bless,
}

impl ModifierCard {
    /// Curse and bless cards leave play when drawn
    pub fn is_consumable(&self) -> bool {
        matches!(self, ModifierCard::Curse | ModifierCard::Bless)
    }
}

impl DeckCard for ModifierCard {
    fn triggers_reshuffle(&self) -> bool {
        matches!(self, ModifierCard::Double | ModifierCard::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierDeck {
    draw_pile: VecDeque<ModifierCard>,
    discard_pile: Vec<ModifierCard>,
    shuffle_me: bool,
}

impl Default for ModifierDeck {
    fn default() -> Self {
        Self::standard()
    }
}

impl ModifierDeck {
    /// The 20-card starting deck
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(20);
        cards.extend(std::iter::repeat(ModifierCard::Modifier(0)).take(6));
        cards.extend(std::iter::repeat(ModifierCard::Modifier(1)).take(5));
        cards.extend(std::iter::repeat(ModifierCard::Modifier(-1)).take(5));
        cards.push(ModifierCard::Modifier(2));
        cards.push(ModifierCard::Modifier(-2));
        cards.push(ModifierCard::Double);
        cards.push(ModifierCard::Null);
        Self::from_cards(cards)
    }

    pub fn from_cards(cards: impl IntoIterator<Item = ModifierCard>) -> Self {
        Self {
            draw_pile: cards.into_iter().collect(),
            discard_pile: Vec::new(),
            shuffle_me: false,
        }
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Shuffle the draw pile in place; the discard pile is untouched
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw_pile.make_contiguous().shuffle(rng);
    }

    pub fn draw_card(&mut self) -> Result<ModifierCard, DeckError> {
        let card = self.draw_pile.pop_front().ok_or(DeckError::Empty)?;
        if card.triggers_reshuffle() {
            self.shuffle_me = true;
        }
        if !card.is_consumable() {
            self.discard_pile.push(card);
        }
        Ok(card)
    }

    /// Draw two cards at once; fails without drawing if fewer than two remain
    pub fn draw_two(&mut self) -> Result<[ModifierCard; 2], DeckError> {
        if self.draw_pile.len() < 2 {
            return Err(DeckError::NotEnoughCards {
                requested: 2,
                available: self.draw_pile.len(),
            });
        }
        Ok([self.draw_card()?, self.draw_card()?])
    }

    pub fn add_curse(&mut self) -> Result<(), DeckError> {
        self.add_consumable_with(ModifierCard::Curse, "curse", &mut rand::thread_rng())
    }

    pub fn add_bless(&mut self) -> Result<(), DeckError> {
        self.add_consumable_with(ModifierCard::Bless, "bless", &mut rand::thread_rng())
    }

    /// Shuffle a consumable card into a random position of the draw pile
    fn add_consumable_with<R: Rng + ?Sized>(
        &mut self,
        card: ModifierCard,
        label: &'static str,
        rng: &mut R,
    ) -> Result<(), DeckError> {
        if self.count_in_draw_pile(card) >= MAX_CONSUMABLES {
            return Err(DeckError::LimitReached {
                card: label,
                limit: MAX_CONSUMABLES,
            });
        }
        let position = rng.gen_range(0..=self.draw_pile.len());
        self.draw_pile.insert(position, card);
        Ok(())
    }

    /// Return every discarded card to the draw pile and shuffle
    pub fn reset_deck(&mut self) {
        self.reset_deck_with(&mut rand::thread_rng());
    }

    pub fn reset_deck_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw_pile.extend(self.discard_pile.drain(..));
        self.shuffle_with(rng);
        self.shuffle_me = false;
    }

    /// Finish a round, resetting the deck if a reshuffle card was drawn
    pub fn end_round(&mut self) -> bool {
        if self.shuffle_me {
            self.reset_deck();
            true
        } else {
            false
        }
    }

    pub fn count_in_draw_pile(&self, card: ModifierCard) -> usize {
        self.draw_pile.iter().filter(|c| **c == card).count()
    }

    pub fn shuffle_pending(&self) -> bool {
        self.shuffle_me
    }

    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discarded(&self) -> &[ModifierCard] {
        &self.discard_pile
    }
}
