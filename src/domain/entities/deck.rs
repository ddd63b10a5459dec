//! Deck - An ordered, shuffleable, rotating sequence of cards
//!
//! Drawing takes the front card and re-appends it to the back, so the card
//! count never changes and every card comes up once per pass. A drawn card
//! carrying the reshuffle flag only *records* that a shuffle is owed; the
//! caller performs it before the next round's draw.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors raised by deck operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("Cannot draw from an empty deck")]
    Empty,
    #[error("Deck holds {available} drawable card(s), {requested} requested")]
    NotEnoughCards { requested: usize, available: usize },
    #[error("No more than {limit} {card} cards may be in play")]
    LimitReached { card: &'static str, limit: usize },
}

/// A card that can live in a [`Deck`]
pub trait DeckCard: Clone {
    /// Whether drawing this card means the deck must be reshuffled next round
    fn triggers_reshuffle(&self) -> bool;
}

/// Rotating deck used for persistent per-round card draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck<C> {
    cards: VecDeque<C>,
    shuffle_me: bool,
}

impl<C> Default for Deck<C> {
    fn default() -> Self {
        Self {
            cards: VecDeque::new(),
            shuffle_me: false,
        }
    }
}

impl<C: DeckCard> Deck<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = C>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            shuffle_me: false,
        }
    }

    /// Append a card to the back of the deck
    pub fn insert_card(&mut self, card: C) {
        self.cards.push_back(card);
    }

    /// Uniformly permute the deck using the thread-local RNG
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Uniformly permute the deck with the given RNG and clear any pending reshuffle
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
        self.shuffle_me = false;
    }

    /// Draw the front card, rotating it to the back
    pub fn draw_card(&mut self) -> Result<C, DeckError> {
        let card = self.cards.pop_front().ok_or(DeckError::Empty)?;
        if card.triggers_reshuffle() {
            self.shuffle_me = true;
        }
        self.cards.push_back(card.clone());
        Ok(card)
    }

    /// The card that the next draw will return
    pub fn peek(&self) -> Option<&C> {
        self.cards.front()
    }

    /// Whether a reshuffle card was drawn since the last shuffle
    pub fn shuffle_pending(&self) -> bool {
        self.shuffle_me
    }

    pub fn cards(&self) -> impl Iterator<Item = &C> {
        self.cards.iter()
    }

    /// Mutable access for setup-time tweaks such as flagging a reshuffle card
    pub fn card_mut(&mut self, index: usize) -> Option<&mut C> {
        self.cards.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
