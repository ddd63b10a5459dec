//! Deck Service - The decks in play for the current encounter
//!
//! Holds one ability deck per monster group plus the shared attack modifier
//! deck, and drives the per-round draws for all of them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{LookupError, RetrievalPort};
use crate::application::services::with_timeout;
use crate::domain::entities::{DeckError, ModifierCard, ModifierDeck, MonsterCard, MonsterDeck};
use crate::domain::value_objects::DeckId;

#[derive(Debug, thiserror::Error)]
pub enum DeckServiceError {
    #[error("Deck not found: {0}")]
    NotFound(DeckId),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// A card revealed for a monster deck at the start of a round
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnCard {
    pub deck_id: DeckId,
    pub monster_name: String,
    pub card: MonsterCard,
}

/// Everything that changed in the decks when a new round began
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDraws {
    pub monster_cards: Vec<DrawnCard>,
    /// Whether the modifier deck was reset because a reshuffle card came up
    pub modifiers_reset: bool,
}

pub struct DeckService {
    retrieval: Arc<dyn RetrievalPort>,
    monster_decks: RwLock<HashMap<DeckId, MonsterDeck>>,
    modifier_deck: RwLock<ModifierDeck>,
    lookup_timeout: Duration,
}

impl DeckService {
    pub fn new(retrieval: Arc<dyn RetrievalPort>, lookup_timeout: Duration) -> Self {
        let mut modifier_deck = ModifierDeck::standard();
        modifier_deck.shuffle();
        Self {
            retrieval,
            monster_decks: RwLock::new(HashMap::new()),
            modifier_deck: RwLock::new(modifier_deck),
            lookup_timeout,
        }
    }

    // ------------------------------------------------------------------------
    // Monster ability decks
    // ------------------------------------------------------------------------

    /// Put a monster deck into play, shuffled with its first card revealed
    #[instrument(skip(self, cards))]
    pub async fn create_monster_deck(
        &self,
        monster_name: &str,
        cards: Vec<MonsterCard>,
    ) -> (DeckId, MonsterDeck) {
        let id = DeckId::new();
        let mut deck = MonsterDeck::new(monster_name, cards);
        if let Err(e) = deck.shuffle() {
            debug!("Monster deck created without cards: {}", e);
        }
        self.monster_decks.write().await.insert(id, deck.clone());
        info!(deck_id = %id, cards = deck.deck().len(), "Monster deck in play");
        (id, deck)
    }

    /// Put a monster deck into play using the catalog's cards for that species
    #[instrument(skip(self))]
    pub async fn create_monster_deck_from_catalog(
        &self,
        monster_name: &str,
        level: u32,
    ) -> Result<(DeckId, MonsterDeck), DeckServiceError> {
        let cards = with_timeout(
            self.lookup_timeout,
            self.retrieval.get_monster_cards(monster_name, level),
        )
        .await
        .inspect_err(|e| warn!("Monster card lookup failed: {}", e))?;
        Ok(self.create_monster_deck(monster_name, cards).await)
    }

    pub async fn monster_deck(&self, id: DeckId) -> Option<MonsterDeck> {
        self.monster_decks.read().await.get(&id).cloned()
    }

    /// All monster decks, ordered by monster name
    pub async fn monster_decks(&self) -> Vec<(DeckId, MonsterDeck)> {
        let mut decks: Vec<_> = self
            .monster_decks
            .read()
            .await
            .iter()
            .map(|(id, deck)| (*id, deck.clone()))
            .collect();
        decks.sort_by(|a, b| a.1.monster_name.cmp(&b.1.monster_name));
        decks
    }

    pub async fn remove_monster_deck(&self, id: DeckId) -> bool {
        self.monster_decks.write().await.remove(&id).is_some()
    }

    async fn with_monster_deck<T>(
        &self,
        id: DeckId,
        action: impl FnOnce(&mut MonsterDeck) -> Result<T, DeckError>,
    ) -> Result<T, DeckServiceError> {
        let mut decks = self.monster_decks.write().await;
        let deck = decks.get_mut(&id).ok_or(DeckServiceError::NotFound(id))?;
        Ok(action(deck)?)
    }

    pub async fn insert_card(&self, id: DeckId, card: MonsterCard) -> Result<(), DeckServiceError> {
        self.with_monster_deck(id, |deck| {
            deck.insert_card(card);
            Ok(())
        })
        .await
    }

    /// Reveal the next card without paying any owed reshuffle
    #[instrument(skip(self))]
    pub async fn flip(&self, id: DeckId) -> Result<MonsterCard, DeckServiceError> {
        self.with_monster_deck(id, |deck| deck.flip().cloned()).await
    }

    #[instrument(skip(self))]
    pub async fn shuffle(&self, id: DeckId) -> Result<MonsterCard, DeckServiceError> {
        self.with_monster_deck(id, |deck| deck.shuffle().cloned()).await
    }

    #[instrument(skip(self))]
    pub async fn new_round(&self, id: DeckId) -> Result<MonsterCard, DeckServiceError> {
        self.with_monster_deck(id, |deck| deck.new_round().cloned()).await
    }

    /// Start a new round for every deck in play
    ///
    /// Each monster deck reshuffles if owed and reveals its next card; empty
    /// decks are skipped. The modifier deck resets if a reshuffle card was
    /// drawn during the round that just ended.
    #[instrument(skip(self))]
    pub async fn new_round_all(&self) -> RoundDraws {
        let mut monster_cards = Vec::new();
        {
            let mut decks = self.monster_decks.write().await;
            for (id, deck) in decks.iter_mut() {
                let monster_name = deck.monster_name.clone();
                match deck.new_round() {
                    Ok(card) => monster_cards.push(DrawnCard {
                        deck_id: *id,
                        monster_name,
                        card: card.clone(),
                    }),
                    Err(e) => debug!(deck_id = %id, "Skipping deck: {}", e),
                }
            }
        }
        monster_cards.sort_by(|a, b| a.monster_name.cmp(&b.monster_name));

        let modifiers_reset = self.modifier_deck.write().await.end_round();
        info!(
            revealed = monster_cards.len(),
            modifiers_reset, "Decks advanced to new round"
        );
        RoundDraws {
            monster_cards,
            modifiers_reset,
        }
    }

    // ------------------------------------------------------------------------
    // Attack modifier deck
    // ------------------------------------------------------------------------

    pub async fn modifier_deck(&self) -> ModifierDeck {
        self.modifier_deck.read().await.clone()
    }

    pub async fn draw_modifier(&self) -> Result<ModifierCard, DeckServiceError> {
        Ok(self.modifier_deck.write().await.draw_card()?)
    }

    pub async fn draw_two_modifiers(&self) -> Result<[ModifierCard; 2], DeckServiceError> {
        Ok(self.modifier_deck.write().await.draw_two()?)
    }

    pub async fn add_curse(&self) -> Result<(), DeckServiceError> {
        Ok(self.modifier_deck.write().await.add_curse()?)
    }

    pub async fn add_bless(&self) -> Result<(), DeckServiceError> {
        Ok(self.modifier_deck.write().await.add_bless()?)
    }

    pub async fn shuffle_modifiers(&self) {
        self.modifier_deck.write().await.shuffle();
    }

    pub async fn reset_modifiers(&self) {
        self.modifier_deck.write().await.reset_deck();
    }
}
