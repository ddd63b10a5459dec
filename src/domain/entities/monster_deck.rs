//! Monster ability deck - the rotating deck flipped once per round

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::card::MonsterCard;
use super::deck::{Deck, DeckError};

/// A monster's ability deck with the currently revealed card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterDeck {
    pub monster_name: String,
    deck: Deck<MonsterCard>,
    active_card: Option<MonsterCard>,
}

impl MonsterDeck {
    pub fn new(monster_name: impl Into<String>, cards: impl IntoIterator<Item = MonsterCard>) -> Self {
        Self {
            monster_name: monster_name.into(),
            deck: Deck::from_cards(cards),
            active_card: None,
        }
    }

    pub fn insert_card(&mut self, card: MonsterCard) {
        self.deck.insert_card(card);
    }

    /// Shuffle and reveal a fresh card, as done when the deck first enters play
    pub fn shuffle(&mut self) -> Result<&MonsterCard, DeckError> {
        self.deck.shuffle();
        self.flip()
    }

    /// Reveal the next card
    pub fn flip(&mut self) -> Result<&MonsterCard, DeckError> {
        let card = self.deck.draw_card()?;
        Ok(&*self.active_card.insert(card))
    }

    /// Start a new round: pay any owed reshuffle, then reveal the next card
    pub fn new_round(&mut self) -> Result<&MonsterCard, DeckError> {
        self.new_round_with(&mut rand::thread_rng())
    }

    pub fn new_round_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&MonsterCard, DeckError> {
        if self.deck.shuffle_pending() {
            tracing::debug!(monster = %self.monster_name, "Reshuffling monster deck for new round");
            self.deck.shuffle_with(rng);
        }
        self.flip()
    }

    pub fn active_card(&self) -> Option<&MonsterCard> {
        self.active_card.as_ref()
    }

    pub fn shuffle_pending(&self) -> bool {
        self.deck.shuffle_pending()
    }

    pub fn deck(&self) -> &Deck<MonsterCard> {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck<MonsterCard> {
        &mut self.deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bandit_archer_deck() -> MonsterDeck {
        let cards = (0..10).map(|i| {
            MonsterCard::new("Bandit Archer", 4, 10 + i * 5)
                .with_content("<span class=\"large\">Attack +1</span>")
        });
        let mut deck = MonsterDeck::new("Bandit Archer", cards);
        deck.deck_mut().card_mut(5).unwrap().shuffle = true;
        deck
    }

    #[test]
    fn test_flip_on_empty_deck_fails() {
        let mut deck = MonsterDeck::new("Ghost", Vec::new());
        assert_eq!(deck.flip().unwrap_err(), DeckError::Empty);
        assert!(deck.active_card().is_none());
    }

    #[test]
    fn test_flip_sets_active_card() {
        let mut deck = bandit_archer_deck();
        let initiative = deck.flip().unwrap().initiative;
        assert_eq!(initiative, 10);
        assert_eq!(deck.active_card().unwrap().initiative, 10);
        assert_eq!(deck.deck().len(), 10);
    }

    #[test]
    fn test_new_round_reshuffles_after_shuffle_card() {
        let mut deck = bandit_archer_deck();

        // Walk to the reshuffle card (index 5)
        for _ in 0..6 {
            deck.new_round().unwrap();
        }
        assert!(deck.active_card().unwrap().shuffle);
        assert!(deck.shuffle_pending());

        let mut unshuffled = deck.deck().clone();
        unshuffled.draw_card().unwrap();

        let mut expected = deck.deck().clone();
        expected.shuffle_with(&mut StdRng::seed_from_u64(7));
        let expected_card = expected.draw_card().unwrap();

        let revealed = deck
            .new_round_with(&mut StdRng::seed_from_u64(7))
            .unwrap()
            .clone();
        assert_eq!(revealed, expected_card);
        assert_eq!(deck.deck(), &expected);
        assert_ne!(deck.deck(), &unshuffled);
        assert_eq!(deck.shuffle_pending(), revealed.shuffle);

        let mut initiatives: Vec<_> = deck.deck().cards().map(|c| c.initiative).collect();
        initiatives.sort_unstable();
        assert_eq!(initiatives, (0..10).map(|i| 10 + i * 5).collect::<Vec<_>>());
    }
}
