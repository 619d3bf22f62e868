use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::card::{Card, Rank, Suit};
use super::error::{GameError, GameResult};

/// An ordered deck of playing cards. Cards are dealt from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    pub(crate) cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Creates a full, unshuffled 52-card deck.
    pub fn new() -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
        };
        deck.initialize();
        deck
    }

    /// Repopulates the canonical 52-card set in suit and rank order,
    /// discarding whatever was left from the previous round.
    pub fn initialize(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.cards.push(Card::new(suit, rank));
            }
        }
    }

    /// Shuffles the deck in place (Fisher-Yates) with a ChaCha20 RNG.
    pub fn shuffle(&mut self) {
        let mut rng = ChaCha20Rng::from_entropy();
        self.cards.shuffle(&mut rng);
    }

    /// Fresh deck for a new round: reinitialize, then shuffle.
    pub fn refresh(&mut self) {
        self.initialize();
        self.shuffle();
    }

    /// Removes and returns the front card.
    pub fn deal(&mut self) -> GameResult<Card> {
        if self.cards.is_empty() {
            return Err(GameError::DeckExhausted);
        }
        Ok(self.cards.remove(0))
    }

    /// Returns the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_deck_has_52_unique_cards() {
        let deck = Deck::new();
        assert_eq!(deck.remaining(), 52);

        let unique: HashSet<(Suit, Rank)> = deck.cards.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_refresh_yields_52_unique_cards() {
        let mut deck = Deck::new();
        for _ in 0..10 {
            deck.deal().unwrap();
        }
        deck.refresh();

        assert_eq!(deck.remaining(), 52);
        let unique: HashSet<(Suit, Rank)> = deck.cards.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_refresh_changes_order() {
        // A shuffle landing back on the sorted order is possible in theory
        // but will not happen in practice (1 in 52!).
        let sorted = Deck::new();
        let mut shuffled = Deck::new();
        shuffled.refresh();

        let same_order = sorted
            .cards
            .iter()
            .zip(shuffled.cards.iter())
            .all(|(a, b)| a.suit == b.suit && a.rank == b.rank);
        assert!(!same_order);
    }

    #[test]
    fn test_deal_removes_front_card() {
        let mut deck = Deck::new();
        let front = deck.cards[0];
        let dealt = deck.deal().unwrap();
        assert_eq!(dealt.suit, front.suit);
        assert_eq!(dealt.rank, front.rank);
        assert_eq!(deck.remaining(), 51);
    }

    #[test]
    fn test_empty_deck_fails_to_deal() {
        let mut deck = Deck::new();
        for _ in 0..52 {
            deck.deal().unwrap();
        }
        assert_eq!(deck.deal(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn test_dealt_cards_start_face_down() {
        let mut deck = Deck::new();
        deck.refresh();
        let card = deck.deal().unwrap();
        assert!(!card.is_visible());
    }
}
