use crate::cards::{Card, Rank, Suit};
use crate::error::InvalidStateError;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// An ordered pile of distinct cards. Draws come off the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in a fixed order: suit-major, ranks ascending.
    ///
    /// ```
    /// use holdem_sim::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    /// Return a new deck without `known`. The receiver is left untouched.
    ///
    /// Every known card must be present exactly once, otherwise the caller is trying to
    /// deal a card twice.
    ///
    /// ```
    /// use holdem_sim::cards::parse_cards;
    /// use holdem_sim::deck::Deck;
    ///
    /// let known = parse_cards("As Ah").unwrap();
    /// let rest = Deck::standard().remove_known(&known).unwrap();
    /// assert_eq!(rest.len(), 50);
    /// assert!(Deck::standard().remove_known(&parse_cards("As As").unwrap()).is_err());
    /// ```
    pub fn remove_known(&self, known: &[Card]) -> Result<Deck, InvalidStateError> {
        let mut cards = self.cards.clone();
        for &card in known {
            let idx = cards
                .iter()
                .position(|&c| c == card)
                .ok_or(InvalidStateError::CardNotInDeck(card))?;
            cards.remove(idx);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle with a ChaCha8 stream seeded from `seed`.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Uniform shuffle driven by the caller's RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw up to `n` cards; fewer are returned if the deck runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.draw()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_is_52_distinct_cards() {
        let d = Deck::standard();
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), 52);
        assert_eq!(d.as_slice()[0], Card::new(Rank::Two, Suit::Clubs));
        assert_eq!(d.as_slice()[51], Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn remove_known_leaves_source_untouched() {
        let d = Deck::standard();
        let ks = Card::new(Rank::King, Suit::Spades);
        let rest = d.remove_known(&[ks]).unwrap();
        assert_eq!(d.len(), 52);
        assert_eq!(rest.len(), 51);
        assert!(!rest.contains(ks));
        assert!(d.contains(ks));
    }

    #[test]
    fn remove_known_rejects_missing_card() {
        let ks = Card::new(Rank::King, Suit::Spades);
        let rest = Deck::standard().remove_known(&[ks]).unwrap();
        assert_eq!(rest.remove_known(&[ks]), Err(InvalidStateError::CardNotInDeck(ks)));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1, d2);
        assert_ne!(d1, Deck::standard());
    }

    #[test]
    fn draw_n_stops_at_empty() {
        let mut d = Deck::standard().remove_known(&Deck::standard().as_slice()[..49]).unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d.draw_n(5).len(), 3);
        assert!(d.is_empty());
        assert_eq!(d.draw(), None);
    }
}
