use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    /// The deck plus its discard pile no longer account for all 52 cards.
    /// Fatal for this deck instance; only a bug can cause it.
    #[error("deck invariant violated: {live} live + {discarded} discarded != 52")]
    CardCountInvariant { live: usize, discarded: usize },
    #[error("deck is out of cards")]
    Empty,
}

/// A standard 52-card deck with a discard pile.
///
/// Cards only ever move between the draw pile, the discard pile, and the
/// players/board; `live() + discarded()` must always equal 52. [`Deck::reset`]
/// verifies that invariant and refuses to reshuffle a corrupted deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    discard: Vec<Card>,
}

impl Deck {
    /// A full deck in canonical order. Call one of the shuffle methods
    /// before dealing.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards, discard: Vec::with_capacity(DECK_SIZE) }
    }

    /// A full deck shuffled with the provided RNG.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    /// Cards remaining in the draw pile.
    pub fn live(&self) -> usize {
        self.cards.len()
    }

    /// Cards in the discard pile.
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle the draw pile using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle the draw pile using the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deal one card from the top of the draw pile. The caller owns it
    /// until it comes back via [`Deck::discard`].
    pub fn deal(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Deal `n` cards.
    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        (0..n).map(|_| self.deal()).collect()
    }

    /// Burn the top card: deal it face down straight to the discard pile.
    pub fn burn(&mut self) -> Result<(), DeckError> {
        let card = self.deal()?;
        self.discard.push(card);
        Ok(())
    }

    /// Return dead cards (folded hole cards, a swept board) to the
    /// discard pile.
    pub fn discard<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.discard.extend(cards);
    }

    /// Move the discard pile back into the draw pile and reshuffle.
    ///
    /// Fails if any card has gone missing or been duplicated since the
    /// deck was created; a deck that fails this check must be discarded.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DeckError> {
        if self.cards.len() + self.discard.len() != DECK_SIZE {
            return Err(DeckError::CardCountInvariant {
                live: self.cards.len(),
                discarded: self.discard.len(),
            });
        }
        self.cards.append(&mut self.discard);
        self.shuffle_with(rng);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::standard();
        assert_eq!(d.live(), 52);
        let uniq: std::collections::HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(uniq.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
    }

    #[test]
    fn deal_and_burn_keep_the_card_count() {
        let mut d = Deck::shuffled(&mut rng());
        let held = d.deal_n(4).unwrap();
        d.burn().unwrap();
        assert_eq!(d.live(), 47);
        assert_eq!(d.discarded(), 1);
        assert_eq!(d.live() + d.discarded() + held.len(), DECK_SIZE);
    }

    #[test]
    fn reset_restores_a_full_deck() {
        let mut d = Deck::shuffled(&mut rng());
        let held = d.deal_n(7).unwrap();
        d.burn().unwrap();
        d.discard(held);
        d.reset(&mut rng()).unwrap();
        assert_eq!(d.live(), 52);
        assert_eq!(d.discarded(), 0);
    }

    #[test]
    fn reset_refuses_a_short_deck() {
        let mut d = Deck::shuffled(&mut rng());
        // Simulate a lost card: dealt but never discarded.
        let _lost = d.deal().unwrap();
        let err = d.reset(&mut rng()).unwrap_err();
        assert_eq!(err, DeckError::CardCountInvariant { live: 51, discarded: 0 });
    }

    #[test]
    fn dealing_out_the_deck_errors() {
        let mut d = Deck::standard();
        assert!(d.deal_n(52).is_ok());
        assert!(matches!(d.deal(), Err(DeckError::Empty)));
        assert!(matches!(d.burn(), Err(DeckError::Empty)));
    }
}
