//! Deck generation - paired pair keys, shuffled with a seeded RNG

use crate::rng::SimpleRng;
use crate::types::{LayoutSpec, PairKey};

/// Build a shuffled deck sized to `layout`.
///
/// The deck holds every key in `[0, pair_count)` exactly twice; an odd cell
/// count drops the last slot.
pub fn generate_deck(layout: LayoutSpec, rng: &mut SimpleRng) -> Vec<PairKey> {
    let pair_count = layout.pair_count() as PairKey;
    let mut deck: Vec<PairKey> = (0..pair_count).flat_map(|k| [k, k]).collect();
    rng.shuffle(&mut deck);
    deck
}

/// Why a persisted deck was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    Empty,
    OddLength(usize),
    BadMultiplicity { key: PairKey, count: usize },
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::Empty => write!(f, "deck is empty"),
            DeckError::OddLength(len) => write!(f, "deck has odd length {len}"),
            DeckError::BadMultiplicity { key, count } => {
                write!(f, "pair key {key} appears {count} times")
            }
        }
    }
}

impl std::error::Error for DeckError {}

/// Check that a deck can be played to completion.
pub fn validate_deck(deck: &[PairKey]) -> Result<(), DeckError> {
    if deck.is_empty() {
        return Err(DeckError::Empty);
    }
    if deck.len() % 2 != 0 {
        return Err(DeckError::OddLength(deck.len()));
    }

    let mut sorted = deck.to_vec();
    sorted.sort_unstable();
    for chunk in sorted.chunk_by(|a, b| a == b) {
        if chunk.len() != 2 {
            return Err(DeckError::BadMultiplicity {
                key: chunk[0],
                count: chunk.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(deck: &[PairKey], pair_count: usize) -> Vec<usize> {
        let mut counts = vec![0usize; pair_count];
        for &k in deck {
            counts[k as usize] += 1;
        }
        counts
    }

    #[test]
    fn test_deck_sizes() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(generate_deck(LayoutSpec::new(2, 2), &mut rng).len(), 4);
        assert_eq!(generate_deck(LayoutSpec::new(3, 3), &mut rng).len(), 8);
        assert_eq!(generate_deck(LayoutSpec::new(5, 6), &mut rng).len(), 30);
        assert!(generate_deck(LayoutSpec::new(1, 1), &mut rng).is_empty());
    }

    #[test]
    fn test_every_key_twice() {
        let mut rng = SimpleRng::new(2024);
        let deck = generate_deck(LayoutSpec::new(4, 4), &mut rng);
        assert!(counts(&deck, 8).iter().all(|&c| c == 2));
        assert_eq!(validate_deck(&deck), Ok(()));
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = generate_deck(LayoutSpec::new(5, 6), &mut SimpleRng::new(77));
        let b = generate_deck(LayoutSpec::new(5, 6), &mut SimpleRng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert_eq!(validate_deck(&[]), Err(DeckError::Empty));
        assert_eq!(validate_deck(&[0, 0, 1]), Err(DeckError::OddLength(3)));
        assert_eq!(
            validate_deck(&[0, 0, 0, 1]),
            Err(DeckError::BadMultiplicity { key: 0, count: 3 })
        );
    }
}
