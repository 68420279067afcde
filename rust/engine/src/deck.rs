use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::cards::{Card, full_deck};

/// Fisher-Yates shuffle of an arbitrary card set with an injected RNG.
/// Shuffling an empty set simply returns an empty vector.
pub fn shuffled(cards: &[Card], rng: &mut ChaCha20Rng) -> Vec<Card> {
    let mut out = cards.to_vec();
    out.shuffle(rng);
    out
}

/// A freshly shuffled 52-card deck. The same RNG state always produces the
/// same permutation.
pub fn shuffled_deck(rng: &mut ChaCha20Rng) -> Vec<Card> {
    shuffled(&full_deck(), rng)
}
