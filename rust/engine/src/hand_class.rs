use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Canonical key for a two-card starting hand, ignoring suit identity beyond
/// the suited/offsuit distinction: `"88"` for pocket pairs, `"AKs"` / `"QJo"`
/// otherwise with the higher rank first.
///
/// The key is symmetric in its two inputs, so `classify(a, b)` and
/// `classify(b, a)` always collapse to the same class. It is used as the
/// lookup key into weight and allow tables.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandClass(String);

impl HandClass {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandClass {
    fn from(s: &str) -> Self {
        HandClass(s.to_string())
    }
}

/// Reduce two hole cards to their starting-hand class.
pub fn classify(c1: Card, c2: Card) -> HandClass {
    let r1 = c1.rank.to_char();
    let r2 = c2.rank.to_char();

    if c1.rank == c2.rank {
        return HandClass(format!("{}{}", r1, r2));
    }

    let (hi, lo) = if c1.rank > c2.rank { (r1, r2) } else { (r2, r1) };
    let tag = if c1.suit == c2.suit { 's' } else { 'o' };
    HandClass(format!("{}{}{}", hi, lo, tag))
}
