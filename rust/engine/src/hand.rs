use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::EngineError;

/// The nine poker hand categories, ordered weakest to strongest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// A fully ordered hand strength: category first, then the category-specific
/// tie-break rank sequence, compared lexicographically.
///
/// Tie-break sequences per category:
/// - straight / straight flush: [high rank] (Five for the wheel)
/// - quads: [quad rank, kicker]
/// - full house: [trips rank, pair rank] (with two trips, the lower trips
///   rank stands in as the pair)
/// - flush / high card: five ranks descending
/// - trips: [trips rank, kicker, kicker]
/// - two pair: [high pair, low pair, kicker]
/// - one pair: [pair rank, kicker, kicker, kicker]
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub category: Category,
    pub ranks: Vec<Rank>,
}

/// Total order over hand values: positive means `a` wins, equal means an
/// exact tie (split pot).
pub fn compare_hand_values(a: &HandValue, b: &HandValue) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => {
            for (ra, rb) in a.ranks.iter().zip(b.ranks.iter()) {
                match ra.cmp(rb) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            Ordering::Equal
        }
        ord => ord,
    }
}

/// Evaluate exactly five cards into a [`HandValue`].
pub fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut rank_counts = [0u8; 15]; // 2..=14 used
    for c in cards {
        rank_counts[c.rank as usize] += 1;
    }

    let straight_high = detect_straight_high(&rank_counts);

    // Rank buckets by multiplicity, each sorted high to low.
    let mut quads = Vec::new();
    let mut trips = Vec::new();
    let mut pairs = Vec::new();
    let mut singles = Vec::new();
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            4 => quads.push(Rank::from_u8(r)),
            3 => trips.push(Rank::from_u8(r)),
            2 => pairs.push(Rank::from_u8(r)),
            1 => singles.push(Rank::from_u8(r)),
            _ => {}
        }
    }

    if let Some(high) = straight_high {
        if is_flush {
            return HandValue {
                category: Category::StraightFlush,
                ranks: vec![high],
            };
        }
    }

    if let Some(&quad) = quads.first() {
        return HandValue {
            category: Category::FourOfAKind,
            ranks: vec![quad, singles[0]],
        };
    }

    // 3+2, with 5 cards at most one trips rank exists
    if let (Some(&t), Some(&p)) = (trips.first(), pairs.first()) {
        return HandValue {
            category: Category::FullHouse,
            ranks: vec![t, p],
        };
    }

    if is_flush {
        let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        return HandValue {
            category: Category::Flush,
            ranks,
        };
    }

    if let Some(high) = straight_high {
        return HandValue {
            category: Category::Straight,
            ranks: vec![high],
        };
    }

    if let Some(&t) = trips.first() {
        return HandValue {
            category: Category::ThreeOfAKind,
            ranks: vec![t, singles[0], singles[1]],
        };
    }

    if pairs.len() >= 2 {
        return HandValue {
            category: Category::TwoPair,
            ranks: vec![pairs[0], pairs[1], singles[0]],
        };
    }

    if let Some(&p) = pairs.first() {
        return HandValue {
            category: Category::OnePair,
            ranks: vec![p, singles[0], singles[1], singles[2]],
        };
    }

    HandValue {
        category: Category::HighCard,
        ranks: singles,
    }
}

/// Straight detection over rank multiplicities, including the wheel
/// (A-2-3-4-5, reported with high card Five). Requires five distinct ranks.
fn detect_straight_high(rank_counts: &[u8; 15]) -> Option<Rank> {
    let distinct = (2..=14).filter(|&r| rank_counts[r] > 0).count();
    if distinct != 5 {
        return None;
    }
    for high in (6..=14u8).rev() {
        if (high - 4..=high).all(|r| rank_counts[r as usize] > 0) {
            return Some(Rank::from_u8(high));
        }
    }
    // wheel: A plus 2..5
    if rank_counts[14] > 0 && (2..=5).all(|r| rank_counts[r] > 0) {
        return Some(Rank::Five);
    }
    None
}

/// Lazily yields every k-element index subset of 0..n in lexicographic
/// order. Finite and restartable by constructing a new instance; the
/// evaluator uses it for the 5-of-6 and 5-of-7 searches.
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        // advance to the next combination, rightmost index first
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in (i + 1)..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Best five-card hand from hole cards plus board. With exactly five cards
/// total this delegates straight to [`evaluate_five`]; with six or seven it
/// exhaustively maximizes over every 5-subset. Fewer than five or more than
/// seven cards is a caller defect.
pub fn evaluate_best_of_seven(hole: &[Card], board: &[Card]) -> Result<HandValue, EngineError> {
    let all: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    let n = all.len();
    if !(5..=7).contains(&n) {
        return Err(EngineError::CardCount { count: n });
    }

    if n == 5 {
        let five = [all[0], all[1], all[2], all[3], all[4]];
        return Ok(evaluate_five(&five));
    }

    let mut best: Option<HandValue> = None;
    for combo in Combinations::new(n, 5) {
        let five = [
            all[combo[0]],
            all[combo[1]],
            all[combo[2]],
            all[combo[3]],
            all[combo[4]],
        ];
        let value = evaluate_five(&five);
        let better = match &best {
            None => true,
            Some(b) => compare_hand_values(&value, b) == Ordering::Greater,
        };
        if better {
            best = Some(value);
        }
    }
    best.ok_or(EngineError::CardCount { count: n })
}
