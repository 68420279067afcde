use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::hand::{compare_hand_values, HandValue};

/// One pot slice: an amount and the seats eligible to win it. Folded players
/// fund pots but never appear in an eligible set.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

/// Derives main and side pots from per-player contribution totals.
///
/// Contribution levels are the distinct non-zero totals in ascending order;
/// each level's slice is `(level - previous) x players who contributed at
/// least that level`. With no short stacks this degenerates to a single main
/// pot; each all-in below the top level adds one side pot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    pub fn from_contributions(contributions: &[u32], folded: &[bool]) -> Self {
        let mut levels: Vec<u32> = contributions.iter().copied().filter(|&c| c > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::new();
        let mut prev = 0u32;
        for level in levels {
            let contributors = contributions.iter().filter(|&&c| c >= level).count() as u32;
            let amount = (level - prev) * contributors;
            let eligible: Vec<usize> = contributions
                .iter()
                .enumerate()
                .filter(|&(seat, &c)| c >= level && !folded[seat])
                .map(|(seat, _)| seat)
                .collect();
            pots.push(Pot { amount, eligible });
            prev = level;
        }

        Self { pots }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn into_pots(self) -> Vec<Pot> {
        self.pots
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map(|p| p.amount).unwrap_or(0)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }
}

/// Pay each pot to the best eligible hand(s). Ties split evenly; a
/// non-dividing remainder goes to the tied winner earliest in seat order.
/// Returns the payout per seat.
pub fn settle_pots(pots: &[Pot], values: &[Option<HandValue>]) -> Vec<u32> {
    let mut payouts = vec![0u32; values.len()];
    for pot in pots {
        let mut best: Option<&HandValue> = None;
        let mut winners: Vec<usize> = Vec::new();
        for &seat in &pot.eligible {
            let Some(value) = values[seat].as_ref() else {
                continue;
            };
            match best {
                None => {
                    best = Some(value);
                    winners = vec![seat];
                }
                Some(b) => match compare_hand_values(value, b) {
                    Ordering::Greater => {
                        best = Some(value);
                        winners = vec![seat];
                    }
                    Ordering::Equal => winners.push(seat),
                    Ordering::Less => {}
                },
            }
        }
        if winners.is_empty() {
            continue;
        }
        let share = pot.amount / winners.len() as u32;
        let remainder = pot.amount % winners.len() as u32;
        for &seat in &winners {
            payouts[seat] += share;
        }
        payouts[winners[0]] += remainder;
    }
    payouts
}
