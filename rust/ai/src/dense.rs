//! Position-aware baseline policy for Dense Deck play.
//!
//! Preflop decisions are frequency-based per seat role; postflop decisions
//! come from made-hand and draw detection on the board revealed so far.
//! Deterministic given the same table state and RNG stream.

use densedeck_engine::hand::{evaluate_best_of_seven, Category};
use densedeck_engine::positions::{position_of, Position};
use densedeck_engine::table::{ActionCommand, ActionKind, TableState};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::Policy;

/// Open-raise frequency when checked to, by position. The BB never opens
/// for free; it checks its option.
fn open_odds(role: Position) -> f64 {
    match role {
        Position::UnderTheGun => 0.85,
        Position::Cutoff => 0.95,
        Position::Button => 1.0,
        Position::BigBlind => 0.0,
    }
}

/// Continue frequency when facing a bet, by position.
fn defend_odds(role: Position) -> f64 {
    match role {
        Position::UnderTheGun => 0.6,
        Position::Cutoff => 0.7,
        Position::Button => 0.85,
        Position::BigBlind => 0.8,
    }
}

/// Re-raise frequency when facing a bet, by position.
fn aggressive_odds(role: Position) -> f64 {
    match role {
        Position::UnderTheGun => 0.1,
        Position::Cutoff => 0.15,
        Position::Button => 0.2,
        Position::BigBlind => 0.15,
    }
}

struct HandRead {
    made: bool,
    strong_made: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DensePolicy;

impl DensePolicy {
    pub fn new() -> Self {
        Self
    }

    /// Read hole cards against the board revealed on the current logical
    /// street. Only called postflop, so there are always 5-7 cards.
    fn read_hand(table: &TableState, seat: usize) -> HandRead {
        let board = table.board_for(table.street);
        let hole = &table.players[seat].hole;
        match evaluate_best_of_seven(hole, board) {
            Ok(value) => HandRead {
                made: value.category != Category::HighCard,
                strong_made: value.category >= Category::ThreeOfAKind,
            },
            Err(_) => HandRead {
                made: false,
                strong_made: false,
            },
        }
    }

    fn decide_preflop(
        table: &TableState,
        seat: usize,
        legal: &[ActionKind],
        rng: &mut ChaCha20Rng,
    ) -> ActionKind {
        let role = position_of(seat, table.btn_index, table.players.len());
        let to_call = table.to_call(seat);
        let can_raise =
            legal.contains(&ActionKind::Raise) || legal.contains(&ActionKind::Bet);
        let can_call = legal.contains(&ActionKind::Call);
        let can_check = legal.contains(&ActionKind::Check);
        let can_fold = legal.contains(&ActionKind::Fold);

        if to_call == 0 {
            if role == Position::BigBlind {
                return if can_check {
                    ActionKind::Check
                } else {
                    ActionKind::Fold
                };
            }
            if can_raise && rng.random::<f64>() < open_odds(role) {
                return if table.table_bet == 0 {
                    ActionKind::Bet
                } else {
                    ActionKind::Raise
                };
            }
            if can_check {
                return ActionKind::Check;
            }
            fallback(can_fold, can_call)
        } else {
            if can_raise && rng.random::<f64>() < aggressive_odds(role) {
                return ActionKind::Raise;
            }
            if can_call && rng.random::<f64>() < defend_odds(role) {
                return ActionKind::Call;
            }
            fallback(can_fold, can_call)
        }
    }

    fn decide_postflop(
        table: &TableState,
        seat: usize,
        legal: &[ActionKind],
    ) -> ActionKind {
        let read = Self::read_hand(table, seat);
        let to_call = table.to_call(seat);
        let can_raise =
            legal.contains(&ActionKind::Raise) || legal.contains(&ActionKind::Bet);
        let can_call = legal.contains(&ActionKind::Call);
        let can_check = legal.contains(&ActionKind::Check);
        let can_fold = legal.contains(&ActionKind::Fold);

        if to_call == 0 {
            if read.made && can_raise {
                return if table.table_bet == 0 {
                    ActionKind::Bet
                } else {
                    ActionKind::Raise
                };
            }
            if can_check {
                ActionKind::Check
            } else {
                ActionKind::Call
            }
        } else {
            if read.strong_made && can_raise {
                return ActionKind::Raise;
            }
            if read.made && can_call {
                return ActionKind::Call;
            }
            fallback(can_fold, can_call)
        }
    }
}

fn fallback(can_fold: bool, can_call: bool) -> ActionKind {
    if can_fold {
        ActionKind::Fold
    } else if can_call {
        ActionKind::Call
    } else {
        ActionKind::Check
    }
}

impl Policy for DensePolicy {
    fn pick_action(&self, table: &TableState, seat: usize, rng: &mut ChaCha20Rng) -> ActionCommand {
        let legal = table.legal_actions(seat);
        if legal.is_empty() {
            // stale call; the state machine absorbs this
            return ActionCommand {
                seat,
                kind: ActionKind::Check,
                amount: None,
            };
        }

        let kind = match table.street {
            densedeck_engine::table::Street::Preflop => {
                Self::decide_preflop(table, seat, &legal, rng)
            }
            _ => Self::decide_postflop(table, seat, &legal),
        };

        ActionCommand {
            seat,
            kind,
            amount: None,
        }
    }

    fn name(&self) -> &str {
        "DensePolicy"
    }
}
