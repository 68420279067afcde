use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::dealing::DealResponse;
use crate::errors::EngineError;
use crate::positions::{postflop_order, preflop_order, seat_roles};
use crate::pot::{Pot, PotManager};

/// Betting street. Strictly monotonic over a hand's life; `Showdown` is
/// terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            _ => Street::Showdown,
        }
    }

    /// Board cards disclosed on this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

/// One action as submitted by a caller. For bet/raise, `amount` is the
/// target total contribution for the street; `None` applies the table's
/// configured default sizing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionCommand {
    pub seat: usize,
    pub kind: ActionKind,
    pub amount: Option<u32>,
}

/// Append-only record of one resolved action. The full hand is
/// reconstructible by folding these entries over the initial table state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub order: u32,
    pub street: Street,
    pub seat: usize,
    pub kind: ActionKind,
    /// Chips actually paid by this action.
    pub amount: u32,
    pub pot_after: u32,
    pub bet_after: u32,
    pub stack_after: u32,
    pub table_bet_after: u32,
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hole: [Card; 2],
    pub stack: u32,
    /// Contribution to the current street only; reset when the street closes.
    pub street_bet: u32,
    pub folded: bool,
    pub all_in: bool,
}

impl PlayerState {
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }
}

/// Table parameters. `big_blind` scales the forced bet and every minimum;
/// the two open-sizing fields are the configurable default used when a
/// bet/raise command carries no explicit amount.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub seat_count: usize,
    pub starting_stack: u32,
    pub big_blind: u32,
    /// Default preflop open, in big blinds.
    pub preflop_open_units: u32,
    /// Default postflop open divides the pot by this (2 = half pot).
    pub postflop_open_pot_divisor: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seat_count: 4,
            starting_stack: 100,
            big_blind: 1,
            preflop_open_units: 3,
            postflop_open_pot_divisor: 2,
        }
    }
}

/// Complete state of one hand in progress. Value semantics: `apply_action`
/// and `advance` never mutate, they return the successor state, so any held
/// reference remains valid history for replay and audit.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub config: TableConfig,
    pub hand_id: String,
    pub players: Vec<PlayerState>,
    /// Reserved board block from the deal; the first five cards are flop,
    /// turn, and river.
    pub board_reserved: Vec<Card>,
    pub pot: u32,
    /// Bet to match on the current street.
    pub table_bet: u32,
    pub street: Street,
    /// Street up to which board cards are disclosed to observers. Lags
    /// `street` during an all-in runout.
    pub reveal_street: Street,
    pub current_seat: usize,
    /// Seat that opened the current betting round, for full-circuit
    /// detection.
    pub round_starter: usize,
    pub last_aggressor: Option<usize>,
    /// Size of the last full raise; the next raise must add at least this.
    pub last_raise: u32,
    /// Set once a short all-in caps the bet level; no reopening until the
    /// street closes.
    pub raise_blocked: bool,
    pub btn_index: usize,
    /// Seat that wins without showdown because everyone else folded.
    pub auto_win: Option<usize>,
    pub started_at_ms: i64,
    pub initial_stacks: Vec<u32>,
    pub action_log: Vec<ActionLogEntry>,
    /// Current pot structure, recomputed after every action.
    pub pots: Vec<Pot>,
}

impl TableState {
    /// Start a hand from a deal: seats get their hole cards, the big blind
    /// posts, and the first actor is computed. Fails fast on any structural
    /// mismatch so a broken deal never reaches betting.
    pub fn new(
        deal: &DealResponse,
        config: TableConfig,
        btn_index: usize,
    ) -> Result<TableState, EngineError> {
        let seats = config.seat_count;
        if !(2..=4).contains(&seats) {
            return Err(EngineError::SeatCount { seats });
        }
        if deal.hands.len() != seats {
            return Err(EngineError::HandCountMismatch {
                hands: deal.hands.len(),
                seats,
            });
        }
        if deal.board_reserved.len() < 5 {
            return Err(EngineError::ShortBoard {
                got: deal.board_reserved.len(),
                need: 5,
            });
        }

        let roles = seat_roles(btn_index, seats);
        let players: Vec<PlayerState> = deal
            .hands
            .iter()
            .enumerate()
            .map(|(seat, &hole)| {
                let posted = if seat == roles.bb {
                    config.big_blind.min(config.starting_stack)
                } else {
                    0
                };
                let stack = config.starting_stack - posted;
                PlayerState {
                    hole,
                    stack,
                    street_bet: posted,
                    folded: false,
                    all_in: stack == 0 && posted > 0,
                }
            })
            .collect();

        let pot = players.iter().map(|p| p.street_bet).sum();
        let order = preflop_order(btn_index, seats);
        let first = first_active_in(&order, &players);
        let initial_stacks = vec![config.starting_stack; seats];
        let contributions: Vec<u32> = players.iter().map(|p| p.street_bet).collect();
        let folded = vec![false; seats];
        let pots = PotManager::from_contributions(&contributions, &folded).into_pots();

        tracing::debug!(hand_id = %deal.hand_id, btn_index, "hand started");
        Ok(TableState {
            config: config.clone(),
            hand_id: deal.hand_id.clone(),
            players,
            board_reserved: deal.board_reserved.clone(),
            pot,
            table_bet: config.big_blind,
            street: Street::Preflop,
            reveal_street: Street::Preflop,
            current_seat: first,
            round_starter: first,
            last_aggressor: None,
            last_raise: config.big_blind,
            raise_blocked: false,
            btn_index,
            auto_win: None,
            started_at_ms: Utc::now().timestamp_millis(),
            initial_stacks,
            action_log: Vec::new(),
            pots,
        })
    }

    /// Board cards visible on a given street.
    pub fn board_for(&self, street: Street) -> &[Card] {
        &self.board_reserved[..street.board_len()]
    }

    /// Board as currently disclosed to observers.
    pub fn visible_board(&self) -> &[Card] {
        self.board_for(self.reveal_street)
    }

    /// The complete five-card board, for showdown evaluation.
    pub fn full_board(&self) -> &[Card] {
        self.board_for(Street::River)
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        self.table_bet
            .saturating_sub(self.players[seat].street_bet)
    }

    /// Total chips each seat has put in over the whole hand.
    pub fn contributions(&self) -> Vec<u32> {
        self.initial_stacks
            .iter()
            .zip(self.players.iter())
            .map(|(&initial, p)| initial - p.stack)
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.street == Street::Showdown
    }

    /// Minimum legal target total for a bet/raise right now.
    pub fn min_raise_total(&self) -> u32 {
        if self.table_bet == 0 {
            self.config.big_blind.max(1)
        } else {
            let increment = if self.last_raise > 0 {
                self.last_raise
            } else {
                self.config.big_blind.max(1)
            };
            self.table_bet + increment
        }
    }

    /// Currently legal action kinds for a seat, derived purely from
    /// fold/all-in/bet-parity state. Callers (human input validation and AI
    /// policies) are expected to consult this before submitting.
    pub fn legal_actions(&self, seat: usize) -> Vec<ActionKind> {
        if self.street == Street::Showdown || seat >= self.players.len() {
            return Vec::new();
        }
        let p = &self.players[seat];
        if !p.can_act() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let to_call = self.to_call(seat);
        if to_call == 0 {
            actions.push(ActionKind::Check);
            if p.stack > 0 && !self.raise_blocked {
                actions.push(if self.table_bet == 0 {
                    ActionKind::Bet
                } else {
                    ActionKind::Raise
                });
            }
        } else {
            actions.push(ActionKind::Fold);
            if p.stack > 0 {
                actions.push(ActionKind::Call);
            }
            if p.stack > to_call && !self.raise_blocked {
                actions.push(ActionKind::Raise);
            }
        }
        actions
    }

    /// Apply one action, producing the successor state. Stale or impossible
    /// actions (after showdown, from a folded or all-in seat, raising while
    /// raising is blocked) return the state unchanged rather than erroring:
    /// legality authority lives with the caller via [`legal_actions`].
    pub fn apply_action(&self, cmd: ActionCommand) -> TableState {
        let mut next = self.clone();
        if next.street == Street::Showdown || cmd.seat >= next.players.len() {
            return next;
        }
        if !next.players[cmd.seat].can_act() {
            return next;
        }

        let mut pay = 0u32;
        match cmd.kind {
            ActionKind::Fold => {
                next.players[cmd.seat].folded = true;
                if next.last_aggressor == Some(cmd.seat) {
                    next.last_aggressor = None;
                }
            }
            ActionKind::Check => {}
            ActionKind::Call => {
                let p = &mut next.players[cmd.seat];
                let to_call = next.table_bet.saturating_sub(p.street_bet);
                pay = to_call.min(p.stack);
                p.stack -= pay;
                p.street_bet += pay;
                next.pot += pay;
                if p.stack == 0 {
                    p.all_in = true;
                }
            }
            ActionKind::Bet | ActionKind::Raise => {
                if next.raise_blocked {
                    return next;
                }
                let (min_total, default_total) = next.bet_targets(cmd.seat);
                let max_total =
                    next.players[cmd.seat].street_bet + next.players[cmd.seat].stack;
                let requested = cmd.amount.unwrap_or(default_total);
                let target = if max_total < min_total {
                    // short all-in: the most this seat can put in
                    max_total
                } else {
                    requested.max(min_total).min(max_total)
                };

                let prev_level = next.table_bet;
                let required_increment = if prev_level == 0 {
                    next.config.big_blind.max(1)
                } else if next.last_raise > 0 {
                    next.last_raise
                } else {
                    next.config.big_blind.max(1)
                };

                let p = &mut next.players[cmd.seat];
                pay = target.saturating_sub(p.street_bet);
                p.stack -= pay;
                p.street_bet += pay;
                next.pot += pay;
                if p.stack == 0 {
                    p.all_in = true;
                }

                let new_level = prev_level.max(p.street_bet);
                let increment = new_level - prev_level;
                next.table_bet = new_level;
                if increment >= required_increment || (prev_level == 0 && increment > 0) {
                    next.last_raise = increment;
                    next.last_aggressor = Some(cmd.seat);
                } else if increment > 0 {
                    // short all-in raise: bet level moves, but raising does
                    // not reopen for players who already matched
                    next.raise_blocked = true;
                }
                // increment == 0 was an all-in for less than the call: the
                // bet level and aggressor are untouched
            }
        }

        let p = &next.players[cmd.seat];
        next.action_log.push(ActionLogEntry {
            order: next.action_log.len() as u32,
            street: next.street,
            seat: cmd.seat,
            kind: cmd.kind,
            amount: pay,
            pot_after: next.pot,
            bet_after: p.street_bet,
            stack_after: p.stack,
            table_bet_after: next.table_bet,
            timestamp_ms: Utc::now().timestamp_millis(),
        });

        let contributions = next.contributions();
        let folded: Vec<bool> = next.players.iter().map(|p| p.folded).collect();
        next.pots = PotManager::from_contributions(&contributions, &folded).into_pots();

        tracing::debug!(seat = cmd.seat, kind = ?cmd.kind, pay, pot = next.pot, "action applied");
        next
    }

    /// Minimum legal target and default-sized target for a bet/raise by
    /// `seat`, both as street contribution totals.
    fn bet_targets(&self, seat: usize) -> (u32, u32) {
        let p = &self.players[seat];
        let one_unit = self.config.big_blind.max(1);
        if self.table_bet == 0 {
            let default = if self.street == Street::Preflop {
                self.config.preflop_open_units * one_unit
            } else {
                self.pot.max(1).div_ceil(self.config.postflop_open_pot_divisor.max(1))
            };
            (one_unit, default.max(one_unit))
        } else {
            let min_total = self.min_raise_total();
            let to_call = self.table_bet.saturating_sub(p.street_bet);
            let call_part = to_call.min(p.stack);
            let remaining = p.stack - call_part;
            let raise_part = (to_call * 3).min(remaining);
            (min_total, p.street_bet + call_part + raise_part)
        }
    }

    /// Resolve what happens after an action: end of hand, forced runout,
    /// street close, or simply the next seat to act.
    pub fn advance(&self) -> TableState {
        let mut next = self.clone();
        let seats = next.players.len();

        if next.street == Street::Showdown {
            // all-in runout pacing: disclose one more street per call
            if next.auto_win.is_none() && next.reveal_street != Street::Showdown {
                next.reveal_street = next.reveal_street.next();
            }
            return next;
        }

        let order = if next.street == Street::Preflop {
            preflop_order(next.btn_index, seats)
        } else {
            postflop_order(next.btn_index, seats)
        };

        let not_folded: Vec<usize> = (0..seats).filter(|&s| !next.players[s].folded).collect();

        // everyone else folded: the hand is over without any evaluation
        if not_folded.len() <= 1 {
            next.auto_win = Some(not_folded.first().copied().unwrap_or(0));
            next.street = Street::Showdown;
            tracing::debug!(winner = ?next.auto_win, "hand won by folds");
            return next;
        }

        // nobody can make another decision: race to showdown, board revealed
        // street by street via subsequent advance calls
        if not_folded.iter().all(|&s| next.players[s].all_in) {
            next.street = Street::Showdown;
            tracing::debug!("all-in runout");
            return next;
        }

        let effective_starter = if next.players[next.round_starter].can_act() {
            next.round_starter
        } else {
            first_active_in(&order, &next.players)
        };

        let next_seat = next_active_after(&order, &next.players, next.current_seat);
        let everyone_matched = not_folded.iter().all(|&s| {
            let p = &next.players[s];
            p.all_in || p.street_bet == next.table_bet
        });
        let came_full_circle = next_seat == effective_starter;
        let closed_to_aggressor = match next.last_aggressor {
            Some(a) if next.players[a].can_act() => next_seat == a,
            // aggressor folded or went all-in: fall back to the round starter
            _ => came_full_circle,
        };

        let round_closed = if next.table_bet == 0 {
            came_full_circle
        } else {
            everyone_matched && closed_to_aggressor
        };

        if round_closed {
            let new_street = next.street.next();
            next.street = new_street;
            if new_street == Street::Showdown {
                next.reveal_street = Street::Showdown;
                return next;
            }
            next.reveal_street = new_street;
            for p in &mut next.players {
                p.street_bet = 0;
            }
            next.table_bet = 0;
            next.last_raise = 0;
            next.raise_blocked = false;
            next.last_aggressor = None;
            let new_order = postflop_order(next.btn_index, seats);
            let first = first_active_in(&new_order, &next.players);
            next.current_seat = first;
            next.round_starter = first;
            tracing::debug!(street = ?next.street, "street advanced");
            return next;
        }

        next.current_seat = next_seat;
        next.round_starter = effective_starter;
        next
    }
}

fn first_active_in(order: &[usize], players: &[PlayerState]) -> usize {
    order
        .iter()
        .copied()
        .find(|&s| players[s].can_act())
        .unwrap_or(order[0])
}

fn next_active_after(order: &[usize], players: &[PlayerState], current: usize) -> usize {
    let len = order.len();
    let start = order.iter().position(|&s| s == current).unwrap_or(0);
    for step in 1..=len {
        let seat = order[(start + step) % len];
        if players[seat].can_act() {
            return seat;
        }
    }
    current
}
