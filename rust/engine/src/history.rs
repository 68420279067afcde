use std::collections::BTreeSet;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;
use crate::hand::{evaluate_best_of_seven, HandValue};
use crate::pot::settle_pots;
use crate::table::{ActionCommand, ActionKind, ActionLogEntry, Street, TableState};

/// Everything an external persistence or replay collaborator needs to
/// reconstruct a hand: the dealt state, the action log, and the outcome.
/// Serialized one record per line (JSONL) by [`HandLogger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_id: String,
    pub started_at_ms: i64,
    pub ended_at_ms: i64,
    pub btn_index: usize,
    pub seat_count: usize,
    pub big_blind: u32,
    pub street_ended: Street,
    pub auto_win: Option<usize>,
    /// Flop, turn, and river in order.
    pub board: Vec<Card>,
    pub board_reserved: Vec<Card>,
    pub hole_cards: Vec<[Card; 2]>,
    pub initial_stacks: Vec<u32>,
    pub final_stacks: Vec<u32>,
    pub action_log: Vec<ActionLogEntry>,
    pub winners: Vec<usize>,
    pub hand_values: Vec<Option<HandValue>>,
    pub pot: u32,
    /// RFC3339 write timestamp, injected by the logger.
    #[serde(default)]
    pub recorded_at: Option<String>,
}

/// Winners and per-seat hand values of a terminal table. An auto-win skips
/// evaluation entirely; otherwise each pot goes to the best eligible
/// hand(s), and the winner set is the union over pots.
pub fn showdown_result(
    table: &TableState,
) -> Result<(Vec<usize>, Vec<Option<HandValue>>), EngineError> {
    if let Some(winner) = table.auto_win {
        return Ok((vec![winner], vec![None; table.players.len()]));
    }

    let board = table.full_board();
    let mut values: Vec<Option<HandValue>> = Vec::with_capacity(table.players.len());
    for p in &table.players {
        if p.folded {
            values.push(None);
        } else {
            values.push(Some(evaluate_best_of_seven(&p.hole, board)?));
        }
    }

    let mut winners = BTreeSet::new();
    for pot in &table.pots {
        let mut best: Option<&HandValue> = None;
        let mut pot_winners: Vec<usize> = Vec::new();
        for &seat in &pot.eligible {
            let Some(value) = values[seat].as_ref() else {
                continue;
            };
            match best {
                None => {
                    best = Some(value);
                    pot_winners = vec![seat];
                }
                Some(b) => match crate::hand::compare_hand_values(value, b) {
                    std::cmp::Ordering::Greater => {
                        best = Some(value);
                        pot_winners = vec![seat];
                    }
                    std::cmp::Ordering::Equal => pot_winners.push(seat),
                    std::cmp::Ordering::Less => {}
                },
            }
        }
        winners.extend(pot_winners);
    }

    Ok((winners.into_iter().collect(), values))
}

/// Chips awarded per seat once the hand is terminal. With an auto-win the
/// whole pot goes to the surviving seat; otherwise each pot is settled
/// against the showdown values.
pub fn payouts(table: &TableState) -> Result<Vec<u32>, EngineError> {
    if let Some(winner) = table.auto_win {
        let mut out = vec![0u32; table.players.len()];
        out[winner] = table.pot;
        return Ok(out);
    }
    let (_, values) = showdown_result(table)?;
    Ok(settle_pots(&table.pots, &values))
}

/// Produce the persistence-boundary record from a table state. Winner and
/// value fields are populated only once the hand is terminal.
pub fn build_hand_record(table: &TableState) -> Result<HandRecord, EngineError> {
    let (winners, hand_values) = if table.is_terminal() {
        showdown_result(table)?
    } else {
        (Vec::new(), vec![None; table.players.len()])
    };

    Ok(HandRecord {
        hand_id: table.hand_id.clone(),
        started_at_ms: table.started_at_ms,
        ended_at_ms: Utc::now().timestamp_millis(),
        btn_index: table.btn_index,
        seat_count: table.players.len(),
        big_blind: table.config.big_blind,
        street_ended: table.street,
        auto_win: table.auto_win,
        board: table.full_board().to_vec(),
        board_reserved: table.board_reserved.clone(),
        hole_cards: table.players.iter().map(|p| p.hole).collect(),
        initial_stacks: table.initial_stacks.clone(),
        final_stacks: table.players.iter().map(|p| p.stack).collect(),
        action_log: table.action_log.clone(),
        winners,
        hand_values,
        pot: table.pot,
        recorded_at: None,
    })
}

/// Fold an action log over a freshly dealt table state. For bet/raise
/// entries the logged post-action street bet is replayed as the target
/// total, so clamping resolves identically and the terminal pot, stacks,
/// and winners reproduce exactly.
pub fn replay(initial: &TableState, log: &[ActionLogEntry]) -> TableState {
    let mut state = initial.clone();
    for entry in log {
        let amount = match entry.kind {
            ActionKind::Bet | ActionKind::Raise => Some(entry.bet_after),
            _ => None,
        };
        state = state
            .apply_action(ActionCommand {
                seat: entry.seat,
                kind: entry.kind,
                amount,
            })
            .advance();
    }
    // finish disclosing the board if the hand ended in an all-in runout
    while state.street == Street::Showdown
        && state.auto_win.is_none()
        && state.reveal_street != Street::Showdown
    {
        state = state.advance();
    }
    state
}

/// Append-only JSONL writer for hand records.
pub struct HandLogger {
    writer: BufWriter<File>,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject write timestamp if missing
        let mut rec = record.clone();
        if rec.recorded_at.is_none() {
            rec.recorded_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
