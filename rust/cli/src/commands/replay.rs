//! Replay command handler: re-fold recorded action logs and verify that the
//! terminal pot, stacks, and winners reproduce exactly.

use std::io::Write;

use densedeck_engine::dealing::DealResponse;
use densedeck_engine::history::{HandRecord, replay, showdown_result};
use densedeck_engine::table::{TableConfig, TableState};

use crate::error::CliError;
use crate::formatters::{action_label, format_cards, street_label};

pub fn handle_replay_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = std::fs::read_to_string(input)
        .map_err(|e| CliError::InvalidInput(format!("failed to read {}: {}", input, e)))?;
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        writeln!(out, "No hands found in file.")?;
        return Ok(());
    }

    let mut failures = 0usize;
    for (idx, line) in lines.iter().enumerate() {
        let record: HandRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                writeln!(err, "Failed to parse hand {}: {}", idx + 1, e)?;
                failures += 1;
                continue;
            }
        };

        match verify_record(&record) {
            Ok(()) => {
                writeln!(out, "Hand {} ({}): OK", idx + 1, record.hand_id)?;
                print_timeline(&record, out)?;
            }
            Err(reason) => {
                writeln!(err, "Hand {} ({}): FAIL: {}", idx + 1, record.hand_id, reason)?;
                failures += 1;
            }
        }
    }

    writeln!(out, "Replayed {} hands, {} failures.", lines.len(), failures)?;
    if failures > 0 {
        return Err(CliError::Engine(format!(
            "{} hands failed to reproduce",
            failures
        )));
    }
    Ok(())
}

/// Rebuild the initial table from the record and fold the action log over
/// it; any divergence in pot, stacks, or winners is a failure.
fn verify_record(record: &HandRecord) -> Result<(), String> {
    let initial_stack = record
        .initial_stacks
        .first()
        .copied()
        .ok_or_else(|| "record has no initial stacks".to_string())?;
    let deal = DealResponse {
        hand_id: record.hand_id.clone(),
        hands: record.hole_cards.clone(),
        board_reserved: record.board_reserved.clone(),
    };
    let config = TableConfig {
        seat_count: record.seat_count,
        starting_stack: initial_stack,
        big_blind: record.big_blind,
        ..TableConfig::default()
    };
    let initial = TableState::new(&deal, config, record.btn_index).map_err(|e| e.to_string())?;

    let terminal = replay(&initial, &record.action_log);
    if terminal.pot != record.pot {
        return Err(format!("pot {} != recorded {}", terminal.pot, record.pot));
    }
    let stacks: Vec<u32> = terminal.players.iter().map(|p| p.stack).collect();
    if stacks != record.final_stacks {
        return Err(format!(
            "stacks {:?} != recorded {:?}",
            stacks, record.final_stacks
        ));
    }
    if terminal.street != record.street_ended {
        return Err(format!(
            "ended on {:?} != recorded {:?}",
            terminal.street, record.street_ended
        ));
    }
    let (winners, _) = showdown_result(&terminal).map_err(|e| e.to_string())?;
    if winners != record.winners {
        return Err(format!(
            "winners {:?} != recorded {:?}",
            winners, record.winners
        ));
    }
    Ok(())
}

fn print_timeline(record: &HandRecord, out: &mut dyn Write) -> Result<(), CliError> {
    let mut current_street = None;
    for entry in &record.action_log {
        if current_street != Some(entry.street) {
            current_street = Some(entry.street);
            writeln!(out, "  {}:", street_label(entry.street))?;
        }
        writeln!(
            out,
            "    Seat {}: {}  (pot {})",
            entry.seat,
            action_label(entry),
            entry.pot_after
        )?;
    }
    if let Some(winner) = record.auto_win {
        writeln!(out, "  Seat {} wins uncontested, pot {}", winner, record.pot)?;
    } else {
        writeln!(
            out,
            "  Board: {}  winners {:?}, pot {}",
            format_cards(&record.board),
            record.winners,
            record.pot
        )?;
    }
    Ok(())
}
