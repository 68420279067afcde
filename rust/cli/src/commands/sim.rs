//! Sim command handler: auto-play hands with policies and record histories.

use std::io::Write;

use densedeck_ai::create_policy;
use densedeck_engine::dealing::{DealRequest, LocalDealer, deal_with_fallback};
use densedeck_engine::history::{HandLogger, build_hand_record, payouts};
use densedeck_engine::positions::preflop_order;
use densedeck_engine::table::{Street, TableState};
use densedeck_engine::weights::GameMode;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config::CliConfig;
use crate::error::CliError;

/// Upper bound on actions per hand; a well-behaved policy never comes close,
/// so hitting it means a policy emitted illegal actions forever.
const MAX_ACTIONS_PER_HAND: u32 = 256;

pub fn handle_sim_command(
    hands: u32,
    seed: Option<u64>,
    output: Option<String>,
    policy_name: &str,
    mode: GameMode,
    config: &CliConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("--hands must be positive".to_string()));
    }

    let seed = seed.unwrap_or_else(crate::time_seed);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let policy = create_policy(policy_name);
    let mut local = LocalDealer::with_default_table();
    let mut logger = match output {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    let table_config = config.table_config();
    let seats = table_config.seat_count;
    let mut wins = vec![0u32; seats];

    for hand_no in 0..hands {
        let btn_index = (hand_no as usize) % seats;
        let req = DealRequest {
            seat_order: preflop_order(btn_index, seats),
            mode,
        };
        let resp = deal_with_fallback(None, &mut local, &req, &mut rng)?;
        let mut table = TableState::new(&resp, table_config.clone(), btn_index)?;

        let mut actions = 0u32;
        while !table.is_terminal() {
            if actions >= MAX_ACTIONS_PER_HAND {
                return Err(CliError::Engine(format!(
                    "hand {} did not terminate after {} actions",
                    table.hand_id, MAX_ACTIONS_PER_HAND
                )));
            }
            let cmd = policy.pick_action(&table, table.current_seat, &mut rng);
            table = table.apply_action(cmd).advance();
            actions += 1;
        }
        // finish revealing the board after an all-in runout
        while table.auto_win.is_none() && table.reveal_street != Street::Showdown {
            table = table.advance();
        }

        let paid = payouts(&table)?;
        for (seat, &amount) in paid.iter().enumerate() {
            if amount > 0 {
                wins[seat] += 1;
            }
        }

        let record = build_hand_record(&table)?;
        if let Some(logger) = logger.as_mut() {
            logger.write(&record)?;
        }
    }

    tracing::info!(hands, seed, policy = policy.name(), "simulation finished");
    writeln!(out, "Simulated {} hands (seed {}, {})", hands, seed, policy.name())?;
    for (seat, count) in wins.iter().enumerate() {
        writeln!(out, "Seat {}: {} wins", seat, count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use densedeck_engine::history::HandRecord;

    #[test]
    fn rejects_zero_hands() {
        let config = CliConfig::default();
        let mut out = Vec::new();
        let result =
            handle_sim_command(0, Some(1), None, "dense", GameMode::SuperDense, &config, &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn writes_one_record_per_hand() {
        let config = CliConfig::default();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hands.jsonl");
        let mut out = Vec::new();
        handle_sim_command(
            5,
            Some(42),
            Some(path.to_str().expect("path").to_string()),
            "dense",
            GameMode::SuperDense,
            &config,
            &mut out,
        )
        .expect("sim");

        let text = std::fs::read_to_string(&path).expect("read");
        let records: Vec<HandRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).expect("parse"))
            .collect();
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.seat_count == config.seats));
    }

    #[test]
    fn same_seed_same_outcomes() {
        let config = CliConfig::default();
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_sim_command(3, Some(7), None, "dense", GameMode::Dense, &config, &mut a)
            .expect("sim");
        handle_sim_command(3, Some(7), None, "dense", GameMode::Dense, &config, &mut b)
            .expect("sim");
        assert_eq!(a, b);
    }
}
