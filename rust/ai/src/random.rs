//! Uniform-random policy over the legal-actions query. Useful as a control
//! in simulations and for fuzzing the state machine.

use densedeck_engine::table::{ActionCommand, ActionKind, TableState};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::Policy;

#[derive(Debug, Clone, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for RandomPolicy {
    fn pick_action(&self, table: &TableState, seat: usize, rng: &mut ChaCha20Rng) -> ActionCommand {
        let legal = table.legal_actions(seat);
        let kind = if legal.is_empty() {
            ActionKind::Check
        } else {
            legal[rng.random_range(0..legal.len())]
        };
        ActionCommand {
            seat,
            kind,
            amount: None,
        }
    }

    fn name(&self) -> &str {
        "RandomPolicy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densedeck_engine::dealing::DealResponse;
    use densedeck_engine::table::{TableConfig, TableState};
    use rand::SeedableRng;

    fn card(s: &str) -> densedeck_engine::cards::Card {
        s.parse().expect("card")
    }

    #[test]
    fn picks_from_legal_set() {
        let deal = DealResponse {
            hand_id: "testhand".to_string(),
            hands: vec![
                [card("As"), card("Ks")],
                [card("Qd"), card("Qc")],
                [card("Th"), card("9h")],
                [card("8s"), card("8d")],
            ],
            board_reserved: vec![
                card("2c"),
                card("7d"),
                card("9c"),
                card("4s"),
                card("6h"),
            ],
        };
        let table = TableState::new(&deal, TableConfig::default(), 0).expect("table");
        let policy = RandomPolicy::new();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..64 {
            let cmd = policy.pick_action(&table, table.current_seat, &mut rng);
            assert!(table.legal_actions(table.current_seat).contains(&cmd.kind));
        }
    }
}
