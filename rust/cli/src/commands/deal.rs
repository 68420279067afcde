//! Deal command handler: one weighted deal, printed seat by seat.

use std::io::Write;

use densedeck_engine::dealing::{DealRequest, DealSource, LocalDealer};
use densedeck_engine::hand_class::classify;
use densedeck_engine::positions::{position_of, preflop_order};
use densedeck_engine::weights::GameMode;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::formatters::{format_cards, position_label};

pub fn handle_deal_command(
    seed: Option<u64>,
    mode: GameMode,
    config: &CliConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(crate::time_seed);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut dealer = LocalDealer::with_default_table();

    let seats = config.seats;
    let btn_index = 0;
    let req = DealRequest {
        seat_order: preflop_order(btn_index, seats),
        mode,
    };
    let resp = dealer.deal(&req, &mut rng)?;

    writeln!(out, "Hand {} (seed {})", resp.hand_id, seed)?;
    for (seat, hand) in resp.hands.iter().enumerate() {
        let role = position_label(position_of(seat, btn_index, seats));
        let class = classify(hand[0], hand[1]);
        writeln!(
            out,
            "Seat {} [{}]: {}  ({})",
            seat,
            role,
            format_cards(hand),
            class
        )?;
    }
    writeln!(out, "Board: {}", format_cards(&resp.board_reserved[..5]))?;
    writeln!(
        out,
        "Reserved: {} cards total",
        resp.board_reserved.len()
    )?;
    Ok(())
}
