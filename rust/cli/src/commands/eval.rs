//! Eval command handler: score 5-7 cards from the command line.

use std::io::Write;

use densedeck_engine::cards::Card;
use densedeck_engine::hand::evaluate_best_of_seven;

use crate::error::CliError;
use crate::formatters::category_label;

pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let parsed: Result<Vec<Card>, _> = cards.iter().map(|s| s.parse::<Card>()).collect();
    let parsed = parsed.map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let mut seen = std::collections::HashSet::new();
    for card in &parsed {
        if !seen.insert(*card) {
            return Err(CliError::InvalidInput(format!("duplicate card: {}", card)));
        }
    }

    let value = evaluate_best_of_seven(&parsed[..2], &parsed[2..])?;
    let ranks: Vec<String> = value
        .ranks
        .iter()
        .map(|r| r.to_char().to_string())
        .collect();
    writeln!(
        out,
        "{}  (tie-breaks: {})",
        category_label(value.category),
        ranks.join(" ")
    )?;
    Ok(())
}
