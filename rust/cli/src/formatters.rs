//! Display helpers shared by the subcommands.

use densedeck_engine::cards::Card;
use densedeck_engine::hand::Category;
use densedeck_engine::positions::Position;
use densedeck_engine::table::{ActionKind, ActionLogEntry, Street};

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn position_label(p: Position) -> &'static str {
    match p {
        Position::Button => "BTN",
        Position::BigBlind => "BB",
        Position::UnderTheGun => "UTG",
        Position::Cutoff => "CO",
    }
}

pub fn street_label(s: Street) -> &'static str {
    match s {
        Street::Preflop => "Preflop",
        Street::Flop => "Flop",
        Street::Turn => "Turn",
        Street::River => "River",
        Street::Showdown => "Showdown",
    }
}

pub fn category_label(c: Category) -> &'static str {
    match c {
        Category::HighCard => "High Card",
        Category::OnePair => "A Pair",
        Category::TwoPair => "Two Pair",
        Category::ThreeOfAKind => "Three Cards",
        Category::Straight => "Straight",
        Category::Flush => "Flush",
        Category::FullHouse => "Full House",
        Category::FourOfAKind => "Quads",
        Category::StraightFlush => "Straight Flush",
    }
}

/// Human label for one log entry, marking all-ins the way the table UI does.
pub fn action_label(entry: &ActionLogEntry) -> String {
    let amt = entry.amount;
    let went_all_in = entry.stack_after == 0
        && matches!(
            entry.kind,
            ActionKind::Bet | ActionKind::Raise | ActionKind::Call
        );
    if went_all_in {
        return if amt > 0 {
            format!("All-in {}BB", amt)
        } else {
            "All-in".to_string()
        };
    }
    match entry.kind {
        ActionKind::Fold => "Fold".to_string(),
        ActionKind::Check => "Check".to_string(),
        ActionKind::Call => {
            if amt > 0 {
                format!("Call {}BB", amt)
            } else {
                "Call".to_string()
            }
        }
        ActionKind::Bet => {
            if amt > 0 {
                format!("Bet {}BB", amt)
            } else {
                "Bet".to_string()
            }
        }
        ActionKind::Raise => {
            if amt > 0 {
                format!("Raise {}BB", amt)
            } else {
                "Raise".to_string()
            }
        }
    }
}
