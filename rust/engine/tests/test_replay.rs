use densedeck_engine::cards::Card;
use densedeck_engine::dealing::DealResponse;
use densedeck_engine::history::{HandRecord, build_hand_record, replay, showdown_result};
use densedeck_engine::table::{ActionCommand, ActionKind, Street, TableConfig, TableState};

fn c(s: &str) -> Card {
    s.parse().expect("card")
}

fn fixed_deal() -> DealResponse {
    DealResponse {
        hand_id: "replay01".to_string(),
        hands: vec![
            [c("As"), c("Ks")],
            [c("Qd"), c("Qc")],
            [c("Jh"), c("Jd")],
            [c("Th"), c("9h")],
        ],
        board_reserved: vec![
            c("2c"),
            c("7d"),
            c("9c"),
            c("4s"),
            c("6h"),
            c("8d"),
            c("Tc"),
            c("3h"),
            c("5d"),
            c("2s"),
        ],
    }
}

/// Play a full hand mixing default-sized and explicit bets, folds, and
/// checks, through every street.
fn play_scripted_hand() -> TableState {
    let mut t = TableState::new(&fixed_deal(), TableConfig::default(), 0).expect("table");
    let script: [(usize, ActionKind, Option<u32>); 13] = [
        (2, ActionKind::Raise, None),
        (3, ActionKind::Fold, None),
        (0, ActionKind::Call, None),
        (1, ActionKind::Call, None),
        (1, ActionKind::Check, None),
        (2, ActionKind::Bet, None),
        (0, ActionKind::Fold, None),
        (1, ActionKind::Call, None),
        (1, ActionKind::Check, None),
        (2, ActionKind::Check, None),
        (1, ActionKind::Bet, Some(10)),
        (2, ActionKind::Raise, None),
        (1, ActionKind::Call, None),
    ];
    for (seat, kind, amount) in script {
        t = t.apply_action(ActionCommand { seat, kind, amount }).advance();
    }
    assert_eq!(t.street, Street::Showdown);
    t
}

#[test]
fn replaying_the_log_reproduces_the_terminal_state() {
    let terminal = play_scripted_hand();
    let record = build_hand_record(&terminal).expect("record");

    // rebuild the initial table from the record's deal, then fold the log
    let deal = DealResponse {
        hand_id: record.hand_id.clone(),
        hands: record.hole_cards.clone(),
        board_reserved: record.board_reserved.clone(),
    };
    let config = TableConfig {
        seat_count: record.seat_count,
        starting_stack: record.initial_stacks[0],
        big_blind: record.big_blind,
        ..TableConfig::default()
    };
    let initial = TableState::new(&deal, config, record.btn_index).expect("table");
    let replayed = replay(&initial, &record.action_log);

    assert_eq!(replayed.street, Street::Showdown);
    assert_eq!(replayed.pot, terminal.pot);
    let replayed_stacks: Vec<u32> = replayed.players.iter().map(|p| p.stack).collect();
    assert_eq!(replayed_stacks, record.final_stacks);
    assert_eq!(replayed.pots, terminal.pots);

    let (winners, _) = showdown_result(&replayed).expect("showdown");
    assert_eq!(winners, record.winners);
}

#[test]
fn replay_reconstructs_an_all_in_runout() {
    let mut t = TableState::new(&fixed_deal(), TableConfig::default(), 0).expect("table");
    for (seat, kind, amount) in [
        (2usize, ActionKind::Raise, Some(100)),
        (3, ActionKind::Fold, None),
        (0, ActionKind::Fold, None),
        (1, ActionKind::Call, None),
    ] {
        t = t.apply_action(ActionCommand { seat, kind, amount }).advance();
    }
    while t.auto_win.is_none() && t.reveal_street != Street::Showdown {
        t = t.advance();
    }
    let record = build_hand_record(&t).expect("record");

    let initial = TableState::new(&fixed_deal(), TableConfig::default(), 0).expect("table");
    let replayed = replay(&initial, &record.action_log);
    assert_eq!(replayed.street, Street::Showdown);
    assert_eq!(replayed.reveal_street, Street::Showdown);
    assert_eq!(replayed.pot, record.pot);
    let (winners, _) = showdown_result(&replayed).expect("showdown");
    assert_eq!(winners, record.winners);
}

#[test]
fn record_fields_describe_the_hand() {
    let terminal = play_scripted_hand();
    let record = build_hand_record(&terminal).expect("record");

    assert_eq!(record.hand_id, "replay01");
    assert_eq!(record.seat_count, 4);
    assert_eq!(record.street_ended, Street::Showdown);
    assert_eq!(record.auto_win, None);
    assert_eq!(record.board.len(), 5);
    assert_eq!(record.hole_cards.len(), 4);
    assert_eq!(record.action_log.len(), terminal.action_log.len());
    // queens beat jacks on this board
    assert_eq!(record.winners, vec![1]);
    assert!(record.hand_values[1].is_some());
    assert!(record.hand_values[3].is_none(), "folded seat has no value");
    // chips are conserved between stacks and pot
    let spent: u32 = record
        .initial_stacks
        .iter()
        .zip(record.final_stacks.iter())
        .map(|(i, f)| i - f)
        .sum();
    assert_eq!(spent, record.pot);
}

#[test]
fn records_round_trip_through_json() {
    let terminal = play_scripted_hand();
    let record = build_hand_record(&terminal).expect("record");
    let json = serde_json::to_string(&record).expect("serialize");
    let parsed: HandRecord = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, record);
}
