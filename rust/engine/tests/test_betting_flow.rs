use densedeck_engine::cards::Card;
use densedeck_engine::dealing::DealResponse;
use densedeck_engine::errors::EngineError;
use densedeck_engine::table::{ActionCommand, ActionKind, Street, TableConfig, TableState};

fn c(s: &str) -> Card {
    s.parse().expect("card")
}

fn fixed_deal() -> DealResponse {
    DealResponse {
        hand_id: "fixture1".to_string(),
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

fn new_table() -> TableState {
    TableState::new(&fixed_deal(), TableConfig::default(), 0).expect("table")
}

fn act(state: &TableState, seat: usize, kind: ActionKind, amount: Option<u32>) -> TableState {
    state
        .apply_action(ActionCommand { seat, kind, amount })
        .advance()
}

fn total_pots(state: &TableState) -> u32 {
    state.pots.iter().map(|p| p.amount).sum()
}

#[test]
fn blinds_posted_and_first_actor_is_utg() {
    let t = new_table();
    assert_eq!(t.street, Street::Preflop);
    assert_eq!(t.pot, 1);
    assert_eq!(t.table_bet, 1);
    assert_eq!(t.players[1].street_bet, 1);
    assert_eq!(t.players[1].stack, 99);
    assert_eq!(t.current_seat, 2);
    assert_eq!(t.round_starter, 2);
}

#[test]
fn bb_gets_its_option_before_preflop_closes() {
    let mut t = new_table();
    t = act(&t, 2, ActionKind::Call, None);
    t = act(&t, 3, ActionKind::Call, None);
    t = act(&t, 0, ActionKind::Call, None);

    assert_eq!(t.street, Street::Preflop);
    assert_eq!(t.current_seat, 1);
    assert_eq!(
        t.legal_actions(1),
        vec![ActionKind::Check, ActionKind::Raise]
    );
}

#[test]
fn calls_around_close_preflop_exactly_once() {
    let mut t = new_table();
    t = act(&t, 2, ActionKind::Call, None);
    t = act(&t, 3, ActionKind::Call, None);
    t = act(&t, 0, ActionKind::Call, None);
    t = act(&t, 1, ActionKind::Check, None);

    assert_eq!(t.street, Street::Flop);
    assert_eq!(t.reveal_street, Street::Flop);
    assert_eq!(t.pot, 4);
    assert_eq!(t.table_bet, 0);
    assert!(t.players.iter().all(|p| p.street_bet == 0));
    // postflop the BB acts first
    assert_eq!(t.current_seat, 1);
    assert_eq!(t.pots.len(), 1);
    assert_eq!(t.pots[0].amount, 4);
    assert_eq!(t.pots[0].eligible, vec![0, 1, 2, 3]);
}

#[test]
fn check_around_advances_exactly_one_street() {
    let mut t = new_table();
    for seat in [2usize, 3, 0] {
        t = act(&t, seat, ActionKind::Call, None);
    }
    t = act(&t, 1, ActionKind::Check, None);
    assert_eq!(t.street, Street::Flop);

    for seat in [1usize, 2, 3, 0] {
        t = act(&t, seat, ActionKind::Check, None);
    }
    assert_eq!(t.street, Street::Turn);
    assert_eq!(t.reveal_street, Street::Turn);
    assert_eq!(t.current_seat, 1);
}

#[test]
fn folding_to_one_player_ends_the_hand_without_evaluation() {
    let mut t = new_table();
    t = act(&t, 2, ActionKind::Fold, None);
    t = act(&t, 3, ActionKind::Fold, None);
    t = act(&t, 0, ActionKind::Fold, None);

    assert_eq!(t.street, Street::Showdown);
    assert_eq!(t.auto_win, Some(1));
    // the board was never revealed past preflop
    assert_eq!(t.reveal_street, Street::Preflop);
    assert_eq!(t.pot, 1);
    assert_eq!(t.pots[0].eligible, vec![1]);
}

#[test]
fn raise_below_minimum_clamps_up_to_minimum_total() {
    let t = new_table();
    // blind of 1 with opening increment 1: minimum raise total is 2
    let raised = t.apply_action(ActionCommand {
        seat: 2,
        kind: ActionKind::Raise,
        amount: Some(0),
    });
    assert_eq!(raised.table_bet, 2);
    assert_eq!(raised.players[2].street_bet, 2);
    let entry = raised.action_log.last().expect("entry");
    assert_eq!(entry.amount, 2);
    assert_eq!(entry.table_bet_after, 2);
}

#[test]
fn full_raise_updates_min_raise_tracking() {
    let t = new_table();
    let raised = t.apply_action(ActionCommand {
        seat: 2,
        kind: ActionKind::Raise,
        amount: Some(4),
    });
    assert_eq!(raised.table_bet, 4);
    assert_eq!(raised.last_raise, 3);
    assert_eq!(raised.last_aggressor, Some(2));
    // the next raise must reach current bet plus the last increment
    assert_eq!(raised.min_raise_total(), 7);
}

#[test]
fn short_all_in_caps_bet_without_reopening_raises() {
    let mut t = new_table();
    // seat 0 sits short for this hand
    t.players[0].stack = 5;
    t.initial_stacks[0] = 5;

    t = act(&t, 2, ActionKind::Raise, Some(4));
    assert_eq!(t.last_aggressor, Some(2));
    t = act(&t, 3, ActionKind::Call, None);

    // seat 0 shoves 5 total: above the bet of 4 but below the minimum raise
    // total of 7
    t = act(&t, 0, ActionKind::Raise, Some(100));
    assert!(t.players[0].all_in);
    assert_eq!(t.table_bet, 5);
    assert!(t.raise_blocked);
    // aggressor and increment tracking are untouched by the short raise
    assert_eq!(t.last_aggressor, Some(2));
    assert_eq!(t.last_raise, 3);

    // players who already matched the prior bet may only call or fold now
    assert_eq!(t.current_seat, 1);
    assert_eq!(t.legal_actions(1), vec![ActionKind::Fold, ActionKind::Call]);
    t = act(&t, 1, ActionKind::Call, None);
    assert_eq!(t.legal_actions(2), vec![ActionKind::Fold, ActionKind::Call]);
    t = act(&t, 2, ActionKind::Call, None);
    t = act(&t, 3, ActionKind::Call, None);
    t = act(&t, 1, ActionKind::Check, None);

    assert_eq!(t.street, Street::Flop);
    assert!(!t.raise_blocked);
    assert_eq!(t.pot, 20);
    assert_eq!(total_pots(&t), 20);
    // the short stack is all in for 5; everyone else can still win the rest
    assert_eq!(t.pots.len(), 1);
    assert_eq!(t.pots[0].eligible, vec![0, 1, 2, 3]);
}

#[test]
fn pot_conservation_holds_after_every_action() {
    let mut t = new_table();
    t.players[0].stack = 5;
    t.initial_stacks[0] = 5;

    let script = [
        (2usize, ActionKind::Raise, Some(4)),
        (3, ActionKind::Call, None),
        (0, ActionKind::Raise, Some(100)),
        (1, ActionKind::Call, None),
        (2, ActionKind::Call, None),
        (3, ActionKind::Fold, None),
        (1, ActionKind::Check, None),
    ];
    for (seat, kind, amount) in script {
        t = act(&t, seat, kind, amount);
        let contributed: u32 = t.contributions().iter().sum();
        assert_eq!(total_pots(&t), contributed);
        assert_eq!(t.pot, contributed);
    }
}

#[test]
fn stale_actions_are_absorbed_silently() {
    let mut t = new_table();
    t = act(&t, 2, ActionKind::Fold, None);

    // folded seat acting again changes nothing, not even the log
    let again = t.apply_action(ActionCommand {
        seat: 2,
        kind: ActionKind::Call,
        amount: None,
    });
    assert_eq!(again, t);

    // terminal state absorbs everything
    let mut done = new_table();
    for seat in [2usize, 3, 0] {
        done = act(&done, seat, ActionKind::Fold, None);
    }
    assert_eq!(done.street, Street::Showdown);
    let after = done.apply_action(ActionCommand {
        seat: 1,
        kind: ActionKind::Bet,
        amount: Some(10),
    });
    assert_eq!(after, done);
}

#[test]
fn setup_rejects_malformed_deals() {
    let mut missing_hand = fixed_deal();
    missing_hand.hands.pop();
    assert_eq!(
        TableState::new(&missing_hand, TableConfig::default(), 0),
        Err(EngineError::HandCountMismatch { hands: 3, seats: 4 })
    );

    let mut short_board = fixed_deal();
    short_board.board_reserved.truncate(4);
    assert_eq!(
        TableState::new(&short_board, TableConfig::default(), 0),
        Err(EngineError::ShortBoard { got: 4, need: 5 })
    );
}

#[test]
fn big_blind_scales_with_config() {
    let config = TableConfig {
        big_blind: 2,
        ..TableConfig::default()
    };
    let t = TableState::new(&fixed_deal(), config, 0).expect("table");
    assert_eq!(t.pot, 2);
    assert_eq!(t.table_bet, 2);
    assert_eq!(t.players[1].stack, 98);
    // minimum open and minimum raise both scale in blind units
    assert_eq!(t.min_raise_total(), 4);
}
