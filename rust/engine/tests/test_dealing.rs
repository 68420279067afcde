use std::collections::HashSet;

use densedeck_engine::cards::{Card, full_deck};
use densedeck_engine::dealing::{
    BOARD_RESERVE, DealRequest, DealResponse, DealSource, LocalDealer, deal_weighted_hands,
    deal_with_fallback, validate_response,
};
use densedeck_engine::errors::DealError;
use densedeck_engine::hand_class::{HandClass, classify};
use densedeck_engine::weights::{GameMode, ModeWeights, WeightTable};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use densedeck_engine::deck::{shuffled, shuffled_deck};

fn request() -> DealRequest {
    DealRequest {
        seat_order: vec![2, 3, 0, 1],
        mode: GameMode::SuperDense,
    }
}

#[test]
fn every_dealt_hand_is_an_allowed_class() {
    let table = WeightTable::dense_deck_default();
    let mut dealer = LocalDealer::with_default_table();
    for seed in 0..50u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let resp = dealer.deal(&request(), &mut rng).expect("deal");
        for hand in &resp.hands {
            let class = classify(hand[0], hand[1]);
            assert!(
                table.is_allowed(&class, GameMode::SuperDense),
                "seed {} dealt disallowed class {}",
                seed,
                class
            );
        }
    }
}

#[test]
fn no_card_is_ever_dealt_twice() {
    let mut dealer = LocalDealer::with_default_table();
    for seed in 0..50u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let resp = dealer.deal(&request(), &mut rng).expect("deal");
        let mut seen: HashSet<Card> = HashSet::new();
        for card in resp.hands.iter().flatten().chain(resp.board_reserved.iter()) {
            assert!(seen.insert(*card), "seed {} repeated card {}", seed, card);
        }
        assert_eq!(seen.len(), 4 * 2 + BOARD_RESERVE);
    }
}

#[test]
fn shuffle_is_seed_deterministic_and_complete() {
    let mut a = ChaCha20Rng::seed_from_u64(8);
    let mut b = ChaCha20Rng::seed_from_u64(8);
    let first = shuffled_deck(&mut a);
    let second = shuffled_deck(&mut b);
    assert_eq!(first, second);
    assert_eq!(first.len(), 52);
    let unique: HashSet<Card> = first.iter().copied().collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn shuffling_an_empty_set_returns_empty() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    assert!(shuffled(&[], &mut rng).is_empty());
}

#[test]
fn same_seed_deals_the_same_hand() {
    let mut dealer = LocalDealer::with_default_table();
    let mut a = ChaCha20Rng::seed_from_u64(1234);
    let mut b = ChaCha20Rng::seed_from_u64(1234);
    let first = dealer.deal(&request(), &mut a).expect("deal");
    let second = dealer.deal(&request(), &mut b).expect("deal");
    assert_eq!(first.hand_id, second.hand_id);
    assert_eq!(first.hands, second.hands);
    assert_eq!(first.board_reserved, second.board_reserved);
}

#[test]
fn empty_weight_table_fails_fast() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let result = deal_weighted_hands(
        &[0, 1],
        &[],
        &WeightTable::empty(),
        GameMode::Dense,
        &mut rng,
    );
    assert_eq!(
        result,
        Err(DealError::NoWeightedClasses {
            mode: GameMode::Dense
        })
    );
}

#[test]
fn too_many_seats_fails_before_sampling() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let board: Vec<Card> = full_deck()[..10].to_vec();
    let seat_order: Vec<usize> = (0..22).collect();
    let result = deal_weighted_hands(
        &seat_order,
        &board,
        &WeightTable::dense_deck_default(),
        GameMode::Dense,
        &mut rng,
    );
    assert_eq!(
        result,
        Err(DealError::InsufficientCards {
            seats: 22,
            reserved: 10
        })
    );
}

#[test]
fn exhausted_class_pool_gives_up_after_bounded_retries() {
    // only AA is allowed: four aces cover two seats, so a four-seat deal can
    // never succeed and must burn through every retry
    let table = WeightTable::from_entries([(
        HandClass::from("AA"),
        ModeWeights {
            dense: 1,
            super_dense: 1,
        },
    )]);
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let result = deal_weighted_hands(&[0, 1, 2, 3], &[], &table, GameMode::Dense, &mut rng);
    assert!(matches!(result, Err(DealError::RetriesExhausted { .. })));
}

struct FailingSource;

impl DealSource for FailingSource {
    fn deal(&mut self, _req: &DealRequest, _rng: &mut ChaCha20Rng) -> Result<DealResponse, DealError> {
        Err(DealError::Remote("connection refused".to_string()))
    }
}

struct DuplicateCardSource;

impl DealSource for DuplicateCardSource {
    fn deal(&mut self, _req: &DealRequest, _rng: &mut ChaCha20Rng) -> Result<DealResponse, DealError> {
        let ace: Card = "As".parse().expect("card");
        let deck = full_deck();
        Ok(DealResponse {
            hand_id: "remote01".to_string(),
            hands: vec![[ace, ace], [deck[0], deck[1]], [deck[2], deck[3]], [deck[4], deck[5]]],
            board_reserved: deck[6..16].to_vec(),
        })
    }
}

#[test]
fn remote_failure_falls_back_to_local_dealing() {
    let mut remote = FailingSource;
    let mut local = LocalDealer::with_default_table();
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let resp = deal_with_fallback(Some(&mut remote), &mut local, &request(), &mut rng)
        .expect("fallback deal");
    assert!(validate_response(&resp, 4).is_ok());
}

#[test]
fn malformed_remote_response_falls_back_to_local_dealing() {
    let mut remote = DuplicateCardSource;
    let mut local = LocalDealer::with_default_table();
    let mut rng = ChaCha20Rng::seed_from_u64(78);
    let resp = deal_with_fallback(Some(&mut remote), &mut local, &request(), &mut rng)
        .expect("fallback deal");
    assert_ne!(resp.hand_id, "remote01");
    assert!(validate_response(&resp, 4).is_ok());
}

#[test]
fn only_both_paths_failing_is_fatal() {
    let mut remote = FailingSource;
    let mut local = LocalDealer::new(WeightTable::empty());
    let mut rng = ChaCha20Rng::seed_from_u64(79);
    let result = deal_with_fallback(Some(&mut remote), &mut local, &request(), &mut rng);
    assert!(matches!(
        result,
        Err(DealError::NoWeightedClasses { .. })
    ));
}

#[test]
fn validate_response_flags_short_boards_and_duplicates() {
    let deck = full_deck();
    let good = DealResponse {
        hand_id: "h".to_string(),
        hands: vec![[deck[0], deck[1]], [deck[2], deck[3]]],
        board_reserved: deck[4..9].to_vec(),
    };
    assert!(validate_response(&good, 2).is_ok());

    let short_board = DealResponse {
        board_reserved: deck[4..8].to_vec(),
        ..good.clone()
    };
    assert!(validate_response(&short_board, 2).is_err());

    let duplicated = DealResponse {
        hands: vec![[deck[0], deck[1]], [deck[1], deck[3]]],
        ..good.clone()
    };
    assert!(validate_response(&duplicated, 2).is_err());

    assert!(validate_response(&good, 3).is_err());
}
