use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::deck::shuffled_deck;
use crate::errors::DealError;
use crate::hand_class::{classify, HandClass};
use crate::weights::{GameMode, WeightTable};

/// A whole deal is retried from scratch this many times before giving up.
/// Retrying per-seat instead would bias later seats toward classes with more
/// surviving combos.
pub const MAX_RETRY: u32 = 128;

/// Cards set aside for the board before any seat is dealt: flop, turn, river,
/// and spares for future streets.
pub const BOARD_RESERVE: usize = 10;

/// All 1326 two-card combinations bucketed by class, with the effective
/// per-class weight (configured weight x combos in class) precomputed for a
/// single mode.
struct ComboIndex {
    combos_by_class: HashMap<HandClass, Vec<[Card; 2]>>,
    weighted: Vec<(HandClass, u64)>,
    total_weight: u64,
}

impl ComboIndex {
    fn build(table: &WeightTable, mode: GameMode) -> Self {
        let deck = full_deck();
        let mut combos_by_class: HashMap<HandClass, Vec<[Card; 2]>> = HashMap::new();
        for i in 0..deck.len() {
            for j in (i + 1)..deck.len() {
                let key = classify(deck[i], deck[j]);
                combos_by_class
                    .entry(key)
                    .or_default()
                    .push([deck[i], deck[j]]);
            }
        }

        let mut weighted = Vec::new();
        let mut total_weight = 0u64;
        for (key, combos) in &combos_by_class {
            let w = table.weight(key, mode) as u64;
            if w == 0 || combos.is_empty() {
                continue;
            }
            let eff = w * combos.len() as u64;
            weighted.push((key.clone(), eff));
            total_weight += eff;
        }
        // Fixed draw order so a given seed always deals the same hands.
        weighted.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

        Self {
            combos_by_class,
            weighted,
            total_weight,
        }
    }

    fn draw_class(&self, rng: &mut ChaCha20Rng) -> &HandClass {
        let mut r = rng.random_range(0..self.total_weight);
        for (key, eff) in &self.weighted {
            if r < *eff {
                return key;
            }
            r -= *eff;
        }
        &self.weighted[self.weighted.len() - 1].0
    }
}

/// Deal one weighted two-card hand per seat in `seat_order`, never colliding
/// with `board_reserved` or with another seat's cards.
///
/// Class draw probability is proportional to weight x combos-in-class; the
/// concrete combo is then uniform within the class. Any collision restarts
/// the entire assignment, up to [`MAX_RETRY`] attempts.
pub fn deal_weighted_hands(
    seat_order: &[usize],
    board_reserved: &[Card],
    table: &WeightTable,
    mode: GameMode,
    rng: &mut ChaCha20Rng,
) -> Result<Vec<[Card; 2]>, DealError> {
    let seats = seat_order.len();
    if seats * 2 + board_reserved.len() > 52 {
        return Err(DealError::InsufficientCards {
            seats,
            reserved: board_reserved.len(),
        });
    }

    let index = ComboIndex::build(table, mode);
    if index.weighted.is_empty() || index.total_weight == 0 {
        return Err(DealError::NoWeightedClasses { mode });
    }

    for _attempt in 0..MAX_RETRY {
        let mut hands: Vec<Option<[Card; 2]>> = vec![None; seats];
        let mut used: HashSet<Card> = board_reserved.iter().copied().collect();
        let mut conflict = false;

        for &seat in seat_order {
            let class = index.draw_class(rng);
            let combos = &index.combos_by_class[class];
            let combo = combos[rng.random_range(0..combos.len())];

            if combo.iter().any(|c| used.contains(c)) {
                conflict = true;
                break;
            }
            used.extend(combo.iter().copied());
            hands[seat] = Some(combo);
        }

        if !conflict {
            if let Some(hands) = hands.into_iter().collect::<Option<Vec<_>>>() {
                return Ok(hands);
            }
        }
    }

    Err(DealError::RetriesExhausted { attempts: MAX_RETRY })
}

/// Deal request sent to a dealing service, local or remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealRequest {
    pub seat_order: Vec<usize>,
    pub mode: GameMode,
}

/// Deal response: one two-card hand per seat (seat-indexed) and a reserved
/// board block of at least five cards. The local dealer reserves
/// [`BOARD_RESERVE`] cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealResponse {
    pub hand_id: String,
    pub hands: Vec<[Card; 2]>,
    pub board_reserved: Vec<Card>,
}

/// The single suspension point of the engine: a dealing service that may sit
/// across a network boundary. Implementations must either return a complete
/// response or an error; there is no partial result.
pub trait DealSource {
    fn deal(&mut self, req: &DealRequest, rng: &mut ChaCha20Rng) -> Result<DealResponse, DealError>;
}

/// In-process weighted dealer over a shuffled deck.
pub struct LocalDealer {
    table: WeightTable,
}

impl LocalDealer {
    pub fn new(table: WeightTable) -> Self {
        Self { table }
    }

    pub fn with_default_table() -> Self {
        Self::new(WeightTable::dense_deck_default())
    }
}

impl DealSource for LocalDealer {
    fn deal(&mut self, req: &DealRequest, rng: &mut ChaCha20Rng) -> Result<DealResponse, DealError> {
        let deck = shuffled_deck(rng);
        let board_reserved: Vec<Card> = deck[..BOARD_RESERVE].to_vec();
        let hands =
            deal_weighted_hands(&req.seat_order, &board_reserved, &self.table, req.mode, rng)?;
        let hand_id = generate_hand_id(rng);
        tracing::debug!(%hand_id, seats = req.seat_order.len(), "dealt locally");
        Ok(DealResponse {
            hand_id,
            hands,
            board_reserved,
        })
    }
}

/// Structural check on a deal response: right hand count, board big enough,
/// no card appearing twice.
pub fn validate_response(resp: &DealResponse, seats: usize) -> Result<(), DealError> {
    if resp.hands.len() != seats {
        return Err(DealError::MalformedResponse(format!(
            "{} hands for {} seats",
            resp.hands.len(),
            seats
        )));
    }
    if resp.board_reserved.len() < 5 {
        return Err(DealError::MalformedResponse(format!(
            "board reserve of {} cards",
            resp.board_reserved.len()
        )));
    }
    let mut seen = HashSet::new();
    for card in resp
        .hands
        .iter()
        .flatten()
        .chain(resp.board_reserved.iter())
    {
        if !seen.insert(*card) {
            return Err(DealError::MalformedResponse(format!(
                "card {} dealt twice",
                card
            )));
        }
    }
    Ok(())
}

/// Ask the remote source first, falling back to the local dealer when the
/// remote errors or returns a malformed response. Only both paths failing is
/// fatal to hand setup.
pub fn deal_with_fallback(
    remote: Option<&mut dyn DealSource>,
    local: &mut LocalDealer,
    req: &DealRequest,
    rng: &mut ChaCha20Rng,
) -> Result<DealResponse, DealError> {
    if let Some(source) = remote {
        match source.deal(req, rng) {
            Ok(resp) => match validate_response(&resp, req.seat_order.len()) {
                Ok(()) => return Ok(resp),
                Err(e) => {
                    tracing::warn!(error = %e, "remote deal response rejected, dealing locally")
                }
            },
            Err(e) => tracing::warn!(error = %e, "remote deal failed, dealing locally"),
        }
    }
    local.deal(req, rng)
}

const HAND_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hand ids come from the injected RNG rather than a clock or UUID so that a
/// seeded deal is reproducible end to end.
pub fn generate_hand_id(rng: &mut ChaCha20Rng) -> String {
    (0..8)
        .map(|_| HAND_ID_ALPHABET[rng.random_range(0..HAND_ID_ALPHABET.len())] as char)
        .collect()
}
