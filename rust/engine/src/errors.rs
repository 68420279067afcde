use thiserror::Error;

use crate::weights::GameMode;

/// Fatal failures while constructing a hand's deal. These indicate
/// misconfiguration or genuine exhaustion and must abort hand setup; no
/// partially dealt hand ever reaches the table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("no weighted classes available for mode {mode:?}")]
    NoWeightedClasses { mode: GameMode },
    #[error("not enough cards for {seats} seats plus {reserved} reserved board cards")]
    InsufficientCards { seats: usize, reserved: usize },
    #[error("failed to deal weighted hands after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("remote deal source failed: {0}")]
    Remote(String),
    #[error("malformed deal response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Evaluation was handed an impossible card count. This is a defect in
    /// the caller, not a runtime condition reachable from valid gameplay.
    #[error("hand evaluation expects 5 to 7 cards, got {count}")]
    CardCount { count: usize },
    #[error("table supports 2 to 4 seats, got {seats}")]
    SeatCount { seats: usize },
    #[error("deal response carries {hands} hands for {seats} seats")]
    HandCountMismatch { hands: usize, seats: usize },
    #[error("deal response reserves {got} board cards, need at least {need}")]
    ShortBoard { got: usize, need: usize },
    #[error(transparent)]
    Deal(#[from] DealError),
}
