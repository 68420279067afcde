//! # densedeck-engine: Dense Deck Poker Engine Core
//!
//! A deterministic four-seat engine for the Dense Deck hold'em variant:
//! starting hands are dealt from a weighted whitelist of two-card classes,
//! betting runs through an immutable street state machine, and showdowns are
//! settled per pot with full side-pot support.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic shuffling with ChaCha20 RNG
//! - [`hand_class`] - Canonical starting-hand class keys ("88", "AKs", "QJo")
//! - [`weights`] - Per-mode class weight tables and the Dense Deck whitelist
//! - [`dealing`] - Weighted conflict-free dealing and the deal service boundary
//! - [`hand`] - Five-card evaluation and best-of-seven search
//! - [`positions`] - Seat roles (BTN/BB/UTG/CO) and street action orders
//! - [`table`] - The betting state machine: `apply_action` / `advance`
//! - [`pot`] - Side-pot derivation and settlement
//! - [`history`] - Hand records, JSONL logging, and deterministic replay
//! - [`errors`] - Error types for dealing and evaluation
//!
//! ## Quick Start
//!
//! ```rust
//! use densedeck_engine::cards::Card;
//! use densedeck_engine::hand::{evaluate_best_of_seven, Category};
//!
//! let hole: Vec<Card> = ["Ah", "Kh"].iter().map(|s| s.parse().unwrap()).collect();
//! let board: Vec<Card> = ["Qh", "Jh", "Th", "2c", "3d"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let value = evaluate_best_of_seven(&hole, &board).unwrap();
//! assert_eq!(value.category, Category::StraightFlush);
//! ```
//!
//! ## Deterministic Dealing
//!
//! All randomness is injected; the same seed produces the same deal:
//!
//! ```rust
//! use densedeck_engine::dealing::{DealRequest, DealSource, LocalDealer};
//! use densedeck_engine::weights::GameMode;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let mut dealer = LocalDealer::with_default_table();
//! let req = DealRequest {
//!     seat_order: vec![2, 3, 0, 1],
//!     mode: GameMode::SuperDense,
//! };
//! let resp = dealer.deal(&req, &mut rng).unwrap();
//! assert_eq!(resp.hands.len(), 4);
//! assert!(resp.board_reserved.len() >= 5);
//! ```
//!
//! ## Driving a Hand
//!
//! The table is an immutable value; every `apply_action`/`advance` pair
//! produces the successor state:
//!
//! ```rust
//! use densedeck_engine::dealing::{DealRequest, DealSource, LocalDealer};
//! use densedeck_engine::table::{ActionCommand, ActionKind, TableConfig, TableState};
//! use densedeck_engine::weights::GameMode;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let mut dealer = LocalDealer::with_default_table();
//! let req = DealRequest {
//!     seat_order: vec![2, 3, 0, 1],
//!     mode: GameMode::Dense,
//! };
//! let resp = dealer.deal(&req, &mut rng).unwrap();
//!
//! let table = TableState::new(&resp, TableConfig::default(), 0).unwrap();
//! let seat = table.current_seat;
//! let next = table
//!     .apply_action(ActionCommand {
//!         seat,
//!         kind: ActionKind::Call,
//!         amount: None,
//!     })
//!     .advance();
//! assert_ne!(next.current_seat, seat);
//! ```

pub mod cards;
pub mod dealing;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod hand_class;
pub mod history;
pub mod positions;
pub mod pot;
pub mod table;
pub mod weights;
