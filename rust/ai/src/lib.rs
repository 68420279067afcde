//! # densedeck-ai: Opponent Policies for the Dense Deck Engine
//!
//! Pluggable decision-making for seats driven by the machine rather than a
//! human. A [`Policy`] reads an immutable table state, consults the engine's
//! legal-actions query, and returns one action command; all randomness comes
//! from the injected RNG so simulations are reproducible.
//!
//! ## Core Components
//!
//! - [`Policy`] - Trait defining the decision interface
//! - [`dense`] - Position-aware baseline tuned for Dense Deck hand density
//! - [`random`] - Uniform choice over legal actions, for control runs
//! - [`create_policy`] - Factory function for creating policies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use densedeck_ai::create_policy;
//!
//! let policy = create_policy("dense");
//! assert_eq!(policy.name(), "DensePolicy");
//! ```

use densedeck_engine::table::{ActionCommand, TableState};
use rand_chacha::ChaCha20Rng;

pub mod dense;
pub mod random;

/// Decision interface for machine-driven seats.
///
/// Implementations must only ever return action kinds present in
/// `table.legal_actions(seat)`; the state machine will absorb anything else
/// as a no-op, which stalls the hand.
pub trait Policy: Send + Sync {
    /// Choose the next action for `seat` given the current table state.
    fn pick_action(&self, table: &TableState, seat: usize, rng: &mut ChaCha20Rng) -> ActionCommand;

    /// Identifier of this policy implementation.
    fn name(&self) -> &str;
}

/// Create a policy by name. Supported: `"dense"`, `"random"`.
///
/// # Panics
///
/// Panics on an unknown policy name.
pub fn create_policy(kind: &str) -> Box<dyn Policy> {
    match kind {
        "dense" => Box::new(dense::DensePolicy::new()),
        "random" => Box::new(random::RandomPolicy::new()),
        _ => panic!("Unknown policy: {}", kind),
    }
}
