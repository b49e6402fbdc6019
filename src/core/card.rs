//! Card payment stub
//!
//! Simulated card authorization: a Bernoulli draw against a configured
//! approval rate. No card network, no balances, no state between calls.

use crate::types::{Amount, VendError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stateless probabilistic card authorizer
pub struct CardReader {
    approval_rate: f64,
    rng: StdRng,
}

impl CardReader {
    /// Create a reader with the given approval rate and an entropy-seeded RNG
    ///
    /// The rate is clamped into `0.0..=1.0`.
    pub fn new(approval_rate: f64) -> Self {
        Self::from_rng(approval_rate, StdRng::from_entropy())
    }

    /// Create a reader with a fixed seed for reproducible sessions
    pub fn with_seed(approval_rate: f64, seed: u64) -> Self {
        Self::from_rng(approval_rate, StdRng::seed_from_u64(seed))
    }

    fn from_rng(approval_rate: f64, rng: StdRng) -> Self {
        CardReader {
            approval_rate: approval_rate.clamp(0.0, 1.0),
            rng,
        }
    }

    /// Authorize a payment of `amount`
    ///
    /// # Errors
    ///
    /// Returns `CardDeclined` when the draw falls outside the approval rate.
    /// Declines are recoverable; the purchase is simply abandoned.
    pub fn authorize(&mut self, amount: Amount) -> Result<(), VendError> {
        if self.rng.gen_bool(self.approval_rate) {
            Ok(())
        } else {
            Err(VendError::card_declined(amount))
        }
    }
}
