//! Simulated payment gateway port.
//!
//! The pseudo-random outcome draws stand in for a real gateway and sit
//! behind this trait so tests can force either branch deterministically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Default probability that a first charge attempt succeeds.
pub const DEFAULT_CHARGE_SUCCESS_RATE: f64 = 0.90;

/// Default probability that a retry attempt succeeds.
pub const DEFAULT_RETRY_SUCCESS_RATE: f64 = 0.70;

/// Outcome source for payment processing.
pub trait PaymentGateway: Send + Sync {
    /// Draws the outcome of a first charge attempt.
    fn authorize(&self) -> bool;

    /// Draws the outcome of a retry attempt.
    fn authorize_retry(&self) -> bool;

    /// Four-digit suffix (1000-9999) for transaction references.
    fn reference_suffix(&self) -> u16;
}

/// Pseudo-random gateway with configurable success rates.
///
/// # Panics
///
/// Draw methods panic if the internal rng lock is poisoned, which can only
/// happen after a panic on another thread mid-draw.
pub struct SimulatedGateway {
    rng: Mutex<StdRng>,
    charge_success_rate: f64,
    retry_success_rate: f64,
}

impl SimulatedGateway {
    /// Creates a gateway with the default 90%/70% rates and an entropy seed.
    pub fn new() -> Self {
        Self::with_rates(DEFAULT_CHARGE_SUCCESS_RATE, DEFAULT_RETRY_SUCCESS_RATE)
    }

    /// Creates a gateway with explicit success rates, clamped to [0, 1].
    pub fn with_rates(charge_success_rate: f64, retry_success_rate: f64) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            charge_success_rate: charge_success_rate.clamp(0.0, 1.0),
            retry_success_rate: retry_success_rate.clamp(0.0, 1.0),
        }
    }

    /// Creates a gateway with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            charge_success_rate: DEFAULT_CHARGE_SUCCESS_RATE,
            retry_success_rate: DEFAULT_RETRY_SUCCESS_RATE,
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for SimulatedGateway {
    fn authorize(&self) -> bool {
        self.rng
            .lock()
            .expect("gateway rng lock poisoned")
            .gen_bool(self.charge_success_rate)
    }

    fn authorize_retry(&self) -> bool {
        self.rng
            .lock()
            .expect("gateway rng lock poisoned")
            .gen_bool(self.retry_success_rate)
    }

    fn reference_suffix(&self) -> u16 {
        self.rng
            .lock()
            .expect("gateway rng lock poisoned")
            .gen_range(1000..=9999)
    }
}

/// Gateway whose draws always come out the same way. Used by tests to force
/// the success and failure branches.
pub struct FixedOutcomeGateway {
    charge_outcome: bool,
    retry_outcome: bool,
}

impl FixedOutcomeGateway {
    pub fn new(charge_outcome: bool, retry_outcome: bool) -> Self {
        Self {
            charge_outcome,
            retry_outcome,
        }
    }

    /// Every draw succeeds.
    pub fn approving() -> Self {
        Self::new(true, true)
    }

    /// Every draw fails.
    pub fn declining() -> Self {
        Self::new(false, false)
    }
}

impl PaymentGateway for FixedOutcomeGateway {
    fn authorize(&self) -> bool {
        self.charge_outcome
    }

    fn authorize_retry(&self) -> bool {
        self.retry_outcome
    }

    fn reference_suffix(&self) -> u16 {
        4242
    }
}
