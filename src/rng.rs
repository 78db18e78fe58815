//! Park-Miller minimal standard generator.
//!
//! Draws are reproducible for a given seed and call order, which is all the
//! dashboard needs: the numbers stay stable between renders of one session.
//! Not suitable for anything that needs statistical quality or secrecy.

use crate::error::{DashboardError, DashboardResult};

pub const MODULUS: i64 = 2_147_483_647;
pub const MULTIPLIER: i64 = 16_807;
pub const DEFAULT_SEED: i64 = 42;

#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    seed: i64,
    state: i64,
}

impl SequenceGenerator {
    pub fn new(seed: i64) -> DashboardResult<Self> {
        let reduced = seed.rem_euclid(MODULUS);
        if reduced == 0 {
            return Err(DashboardError::InvalidSeed(seed));
        }
        Ok(Self {
            seed: reduced,
            state: reduced,
        })
    }

    /// Integer in `[min, max]`, advancing the state by one step.
    pub fn next_in(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        self.state = (self.state * MULTIPLIER) % MODULUS;
        let unit = self.state as f64 / MODULUS as f64;
        (unit * (max - min + 1) as f64).floor() as i64 + min
    }

    pub fn reset(&mut self) {
        self.state = self.seed;
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn state(&self) -> i64 {
        self.state
    }
}

#[cfg(test)]
pub(crate) fn default_generator() -> SequenceGenerator {
    SequenceGenerator::new(DEFAULT_SEED).expect("default seed is non-zero")
}
