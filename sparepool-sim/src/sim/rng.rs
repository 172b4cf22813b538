//! Seeded random stream for interarrival sampling.
//!
//! Each simulation owns its own [`RandomStream`], so two runs with the same
//! seed draw exactly the same sequence regardless of what else happens on
//! the thread.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};

use crate::error::ConfigError;

/// Deterministic source of exponentially distributed interarrival times.
///
/// Uses ChaCha8Rng for reproducible randomness across platforms.
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl RandomStream {
    /// Create a stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Draw an interarrival interval with mean `1 / rate`.
    ///
    /// The result is always `>= 0`. Fails with [`ConfigError::DemandRate`]
    /// when `rate` is not a finite value greater than zero; a failed draw
    /// does not advance the stream.
    pub fn draw(&mut self, rate: f64) -> Result<f64, ConfigError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigError::DemandRate(rate));
        }
        let exp = Exp::new(rate).map_err(|_| ConfigError::DemandRate(rate))?;
        self.draws += 1;
        Ok(exp.sample(&mut self.rng))
    }

    /// The seed this stream was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of successful draws since construction.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
