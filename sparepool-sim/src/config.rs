//! # Simulation Configuration
//!
//! The five scalar inputs of a run plus the seed of its random stream.
//!
//! | Parameter | Config Field | Default | Constraint |
//! |-----------|--------------|---------|------------|
//! | Initial supply | `initial_supply` | 10 | >= 1 |
//! | Demand rate | `demand_rate` | 1.0 | finite, > 0 (arrivals per time unit) |
//! | Repair cycle time | `repair_cycle_time` | 5.0 | finite, > 0 |
//! | Horizon | `sim_time` | 100.0 | finite, > 0 |
//! | Sampling period | `record_interval` | 1.0 | finite, > 0 |
//! | Seed | `seed` | 0 | any |
//!
//! One time unit is mapped to one second of simulated [`Duration`]. The
//! conversion happens once in [`SimulationConfig::validate`]; the engine
//! only ever sees the resulting [`ModelParams`].
//!
//! ```rust
//! use sparepool_sim::SimulationConfig;
//!
//! let params = SimulationConfig::default()
//!     .with_demand_rate(2.5)
//!     .with_seed(7)
//!     .validate()
//!     .expect("valid configuration");
//! assert_eq!(params.capacity, 10);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// User-facing inputs of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Units in the pool at time zero; also the pool capacity.
    pub initial_supply: u64,
    /// Mean demand arrivals per time unit.
    pub demand_rate: f64,
    /// Fixed time a consumed unit spends in repair.
    pub repair_cycle_time: f64,
    /// Simulation horizon.
    pub sim_time: f64,
    /// Period between two snapshots.
    pub record_interval: f64,
    /// Seed of the interarrival random stream.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_supply: 10,
            demand_rate: 1.0,
            repair_cycle_time: 5.0,
            sim_time: 100.0,
            record_interval: 1.0,
            seed: 0,
        }
    }
}

/// Validated, engine-ready parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// Pool capacity, equal to the initial supply.
    pub capacity: u64,
    /// Mean arrivals per time unit.
    pub demand_rate: f64,
    /// Fixed repair delay.
    pub repair_cycle_time: Duration,
    /// Simulation horizon.
    pub sim_time: Duration,
    /// Sampling period.
    pub record_interval: Duration,
    /// Random stream seed.
    pub seed: u64,
}

impl SimulationConfig {
    /// Set the initial supply.
    pub fn with_initial_supply(mut self, initial_supply: u64) -> Self {
        self.initial_supply = initial_supply;
        self
    }

    /// Set the demand rate.
    pub fn with_demand_rate(mut self, demand_rate: f64) -> Self {
        self.demand_rate = demand_rate;
        self
    }

    /// Set the repair cycle time.
    pub fn with_repair_cycle_time(mut self, repair_cycle_time: f64) -> Self {
        self.repair_cycle_time = repair_cycle_time;
        self
    }

    /// Set the simulation horizon.
    pub fn with_sim_time(mut self, sim_time: f64) -> Self {
        self.sim_time = sim_time;
        self
    }

    /// Set the sampling period.
    pub fn with_record_interval(mut self, record_interval: f64) -> Self {
        self.record_interval = record_interval;
        self
    }

    /// Set the random stream seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every input and convert times to [`Duration`].
    ///
    /// Inputs are checked in declaration order; the first violation wins.
    pub fn validate(&self) -> Result<ModelParams, ConfigError> {
        if self.initial_supply < 1 {
            return Err(ConfigError::InitialSupply(self.initial_supply));
        }
        if !is_positive(self.demand_rate) {
            return Err(ConfigError::DemandRate(self.demand_rate));
        }
        let repair_cycle_time = time_units(self.repair_cycle_time)
            .ok_or(ConfigError::RepairCycleTime(self.repair_cycle_time))?;
        let sim_time = time_units(self.sim_time).ok_or(ConfigError::SimTime(self.sim_time))?;
        let record_interval = time_units(self.record_interval)
            .ok_or(ConfigError::RecordInterval(self.record_interval))?;

        Ok(ModelParams {
            capacity: self.initial_supply,
            demand_rate: self.demand_rate,
            repair_cycle_time,
            sim_time,
            record_interval,
            seed: self.seed,
        })
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Converts a positive time-unit value; values that round to zero
/// nanoseconds are rejected too, since a zero period would never advance.
fn time_units(value: f64) -> Option<Duration> {
    if !is_positive(value) {
        return None;
    }
    Duration::try_from_secs_f64(value)
        .ok()
        .filter(|d| !d.is_zero())
}
