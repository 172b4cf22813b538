//! # Sparepool Simulation
//!
//! Deterministic discrete-event simulation of a closed-loop repairable
//! spare parts pool.
//!
//! A fleet draws single units from a shared pool with exponential
//! interarrival times. A demand that finds the pool empty waits in FIFO
//! order. Every consumed unit goes through a fixed repair cycle and then
//! returns to the pool, where it is handed straight to the oldest waiting
//! demand if there is one.
//!
//! Key properties:
//! - **Reproducible**: Same configuration and seed produce identical output
//! - **Conservative**: `available + in_repair == capacity` after every event
//! - **Fast**: Logical time skips idle periods
//!
//! ## Core Components
//!
//! - [`SimWorld`]: clock, event queue and process dispatch
//! - [`PartsPool`]: bounded pool with FIFO-fair blocking acquisition
//! - [`SimulationRunner`]: one validated run, returning [`FinalMetrics`] and a [`TimeSeries`]
//! - [`SimulationBuilder`]: the same configuration under several seeds
//!
//! ## Example Usage
//!
//! ```rust
//! use sparepool_sim::{SimulationConfig, SimulationRunner};
//!
//! let config = SimulationConfig::default()
//!     .with_initial_supply(5)
//!     .with_demand_rate(0.8)
//!     .with_sim_time(50.0);
//!
//! let outcome = SimulationRunner::new(&config)
//!     .and_then(|runner| runner.run())
//!     .expect("valid configuration");
//!
//! assert_eq!(outcome.timeseries.len(), 51);
//! let metrics = &outcome.final_metrics;
//! assert_eq!(metrics.available_supply + metrics.in_repair, 5);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

/// Input configuration and validation.
pub mod config;
/// Error types and utilities for simulation operations.
pub mod error;
/// Invariants checked after every simulation event.
pub mod invariants;
/// Snapshots, time series and final metrics.
pub mod metrics;
/// Simulation runner and multi-seed reporting.
pub mod runner;
/// Core simulation engine.
pub mod sim;

// Public API exports
pub use config::{ModelParams, SimulationConfig};
pub use error::{ConfigError, PoolOverflowError, SimulationError, SimulationResult};
pub use invariants::{
    BacklogIdentity, ConservationLaw, Invariant, ModelView, default_invariants, invariant_fn,
};
pub use metrics::{FinalMetrics, Snapshot, TimeSeries};
pub use runner::{RunOutcome, SimulationBuilder, SimulationReport, SimulationRunner};
pub use sim::{
    Acquire, Counters, DemandId, Event, EventQueue, PartsPool, RandomStream, ScheduledEvent,
    SimWorld,
};
