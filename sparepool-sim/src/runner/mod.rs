//! Simulation runner and reporting.
//!
//! - [`SimulationRunner`]: one validated run, from configuration to outcome
//! - [`SimulationBuilder`]: the same configuration under several seeds
//! - [`SimulationReport`]: outcomes and cross-seed means

pub mod builder;
pub mod report;
pub mod run;

pub use builder::SimulationBuilder;
pub use report::{RunOutcome, SimulationReport};
pub use run::SimulationRunner;
