use thiserror::Error;

/// A configuration input outside its documented constraint.
///
/// Raised before any event runs; a simulation with an invalid configuration
/// never starts. Non-finite values are rejected alongside non-positive ones.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The initial supply must be at least one unit.
    #[error("initial_supply must be >= 1, got {0}")]
    InitialSupply(u64),
    /// The demand rate must be a finite value greater than zero.
    #[error("demand_rate must be a finite value > 0, got {0}")]
    DemandRate(f64),
    /// The repair cycle time must be a finite value greater than zero.
    #[error("repair_cycle_time must be a finite value > 0, got {0}")]
    RepairCycleTime(f64),
    /// The simulation horizon must be a finite value greater than zero.
    #[error("sim_time must be a finite value > 0, got {0}")]
    SimTime(f64),
    /// The sampling period must be a finite value greater than zero.
    #[error("record_interval must be a finite value > 0, got {0}")]
    RecordInterval(f64),
}

/// A release would push the pool level above its capacity.
///
/// More units came back than were ever taken out, which is a logic defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("releasing {released} unit(s) at level {level} would exceed capacity {capacity}")]
pub struct PoolOverflowError {
    /// Pool level before the release.
    pub level: u64,
    /// Number of units being returned.
    pub released: u64,
    /// Fixed pool capacity.
    pub capacity: u64,
}

/// Errors that can occur while building or running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The configuration was rejected before the run started.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A repair returned more units than the pool can hold.
    #[error("pool overflow: {0}")]
    PoolOverflow(#[from] PoolOverflowError),
}

/// A type alias for `Result<T, SimulationError>`.
pub type SimulationResult<T> = Result<T, SimulationError>;
