//! Builder for running one configuration under several seeds.

use std::fmt;
use std::rc::Rc;

use tracing::instrument;

use crate::{
    SimulationResult,
    config::SimulationConfig,
    invariants::{BacklogIdentity, ConservationLaw, Invariant},
};

use super::{report::SimulationReport, run::SimulationRunner};

/// Builder pattern for configuring and running simulation experiments.
///
/// ```
/// use sparepool_sim::{SimulationBuilder, SimulationConfig};
///
/// let report = SimulationBuilder::new(SimulationConfig::default().with_sim_time(20.0))
///     .set_iterations(3)
///     .with_default_invariants()
///     .run()
///     .expect("valid configuration");
/// assert_eq!(report.seeds_used(), vec![0, 1, 2]);
/// ```
pub struct SimulationBuilder {
    config: SimulationConfig,
    iterations: usize,
    seeds: Vec<u64>,
    invariants: Vec<Rc<dyn Invariant>>,
}

impl fmt::Debug for SimulationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationBuilder")
            .field("config", &self.config)
            .field("iterations", &self.iterations)
            .field("seeds", &self.seeds)
            .field(
                "invariants",
                &self.invariants.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl SimulationBuilder {
    /// Create a builder running `config` once.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            iterations: 1,
            seeds: Vec::new(),
            invariants: Vec::new(),
        }
    }

    /// Set the number of iterations to run.
    pub fn set_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set specific seeds to use for the iterations.
    ///
    /// Iterations beyond the given seeds use `config.seed + i`.
    pub fn set_seeds(mut self, seeds: Vec<u64>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Register an invariant checked after every event of every iteration.
    pub fn invariant(mut self, invariant: Box<dyn Invariant>) -> Self {
        self.invariants.push(Rc::from(invariant));
        self
    }

    /// Register the conservation and backlog invariants.
    pub fn with_default_invariants(mut self) -> Self {
        self.invariants.push(Rc::new(ConservationLaw));
        self.invariants.push(Rc::new(BacklogIdentity));
        self
    }

    fn seed_for(&self, iteration: usize) -> u64 {
        self.seeds
            .get(iteration)
            .copied()
            .unwrap_or_else(|| self.config.seed.wrapping_add(iteration as u64))
    }

    /// Run every iteration and collect a report.
    ///
    /// The first failing iteration aborts the whole batch: configuration
    /// errors fail identically for every seed, and a pool overflow is an
    /// engine defect.
    #[instrument(skip_all, fields(iterations = self.iterations))]
    pub fn run(self) -> SimulationResult<SimulationReport> {
        // Validate once up front so an empty batch still rejects bad input.
        self.config.validate()?;

        let mut runs = Vec::new();
        for iteration in 0..self.iterations {
            let seed = self.seed_for(iteration);
            tracing::debug!("Starting iteration {} with seed {}", iteration, seed);

            let mut runner = SimulationRunner::new(&self.config.clone().with_seed(seed))?;
            for invariant in &self.invariants {
                runner.add_shared_invariant(Rc::clone(invariant));
            }
            runs.push(runner.run()?);
        }

        Ok(SimulationReport {
            iterations: self.iterations,
            runs,
        })
    }
}
