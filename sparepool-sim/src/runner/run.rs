//! Single-run lifecycle: Configured, then Completed.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::instrument;

use crate::{
    SimulationResult, config::SimulationConfig, invariants::Invariant, sim::SimWorld,
};

use super::report::RunOutcome;

/// A validated, ready-to-run simulation.
///
/// Construction is the Configured state: inputs are checked, the pool and
/// counters exist, and the metrics recorder and arrival process are
/// scheduled. [`SimulationRunner::run`] consumes the runner and yields the
/// Completed [`RunOutcome`].
#[derive(Debug)]
pub struct SimulationRunner {
    world: SimWorld,
    horizon: Duration,
}

impl SimulationRunner {
    /// Validate `config` and wire up a world for it.
    ///
    /// Fails with [`SimulationError::Config`](crate::SimulationError::Config)
    /// before any event runs if an input is out of range.
    pub fn new(config: &SimulationConfig) -> SimulationResult<Self> {
        let params = config.validate()?;
        let horizon = params.sim_time;
        let mut world = SimWorld::new(params);

        // The recorder goes first so the t=0 sample precedes any arrival.
        world.spawn_metrics_recorder();
        world.spawn_arrival_process()?;

        tracing::debug!(
            "Configured simulation: supply={} rate={} repair={:?} horizon={:?} interval={:?} seed={}",
            config.initial_supply,
            config.demand_rate,
            world.params().repair_cycle_time,
            horizon,
            world.params().record_interval,
            config.seed
        );

        Ok(Self { world, horizon })
    }

    /// Registers an invariant checked after every event of this run.
    pub fn add_invariant(&mut self, invariant: Box<dyn Invariant>) {
        self.world.add_invariant(invariant);
    }

    pub(crate) fn add_shared_invariant(&mut self, invariant: Rc<dyn Invariant>) {
        self.world.add_shared_invariant(invariant);
    }

    /// The configured world, before it has run.
    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    /// Drive the scheduler to the horizon and collect the results.
    ///
    /// Reports the state exactly at `sim_time`; waiting demands and
    /// in-flight repairs are not drained.
    #[instrument(skip(self), fields(seed = self.world.params().seed))]
    pub fn run(mut self) -> SimulationResult<RunOutcome> {
        let start_time = Instant::now();
        self.world.run_until(self.horizon)?;
        let wall_time = start_time.elapsed();

        let final_metrics = self.world.final_metrics();
        tracing::info!(
            "Simulation completed at {:?}: arrivals={} served={} backlog={} available={} in_repair={} rate={:.4}",
            self.horizon,
            final_metrics.total_arrivals,
            final_metrics.served,
            final_metrics.backlog,
            final_metrics.available_supply,
            final_metrics.in_repair,
            final_metrics.demand_satisfaction_rate
        );

        let seed = self.world.params().seed;
        let simulated_time = self.world.current_time();
        let events_processed = self.world.events_processed();
        Ok(RunOutcome {
            seed,
            final_metrics,
            timeseries: self.world.into_timeseries(),
            simulated_time,
            events_processed,
            wall_time,
        })
    }
}
