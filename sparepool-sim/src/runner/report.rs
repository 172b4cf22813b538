//! Simulation reporting and statistical analysis across seeds.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::metrics::{FinalMetrics, TimeSeries, serialize_time_units};

/// Everything a completed run hands back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    /// Seed of the run's random stream.
    pub seed: u64,
    /// State of the model at the horizon.
    pub final_metrics: FinalMetrics,
    /// Snapshots in recording order.
    pub timeseries: TimeSeries,
    /// Simulated logical time at completion (the horizon).
    #[serde(serialize_with = "serialize_time_units")]
    pub simulated_time: Duration,
    /// Number of events dispatched.
    pub events_processed: u64,
    /// Wall-clock time taken for the run.
    #[serde(skip)]
    pub wall_time: Duration,
}

/// Report of one or more runs of the same configuration under different seeds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    /// Number of iterations executed
    pub iterations: usize,
    /// Outcome of each iteration, in seed order
    pub runs: Vec<RunOutcome>,
}

impl SimulationReport {
    /// Seeds used for each iteration.
    pub fn seeds_used(&self) -> Vec<u64> {
        self.runs.iter().map(|run| run.seed).collect()
    }

    fn mean_of(&self, f: impl Fn(&RunOutcome) -> f64) -> f64 {
        if self.runs.is_empty() {
            0.0
        } else {
            self.runs.iter().map(f).sum::<f64>() / self.runs.len() as f64
        }
    }

    /// Mean final demand satisfaction rate across runs.
    pub fn mean_satisfaction_rate(&self) -> f64 {
        self.mean_of(|run| run.final_metrics.demand_satisfaction_rate)
    }

    /// Mean final backlog across runs.
    pub fn mean_backlog(&self) -> f64 {
        self.mean_of(|run| run.final_metrics.backlog as f64)
    }

    /// Mean number of units in repair at the horizon.
    pub fn mean_in_repair(&self) -> f64 {
        self.mean_of(|run| run.final_metrics.in_repair as f64)
    }

    /// Mean available supply at the horizon.
    pub fn mean_available_supply(&self) -> f64 {
        self.mean_of(|run| run.final_metrics.available_supply as f64)
    }

    /// Mean cumulative arrivals.
    pub fn mean_total_arrivals(&self) -> f64 {
        self.mean_of(|run| run.final_metrics.total_arrivals as f64)
    }

    /// Get the average number of events processed per iteration.
    pub fn average_events_processed(&self) -> f64 {
        self.mean_of(|run| run.events_processed as f64)
    }

    /// Get the average wall time per iteration.
    pub fn average_wall_time(&self) -> Duration {
        if self.runs.is_empty() {
            Duration::ZERO
        } else {
            let total = self.runs.iter().map(|run| run.wall_time).sum::<Duration>();
            match u32::try_from(self.runs.len()) {
                Ok(count) => total / count,
                Err(_) => total.div_f64(self.runs.len() as f64),
            }
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Report ===")?;
        writeln!(f, "Iterations: {}", self.iterations)?;
        writeln!(f, "Seeds: {:?}", self.seeds_used())?;
        writeln!(f)?;

        if let [run] = self.runs.as_slice() {
            writeln!(f, "{}", run.final_metrics)?;
        } else {
            writeln!(
                f,
                "Mean Demand Satisfaction Rate: {:.2}%",
                self.mean_satisfaction_rate() * 100.0
            )?;
            writeln!(f, "Mean Total Arrivals: {:.1}", self.mean_total_arrivals())?;
            writeln!(f, "Mean Demand Backlog: {:.1}", self.mean_backlog())?;
            writeln!(
                f,
                "Mean Available Supply: {:.1}",
                self.mean_available_supply()
            )?;
            writeln!(f, "Mean Units in Repair: {:.1}", self.mean_in_repair())?;
        }

        writeln!(f)?;
        writeln!(f, "Average Wall Time: {:?}", self.average_wall_time())?;
        writeln!(
            f,
            "Average Events Processed: {:.1}",
            self.average_events_processed()
        )
    }
}
