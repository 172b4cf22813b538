//! Observations produced by a run: periodic snapshots and the final record.
//!
//! Both are read-only once handed out. Times serialize as `f64` time units.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::sim::state::Counters;

pub(crate) fn serialize_time_units<S: Serializer>(
    time: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(time.as_secs_f64())
}

/// One time-stamped observation of the model state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Simulated time of the observation.
    #[serde(serialize_with = "serialize_time_units")]
    pub time: Duration,
    /// Units sitting in the pool.
    pub available_supply: u64,
    /// Demands waiting for a unit.
    pub backlog: u64,
    /// Units in their repair cycle.
    pub in_repair: u64,
    /// Cumulative arrivals.
    pub total_arrivals: u64,
    /// Cumulative granted demands.
    pub served: u64,
    /// `served / total_arrivals`, or `0.0` before the first arrival.
    pub satisfaction_rate: f64,
}

impl Snapshot {
    pub(crate) fn capture(
        time: Duration,
        available_supply: u64,
        backlog: u64,
        counters: &Counters,
    ) -> Self {
        Self {
            time,
            available_supply,
            backlog,
            in_repair: counters.in_repair,
            total_arrivals: counters.total_arrivals,
            served: counters.served,
            satisfaction_rate: counters.satisfaction_rate(),
        }
    }

    /// Observation time in configuration time units.
    pub fn time_units(&self) -> f64 {
        self.time.as_secs_f64()
    }
}

/// Append-only, time-ordered sequence of [`Snapshot`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    snapshots: Vec<Snapshot>,
}

impl TimeSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        debug_assert!(
            self.snapshots
                .last()
                .is_none_or(|last| last.time <= snapshot.time),
            "snapshots must be appended in time order"
        );
        self.snapshots.push(snapshot);
    }

    /// Number of snapshots recorded.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterate snapshots in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// All snapshots as a slice.
    pub fn as_slice(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// State of the model at the horizon.
///
/// Nothing is drained: demands still waiting and units still mid-repair at
/// `sim_time` are reported as they are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalMetrics {
    /// `served / total_arrivals`, or `0.0` when nothing arrived.
    pub demand_satisfaction_rate: f64,
    /// Cumulative arrivals.
    pub total_arrivals: u64,
    /// Cumulative granted demands.
    pub served: u64,
    /// Demands still waiting for a unit.
    pub backlog: u64,
    /// Units sitting in the pool.
    pub available_supply: u64,
    /// Units still in their repair cycle.
    pub in_repair: u64,
}

impl FinalMetrics {
    pub(crate) fn capture(available_supply: u64, backlog: u64, counters: &Counters) -> Self {
        Self {
            demand_satisfaction_rate: counters.satisfaction_rate(),
            total_arrivals: counters.total_arrivals,
            served: counters.served,
            backlog,
            available_supply,
            in_repair: counters.in_repair,
        }
    }
}

impl fmt::Display for FinalMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Arrivals: {}", self.total_arrivals)?;
        writeln!(f, "Served (Demand Satisfied): {}", self.served)?;
        writeln!(
            f,
            "Demand Satisfaction Rate: {:.2}%",
            self.demand_satisfaction_rate * 100.0
        )?;
        writeln!(f, "Demand Backlog: {}", self.backlog)?;
        writeln!(f, "Available Supply: {}", self.available_supply)?;
        write!(f, "Units in Repair: {}", self.in_repair)
    }
}
