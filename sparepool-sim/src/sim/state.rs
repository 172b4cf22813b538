//! Mutable model state shared by the simulated processes.

use serde::Serialize;

/// Unique identifier for a single demand (one request for one unit).
///
/// Identifiers are assigned in arrival order, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DemandId(pub u64);

/// Cumulative counters owned by the simulation.
///
/// `total_arrivals` and `served` only ever grow. `in_repair` rises when a
/// unit is consumed and falls when its repair completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Demands that have arrived so far, granted or not.
    pub total_arrivals: u64,
    /// Demands that have been granted a unit.
    pub served: u64,
    /// Units currently in their repair cycle.
    pub in_repair: u64,
}

impl Counters {
    /// Demands that arrived but have not been granted a unit yet.
    pub fn backlog(&self) -> u64 {
        self.total_arrivals - self.served
    }

    /// Fraction of arrivals that were served, or `0.0` before any arrival.
    pub fn satisfaction_rate(&self) -> f64 {
        if self.total_arrivals == 0 {
            0.0
        } else {
            self.served as f64 / self.total_arrivals as f64
        }
    }

    /// Hands out the identifier for the next arriving demand.
    pub(crate) fn record_arrival(&mut self) -> DemandId {
        let id = DemandId(self.total_arrivals);
        self.total_arrivals += 1;
        id
    }

    /// Books a granted demand: the unit is consumed and enters repair
    /// in the same instant.
    pub(crate) fn record_grant(&mut self) {
        self.served += 1;
        self.in_repair += 1;
    }

    pub(crate) fn record_repair_complete(&mut self) {
        self.in_repair -= 1;
    }
}
