//! Trait-based invariant checks over the model state.
//!
//! Invariants are checked after every dispatched event and panic on
//! violation. A broken invariant means the engine itself is wrong, so the
//! run stops at the first event that exposes it.

use std::time::Duration;

use crate::sim::state::Counters;

/// Read-only view of the model handed to invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelView {
    /// Units sitting in the pool.
    pub available_supply: u64,
    /// Fixed pool capacity.
    pub capacity: u64,
    /// Length of the pool's waiter queue.
    pub backlog: u64,
    /// Cumulative counters.
    pub counters: Counters,
}

/// A named property of the model that must hold after every event.
///
/// # Example
///
/// ```
/// use sparepool_sim::{Invariant, ModelView};
/// use std::time::Duration;
///
/// struct NeverEmpty;
///
/// impl Invariant for NeverEmpty {
///     fn name(&self) -> &str { "never_empty" }
///     fn check(&self, view: &ModelView, _sim_time: Duration) {
///         assert!(view.available_supply > 0, "pool ran dry");
///     }
/// }
/// ```
pub trait Invariant {
    /// The human-readable name of this invariant.
    fn name(&self) -> &str;

    /// Check this invariant against the current state.
    ///
    /// Should panic if the invariant is violated.
    fn check(&self, view: &ModelView, sim_time: Duration);
}

/// Every unit is either available or in repair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservationLaw;

impl Invariant for ConservationLaw {
    fn name(&self) -> &str {
        "conservation_law"
    }

    fn check(&self, view: &ModelView, sim_time: Duration) {
        assert_eq!(
            view.available_supply + view.counters.in_repair,
            view.capacity,
            "units lost or duplicated at {:?}: available={} in_repair={} capacity={}",
            sim_time,
            view.available_supply,
            view.counters.in_repair,
            view.capacity
        );
    }
}

/// The waiter queue holds exactly the arrivals not yet served.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacklogIdentity;

impl Invariant for BacklogIdentity {
    fn name(&self) -> &str {
        "backlog_identity"
    }

    fn check(&self, view: &ModelView, sim_time: Duration) {
        let counters = &view.counters;
        assert!(
            counters.served <= counters.total_arrivals,
            "served {} exceeds arrivals {} at {:?}",
            counters.served,
            counters.total_arrivals,
            sim_time
        );
        assert_eq!(
            view.backlog,
            counters.backlog(),
            "queue length disagrees with counters at {:?}",
            sim_time
        );
    }
}

/// The invariants every well-formed run satisfies.
pub fn default_invariants() -> Vec<Box<dyn Invariant>> {
    vec![Box::new(ConservationLaw), Box::new(BacklogIdentity)]
}

/// Create a boxed invariant from a name and closure.
///
/// ```
/// use sparepool_sim::invariant_fn;
///
/// let inv = invariant_fn("rate_in_bounds", |view, _time| {
///     let rate = view.counters.satisfaction_rate();
///     assert!((0.0..=1.0).contains(&rate));
/// });
/// assert_eq!(inv.name(), "rate_in_bounds");
/// ```
pub fn invariant_fn<F>(name: &str, check: F) -> Box<dyn Invariant>
where
    F: Fn(&ModelView, Duration) + 'static,
{
    Box::new(FnInvariant {
        name: name.to_string(),
        check,
    })
}

struct FnInvariant<F> {
    name: String,
    check: F,
}

impl<F> Invariant for FnInvariant<F>
where
    F: Fn(&ModelView, Duration),
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, view: &ModelView, sim_time: Duration) {
        (self.check)(view, sim_time);
    }
}
