//! FIFO grant order when repairs free units for queued demands.

use sparepool_sim::{DemandId, Event, ModelParams, SimWorld, default_invariants};
use std::time::Duration;

/// Demand so sparse that the follow-up arrival every manual arrival draws
/// lands past any horizon used here.
const NEGLIGIBLE_RATE: f64 = 1e-300;

fn quiet_world(capacity: u64, repair_secs: u64) -> SimWorld {
    let mut sim = SimWorld::new(ModelParams {
        capacity,
        demand_rate: NEGLIGIBLE_RATE,
        repair_cycle_time: Duration::from_secs(repair_secs),
        sim_time: Duration::from_secs(100),
        record_interval: Duration::from_secs(1),
        seed: 1,
    });
    for inv in default_invariants() {
        sim.add_invariant(inv);
    }
    sim
}

fn waiters(sim: &SimWorld) -> Vec<DemandId> {
    sim.pool().waiters().copied().collect()
}

#[test]
fn queued_demands_are_granted_oldest_first() {
    let mut sim = quiet_world(1, 5);
    for _ in 0..3 {
        sim.schedule_event_at(Event::Arrival, Duration::from_secs(1));
    }

    sim.run_until(Duration::from_secs(5)).unwrap();
    assert_eq!(sim.counters().served, 1);
    assert_eq!(waiters(&sim), vec![DemandId(1), DemandId(2)]);

    // First repair completes at t=6 and goes to demand 1.
    sim.run_until(Duration::from_secs(6)).unwrap();
    assert_eq!(sim.counters().served, 2);
    assert_eq!(waiters(&sim), vec![DemandId(2)]);
    assert_eq!(sim.pool().level(), 0);
    assert_eq!(sim.counters().in_repair, 1);

    sim.run_until(Duration::from_secs(11)).unwrap();
    assert_eq!(sim.counters().served, 3);
    assert!(waiters(&sim).is_empty());

    sim.run_until(Duration::from_secs(16)).unwrap();
    assert_eq!(sim.pool().level(), 1);
    assert_eq!(sim.counters().in_repair, 0);
    assert_eq!(sim.counters().total_arrivals, 3);
}

#[test]
fn released_unit_goes_to_waiter_before_new_arrival() {
    let mut sim = quiet_world(1, 5);
    sim.schedule_event_at(Event::Arrival, Duration::from_secs(1));
    sim.schedule_event_at(Event::Arrival, Duration::from_secs(2));
    // Arrives in the same instant the first repair completes. The freed
    // unit belongs to demand 1, which was already waiting.
    sim.run_until(Duration::from_secs(2)).unwrap();
    sim.schedule_event_at(Event::Arrival, Duration::from_secs(6));

    sim.run_until(Duration::from_secs(6)).unwrap();
    assert_eq!(sim.counters().served, 2);
    assert_eq!(waiters(&sim), vec![DemandId(2)]);
}

#[test]
fn several_units_returning_together_serve_queue_in_order() {
    let mut sim = quiet_world(2, 4);
    for _ in 0..5 {
        sim.schedule_event_at(Event::Arrival, Duration::from_secs(1));
    }
    sim.run_until(Duration::from_secs(1)).unwrap();
    assert_eq!(
        waiters(&sim),
        vec![DemandId(2), DemandId(3), DemandId(4)]
    );

    // Both repairs complete at t=5, each handing its unit to the queue head.
    sim.run_until(Duration::from_secs(5)).unwrap();
    assert_eq!(waiters(&sim), vec![DemandId(4)]);
    assert_eq!(sim.counters().served, 4);
    assert_eq!(sim.counters().in_repair, 2);
}
