//! Event scheduling primitives for the simulation engine.
//!
//! Every process in the model is a tagged [`Event`] variant advanced only
//! when the scheduler dispatches it. Ordering is total: time ascending, then
//! insertion sequence ascending.

use std::{cmp::Ordering, collections::BinaryHeap, time::Duration};

use super::state::DemandId;

/// Events that can be scheduled in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The arrival process wakes up: one demand arrives and the next
    /// interarrival wait is drawn.
    Arrival,

    /// A consumed unit finishes its repair cycle and goes back to the pool.
    RepairComplete {
        /// The demand whose consumption sent this unit to repair.
        demand: DemandId,
    },

    /// The metrics recorder takes a snapshot and schedules its next sample.
    Sample,
}

/// An event scheduled for execution at a specific simulation time.
///
/// Equality and ordering both look only at `(time, sequence)`.
#[derive(Debug, Clone)]
pub struct ScheduledEvent {
    time: Duration,
    event: Event,
    sequence: u64, // For deterministic ordering
}

impl ScheduledEvent {
    /// Creates a new scheduled event.
    pub fn new(time: Duration, event: Event, sequence: u64) -> Self {
        Self {
            time,
            event,
            sequence,
        }
    }

    /// Returns the scheduled execution time.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Returns the insertion sequence number used to break time ties.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns a reference to the event.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Consumes the scheduled event and returns the event.
    pub fn into_event(self) -> Event {
        self.event
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max heap, but we want earliest time first
        // So we reverse the time comparison
        match other.time.cmp(&self.time) {
            Ordering::Equal => {
                // Earlier sequence numbers are processed first (also reversed for max heap)
                other.sequence.cmp(&self.sequence)
            }
            other => other,
        }
    }
}

/// A priority queue for scheduling events in chronological order.
///
/// Events are processed in time order, with deterministic ordering for events
/// scheduled at the same time using sequence numbers.
#[derive(Debug)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Schedules an event for execution.
    pub fn schedule(&mut self, event: ScheduledEvent) {
        self.heap.push(event);
    }

    /// Removes and returns the earliest scheduled event.
    pub fn pop_earliest(&mut self) -> Option<ScheduledEvent> {
        self.heap.pop()
    }

    /// Removes and returns the earliest scheduled event if it is due at or
    /// before `horizon`. Later events stay queued.
    pub fn pop_due(&mut self, horizon: Duration) -> Option<ScheduledEvent> {
        match self.heap.peek() {
            Some(next) if next.time <= horizon => self.heap.pop(),
            _ => None,
        }
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of events in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
