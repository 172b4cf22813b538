//! Core simulation world and coordination logic.
//!
//! [`SimWorld`] owns the clock, the pending events and every piece of
//! model state. Processes are not coroutines: each one is an [`Event`]
//! variant that, when dispatched, performs its step and schedules its own
//! continuation.
//!
//! | Process | Event | Step |
//! |---------|-------|------|
//! | Arrival | `Arrival` | count a demand, acquire a unit, draw the next wait |
//! | Awaiting grant | (pool waiter) | resumed by a release, in FIFO order |
//! | Repair | `RepairComplete` | return the unit, resume queued demands |
//! | Sampling | `Sample` | append a snapshot, wait `record_interval` |

use std::{rc::Rc, time::Duration};

use tracing::instrument;

use crate::{
    SimulationResult,
    config::ModelParams,
    invariants::{Invariant, ModelView},
    metrics::{FinalMetrics, Snapshot, TimeSeries},
};

use super::{
    events::{Event, EventQueue, ScheduledEvent},
    pool::{Acquire, PartsPool},
    rng::RandomStream,
    state::{Counters, DemandId},
};

/// The central simulation coordinator that manages time and event processing.
///
/// All mutation happens inside [`SimWorld::step`], one event at a time, so
/// every effect of an event is complete before the next one begins.
pub struct SimWorld {
    current_time: Duration,
    event_queue: EventQueue,
    next_sequence: u64,

    params: ModelParams,
    rng: RandomStream,
    pool: PartsPool<DemandId>,
    counters: Counters,
    timeseries: TimeSeries,

    invariants: Vec<Rc<dyn Invariant>>,
    events_processed: u64,
}

impl std::fmt::Debug for SimWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimWorld")
            .field("current_time", &self.current_time)
            .field("pending_events", &self.event_queue.len())
            .field("pool", &self.pool)
            .field("counters", &self.counters)
            .field("snapshots", &self.timeseries.len())
            .field("invariants", &self.invariants.len())
            .field("events_processed", &self.events_processed)
            .finish()
    }
}

impl SimWorld {
    /// Creates a world at time zero with a full pool and no pending events.
    ///
    /// Processes are not started; see [`SimWorld::spawn_metrics_recorder`]
    /// and [`SimWorld::spawn_arrival_process`].
    pub fn new(params: ModelParams) -> Self {
        Self {
            current_time: Duration::ZERO,
            event_queue: EventQueue::new(),
            next_sequence: 0,
            rng: RandomStream::new(params.seed),
            pool: PartsPool::new(params.capacity),
            counters: Counters::default(),
            timeseries: TimeSeries::new(),
            invariants: Vec::new(),
            events_processed: 0,
            params,
        }
    }

    /// Registers an invariant checked after every dispatched event.
    pub fn add_invariant(&mut self, invariant: Box<dyn Invariant>) {
        self.invariants.push(Rc::from(invariant));
    }

    /// Registers an invariant instance shared with other worlds.
    pub fn add_shared_invariant(&mut self, invariant: Rc<dyn Invariant>) {
        self.invariants.push(invariant);
    }

    /// Starts the metrics recorder: first sample now, then every
    /// `record_interval`.
    pub fn spawn_metrics_recorder(&mut self) {
        self.schedule_event(Event::Sample, Duration::ZERO);
    }

    /// Starts the arrival process by drawing the first interarrival wait.
    pub fn spawn_arrival_process(&mut self) -> SimulationResult<()> {
        self.schedule_next_arrival()
    }

    /// Schedules an event to execute after the specified delay from the current time.
    ///
    /// Times saturate at `Duration::MAX`.
    #[instrument(level = "trace", skip(self))]
    pub fn schedule_event(&mut self, event: Event, delay: Duration) {
        let time = self.current_time.saturating_add(delay);
        self.schedule_event_at(event, time);
    }

    /// Schedules an event to execute at the specified absolute time.
    ///
    /// Times in the past are clamped to the current time so the clock
    /// never runs backwards.
    pub fn schedule_event_at(&mut self, event: Event, time: Duration) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let time = time.max(self.current_time);
        self.event_queue.schedule(ScheduledEvent::new(time, event, sequence));
    }

    /// Processes the next scheduled event and advances time.
    ///
    /// Returns `true` if more events are available for processing,
    /// `false` if this was the last event or if no events are available.
    pub fn step(&mut self) -> SimulationResult<bool> {
        match self.event_queue.pop_earliest() {
            Some(scheduled_event) => {
                self.dispatch(scheduled_event)?;
                Ok(!self.event_queue.is_empty())
            }
            None => Ok(false),
        }
    }

    /// Runs every event due at or before `horizon`, then parks the clock
    /// at `horizon`.
    ///
    /// Events beyond the horizon stay queued and are never executed unless
    /// the world is run further. Demands still waiting and repairs still in
    /// progress are left exactly as they are.
    #[instrument(skip(self))]
    pub fn run_until(&mut self, horizon: Duration) -> SimulationResult<()> {
        while let Some(scheduled_event) = self.event_queue.pop_due(horizon) {
            self.dispatch(scheduled_event)?;
        }
        self.current_time = self.current_time.max(horizon);
        tracing::debug!(
            "Reached horizon {:?} after {} events, {} still pending",
            horizon,
            self.events_processed,
            self.event_queue.len()
        );
        Ok(())
    }

    fn dispatch(&mut self, scheduled_event: ScheduledEvent) -> SimulationResult<()> {
        // Advance logical time to event timestamp
        self.current_time = scheduled_event.time();
        self.process_event(scheduled_event.into_event())?;
        self.events_processed += 1;
        self.check_invariants();
        Ok(())
    }

    fn process_event(&mut self, event: Event) -> SimulationResult<()> {
        tracing::trace!("Processing {:?} at {:?}", event, self.current_time);
        match event {
            Event::Arrival => {
                let demand = self.counters.record_arrival();
                match self.pool.acquire(demand) {
                    Acquire::Granted(demand) => self.start_repair(demand),
                    Acquire::Queued => {
                        tracing::debug!(
                            "Demand {:?} queued at {:?}, backlog now {}",
                            demand,
                            self.current_time,
                            self.pool.backlog()
                        );
                    }
                }
                self.schedule_next_arrival()?;
            }
            Event::RepairComplete { demand } => {
                let granted = self.pool.release(1)?;
                self.counters.record_repair_complete();
                tracing::debug!(
                    "Unit from {:?} repaired at {:?}, resuming {} waiter(s)",
                    demand,
                    self.current_time,
                    granted.len()
                );
                for waiter in granted {
                    self.start_repair(waiter);
                }
            }
            Event::Sample => {
                let snapshot = Snapshot::capture(
                    self.current_time,
                    self.pool.level(),
                    self.pool.backlog() as u64,
                    &self.counters,
                );
                self.timeseries.push(snapshot);
                self.schedule_event(Event::Sample, self.params.record_interval);
            }
        }
        Ok(())
    }

    /// A granted demand consumes its unit, which enters repair at once.
    fn start_repair(&mut self, demand: DemandId) {
        self.counters.record_grant();
        self.schedule_event(
            Event::RepairComplete { demand },
            self.params.repair_cycle_time,
        );
    }

    fn schedule_next_arrival(&mut self) -> SimulationResult<()> {
        let wait = self.rng.draw(self.params.demand_rate)?;
        // Waits too large for a Duration land past any reachable horizon.
        let delay = Duration::try_from_secs_f64(wait).unwrap_or(Duration::MAX);
        self.schedule_event(Event::Arrival, delay);
        Ok(())
    }

    fn check_invariants(&self) {
        if self.invariants.is_empty() {
            return;
        }
        let view = self.view();
        for invariant in &self.invariants {
            tracing::trace!("Checking invariant {}", invariant.name());
            invariant.check(&view, self.current_time);
        }
    }

    /// Returns the current simulation time.
    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    /// The validated parameters this world was built with.
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// The shared parts pool.
    pub fn pool(&self) -> &PartsPool<DemandId> {
        &self.pool
    }

    /// The cumulative counters.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Snapshots recorded so far.
    pub fn timeseries(&self) -> &TimeSeries {
        &self.timeseries
    }

    /// Read-only view of the model right now.
    pub fn view(&self) -> ModelView {
        ModelView {
            available_supply: self.pool.level(),
            capacity: self.pool.capacity(),
            backlog: self.pool.backlog() as u64,
            counters: self.counters,
        }
    }

    /// Final-metrics record computed from the live state.
    pub fn final_metrics(&self) -> FinalMetrics {
        FinalMetrics::capture(
            self.pool.level(),
            self.pool.backlog() as u64,
            &self.counters,
        )
    }

    /// Consumes the world and returns its time series.
    pub fn into_timeseries(self) -> TimeSeries {
        self.timeseries
    }

    /// Returns `true` if there are events waiting to be processed.
    pub fn has_pending_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    /// Returns the number of events waiting to be processed.
    pub fn pending_event_count(&self) -> usize {
        self.event_queue.len()
    }

    /// Number of events dispatched so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }
}
