//! Core simulation engine.
//!
//! ## Submodules
//!
//! - `events` - Event types and queue for scheduling
//! - `rng` - Seeded interarrival random stream
//! - `pool` - FIFO-fair parts pool
//! - `state` - Counters and demand identifiers
//! - `world` - Clock, scheduler and process dispatch

pub mod events;
pub mod pool;
pub mod rng;
pub mod state;
pub mod world;

pub use events::{Event, EventQueue, ScheduledEvent};
pub use pool::{Acquire, PartsPool};
pub use rng::RandomStream;
pub use state::{Counters, DemandId};
pub use world::SimWorld;
