//! Simulated real-time feed
//!
//! Everything that makes the mock data look alive: the in-memory
//! connection handle, the cancellable timer-task handle, the update
//! event bus, and the pluggable random source behind every perturbation.

mod connection;
mod events;
mod rng;
mod scheduler;

pub use connection::{ConnectionState, FeedConnection};
pub use events::{FeasibilityTickKind, StoreEvent, UpdateBus};
pub use rng::{RandomSource, ScriptedRandom, StdRandom};
pub use scheduler::FeedHandle;
