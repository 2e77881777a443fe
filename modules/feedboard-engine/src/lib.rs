//! Event dispatch engine.
//!
//! A small generic loop: persist → reduce → route → recurse until settled.
//! Child events record the sequence number of the event that caused them.
//!
//! Consumers define their domain by implementing `Reducer` (pure, synchronous
//! state updates) and `Router` (handlers that may do I/O and emit events).

pub mod engine;
pub mod persist;
pub mod traits;

pub use engine::Engine;
pub use persist::{MemoryEventSink, StoredEvent};
pub use traits::{EventLike, EventPersister, Reducer, Router};
