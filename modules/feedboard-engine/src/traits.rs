//! Seams between the dispatch loop and a domain.

use anyhow::Result;
use async_trait::async_trait;

use crate::persist::StoredEvent;

/// Events name themselves and know their journal payload.
pub trait EventLike: Clone + Send + Sync + 'static {
    fn event_type_str(&self) -> String;

    fn to_persist_payload(&self) -> serde_json::Value;
}

/// Pure state updates. No I/O, no side effects, never fails.
///
/// Runs for every event before routing, so a router always sees the state
/// as committed by the event it is handling.
pub trait Reducer<E: EventLike, S: Send>: Send + Sync {
    fn reduce(&self, state: &mut S, event: &E);
}

/// Turns events into follow-up work. May perform I/O.
///
/// Returned events re-enter the dispatch loop as children of `stored`.
/// A failed fetch should come back as an event, not an `Err`; `Err` aborts
/// the whole dispatch.
#[async_trait]
pub trait Router<E: EventLike, S: Send + Sync, D: Send + Sync>: Send + Sync {
    async fn route(&self, event: &E, stored: &StoredEvent, state: &S, deps: &D) -> Result<Vec<E>>;
}

/// Records events and hands back their sequence numbers.
#[async_trait]
pub trait EventPersister: Send + Sync {
    /// Persist a root event (no parent).
    async fn persist(
        &self,
        event_type: String,
        payload: serde_json::Value,
        session_id: &str,
    ) -> Result<StoredEvent>;

    /// Persist an event caused by `parent_seq`.
    async fn persist_child(
        &self,
        parent_seq: i64,
        event_type: String,
        payload: serde_json::Value,
        session_id: &str,
    ) -> Result<StoredEvent>;
}
