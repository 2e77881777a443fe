//! EventPersister implementations.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::traits::EventPersister;

/// An event as recorded in the journal.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub seq: i64,
    pub ts: DateTime<Utc>,
    pub event_type: String,
    pub parent_seq: Option<i64>,
    pub session_id: String,
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// MemoryEventSink
// ---------------------------------------------------------------------------

/// In-memory journal with incrementing sequence numbers. Thread-safe.
///
/// With a capacity, the oldest entries are dropped once it is full;
/// sequence numbers keep counting regardless.
pub struct MemoryEventSink {
    next_seq: AtomicI64,
    capacity: Option<usize>,
    events: Mutex<VecDeque<StoredEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self {
            next_seq: AtomicI64::new(1),
            capacity: None,
            events: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::new()
        }
    }

    /// Snapshot of the retained journal, oldest first.
    pub fn events(&self) -> Vec<StoredEvent> {
        self.lock().iter().cloned().collect()
    }

    /// Event types in journal order.
    pub fn event_types(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.event_type.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<StoredEvent>> {
        // A poisoned journal is still readable; the data is append-only.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(
        &self,
        event_type: String,
        payload: serde_json::Value,
        session_id: &str,
        parent_seq: Option<i64>,
    ) -> StoredEvent {
        let stored = StoredEvent {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            ts: Utc::now(),
            event_type,
            parent_seq,
            session_id: session_id.to_string(),
            payload,
        };

        let mut events = self.lock();
        if let Some(cap) = self.capacity {
            while events.len() >= cap {
                events.pop_front();
            }
        }
        events.push_back(stored.clone());
        stored
    }
}

impl Default for MemoryEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPersister for MemoryEventSink {
    async fn persist(
        &self,
        event_type: String,
        payload: serde_json::Value,
        session_id: &str,
    ) -> Result<StoredEvent> {
        Ok(self.record(event_type, payload, session_id, None))
    }

    async fn persist_child(
        &self,
        parent_seq: i64,
        event_type: String,
        payload: serde_json::Value,
        session_id: &str,
    ) -> Result<StoredEvent> {
        Ok(self.record(event_type, payload, session_id, Some(parent_seq)))
    }
}

// ---------------------------------------------------------------------------
// Arc<P> blanket: callers keep a handle on the sink for inspection.
// ---------------------------------------------------------------------------

#[async_trait]
impl<P: EventPersister + ?Sized> EventPersister for Arc<P> {
    async fn persist(
        &self,
        event_type: String,
        payload: serde_json::Value,
        session_id: &str,
    ) -> Result<StoredEvent> {
        (**self).persist(event_type, payload, session_id).await
    }

    async fn persist_child(
        &self,
        parent_seq: i64,
        event_type: String,
        payload: serde_json::Value,
        session_id: &str,
    ) -> Result<StoredEvent> {
        (**self)
            .persist_child(parent_seq, event_type, payload, session_id)
            .await
    }
}
