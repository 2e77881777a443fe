//! The dispatch loop.

use std::collections::VecDeque;
use std::marker::PhantomData;

use anyhow::Result;
use tracing::debug;

use crate::traits::{EventLike, EventPersister, Reducer, Router};

/// Generic event dispatch engine.
///
/// Persist → reduce → route → recurse until the queue drains. Events are
/// handled strictly one at a time, so every reduction sees the state left by
/// the previous one.
pub struct Engine<E, S, D, Red, Rout, P>
where
    E: EventLike,
    S: Send + Sync,
    D: Send + Sync,
    Red: Reducer<E, S>,
    Rout: Router<E, S, D>,
    P: EventPersister,
{
    reducer: Red,
    router: Rout,
    persister: P,
    session_id: String,
    _phantom: PhantomData<fn() -> (E, S, D)>,
}

impl<E, S, D, Red, Rout, P> Engine<E, S, D, Red, Rout, P>
where
    E: EventLike,
    S: Send + Sync,
    D: Send + Sync,
    Red: Reducer<E, S>,
    Rout: Router<E, S, D>,
    P: EventPersister,
{
    pub fn new(reducer: Red, router: Rout, persister: P, session_id: String) -> Self {
        Self {
            reducer,
            router,
            persister,
            session_id,
            _phantom: PhantomData,
        }
    }

    /// Dispatch an event and everything it causes. Returns the number of
    /// events processed, the root included.
    pub async fn dispatch(&self, event: E, state: &mut S, deps: &D) -> Result<usize> {
        let mut queue: VecDeque<(E, Option<i64>)> = VecDeque::new();
        queue.push_back((event, None));
        let mut processed = 0;

        while let Some((evt, parent_seq)) = queue.pop_front() {
            let event_type = evt.event_type_str();
            let payload = evt.to_persist_payload();
            let stored = match parent_seq {
                None => {
                    self.persister
                        .persist(event_type, payload, &self.session_id)
                        .await?
                }
                Some(parent) => {
                    self.persister
                        .persist_child(parent, event_type, payload, &self.session_id)
                        .await?
                }
            };

            self.reducer.reduce(state, &evt);
            processed += 1;

            let children = self.router.route(&evt, &stored, &*state, deps).await?;
            if !children.is_empty() {
                debug!(
                    seq = stored.seq,
                    event_type = %stored.event_type,
                    children = children.len(),
                    "Event routed"
                );
            }
            for child in children {
                queue.push_back((child, Some(stored.seq)));
            }
        }

        Ok(processed)
    }

    /// Reduce without persisting or routing. For replaying a journal.
    pub fn replay(&self, events: &[E], state: &mut S) {
        for evt in events {
            self.reducer.reduce(state, evt);
        }
    }

    pub fn persister(&self) -> &P {
        &self.persister
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
