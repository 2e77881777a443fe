use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Upper bound on stored responses. At the cap the oldest entry gives way.
pub const MAX_ENTRIES: usize = 512;

/// Response bodies keyed by request URL, each valid for `ttl`.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, String)>>,
}

impl ResponseCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A fresh body for `key`. Expired entries are dropped on the way.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some((stored_at, body)) if stored_at.elapsed() < self.ttl => Some(body.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `body` under `key`, evicting expired entries first.
    pub fn insert(&self, key: String, body: String) {
        let mut entries = self.lock();
        let now = Instant::now();
        entries.retain(|_, (stored_at, _)| now.duration_since(*stored_at) < self.ttl);

        if entries.len() >= MAX_ENTRIES && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, (stored_at, _))| *stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(key, (now, body));
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic mid-insert leaves the map consistent, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Instant, String)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
