//! Bounded, TTL'd symbol resolution cache.
//!
//! Injected into providers that need vendor symbol lookups so that cache
//! lifetime is owned by the service wiring rather than process-wide state.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    resolved: String,
    inserted_at: Instant,
}

pub struct SymbolCache {
    entries: Mutex<HashMap<String, Entry>>,
    capacity: usize,
    ttl: Duration,
}

impl SymbolCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
            ttl,
        }
    }

    pub fn get(&self, symbol: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(symbol)
            .filter(|e| e.inserted_at.elapsed() < self.ttl)
            .map(|e| e.resolved.clone())
    }

    pub fn insert(&self, symbol: String, resolved: String) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= self.capacity && !entries.contains_key(&symbol) {
            entries.retain(|_, e| e.inserted_at.elapsed() < self.ttl);
            if entries.len() >= self.capacity {
                // Still full after dropping expired entries: evict the oldest.
                if let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    entries.remove(&oldest);
                }
            }
        }
        entries.insert(
            symbol,
            Entry {
                resolved,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
