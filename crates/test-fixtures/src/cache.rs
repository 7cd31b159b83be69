use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use beacon_core::errors::CacheError;
use beacon_core::traits::CacheBackend;

/// Cache fake that keeps every entry and records each write with its TTL.
/// Entries never expire; tests assert on the recorded TTLs instead.
#[derive(Debug)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, Duration)>>,
    available: AtomicBool,
    gets: AtomicUsize,
}

impl Default for RecordingCache {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            gets: AtomicUsize::new(0),
        }
    }
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Every `(key, ttl)` passed to `set`, in order.
    pub fn writes(&self) -> Vec<(String, Duration)> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Writes whose key starts with `prefix`.
    pub fn writes_with_prefix(&self, prefix: &str) -> Vec<(String, Duration)> {
        self.writes()
            .into_iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), CacheError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CacheError::Unavailable {
                reason: "recording cache offline".to_string(),
            })
        }
    }
}

impl CacheBackend for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.check()?;
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((key.to_string(), ttl));
        Ok(())
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
