//! In-memory store for testing

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{KvStore, StoreError, StoreResult};

/// In-memory key-value store with failure injection
#[derive(Default)]
pub struct MemoryKvStore {
    documents: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,

    /// Configure reads to fail
    pub fail_reads: AtomicBool,

    /// Configure writes to fail (e.g. quota exceeded)
    pub fail_writes: AtomicBool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        let documents = self.documents.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(documents.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("quota exceeded".into()));
        }
        let mut documents = self.documents.lock().map_err(|_| StoreError::LockPoisoned)?;
        documents.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        let mut documents = self.documents.lock().map_err(|_| StoreError::LockPoisoned)?;
        documents.remove(key);
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        !self.fail_reads.load(Ordering::SeqCst) && !self.fail_writes.load(Ordering::SeqCst)
    }
}
