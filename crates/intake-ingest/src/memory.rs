//! In-memory store with controllable timestamps.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};

use crate::error::{Result, StoreError};
use crate::store::{SourceMeta, TabularStore};
use crate::table::Table;

#[derive(Debug)]
struct MemorySource {
    table: Table,
    modified: SystemTime,
    unreadable: Option<String>,
    reads: usize,
}

#[derive(Debug, Default)]
struct MemoryState {
    sources: BTreeMap<String, MemorySource>,
    ticks: u64,
}

impl MemoryState {
    /// Monotonic stand-in for "now", one second per mutation.
    fn tick(&mut self) -> SystemTime {
        self.ticks += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.ticks)
    }
}

/// A [`TabularStore`] kept entirely in memory.
///
/// Every `put`/`write` advances the source's modification time unless one is
/// given explicitly, which lets callers reproduce clock anomalies such as a
/// rewrite that keeps the old timestamp.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, name: &str, table: Table) {
        let mut state = self.lock();
        let modified = state.tick();
        Self::insert(&mut state, name, table, modified);
    }

    pub fn put_with_modified(&self, name: &str, table: Table, modified: SystemTime) {
        let mut state = self.lock();
        Self::insert(&mut state, name, table, modified);
    }

    fn insert(state: &mut MemoryState, name: &str, table: Table, modified: SystemTime) {
        let source = state
            .sources
            .entry(name.to_string())
            .or_insert_with(|| MemorySource {
                table: Table::default(),
                modified,
                unreadable: None,
                reads: 0,
            });
        source.table = table;
        source.modified = modified;
    }

    /// Change the modification time without touching the content.
    pub fn set_modified(&self, name: &str, modified: SystemTime) {
        if let Some(source) = self.lock().sources.get_mut(name) {
            source.modified = modified;
        }
    }

    /// Advance the modification time without touching the content.
    pub fn touch(&self, name: &str) {
        let mut state = self.lock();
        let modified = state.tick();
        if let Some(source) = state.sources.get_mut(name) {
            source.modified = modified;
        }
    }

    /// Make reads and content access fail until cleared with `None`.
    pub fn set_unreadable(&self, name: &str, message: Option<&str>) {
        if let Some(source) = self.lock().sources.get_mut(name) {
            source.unreadable = message.map(str::to_string);
        }
    }

    pub fn remove(&self, name: &str) {
        self.lock().sources.remove(name);
    }

    #[must_use]
    pub fn modified(&self, name: &str) -> Option<SystemTime> {
        self.lock().sources.get(name).map(|source| source.modified)
    }

    /// Number of successful `read` calls served for a source.
    #[must_use]
    pub fn reads(&self, name: &str) -> usize {
        self.lock().sources.get(name).map_or(0, |source| source.reads)
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<Table> {
        self.lock()
            .sources
            .get(name)
            .map(|source| source.table.clone())
    }
}

fn check_readable(name: &str, source: &MemorySource) -> Result<()> {
    match &source.unreadable {
        Some(message) => Err(StoreError::Unreadable {
            name: name.to_string(),
            message: message.clone(),
        }),
        None => Ok(()),
    }
}

fn not_found(name: &str) -> StoreError {
    StoreError::NotFound {
        name: name.to_string(),
    }
}

impl TabularStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Table> {
        let mut state = self.lock();
        let source = state.sources.get_mut(name).ok_or_else(|| not_found(name))?;
        check_readable(name, source)?;
        source.reads += 1;
        Ok(source.table.clone())
    }

    fn write(&self, name: &str, table: &Table) -> Result<()> {
        self.put(name, table.clone());
        Ok(())
    }

    fn metadata(&self, name: &str) -> Result<Option<SourceMeta>> {
        let state = self.lock();
        let Some(source) = state.sources.get(name) else {
            return Ok(None);
        };
        let len = source
            .table
            .to_csv_bytes()
            .map_or(0, |bytes| bytes.len() as u64);
        Ok(Some(SourceMeta {
            modified: source.modified,
            len,
        }))
    }

    fn content(&self, name: &str) -> Result<Vec<u8>> {
        let state = self.lock();
        let source = state.sources.get(name).ok_or_else(|| not_found(name))?;
        check_readable(name, source)?;
        source
            .table
            .to_csv_bytes()
            .map_err(|error| StoreError::csv(name, &error))
    }
}
