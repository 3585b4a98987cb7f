use std::time::SystemTime;

use crate::error::Result;
use crate::table::Table;

/// File-level facts about a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMeta {
    pub modified: SystemTime,
    pub len: u64,
}

/// A named collection of tables, possibly mutated by other processes.
///
/// Implementations must be safe to share between request handlers; the
/// cache serializes its own calls but the order log writes concurrently.
pub trait TabularStore: Send + Sync {
    /// Read all rows of a source.
    fn read(&self, name: &str) -> Result<Table>;

    /// Replace the contents of a source.
    fn write(&self, name: &str, table: &Table) -> Result<()>;

    /// `Ok(None)` when the source does not exist.
    fn metadata(&self, name: &str) -> Result<Option<SourceMeta>>;

    /// Raw bytes of the source, used for content hashing.
    fn content(&self, name: &str) -> Result<Vec<u8>>;
}
