//! Tabular sources behind the reference-data cache.
//!
//! The cache only needs four things from a source: its rows, a way to write
//! rows back, its modification time, and its raw bytes for hashing.
//! [`TabularStore`] captures exactly that; [`CsvStore`] serves a directory
//! of CSV exports and [`MemoryStore`] keeps everything in memory.

pub mod csv_store;
pub mod error;
pub mod layout;
pub mod memory;
pub mod orders;
pub mod store;
pub mod table;

pub use csv_store::CsvStore;
pub use error::{Result, StoreError};
pub use layout::SourceLayout;
pub use memory::MemoryStore;
pub use orders::{OrderReceipt, append_order, generate_order_id};
pub use store::{SourceMeta, TabularStore};
pub use table::Table;
