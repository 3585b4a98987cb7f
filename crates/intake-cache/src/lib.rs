//! Reference-data cache for the order-intake form.
//!
//! [`ReferenceCache`] keeps one validated projection per entity kind and
//! reloads a projection only when one of its sources changed. A refresh pass
//! runs at most once per check interval and is serialized by a single lock.
//!
//! Read-path failures never reach the caller: unreadable sources, corrupt
//! headers and invalid rows are reported to an [`AlertSink`] and the affected
//! slot falls back to its previous or an empty value.

pub mod alert;
pub mod cache;
pub mod config;
pub mod detector;
pub mod error;
pub mod export;
pub mod projector;
pub mod search;
pub mod stats;

pub use alert::{Alert, AlertKind, AlertSink, Cooldown, LogAlertSink, RecordingSink};
pub use cache::{CacheInfo, ReferenceCache, SourceStatus};
pub use config::CacheConfig;
pub use detector::{ChangeDetector, Observation};
pub use error::{CacheError, ConfigError, ProjectionError, Result};
pub use search::{DateRange, search_sales};
pub use stats::{SalesStatistics, sales_statistics};
