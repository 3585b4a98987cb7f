//! Data model shared by the order-intake crates.
//!
//! Reference data (students, customers, stores, products) and the sales log
//! are projected from raw tabular sources into the typed entities defined
//! here. Every crate in the workspace speaks in these types.

pub mod entity;
pub mod error;
pub mod fields;
pub mod fingerprint;
pub mod kind;
pub mod order;
pub mod query;
pub mod record;
pub mod sources;
pub mod validation;

pub use entity::{Customer, Product, SaleRecord, Store, Student};
pub use error::{ModelError, Result};
pub use fingerprint::SourceFingerprint;
pub use kind::EntityKind;
pub use order::{CustomerDetails, DeliveryDetails, NewOrder, PaymentDetails, StudentDetails};
pub use query::SalesQuery;
pub use record::RawRecord;
pub use sources::SourceNames;
pub use validation::ValidationError;
