//! Whole-source validation.

use intake_model::{RawRecord, ValidationError};
use tracing::debug;

use crate::entity::Validate;

/// Kept records of one source plus the errors of every row that had any.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub records: Vec<T>,
    pub errors: Vec<ValidationError>,
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// First data row as numbered by a spreadsheet program (row 1 is the header).
const FIRST_DATA_ROW: usize = 2;

/// Validate every row of `source`.
///
/// Rows whose cells are all blank are skipped without an error. Error row
/// numbers count skipped rows too, so they match what the user sees.
pub fn validate_batch<T: Validate>(source: &str, rows: &[RawRecord]) -> Batch<T> {
    let mut batch = Batch::default();
    for (index, raw) in rows.iter().enumerate() {
        if raw.is_blank() {
            continue;
        }
        let result = T::validate(raw);
        if !result.errors.is_empty() {
            batch.errors.push(ValidationError {
                kind: T::KIND,
                source: source.to_string(),
                row: index + FIRST_DATA_ROW,
                messages: result.errors,
            });
        }
        if let Some(record) = result.record {
            batch.records.push(record);
        }
    }
    debug!(
        kind = %T::KIND,
        source = %source,
        rows = rows.len(),
        records = batch.records.len(),
        errors = batch.errors.len(),
        "validated source"
    );
    batch
}
