use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;

/// Field-level problems found in one source row.
///
/// `row` is the row number as shown by a spreadsheet program: data rows
/// start at 2 because row 1 holds the headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: EntityKind,
    pub source: String,
    pub row: usize,
    pub messages: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.messages.join("; "))
    }
}
