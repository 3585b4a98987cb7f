use std::collections::BTreeMap;

use intake_model::RawRecord;

use crate::layout::SourceLayout;

/// Rows of one tabular source, in file order.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

impl Table {
    /// Build a table, normalizing headers and padding short rows.
    #[must_use]
    pub fn new<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|header| normalize_header(header.as_ref()))
            .collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();
        Self { headers, rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, header: &str) -> Option<usize> {
        let wanted = normalize_header(header);
        self.headers.iter().position(|h| *h == wanted)
    }

    /// Required fields of `layout` whose header is missing from this table.
    #[must_use]
    pub fn missing_columns(&self, layout: &SourceLayout) -> Vec<&'static str> {
        layout
            .required
            .iter()
            .filter_map(|field| {
                let header = layout.header_for(field)?;
                self.column_index(header).is_none().then_some(header)
            })
            .collect()
    }

    /// Map every row onto canonical field names.
    ///
    /// Columns the layout does not know are dropped; layout columns the table
    /// lacks are left absent from the record.
    #[must_use]
    pub fn records(&self, layout: &SourceLayout) -> Vec<RawRecord> {
        let positions: Vec<(usize, &'static str)> = layout
            .columns
            .iter()
            .filter_map(|(header, field)| Some((self.column_index(header)?, *field)))
            .collect();
        self.rows
            .iter()
            .map(|row| {
                positions
                    .iter()
                    .map(|(idx, field)| (*field, row.get(*idx).cloned().unwrap_or_default()))
                    .collect::<RawRecord>()
            })
            .collect()
    }

    /// Append one row given as header → value, adding unknown headers as
    /// new columns.
    pub fn push_row(&mut self, values: &BTreeMap<&str, String>) {
        for header in values.keys() {
            if self.column_index(header).is_none() {
                self.headers.push(normalize_header(header));
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }
        let mut row = vec![String::new(); self.headers.len()];
        for (header, value) in values {
            if let Some(idx) = self.column_index(header) {
                row[idx].clone_from(value);
            }
        }
        self.rows.push(row);
    }

    /// Serialize as CSV with a header row.
    pub fn to_csv_bytes(&self) -> csv::Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|error| csv::Error::from(error.into_error()))
    }
}
