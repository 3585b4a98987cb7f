//! Directory of CSV exports.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::{SourceMeta, TabularStore};
use crate::table::{Table, normalize_header};

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Serves each source as `<dir>/<name>`.
///
/// The first non-blank line of a file is its header row.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl TabularStore for CsvStore {
    fn read(&self, name: &str) -> Result<Table> {
        let path = self.path_of(name);
        if !path.is_file() {
            return Err(StoreError::NotFound {
                name: name.to_string(),
            });
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|error| StoreError::csv(name, &error))?;
        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|error| StoreError::csv(name, &error))?;
            match &headers {
                None => {
                    if record.iter().all(|value| value.trim().is_empty()) {
                        continue;
                    }
                    headers = Some(record.iter().map(normalize_header).collect());
                }
                Some(header_row) => {
                    let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
                    row.resize(header_row.len(), String::new());
                    rows.push(row);
                }
            }
        }
        let table = Table {
            headers: headers.unwrap_or_default(),
            rows,
        };
        debug!(source = %name, rows = table.len(), "read csv source");
        Ok(table)
    }

    fn write(&self, name: &str, table: &Table) -> Result<()> {
        let path = self.path_of(name);
        let bytes = table
            .to_csv_bytes()
            .map_err(|error| StoreError::csv(name, &error))?;
        // Each write stages in its own file beside the target, then renames.
        let mut staging =
            NamedTempFile::new_in(&self.dir).map_err(|error| StoreError::io(name, error))?;
        staging
            .write_all(&bytes)
            .map_err(|error| StoreError::io(name, error))?;
        staging
            .persist(&path)
            .map_err(|error| StoreError::io(name, error.error))?;
        debug!(source = %name, rows = table.len(), "wrote csv source");
        Ok(())
    }

    fn metadata(&self, name: &str) -> Result<Option<SourceMeta>> {
        let path = self.path_of(name);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(StoreError::io(name, error)),
        };
        let modified = metadata
            .modified()
            .map_err(|error| StoreError::io(name, error))?;
        Ok(Some(SourceMeta {
            modified,
            len: metadata.len(),
        }))
    }

    fn content(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.path_of(name)).map_err(|error| StoreError::io(name, error))
    }
}
