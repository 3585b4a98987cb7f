use std::collections::BTreeMap;

/// One raw row keyed by canonical field name.
///
/// A field is *present* when the source carries the column, even if the cell
/// is blank. Validators use the distinction: absent columns stay unknown,
/// blank cells become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    values: BTreeMap<String, String>,
}

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Cell text, or an empty string when the column is absent.
    #[must_use]
    pub fn text(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every cell is blank, as for spacer rows in a spreadsheet.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
