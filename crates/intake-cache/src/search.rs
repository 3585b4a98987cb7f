//! Sales log search.

use chrono::NaiveDateTime;
use intake_model::{SaleRecord, SalesQuery};
use intake_validate::parse_timestamp;

/// Inclusive date window built from a [`SalesQuery`].
///
/// The upper bound always covers the whole `date_to` day. Bounds that do not
/// parse are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    #[must_use]
    pub fn from_query(query: &SalesQuery) -> Self {
        let from = query.date_from.as_deref().and_then(parse_timestamp);
        let to = query
            .date_to
            .as_deref()
            .and_then(parse_timestamp)
            .and_then(|bound| bound.date().and_hms_opt(23, 59, 59));
        Self { from, to }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

fn needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Filter and sort sales, newest first.
///
/// Name and order id match as case-insensitive substrings. With a date
/// filter active, records whose date did not parse are left out; otherwise
/// they sort last.
#[must_use]
pub fn search_sales(records: &[SaleRecord], query: &SalesQuery) -> Vec<SaleRecord> {
    let range = DateRange::from_query(query);
    let student = needle(query.student_name.as_deref());
    let order = needle(query.order_id.as_deref());

    let mut matches: Vec<SaleRecord> = records
        .iter()
        .filter(|record| {
            student
                .as_deref()
                .is_none_or(|name| record.student_name.to_lowercase().contains(name))
        })
        .filter(|record| {
            order
                .as_deref()
                .is_none_or(|id| record.order_id.to_lowercase().contains(id))
        })
        .filter(|record| !range.is_active() || record.date.is_some_and(|date| range.contains(date)))
        .cloned()
        .collect();
    matches.sort_by(|a, b| b.date.cmp(&a.date));
    matches
}
