//! Sales log statistics.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use intake_model::SaleRecord;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesStatistics {
    #[serde(rename = "total_pedidos")]
    pub total_orders: usize,
    #[serde(rename = "valor_total")]
    pub total_value: f64,
    #[serde(rename = "pedidos_hoje")]
    pub orders_today: usize,
    #[serde(rename = "pedidos_semana")]
    pub orders_this_week: usize,
    #[serde(rename = "pedidos_mes")]
    pub orders_this_month: usize,
    #[serde(rename = "ultimo_pedido")]
    pub last_order: Option<NaiveDateTime>,
}

/// Summarize `records` as of `today`.
///
/// Weeks start on Monday. Week and month counts have no upper bound, so
/// orders dated in the future count towards both.
#[must_use]
pub fn sales_statistics(records: &[SaleRecord], today: NaiveDate) -> SalesStatistics {
    let week_start = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    let month_start = today.with_day(1).unwrap_or(today);

    let mut stats = SalesStatistics {
        total_orders: records.len(),
        total_value: records.iter().map(|record| record.total).sum(),
        ..SalesStatistics::default()
    };
    for date in records.iter().filter_map(|record| record.date) {
        let day = date.date();
        if day == today {
            stats.orders_today += 1;
        }
        if day >= week_start {
            stats.orders_this_week += 1;
        }
        if day >= month_start {
            stats.orders_this_month += 1;
        }
        if stats.last_order.is_none_or(|last| date > last) {
            stats.last_order = Some(date);
        }
    }
    stats
}
