//! CSV export of sales search results.

use std::path::Path;

use intake_ingest::layout;
use intake_model::{SaleRecord, Store, fields};
use tracing::info;

use crate::error::CacheError;

fn export_error(path: &Path, error: &impl std::fmt::Display) -> CacheError {
    CacheError::Export {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn pickup_address(record: &SaleRecord, stores: &[Store]) -> String {
    if !record.pickup_store_address.is_empty() || record.pickup_store.is_empty() {
        return record.pickup_store_address.clone();
    }
    stores
        .iter()
        .find(|store| store.name == record.pickup_store)
        .map(|store| store.address.clone())
        .unwrap_or_default()
}

fn items_text(record: &SaleRecord) -> String {
    match &record.items_raw {
        Some(raw) => raw.clone(),
        None => serde_json::to_string(&record.items).unwrap_or_default(),
    }
}

fn row(record: &SaleRecord, stores: &[Store]) -> Vec<String> {
    layout::SALES
        .columns
        .iter()
        .map(|(_, field)| match *field {
            fields::ORDER_ID => record.order_id.clone(),
            fields::PLACED_AT => record.placed_at.clone(),
            fields::STUDENT_ROOM => record.student_room.clone(),
            fields::STUDENT_NAME => record.student_name.clone(),
            fields::STUDENT_EMAIL => record.student_email.clone(),
            fields::CUSTOMER_NAME => record.customer_name.clone(),
            fields::CUSTOMER_EMAIL => record.customer_email.clone(),
            fields::CUSTOMER_CPF => record.customer_cpf.clone(),
            fields::CUSTOMER_PHONE => record.customer_phone.clone(),
            fields::DELIVERY_TYPE => record.delivery_type.clone(),
            fields::PICKUP_STORE => record.pickup_store.clone(),
            fields::PICKUP_STORE_ADDRESS => pickup_address(record, stores),
            fields::DELIVERY_ADDRESS => record.delivery_address.clone(),
            fields::DELIVERY_DATE => record.delivery_date.clone(),
            fields::DELIVERY_CONDITION => record.delivery_condition.clone(),
            fields::PAYMENT_METHOD => record.payment_method.clone(),
            fields::ITEMS => items_text(record),
            fields::TOTAL => format!("{:.2}", record.total),
            fields::NOTES => record.notes.clone(),
            _ => String::new(),
        })
        .collect()
}

/// Write `records` to `path` with the sales log headers.
///
/// A blank pickup address is filled from `stores` by store name.
pub fn write_sales_csv(
    path: &Path,
    records: &[SaleRecord],
    stores: &[Store],
) -> Result<usize, CacheError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| export_error(path, &e))?;
    writer
        .write_record(layout::SALES.headers())
        .map_err(|e| export_error(path, &e))?;
    for record in records {
        writer
            .write_record(row(record, stores))
            .map_err(|e| export_error(path, &e))?;
    }
    writer.flush().map_err(|e| export_error(path, &e))?;
    info!(path = %path.display(), rows = records.len(), "exported sales");
    Ok(records.len())
}
