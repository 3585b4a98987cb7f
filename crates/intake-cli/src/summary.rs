//! Table rendering for command output.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use intake_cache::{CacheInfo, SalesStatistics, SourceStatus};
use intake_ingest::OrderReceipt;
use intake_model::{Customer, Product, SaleRecord, Store, Student};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn students_table(students: &[Student]) -> Table {
    let mut table = styled_table(&["Name", "Grade", "No.", "Email", "City"]);
    for student in students {
        table.add_row(vec![
            Cell::new(&student.name).add_attribute(Attribute::Bold),
            Cell::new(&student.grade),
            Cell::new(&student.roll_number),
            Cell::new(&student.email),
            Cell::new(&student.city),
        ]);
    }
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

pub fn customers_table(customers: &[Customer]) -> Table {
    let mut table = styled_table(&["Name", "Email", "CPF", "Phone", "Address"]);
    for customer in customers {
        table.add_row(vec![
            Cell::new(&customer.name).add_attribute(Attribute::Bold),
            optional_cell(customer.email.as_deref()),
            optional_cell(customer.cpf.as_deref()),
            optional_cell(customer.phone.as_deref()),
            optional_cell(customer.address.as_deref()),
        ]);
    }
    table
}

pub fn stores_table(stores: &[Store]) -> Table {
    let mut table = styled_table(&["Code", "Name", "Address", "Postal code", "Phone", "City"]);
    for store in stores {
        table.add_row(vec![
            dim_cell(&store.code),
            Cell::new(&store.name).add_attribute(Attribute::Bold),
            Cell::new(&store.address),
            Cell::new(&store.postal_code),
            Cell::new(&store.phone),
            Cell::new(&store.municipality),
        ]);
    }
    table
}

pub fn products_table(products: &[Product]) -> Table {
    let mut table = styled_table(&["Code", "Name", "Weight", "Price"]);
    for product in products {
        let price = if product.price > 0.0 {
            Cell::new(format!("{:.2}", product.price)).fg(Color::Green)
        } else {
            dim_cell(format!("{:.2}", product.price))
        };
        table.add_row(vec![
            dim_cell(&product.code),
            Cell::new(&product.name).add_attribute(Attribute::Bold),
            Cell::new(&product.weight),
            price,
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Right);
    table
}

pub fn sales_table(sales: &[SaleRecord]) -> Table {
    let mut table = styled_table(&[
        "Order", "Placed", "Student", "Customer", "Delivery", "Payment", "Total",
    ]);
    let mut total = 0.0;
    for sale in sales {
        total += sale.total;
        let placed = match sale.date {
            Some(date) => Cell::new(date.format(TIMESTAMP_FORMAT)),
            None => dim_cell(&sale.placed_at),
        };
        table.add_row(vec![
            Cell::new(&sale.order_id).fg(Color::Cyan),
            placed,
            Cell::new(&sale.student_name),
            Cell::new(&sale.customer_name),
            Cell::new(&sale.delivery_type),
            Cell::new(&sale.payment_method),
            Cell::new(format!("{:.2}", sale.total)),
        ]);
    }
    if !sales.is_empty() {
        table.add_row(vec![
            Cell::new(format!("{} orders", sales.len())).add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            Cell::new(format!("{total:.2}")).add_attribute(Attribute::Bold),
        ]);
    }
    align_column(&mut table, 6, CellAlignment::Right);
    table
}

pub fn statistics_table(stats: &SalesStatistics) -> Table {
    let mut table = styled_table(&["Metric", "Value"]);
    let last_order = stats
        .last_order
        .map_or_else(|| dim_cell("-"), |date| Cell::new(naive(date)));
    table.add_row(vec![Cell::new("Orders"), count_cell(stats.total_orders)]);
    table.add_row(vec![
        Cell::new("Total value"),
        Cell::new(format!("{:.2}", stats.total_value)),
    ]);
    table.add_row(vec![Cell::new("Today"), count_cell(stats.orders_today)]);
    table.add_row(vec![Cell::new("This week"), count_cell(stats.orders_this_week)]);
    table.add_row(vec![
        Cell::new("This month"),
        count_cell(stats.orders_this_month),
    ]);
    table.add_row(vec![Cell::new("Last order"), last_order]);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn cache_info_table(info: &CacheInfo) -> Table {
    let mut table = styled_table(&["Kind", "Records"]);
    for (kind, count) in &info.cached_items {
        table.add_row(vec![Cell::new(kind), count_cell(*count)]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

/// Lines printed above the cache info table.
pub fn cache_info_header(info: &CacheInfo) -> Vec<String> {
    vec![
        format!("Last updated: {}", local_or_never(info.last_updated)),
        format!("Last check: {}", local_or_never(info.last_check)),
        format!("Check interval: {} min", info.check_interval_minutes),
    ]
}

pub fn source_status_table(statuses: &[SourceStatus]) -> Table {
    let mut table = styled_table(&["Source", "Exists", "Size", "Modified", "Digest"]);
    for status in statuses {
        let exists = match (&status.error, status.exists) {
            (Some(error), _) => Cell::new(error).fg(Color::Red),
            (None, true) => Cell::new("yes").fg(Color::Green),
            (None, false) => Cell::new("no").fg(Color::Yellow),
        };
        let digest = status
            .digest
            .as_deref()
            .map_or_else(|| dim_cell("-"), |digest| dim_cell(short_digest(digest)));
        table.add_row(vec![
            Cell::new(&status.name).add_attribute(Attribute::Bold),
            exists,
            status
                .size
                .map_or_else(|| dim_cell("-"), Cell::new),
            status
                .modified
                .map_or_else(|| dim_cell("-"), |modified| Cell::new(local(modified))),
            digest,
        ]);
    }
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

pub fn receipt_table(receipt: &OrderReceipt) -> Table {
    let mut table = styled_table(&["Order", "Placed"]);
    table.add_row(vec![
        Cell::new(&receipt.order_id)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(&receipt.placed_at),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().copied().map(header_cell));
    apply_table_style(&mut table);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

/// `None` means no source carried the field; blank means it did, empty.
fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

fn local(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

fn local_or_never(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(|| "never".to_string(), local)
}

fn naive(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_are_shortened() {
        assert_eq!(short_digest("ba7816bf8f01cfea414140de"), "ba7816bf8f01");
        assert_eq!(short_digest("abc"), "abc");
    }

    #[test]
    fn sales_table_adds_a_total_row() {
        let sales = vec![
            SaleRecord {
                order_id: "A1B2C3D4".to_string(),
                total: 10.5,
                ..SaleRecord::default()
            },
            SaleRecord {
                order_id: "FFEE0011".to_string(),
                total: 2.0,
                ..SaleRecord::default()
            },
        ];
        let rendered = sales_table(&sales).to_string();
        assert!(rendered.contains("A1B2C3D4"));
        assert!(rendered.contains("2 orders"));
        assert!(rendered.contains("12.50"));
    }

    #[test]
    fn empty_sales_table_has_no_total_row() {
        assert!(!sales_table(&[]).to_string().contains("orders"));
    }

    #[test]
    fn missing_customer_fields_render_as_dash() {
        let customers = vec![Customer {
            name: "Ana".to_string(),
            email: Some(String::new()),
            ..Customer::default()
        }];
        let rendered = customers_table(&customers).to_string();
        assert!(rendered.contains("Ana"));
        assert!(rendered.contains('-'));
    }
}
