//! Append path for the sales log.
//!
//! Orders are appended by rewriting the whole sales table. The cache picks
//! the change up through the source's new modification time.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use intake_model::{NewOrder, fields};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::layout;
use crate::store::TabularStore;

/// Timestamp format written to `Data_Pedido`.
pub const PLACED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    #[serde(rename = "id_pedido")]
    pub order_id: String,
    #[serde(rename = "data")]
    pub placed_at: String,
}

/// Short upper-case order id: the first eight hex digits of a v4 UUID.
#[must_use]
pub fn generate_order_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id.to_uppercase()
}

/// Append `order` to the sales source.
///
/// `pickup_address` fills `Endereco_Loja_Retirada`; the caller resolves it
/// from the store list. Fails with `NotFound` when the sales source does not
/// exist yet; the log is never created here.
pub fn append_order(
    store: &dyn TabularStore,
    source: &str,
    order: &NewOrder,
    pickup_address: Option<&str>,
    now: NaiveDateTime,
) -> Result<OrderReceipt> {
    let mut table = store.read(source)?;
    if table.headers.is_empty() {
        table.headers = layout::SALES
            .headers()
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    let order_id = generate_order_id();
    let placed_at = now.format(PLACED_AT_FORMAT).to_string();
    let items = serde_json::to_string(&order.items).unwrap_or_else(|_| "[]".to_string());

    let values: BTreeMap<&str, String> = layout::SALES
        .columns
        .iter()
        .map(|(header, field)| {
            let value = match *field {
                fields::ORDER_ID => order_id.clone(),
                fields::PLACED_AT => placed_at.clone(),
                fields::STUDENT_ROOM => order.student.room.clone(),
                fields::STUDENT_NAME => order.student.name.clone(),
                fields::STUDENT_EMAIL => order.student.email.clone(),
                fields::CUSTOMER_NAME => order.customer.name.clone(),
                fields::CUSTOMER_EMAIL => order.customer.email.clone(),
                fields::CUSTOMER_CPF => order.customer.cpf.clone(),
                fields::CUSTOMER_PHONE => order.customer.phone.clone(),
                fields::DELIVERY_TYPE => order.delivery.kind.clone(),
                fields::PICKUP_STORE => order.delivery.store.clone(),
                fields::PICKUP_STORE_ADDRESS => pickup_address.unwrap_or_default().to_string(),
                fields::DELIVERY_ADDRESS => order.delivery.address.clone(),
                fields::DELIVERY_DATE => order.delivery.date.clone(),
                fields::DELIVERY_CONDITION => order.delivery.condition.clone(),
                fields::PAYMENT_METHOD => order.payment.method.clone(),
                fields::ITEMS => items.clone(),
                fields::TOTAL => format!("{:.2}", order.total),
                fields::NOTES => order.notes.clone(),
                _ => String::new(),
            };
            (*header, value)
        })
        .collect();
    table.push_row(&values);
    store.write(source, &table)?;

    info!(order_id = %order_id, source = %source, "order appended");
    Ok(OrderReceipt {
        order_id,
        placed_at,
    })
}
