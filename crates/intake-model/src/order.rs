//! Order payload submitted by the intake form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(default, rename = "aluno")]
    pub student: StudentDetails,
    #[serde(default, rename = "cliente")]
    pub customer: CustomerDetails,
    #[serde(default, rename = "entrega")]
    pub delivery: DeliveryDetails,
    #[serde(default, rename = "pagamento")]
    pub payment: PaymentDetails,
    #[serde(default, rename = "itens")]
    pub items: Vec<Value>,
    #[serde(default, rename = "valorTotal")]
    pub total: f64,
    #[serde(default, rename = "observacoes")]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentDetails {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "sala")]
    pub room: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDetails {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub cpf: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryDetails {
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "loja")]
    pub store: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "condicao")]
    pub condition: String,
}

impl DeliveryDetails {
    /// Delivery types where the customer collects the order at a store.
    pub const PICKUP_KINDS: [&'static str; 2] = ["retirada_outras_lojas", "retirada_mercado_jf"];

    #[must_use]
    pub fn is_store_pickup(&self) -> bool {
        Self::PICKUP_KINDS.contains(&self.kind.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentDetails {
    #[serde(rename = "forma")]
    pub method: String,
}
