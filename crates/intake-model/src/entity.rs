//! Projected entities.
//!
//! Field names are English in Rust; the serialized keys keep the names the
//! order form already consumes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "serie")]
    pub grade: String,
    #[serde(rename = "numero")]
    pub roll_number: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "endereco")]
    pub street: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "numero_endereco")]
    pub street_number: String,
    #[serde(rename = "cidade")]
    pub city: String,
}

/// A customer merged from the registration form and the customer master.
///
/// `None` means no source carried the field; `Some("")` means a source
/// carried it but the value was blank or failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
}

impl Customer {
    /// Overlay the fields `other` carries onto `self`.
    pub fn merge_from(&mut self, other: Customer) {
        if other.email.is_some() {
            self.email = other.email;
        }
        if other.cpf.is_some() {
            self.cpf = other.cpf;
        }
        if other.phone.is_some() {
            self.phone = other.phone;
        }
        if other.address.is_some() {
            self.address = other.address;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "COD")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "ENDEREÇO")]
    pub address: String,
    #[serde(rename = "CEP")]
    pub postal_code: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "Região IM")]
    pub region: String,
    #[serde(rename = "NM_DIST")]
    pub district: String,
    #[serde(rename = "NM_MUN")]
    pub municipality: String,
    #[serde(rename = "NM_MESO")]
    pub mesoregion: String,
    #[serde(rename = "SIGLA_UF")]
    pub state: String,
    #[serde(rename = "Região_Geográfica")]
    pub geographic_region: String,
    #[serde(rename = "LAT")]
    pub latitude: String,
    #[serde(rename = "LONG")]
    pub longitude: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "peso")]
    pub weight: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// One row of the sales log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "id_pedido")]
    pub order_id: String,
    /// Order timestamp as written in the log.
    #[serde(rename = "data")]
    pub placed_at: String,
    /// Parsed form of `placed_at`, when it could be read.
    #[serde(rename = "data_iso", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "aluno_sala")]
    pub student_room: String,
    #[serde(rename = "aluno_nome")]
    pub student_name: String,
    #[serde(rename = "aluno_email")]
    pub student_email: String,
    #[serde(rename = "cliente_nome")]
    pub customer_name: String,
    #[serde(rename = "cliente_email")]
    pub customer_email: String,
    #[serde(rename = "cliente_cpf")]
    pub customer_cpf: String,
    #[serde(rename = "cliente_telefone")]
    pub customer_phone: String,
    #[serde(rename = "tipo_entrega")]
    pub delivery_type: String,
    #[serde(rename = "loja_retirada")]
    pub pickup_store: String,
    #[serde(rename = "endereco_loja_retirada")]
    pub pickup_store_address: String,
    #[serde(rename = "endereco_entrega")]
    pub delivery_address: String,
    #[serde(rename = "data_entrega")]
    pub delivery_date: String,
    #[serde(rename = "condicao_entrega")]
    pub delivery_condition: String,
    #[serde(rename = "forma_pagamento")]
    pub payment_method: String,
    #[serde(rename = "itens")]
    pub items: Vec<Value>,
    /// Item text that was not a JSON array, kept verbatim.
    #[serde(rename = "itens_raw", default, skip_serializing_if = "Option::is_none")]
    pub items_raw: Option<String>,
    #[serde(rename = "valor_total")]
    pub total: f64,
    #[serde(rename = "observacoes")]
    pub notes: String,
}
