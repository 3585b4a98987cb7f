//! Raw tables to validated entity lists, one function per kind.
//!
//! An empty table (no header row) is a source that could not be read and
//! projects to nothing. A table with headers but without a required column is
//! a [`ProjectionError`].

use std::collections::HashMap;

use intake_ingest::{SourceLayout, Table, layout};
use intake_model::{Customer, Product, RawRecord, SaleRecord, Store, Student, fields};
use intake_validate::{Batch, clean_string, validate_batch};

use crate::error::ProjectionError;

/// A table together with the source name it was read from.
#[derive(Debug, Clone, Copy)]
pub struct Input<'a> {
    pub source: &'a str,
    pub table: &'a Table,
}

impl<'a> Input<'a> {
    #[must_use]
    pub fn new(source: &'a str, table: &'a Table) -> Self {
        Self { source, table }
    }

    fn records(self, layout: &SourceLayout) -> Result<Vec<RawRecord>, ProjectionError> {
        if self.table.headers.is_empty() {
            return Ok(Vec::new());
        }
        let missing = self.table.missing_columns(layout);
        if !missing.is_empty() {
            return Err(ProjectionError::MissingColumn {
                source_name: self.source.to_string(),
                columns: missing.into_iter().map(str::to_string).collect(),
            });
        }
        Ok(self.table.records(layout))
    }
}

pub fn students(input: Input<'_>) -> Result<Batch<Student>, ProjectionError> {
    let rows = input.records(&layout::STUDENTS)?;
    Ok(validate_batch(input.source, &rows))
}

/// Merge the registration form with the customer master, keyed by name.
///
/// Registrations seed the list in their order; master-only names follow.
/// A field the master carries replaces the registration value.
pub fn customers(
    registrations: Input<'_>,
    master: Input<'_>,
) -> Result<Batch<Customer>, ProjectionError> {
    let registration_rows = registrations.records(&layout::REGISTRATIONS)?;
    let master_rows = master.records(&layout::CUSTOMERS)?;
    let seeded: Batch<Customer> = validate_batch(registrations.source, &registration_rows);
    let updates: Batch<Customer> = validate_batch(master.source, &master_rows);

    let mut merged: Vec<Customer> = Vec::with_capacity(seeded.records.len());
    let mut index: HashMap<String, usize> = HashMap::new();
    for customer in seeded.records.into_iter().chain(updates.records) {
        match index.get(&customer.name) {
            Some(&position) => merged[position].merge_from(customer),
            None => {
                index.insert(customer.name.clone(), merged.len());
                merged.push(customer);
            }
        }
    }

    let mut errors = seeded.errors;
    errors.extend(updates.errors);
    Ok(Batch {
        records: merged,
        errors,
    })
}

pub fn stores(input: Input<'_>) -> Result<Batch<Store>, ProjectionError> {
    let rows = input.records(&layout::STORES)?;
    Ok(validate_batch(input.source, &rows))
}

/// Attach prices to products by reference code.
///
/// The price list is reduced to code → price first (first row per code
/// wins), then each product does one lookup. A product without a listed
/// price costs 0.0.
pub fn products(products: Input<'_>, prices: Input<'_>) -> Result<Batch<Product>, ProjectionError> {
    let product_rows = products.records(&layout::PRODUCTS)?;
    let price_rows = prices.records(&layout::PRICES)?;

    let mut price_by_code: HashMap<String, String> = HashMap::with_capacity(price_rows.len());
    for row in &price_rows {
        let code = clean_string(row.text(fields::CODE));
        if code.is_empty() {
            continue;
        }
        price_by_code
            .entry(code)
            .or_insert_with(|| row.text(fields::PRICE).to_string());
    }

    let priced: Vec<RawRecord> = product_rows
        .into_iter()
        .map(|mut row| {
            let code = clean_string(row.text(fields::CODE));
            if let Some(price) = price_by_code.get(&code) {
                row.insert(fields::PRICE, price.clone());
            }
            row
        })
        .collect();
    Ok(validate_batch(products.source, &priced))
}

pub fn sales(input: Input<'_>) -> Result<Batch<SaleRecord>, ProjectionError> {
    let rows = input.records(&layout::SALES)?;
    Ok(validate_batch(input.source, &rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRATIONS: &str = "Base_cadastos.csv";
    const MASTER: &str = "Base Clientes.csv";

    fn registrations(rows: &[[&str; 2]]) -> Table {
        Table::new(
            ["Digite o nome completo do cliente", "Digite o e-mail do cliente:"],
            rows.iter().map(|row| row.to_vec()),
        )
    }

    fn master(rows: &[[&str; 4]]) -> Table {
        Table::new(
            [
                "Digite o nome completo do cliente",
                "CPF Cliente",
                "Telefone Cliente",
                "Endereço completo Cliente",
            ],
            rows.iter().map(|row| row.to_vec()),
        )
    }

    #[test]
    fn master_fills_in_registration_fields() {
        let reg = registrations(&[["Ana", "a@x.com"]]);
        let master = master(&[["Ana", "12345678901", "", ""]]);
        let batch = customers(Input::new(REGISTRATIONS, &reg), Input::new(MASTER, &master)).unwrap();
        assert_eq!(batch.records.len(), 1);
        let ana = &batch.records[0];
        assert_eq!(ana.email.as_deref(), Some("a@x.com"));
        assert_eq!(ana.cpf.as_deref(), Some("12345678901"));
        assert!(batch.errors.is_empty());
    }

    #[test]
    fn master_without_email_column_keeps_registration_email() {
        let reg = registrations(&[["Ana", "old@x.com"]]);
        let master = Table::new(["Digite o nome completo do cliente", "CPF Cliente"], [["Ana", ""]]);
        let batch = customers(Input::new(REGISTRATIONS, &reg), Input::new(MASTER, &master)).unwrap();
        let ana = &batch.records[0];
        assert_eq!(ana.email.as_deref(), Some("old@x.com"));
        assert_eq!(ana.cpf.as_deref(), Some(""));
        assert_eq!(ana.phone, None);
    }

    #[test]
    fn master_only_names_are_appended_in_order() {
        let reg = registrations(&[["Bia", "b@x.com"], ["Ana", "a@x.com"]]);
        let master = master(&[
            ["Caio", "", "", "Rua A"],
            ["Ana", "", "", "Rua B"],
            ["Duda", "", "", ""],
        ]);
        let batch = customers(Input::new(REGISTRATIONS, &reg), Input::new(MASTER, &master)).unwrap();
        let names: Vec<&str> = batch.records.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bia", "Ana", "Caio", "Duda"]);
        assert_eq!(batch.records[2].email, None);
        assert_eq!(batch.records[1].address.as_deref(), Some("Rua B"));
    }

    #[test]
    fn customer_errors_keep_their_source() {
        let reg = registrations(&[["Ana", "bad"]]);
        let master = master(&[["Ana", "123", "", ""]]);
        let batch = customers(Input::new(REGISTRATIONS, &reg), Input::new(MASTER, &master)).unwrap();
        let sources: Vec<&str> = batch.errors.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec![REGISTRATIONS, MASTER]);
    }

    #[test]
    fn price_join_normalizes_decimal_comma() {
        let products_table = Table::new(
            ["NomeProduto", "_CodigoReferenciaProduto", "RANGE MAX_1"],
            [["Pizza", "X1", "500g"], ["Torta", "Y9", "1kg"]],
        );
        let prices_table = Table::new(
            ["Cod Produto", "Preço Negócio - Atual"],
            [["X1", "12,50"], ["X1", "99,00"]],
        );
        let batch = products(
            Input::new("Base_Produtos.csv", &products_table),
            Input::new("B_Precos.csv", &prices_table),
        )
        .unwrap();
        assert_eq!(batch.records[0].price, 12.5);
        assert_eq!(batch.records[1].price, 0.0);
        assert!(batch.errors.is_empty());
    }

    #[test]
    fn missing_price_column_is_corruption() {
        let products_table = Table::new(["NomeProduto", "_CodigoReferenciaProduto"], [["Pizza", "X1"]]);
        let prices_table = Table::new(["Cod Produto", "Preco"], [["X1", "1"]]);
        let error = products(
            Input::new("Base_Produtos.csv", &products_table),
            Input::new("B_Precos.csv", &prices_table),
        )
        .unwrap_err();
        assert_eq!(
            error,
            ProjectionError::MissingColumn {
                source_name: "B_Precos.csv".to_string(),
                columns: vec!["Preço Negócio - Atual".to_string()],
            }
        );
    }

    #[test]
    fn unread_sources_project_to_nothing() {
        let empty = Table::default();
        let batch = products(
            Input::new("Base_Produtos.csv", &empty),
            Input::new("B_Precos.csv", &empty),
        )
        .unwrap();
        assert!(batch.records.is_empty());
        assert!(students(Input::new("B_Alunos.csv", &empty)).unwrap().records.is_empty());
    }
}
