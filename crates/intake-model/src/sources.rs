use serde::{Deserialize, Serialize};

/// Names of the monitored tabular sources.
///
/// Defaults follow the spreadsheet names of the reference deployment with a
/// `.csv` extension, since the bundled store reads CSV exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNames {
    pub students: String,
    pub registrations: String,
    pub customers: String,
    pub stores: String,
    pub products: String,
    pub prices: String,
    pub sales: String,
}

impl Default for SourceNames {
    fn default() -> Self {
        Self {
            students: "B_Alunos.csv".to_string(),
            registrations: "Base_cadastos.csv".to_string(),
            customers: "Base Clientes.csv".to_string(),
            stores: "B_Lojas.csv".to_string(),
            products: "Base_Produtos.csv".to_string(),
            prices: "B_Precos.csv".to_string(),
            sales: "Base_Vendas.csv".to_string(),
        }
    }
}

impl SourceNames {
    /// Every monitored source, in refresh-pass order.
    #[must_use]
    pub fn all(&self) -> [&str; 7] {
        [
            &self.students,
            &self.registrations,
            &self.customers,
            &self.stores,
            &self.products,
            &self.prices,
            &self.sales,
        ]
    }
}
