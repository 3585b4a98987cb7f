use serde::{Deserialize, Serialize};

/// Filters for searching the sales log.
///
/// Dates are kept as the caller typed them; the search parses them leniently
/// and ignores any it cannot read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesQuery {
    #[serde(default, alias = "nome_aluno")]
    pub student_name: Option<String>,
    #[serde(default, alias = "id_pedido")]
    pub order_id: Option<String>,
    #[serde(default, alias = "data_inicio")]
    pub date_from: Option<String>,
    #[serde(default, alias = "data_fim")]
    pub date_to: Option<String>,
}

impl SalesQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn student_name(mut self, value: impl Into<String>) -> Self {
        self.student_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn order_id(mut self, value: impl Into<String>) -> Self {
        self.order_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn date_from(mut self, value: impl Into<String>) -> Self {
        self.date_from = Some(value.into());
        self
    }

    #[must_use]
    pub fn date_to(mut self, value: impl Into<String>) -> Self {
        self.date_to = Some(value.into());
        self
    }
}
