use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::fields;
use crate::sources::SourceNames;

/// The entity kinds held by the cache, one slot each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "students")]
    Student,
    #[serde(rename = "customers")]
    Customer,
    #[serde(rename = "stores")]
    Store,
    #[serde(rename = "products")]
    Product,
    #[serde(rename = "sales")]
    Sale,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Student,
        EntityKind::Customer,
        EntityKind::Store,
        EntityKind::Product,
        EntityKind::Sale,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Customer => "customers",
            Self::Store => "stores",
            Self::Product => "products",
            Self::Sale => "sales",
        }
    }

    /// Field a record must carry to be kept at all.
    #[must_use]
    pub const fn required_field(self) -> &'static str {
        match self {
            Self::Sale => fields::ORDER_ID,
            Self::Student | Self::Customer | Self::Store | Self::Product => fields::NAME,
        }
    }

    /// Sources whose change invalidates this kind's slot.
    ///
    /// Order matters: the first source is the primary one the projection
    /// iterates, later ones are joined into it.
    #[must_use]
    pub fn sources(self, names: &SourceNames) -> Vec<&str> {
        match self {
            Self::Student => vec![names.students.as_str()],
            Self::Customer => vec![names.registrations.as_str(), names.customers.as_str()],
            Self::Store => vec![names.stores.as_str()],
            Self::Product => vec![names.products.as_str(), names.prices.as_str()],
            Self::Sale => vec![names.sales.as_str()],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                let label = kind.label();
                normalized == label || normalized == label.trim_end_matches('s')
            })
            .ok_or_else(|| ModelError::UnknownKind(value.to_string()))
    }
}
