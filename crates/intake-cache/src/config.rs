//! Cache configuration.
//!
//! ```toml
//! data_dir = "data"
//! check_interval_secs = 300
//! alert_cooldown_secs = 3600
//!
//! [sources]
//! students = "B_Alunos.csv"
//! sales = "Base_Vendas.csv"
//! ```
//!
//! Every key is optional.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use intake_model::SourceNames;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the source files.
    pub data_dir: PathBuf,
    /// Minimum time between two refresh passes; zero checks on every access.
    pub check_interval_secs: u64,
    /// Minimum time between two alerts of the same kind for the same source.
    pub alert_cooldown_secs: u64,
    pub sources: SourceNames,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            check_interval_secs: 300,
            alert_cooldown_secs: 3600,
            sources: SourceNames::default(),
        }
    }
}

impl CacheConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, path)?;
        info!(path = %path.display(), "loaded cache config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Source names must be non-empty and distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for name in self.sources.all() {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "source names must not be empty".to_string(),
                });
            }
            if !seen.insert(name) {
                return Err(ConfigError::Invalid {
                    message: format!("source {name} is configured more than once"),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    #[must_use]
    pub fn alert_cooldown(&self) -> Duration {
        Duration::from_secs(self.alert_cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CacheConfig::from_toml("").unwrap();
        assert_eq!(config, CacheConfig::default());
        assert_eq!(config.check_interval(), Duration::from_secs(300));
        assert_eq!(config.sources.sales, "Base_Vendas.csv");
    }

    #[test]
    fn partial_sources_table_keeps_other_defaults() {
        let config = CacheConfig::from_toml(
            r#"
            check_interval_secs = 0

            [sources]
            sales = "vendas.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.check_interval_secs, 0);
        assert_eq!(config.sources.sales, "vendas.csv");
        assert_eq!(config.sources.students, "B_Alunos.csv");
    }

    #[test]
    fn duplicate_source_names_are_rejected() {
        let error = CacheConfig::from_toml(
            r#"
            [sources]
            students = "same.csv"
            stores = "same.csv"
            "#,
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { .. }));
    }

    #[test]
    fn blank_source_name_is_rejected() {
        let error = CacheConfig::from_toml("[sources]\nprices = \" \"\n").unwrap_err();
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let error = CacheConfig::from_toml("check_interval_secs = \"soon\"").unwrap_err();
        assert!(matches!(error, ConfigError::Toml { .. }));
    }
}
