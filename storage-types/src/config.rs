//! Inventory configuration

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Divisor used when no unit is configured (decimal megabytes)
pub const DEFAULT_UNIT: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options consumed by the storage inventory.
///
/// ```toml
/// unit = 1024
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Size unit divisor. Sizes are reported as `bytes / (unit * unit)`;
    /// zero means "use the default".
    pub unit: u64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { unit: DEFAULT_UNIT }
    }
}

impl InventoryConfig {
    pub fn with_unit(unit: u64) -> Self {
        Self { unit }
    }

    /// The divisor actually applied, with zero mapped to `DEFAULT_UNIT`
    pub fn effective_unit(&self) -> u64 {
        if self.unit == 0 {
            DEFAULT_UNIT
        } else {
            self.unit
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_decimal_megabytes() {
        assert_eq!(InventoryConfig::default().effective_unit(), 1000);
        assert_eq!(InventoryConfig::from_toml_str("").unwrap().unit, 1000);
    }

    #[test]
    fn zero_unit_falls_back_to_default() {
        assert_eq!(InventoryConfig::with_unit(0).effective_unit(), DEFAULT_UNIT);
        assert_eq!(InventoryConfig::with_unit(1024).effective_unit(), 1024);
    }

    #[test]
    fn parses_unit_from_toml() {
        let config = InventoryConfig::from_toml_str("unit = 1024\n").unwrap();
        assert_eq!(config, InventoryConfig::with_unit(1024));

        assert!(matches!(
            InventoryConfig::from_toml_str("unit = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.toml");

        assert!(matches!(
            InventoryConfig::load(&path),
            Err(ConfigError::Read { .. })
        ));

        fs::write(&path, "unit = 1024\n").unwrap();
        assert_eq!(InventoryConfig::load(&path).unwrap().unit, 1024);
    }
}
