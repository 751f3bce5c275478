//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bandstore_cart::CartConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where cart data lives on disk.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: CliConfig = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .cart
            .currency()
            .with_context(|| format!("Invalid cart config in {}", path))?;
        Ok(config)
    }
}

/// Storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one file per storage key.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".bandstore")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandstore.toml");
        std::fs::write(
            &path,
            r#"
            [storage]
            data_dir = "/var/lib/bandstore"

            [cart]
            storage_key = "tour_cart"

            [cart.checkout]
            encrypt_delay_ms = 10
            "#,
        )
        .unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/bandstore"));
        assert_eq!(config.cart.storage_key, "tour_cart");
        assert_eq!(config.cart.checkout.encrypt_delay_ms, 10);
        assert_eq!(config.cart.checkout.redirect_delay_ms, 2000);
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from(".bandstore"));
        assert_eq!(config.cart.storage_key, "sm_cart");
    }

    #[test]
    fn test_bad_currency_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandstore.toml");
        std::fs::write(&path, "[cart]\ncurrency = \"XYZ\"\n").unwrap();

        assert!(CliConfig::load(path.to_str().unwrap()).is_err());
    }
}
