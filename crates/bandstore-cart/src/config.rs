//! Cart configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::money::Currency;

/// Top-level cart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Storage key holding the persisted cart.
    pub storage_key: String,

    /// Currency code for prices and totals.
    pub currency: String,

    /// Scripted checkout timing.
    pub checkout: CheckoutConfig,

    /// Toast behaviour.
    pub notifications: NotificationConfig,

    /// Catalog binder defaults.
    pub catalog: CatalogConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: "sm_cart".to_string(),
            currency: Currency::default().code().to_string(),
            checkout: CheckoutConfig::default(),
            notifications: NotificationConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl CartConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CartConfig = toml::from_str(content)?;
        config.currency()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the configured currency.
    pub fn currency(&self) -> Result<Currency, ConfigError> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

/// Delays and redirect target for the scripted checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Pause between "encrypting" and completion, in milliseconds.
    pub encrypt_delay_ms: u64,

    /// Pause between completion and redirect, in milliseconds.
    pub redirect_delay_ms: u64,

    /// Page to redirect to after checkout.
    pub redirect_to: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            encrypt_delay_ms: 1200,
            redirect_delay_ms: 2000,
            redirect_to: "index.html".to_string(),
        }
    }
}

impl CheckoutConfig {
    pub fn encrypt_delay(&self) -> Duration {
        Duration::from_millis(self.encrypt_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Toast display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a toast stays visible, in milliseconds.
    pub dismiss_after_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
        }
    }
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

/// Defaults for entries the catalog binder cannot fully parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Ticket price in major units when the button text has none.
    pub ticket_price: u64,

    /// Image shown for ticket line items.
    pub ticket_image: String,

    /// Page tickets redirect to after being added.
    pub cart_page: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ticket_price: 2499,
            ticket_image: "Assets/Prmary Logos Black Red/Artboard 12SM logos.png".to_string(),
            cart_page: "cart.html".to_string(),
        }
    }
}
