//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_LOG_FILTER=debug                                        │
//! │     STOREFRONT_MAX_CART_LINES=20                                       │
//! │     STOREFRONT_MAX_LINE_QUANTITY=50                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Laptop ×5, Phone ×10, Headphones ×15                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [cart]
//! max_lines = 100
//! max_quantity_per_line = 999
//!
//! [log]
//! filter = "info,storefront=debug"
//!
//! [[catalog]]
//! name = "Laptop"
//! stock = 5
//! price_cents = 99900
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::validation::validate_catalog;
use storefront_core::{CartLimits, CatalogEntry, Inventory, ValidationError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, ConfigResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Log Settings
// =============================================================================

/// Logging settings. `RUST_LOG` still wins when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,storefront=debug".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete configuration for one storefront process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Cart staging limits.
    #[serde(default)]
    pub cart: CartLimits,

    /// Logging settings.
    #[serde(default)]
    pub log: LogSettings,

    /// Initial catalog the inventory is seeded from.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<CatalogEntry>,
}

fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Laptop", 5, 99_900),
        CatalogEntry::new("Phone", 10, 49_900),
        CatalogEntry::new("Headphones", 15, 7_900),
    ]
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            cart: CartLimits::default(),
            log: LogSettings::default(),
            catalog: default_catalog(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration: defaults, then file, then environment.
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// the platform default location is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.finish()
    }

    /// Built-in defaults with environment overrides applied.
    pub fn load_defaults() -> ConfigResult<Self> {
        Self::default().finish()
    }

    fn finish(mut self) -> ConfigResult<Self> {
        self.apply_env_overrides()?;
        self.validate()?;
        Ok(self)
    }

    /// Reads and parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        debug!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        debug!(?path, "Saved storefront config");
        Ok(())
    }

    /// Renders the configuration as pretty TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Platform config path (`.../storefront/storefront.toml`).
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Applies `STOREFRONT_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides from any variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup("STOREFRONT_LOG_FILTER") {
            self.log.filter = filter;
        }

        if let Some(lines) = lookup("STOREFRONT_MAX_CART_LINES") {
            self.cart.max_lines = parse_override("STOREFRONT_MAX_CART_LINES", &lines)?;
        }

        if let Some(qty) = lookup("STOREFRONT_MAX_LINE_QUANTITY") {
            self.cart.max_quantity_per_line =
                parse_override("STOREFRONT_MAX_LINE_QUANTITY", &qty)?;
        }

        Ok(())
    }

    /// Validates limits, log filter and catalog.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cart.max_lines == 0 {
            return Err(ValidationError::MustBePositive {
                field: "cart.max_lines".to_string(),
            }
            .into());
        }

        if self.cart.max_quantity_per_line == 0 {
            return Err(ValidationError::MustBePositive {
                field: "cart.max_quantity_per_line".to_string(),
            }
            .into());
        }

        EnvFilter::try_new(&self.log.filter)
            .map_err(|e| ConfigError::InvalidLogFilter(e.to_string()))?;

        validate_catalog(&self.catalog)?;

        Ok(())
    }

    /// Builds the inventory described by the catalog.
    pub fn build_inventory(&self) -> Inventory {
        Inventory::from_catalog(self.catalog.iter().cloned())
    }
}

fn parse_override<T: std::str::FromStr>(var: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
