//! # Basket Configuration
//!
//! Parser grammar and cart limits, loaded from file and environment.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_STOPWORDS=bro,pls,kindly                                    │
//! │     BASKET_MAX_ENTRIES=50                                              │
//! │     BASKET_MAX_QUANTITY=100                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/basket/basket.toml (Linux)                               │
//! │     ~/Library/Application Support/app.basket.basket/basket.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [parser]
//! stopwords = ["bro", "i", "want", "please", "and"]
//! min_identifier_digits = 5
//! max_identifier_digits = 8
//!
//! [limits]
//! max_entries = 100
//! max_quantity = 999
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use basket_core::{CartLimits, ParserConfig};

use crate::error::{ServiceError, ServiceResult};

pub const ENV_STOPWORDS: &str = "BASKET_STOPWORDS";
pub const ENV_MAX_ENTRIES: &str = "BASKET_MAX_ENTRIES";
pub const ENV_MAX_QUANTITY: &str = "BASKET_MAX_QUANTITY";

const CONFIG_FILE_NAME: &str = "basket.toml";

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasketConfig {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub limits: CartLimits,
}

impl BasketConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (basket.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ServiceResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading basket config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load basket config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads one TOML file without applying environment overrides.
    pub fn from_file(path: &Path) -> ServiceResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ServiceResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ServiceError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Basket config saved");
        Ok(path)
    }

    pub fn validate(&self) -> ServiceResult<()> {
        self.parser.validate()?;

        if self.limits.max_entries == 0 {
            return Err(ServiceError::InvalidConfig(
                "max_entries must be greater than 0".into(),
            ));
        }

        if !(self.limits.max_quantity.is_finite() && self.limits.max_quantity > 0.0) {
            return Err(ServiceError::InvalidConfig(format!(
                "max_quantity must be a positive number, got {}",
                self.limits.max_quantity
            )));
        }

        Ok(())
    }

    /// Applies overrides from `lookup` (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(words) = lookup(ENV_STOPWORDS) {
            let words: Vec<&str> = words.split(',').collect();
            debug!(count = words.len(), "Overriding stopwords from environment");
            self.parser.set_stopwords(words);
        }

        if let Some(raw) = lookup(ENV_MAX_ENTRIES) {
            match raw.trim().parse::<usize>() {
                Ok(max) => self.limits.max_entries = max,
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_MAX_ENTRIES),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_QUANTITY) {
            match raw.trim().parse::<f64>() {
                Ok(max) => self.limits.max_quantity = max,
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_MAX_QUANTITY),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "basket", "basket")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
