//! # CLI Configuration
//!
//! Business header, numbering scheme and log filter for the `rugbill` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RUGBILL_BUSINESS_NAME="Oriental Rug Gallery"                       │
//! │     RUGBILL_INVOICE_PREFIX=RG                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/rugbill/config.toml (Linux)                              │
//! │     ~/Library/Application Support/com.rugbill.rugbill/config.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     INV-00001 / CON-00001 numbering, "warn,rugbill=info" logging       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sales-tax rate is not configurable; it lives in `rugbill-core`.
//!
//! ## Configuration File Format
//! ```toml
//! [business]
//! name = "Oriental Rug Gallery"
//! address = "12 Market St, Hudson NY"
//! phone = "555-0142"
//!
//! [numbering]
//! invoice_prefix = "INV"
//! consignment_prefix = "CON"
//! width = 5
//! start = 1
//!
//! [logging]
//! filter = "warn,rugbill=info"
//! ```

use std::path::{Path, PathBuf};

use rugbill_store::NumberingScheme;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Widest zero padding accepted for document numbers.
pub const MAX_NUMBER_WIDTH: usize = 12;

// =============================================================================
// Business Header
// =============================================================================

/// Printed at the top of a preview. Blank fields are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
}

// =============================================================================
// Logging
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn,rugbill=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub business: BusinessConfig,

    #[serde(default)]
    pub numbering: NumberingScheme,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else if explicit {
                warn!(?path, "Config file not found, using defaults");
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file, creating parent directories.
    ///
    /// Returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml()?)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let numbering = &self.numbering;

        if numbering.invoice_prefix.trim().is_empty() {
            return Err(CliError::Config("invoice_prefix must not be empty".into()));
        }
        if numbering.consignment_prefix.trim().is_empty() {
            return Err(CliError::Config(
                "consignment_prefix must not be empty".into(),
            ));
        }
        if numbering.invoice_prefix == numbering.consignment_prefix {
            return Err(CliError::Config(format!(
                "invoice and consignment prefixes must differ, both are '{}'",
                numbering.invoice_prefix
            )));
        }
        if numbering.width == 0 || numbering.width > MAX_NUMBER_WIDTH {
            return Err(CliError::Config(format!(
                "width must be between 1 and {}, got {}",
                MAX_NUMBER_WIDTH, numbering.width
            )));
        }
        if numbering.start == 0 {
            return Err(CliError::Config("start must be at least 1".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a variable lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("RUGBILL_BUSINESS_NAME") {
            debug!(name = %name, "Overriding business name from environment");
            self.business.name = name;
        }

        if let Some(prefix) = lookup("RUGBILL_INVOICE_PREFIX") {
            self.numbering.invoice_prefix = prefix;
        }

        if let Some(prefix) = lookup("RUGBILL_CONSIGNMENT_PREFIX") {
            self.numbering.consignment_prefix = prefix;
        }

        if let Some(start) = lookup("RUGBILL_NUMBER_START") {
            match start.parse::<u64>() {
                Ok(s) => {
                    debug!(start = s, "Overriding number start from environment");
                    self.numbering.start = s;
                }
                Err(_) => warn!(start = %start, "Ignoring non-numeric RUGBILL_NUMBER_START"),
            }
        }

        if let Some(filter) = lookup("RUGBILL_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rugbill", "rugbill")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
