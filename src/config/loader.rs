use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::FilterOptions;

/// Configuration file loader for the demo binary.
///
/// Library callers construct [`FilterOptions`] directly; this only backs
/// the CLI, reading the plain fields from a TOML file.
pub struct ConfigLoader {
    config_path: PathBuf,
    options: FilterOptions,
}

impl ConfigLoader {
    /// Create a loader carrying defaults, without touching the disk.
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            options: FilterOptions::default(),
        }
    }

    /// Load options from disk, falling back to defaults if the file is
    /// missing or does not parse.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_config_path);

        let options = if config_path.exists() {
            info!("Loading config from {:?}", config_path);
            let contents = fs::read_to_string(&config_path)?;

            match toml::from_str::<FilterOptions>(&contents) {
                Ok(options) => {
                    debug!("Config loaded successfully");
                    options
                }
                Err(e) => {
                    warn!("Failed to parse config: {}, using defaults", e);
                    FilterOptions::default()
                }
            }
        } else {
            info!("No config file at {:?}, using defaults", config_path);
            FilterOptions::default()
        };

        Ok(Self {
            config_path,
            options,
        })
    }

    /// Get current options.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Consume the loader, yielding the options for binding.
    pub fn into_options(self) -> FilterOptions {
        self.options
    }

    /// Get config file path.
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Default configuration file path.
    fn default_config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("/tmp"));

        config_dir.join("goldpan").join("config.toml")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
