//! Layered configuration for Recolite.
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. Built-in defaults ([`RecoliteConfig::default`])
//! 2. A TOML file (`recolite.toml` in the working directory, or an explicit path)
//! 3. Environment variables prefixed with `RECOLITE_`, nested with `__`
//!    (e.g. `RECOLITE_SERVER__PORT=9000`, `RECOLITE_DATA__MAX_ROWS=1000`)
//!
//! # Example
//!
//! ```toml
//! [data]
//! dir = "./data"
//! max_rows = 50000
//! duplicate_policy = "keep_first"
//!
//! [recommend]
//! k = 5
//! min_score = 0.05
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::DuplicatePolicy;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "recolite.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RECOLITE_";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Providers could not be merged or extracted.
    #[error("Configuration error: {0}")]
    Load(String),

    /// A value is outside its accepted range.
    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid {
        /// Dotted key of the offending field.
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoliteConfig {
    /// Catalog input files and load limits.
    pub data: DataConfig,
    /// Recommendation and search tuning.
    pub recommend: RecommendConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Catalog input configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding both CSV files.
    pub dir: PathBuf,
    /// Products CSV file name, relative to `dir`.
    pub products_file: String,
    /// Categories CSV file name, relative to `dir`.
    pub categories_file: String,
    /// Maximum number of catalog rows kept after join and cleaning.
    pub max_rows: usize,
    /// What to do when a product identifier appears twice.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data"),
            products_file: "amazon_sample_products.csv".to_string(),
            categories_file: "amazon_sample_category.csv".to_string(),
            max_rows: 50_000,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl DataConfig {
    /// Full path of the products file.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.dir.join(&self.products_file)
    }

    /// Full path of the categories file.
    #[must_use]
    pub fn categories_path(&self) -> PathBuf {
        self.dir.join(&self.categories_file)
    }
}

/// Recommendation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Number of recommendations returned alongside the best match.
    pub k: usize,
    /// Number of products sampled for the home page.
    pub trending_size: usize,
    /// Minimum cosine score for a best match. `0.0` accepts any match.
    pub min_score: f32,
    /// Seed for the process-wide random source. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            k: 5,
            trending_size: 50,
            min_score: 0.0,
            seed: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Allowed CORS origins. Empty means permissive.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,tower_http=debug".to_string(),
        }
    }
}

impl RecoliteConfig {
    /// Builds the layered figment without extracting it.
    ///
    /// With `path = None` the default file is merged only if it exists.
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let toml = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                Toml::file(p)
            }
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(toml)
            .merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Loads and validates the configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path)?
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.max_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "data.max_rows",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.recommend.k == 0 {
            return Err(ConfigError::Invalid {
                field: "recommend.k",
                reason: "must be greater than 0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.recommend.min_score) {
            return Err(ConfigError::Invalid {
                field: "recommend.min_score",
                reason: format!("{} is outside [0.0, 1.0]", self.recommend.min_score),
            });
        }
        if self.data.products_file.is_empty() || self.data.categories_file.is_empty() {
            return Err(ConfigError::Invalid {
                field: "data",
                reason: "file names must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Load(e.to_string()))
    }
}
