//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the company
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, CompanyMetadata, OperationsConfig};

/// Environment variable that overrides the configured database url.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/quatro_cantos/
/// ├── company.yaml     # Company name and segment
/// └── operations.yaml  # Product store, batch limit, projections, charges
/// ```
///
/// `operations.yaml` may be absent, in which case built-in defaults apply.
///
/// # Example
///
/// ```no_run
/// use quatro_cantos::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/quatro_cantos")?;
/// println!("Company: {}", loader.company().name);
/// # Ok::<(), quatro_cantos::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// The database url from `operations.yaml` is replaced by the
    /// `DATABASE_URL` environment variable when it is set and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if `company.yaml` is missing
    /// and [`EngineError::ConfigParseError`] if any file is invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let database_url = std::env::var(DATABASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self::load_with_database_url(path, database_url)
    }

    /// Loads configuration, overriding the database url when one is given.
    pub fn load_with_database_url<P: AsRef<Path>>(
        path: P,
        database_url: Option<String>,
    ) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;

        let operations_path = path.join("operations.yaml");
        let mut operations = if operations_path.exists() {
            Self::load_yaml::<OperationsConfig>(&operations_path)?
        } else {
            tracing::debug!(path = %operations_path.display(), "No operations file, using defaults");
            OperationsConfig::default()
        };

        if let Some(url) = database_url {
            tracing::debug!("Database url taken from the environment");
            operations.database_url = url;
        }

        if operations.inventory_batch_limit == 0 {
            return Err(EngineError::ConfigParseError {
                path: operations_path.display().to_string(),
                message: "inventory_batch_limit must be at least 1".to_string(),
            });
        }

        Ok(Self {
            config: AppConfig::new(company, operations),
        })
    }

    /// Builds a loader from built-in defaults without reading any file.
    pub fn defaults() -> Self {
        let company = CompanyMetadata {
            name: "Quatro Cantos".to_string(),
            segment: String::new(),
        };
        Self {
            config: AppConfig::new(company, OperationsConfig::default()),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.company()
    }

    /// Returns the operational settings.
    pub fn operations(&self) -> &OperationsConfig {
        self.config.operations()
    }
}
