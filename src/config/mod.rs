//! Configuration loading for the Quatro Cantos engine.
//!
//! This module loads the company configuration from a directory of YAML
//! files: company metadata and operational settings such as the product
//! store url and the inventory batch limit.
//!
//! # Example
//!
//! ```no_run
//! use quatro_cantos::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/quatro_cantos").unwrap();
//! println!("Loaded company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DATABASE_URL_ENV};
pub use types::{
    AppConfig, CompanyMetadata, DEFAULT_DATABASE_URL, DEFAULT_INVENTORY_BATCH_LIMIT,
    OperationsConfig,
};
