//! Configuration types for the Quatro Cantos engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{DEFAULT_UNIT_VOLUME, EMPLOYER_CHARGE_RATE};

/// The default number of entries one inventory batch may carry.
pub const DEFAULT_INVENTORY_BATCH_LIMIT: usize = 10;

/// The default product store location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://quatro_cantos.db";

/// Identifying information about the company.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// The company name shown in reports.
    pub name: String,
    /// The business segment the company operates in.
    #[serde(default)]
    pub segment: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_inventory_batch_limit() -> usize {
    DEFAULT_INVENTORY_BATCH_LIMIT
}

fn default_unit_volume() -> i64 {
    DEFAULT_UNIT_VOLUME
}

fn default_employer_charge_rate() -> Decimal {
    EMPLOYER_CHARGE_RATE
}

/// Operational settings from operations.yaml.
///
/// Every field is optional in the file and falls back to the engine's
/// built-in value.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationsConfig {
    /// Where the product store lives.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Maximum number of entries accepted in one inventory batch.
    #[serde(default = "default_inventory_batch_limit")]
    pub inventory_batch_limit: usize,
    /// Units sold per month used by financial projections.
    #[serde(default = "default_unit_volume")]
    pub default_unit_volume: i64,
    /// Employer charges as a fraction of gross payroll.
    #[serde(default = "default_employer_charge_rate")]
    pub employer_charge_rate: Decimal,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            inventory_batch_limit: DEFAULT_INVENTORY_BATCH_LIMIT,
            default_unit_volume: DEFAULT_UNIT_VOLUME,
            employer_charge_rate: EMPLOYER_CHARGE_RATE,
        }
    }
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct AppConfig {
    company: CompanyMetadata,
    operations: OperationsConfig,
}

impl AppConfig {
    /// Creates a new AppConfig from its component parts.
    pub fn new(company: CompanyMetadata, operations: OperationsConfig) -> Self {
        Self {
            company,
            operations,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.company
    }

    /// Returns the operational settings.
    pub fn operations(&self) -> &OperationsConfig {
        &self.operations
    }
}
