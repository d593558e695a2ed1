//! Quatro Cantos management engine
//!
//! This crate provides the business rules of the Quatro Cantos management tool:
//! Brazilian payroll with INSS and IR withholding, inventory entry and exit
//! reconciliation against a product store, production capacity by shift and
//! fixed-cost financial projections.

#![warn(missing_docs)]

pub mod auth;
pub mod calculation;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod report;
