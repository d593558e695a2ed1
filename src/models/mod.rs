//! Core data models for the Quatro Cantos engine.
//!
//! This module contains the domain models shared by the calculations, the
//! inventory reconciler and the reports.

mod employee;
mod pay_record;
mod product;

pub use employee::{MONTHLY_BASE_HOURS, Role, RoleRate};
pub use pay_record::{AuditStep, PayRecord, PayrollSummary, PayrollTotals};
pub use product::{DEFAULT_UNIT_OF_MEASURE, Product};
