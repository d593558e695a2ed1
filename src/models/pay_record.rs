//! Payroll result models.
//!
//! This module contains the [`PayRecord`] produced for one employee, the
//! [`PayrollSummary`] produced for a whole run, and the [`AuditStep`] entries
//! that explain how each figure was reached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use quatro_cantos::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "inss".to_string(),
///     rule_name: "INSS Withholding".to_string(),
///     reference: "INSS 2025, bracket 2".to_string(),
///     input: serde_json::json!({"gross_pay": "2700"}),
///     output: serde_json::json!({"inss": "243"}),
///     reasoning: "R$ 2700 x 0.09 = R$ 243".to_string(),
/// };
/// assert_eq!(step.rule_id, "inss");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The table or rule source the step relied on.
    pub reference: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The full pay breakdown of one employee for one month.
///
/// Records are transient: they are built by
/// [`process_employee`](crate::calculation::process_employee), printed and
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRecord {
    /// Employee name.
    pub name: String,
    /// Employee role.
    pub role: Role,
    /// Hourly rate derived from the role.
    pub hourly_rate: Decimal,
    /// Overtime hours as given by the caller.
    pub overtime_hours: Decimal,
    /// Pay for the 160 monthly base hours.
    pub base_pay: Decimal,
    /// Pay for overtime hours, zero when the role is not eligible.
    pub overtime_pay: Decimal,
    /// Base pay plus overtime pay.
    pub gross_pay: Decimal,
    /// INSS withheld.
    pub inss: Decimal,
    /// IR withheld, never negative.
    pub ir: Decimal,
    /// Gross pay minus INSS and IR.
    pub net_pay: Decimal,
    /// Steps explaining how the figures were computed.
    pub audit_trail: Vec<AuditStep>,
}

impl PayRecord {
    /// Returns the sum of all deductions.
    pub fn total_deductions(&self) -> Decimal {
        self.inss + self.ir
    }
}

/// Aggregated totals of a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Number of employees in the run.
    pub employees: usize,
    /// Total overtime hours paid.
    pub overtime_hours: Decimal,
    /// Total overtime pay.
    pub overtime_pay: Decimal,
    /// Total gross pay.
    pub gross_pay: Decimal,
    /// Total INSS withheld.
    pub inss: Decimal,
    /// Total IR withheld.
    pub ir: Decimal,
    /// Total net pay.
    pub net_pay: Decimal,
    /// Employer charges on gross pay (FGTS, employer INSS, PIS).
    pub employer_charges: Decimal,
    /// Net pay plus withholdings plus employer charges.
    pub company_cost: Decimal,
}

/// The payroll sheet for a run over several employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was summarized.
    pub timestamp: DateTime<Utc>,
    /// Pay records sorted alphabetically by name.
    pub records: Vec<PayRecord>,
    /// Aggregated totals.
    pub totals: PayrollTotals,
}
