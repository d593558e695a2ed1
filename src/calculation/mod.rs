//! Calculation logic for the Quatro Cantos engine.
//!
//! This module contains the pure calculations of the engine: INSS and IR
//! withholding, the pay breakdown of one employee, the payroll sheet of a
//! run, production capacity by shift, and financial projections from fixed
//! costs.

mod capacity;
mod financials;
mod payroll;
mod payroll_summary;
mod tax;

pub use capacity::{
    CapacityMetrics, DAYS_PER_MONTH, MAX_SHIFTS, UNITS_PER_SHIFT, compute_capacity,
    validate_shifts,
};
pub use financials::{
    DEFAULT_UNIT_VOLUME, FinancialMetrics, FixedCosts, TARGET_MARGIN, compute_financials,
};
pub use payroll::{MAX_OVERTIME_HOURS, OVERTIME_MULTIPLIER, process_employee};
pub use payroll_summary::{EMPLOYER_CHARGE_RATE, summarize_payroll, summarize_payroll_with_rate};
pub use tax::{
    INSS_BRACKETS, INSS_CEILING, IR_BRACKETS, TaxBracket, compute_inss, compute_ir, inss_bracket,
    ir_bracket,
};
