//! Payroll sheet aggregation.
//!
//! Collects the pay records of a run into a [`PayrollSummary`] with totals,
//! employer charges and the total cost of the payroll to the company.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{PayRecord, PayrollSummary, PayrollTotals};

/// Employer charges on gross pay: FGTS 8%, employer INSS 20%, PIS and others.
pub const EMPLOYER_CHARGE_RATE: Decimal = Decimal::from_parts(2765, 0, 0, false, 4);

/// Builds the payroll sheet for a run.
///
/// Records are sorted alphabetically by name. Employer charges are
/// [`EMPLOYER_CHARGE_RATE`] of total gross pay and are added to, not deducted
/// from, what employees receive.
///
/// # Examples
///
/// ```
/// use quatro_cantos::calculation::{process_employee, summarize_payroll};
/// use quatro_cantos::models::Role;
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     process_employee("Bruno", Role::Worker, Decimal::ZERO)?,
///     process_employee("Ana", Role::Worker, Decimal::from(10))?,
/// ];
/// let summary = summarize_payroll(records);
/// assert_eq!(summary.records[0].name, "Ana");
/// assert_eq!(summary.totals.employees, 2);
/// # Ok::<(), quatro_cantos::error::EngineError>(())
/// ```
pub fn summarize_payroll(records: Vec<PayRecord>) -> PayrollSummary {
    summarize_payroll_with_rate(records, EMPLOYER_CHARGE_RATE)
}

/// Builds the payroll sheet for a run with a configured employer charge rate.
pub fn summarize_payroll_with_rate(
    mut records: Vec<PayRecord>,
    employer_charge_rate: Decimal,
) -> PayrollSummary {
    records.sort_by(|a, b| a.name.cmp(&b.name));

    let sum = |f: fn(&PayRecord) -> Decimal| -> Decimal { records.iter().map(f).sum() };

    let gross_pay = sum(|r| r.gross_pay);
    let inss = sum(|r| r.inss);
    let ir = sum(|r| r.ir);
    let net_pay = sum(|r| r.net_pay);
    let overtime_pay = sum(|r| r.overtime_pay);
    let overtime_hours: Decimal = records
        .iter()
        .filter(|r| r.overtime_pay > Decimal::ZERO)
        .map(|r| r.overtime_hours)
        .sum();

    let employer_charges = gross_pay * employer_charge_rate;
    let company_cost = net_pay + inss + ir + employer_charges;

    let totals = PayrollTotals {
        employees: records.len(),
        overtime_hours,
        overtime_pay,
        gross_pay,
        inss,
        ir,
        net_pay,
        employer_charges,
        company_cost,
    };

    let run_id = Uuid::new_v4();
    tracing::info!(
        run_id = %run_id,
        employees = totals.employees,
        gross = %totals.gross_pay,
        company_cost = %totals.company_cost,
        "Payroll run summarized"
    );

    PayrollSummary {
        run_id,
        timestamp: Utc::now(),
        records,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::process_employee;
    use crate::models::Role;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_records() -> Vec<PayRecord> {
        vec![
            process_employee("Carla", Role::Supervisor, dec("5")).unwrap(),
            process_employee("Ana", Role::Worker, dec("10")).unwrap(),
            process_employee("Davi", Role::Manager, dec("20")).unwrap(),
        ]
    }

    #[test]
    fn test_records_sorted_by_name() {
        let summary = summarize_payroll(sample_records());
        let names: Vec<&str> = summary.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla", "Davi"]);
    }

    #[test]
    fn test_totals_equal_sum_of_records() {
        let records = sample_records();
        let expected_gross: Decimal = records.iter().map(|r| r.gross_pay).sum();
        let expected_net: Decimal = records.iter().map(|r| r.net_pay).sum();

        let summary = summarize_payroll(records);
        assert_eq!(summary.totals.employees, 3);
        assert_eq!(summary.totals.gross_pay, expected_gross);
        assert_eq!(summary.totals.net_pay, expected_net);
        assert_eq!(summary.totals.gross_pay, dec("19100"));
    }

    #[test]
    fn test_overtime_totals_only_count_paid_overtime() {
        let summary = summarize_payroll(sample_records());
        // Davi's 20h are not paid (manager)
        assert_eq!(summary.totals.overtime_hours, dec("15"));
        assert_eq!(summary.totals.overtime_pay, dec("700"));
    }

    #[test]
    fn test_employer_charges_are_27_65_percent_of_gross() {
        let summary = summarize_payroll(sample_records());
        assert_eq!(summary.totals.employer_charges, dec("19100") * dec("0.2765"));
        assert_eq!(summary.totals.employer_charges, dec("5281.15"));
    }

    #[test]
    fn test_company_cost_is_gross_plus_charges() {
        let summary = summarize_payroll(sample_records());
        let totals = &summary.totals;
        assert_eq!(
            totals.company_cost,
            totals.net_pay + totals.inss + totals.ir + totals.employer_charges
        );
        assert_eq!(totals.company_cost, totals.gross_pay + totals.employer_charges);
    }

    #[test]
    fn test_configured_charge_rate() {
        let summary = summarize_payroll_with_rate(sample_records(), dec("0.20"));
        assert_eq!(summary.totals.employer_charges, dec("3820.00"));
    }

    #[test]
    fn test_empty_run() {
        let summary = summarize_payroll(vec![]);
        assert_eq!(summary.totals.employees, 0);
        assert_eq!(summary.totals.gross_pay, Decimal::ZERO);
        assert_eq!(summary.totals.company_cost, Decimal::ZERO);
    }

    #[test]
    fn test_each_run_gets_its_own_id() {
        let a = summarize_payroll(vec![]);
        let b = summarize_payroll(vec![]);
        assert_ne!(a.run_id, b.run_id);
    }
}
