//! Employee payroll calculation.
//!
//! This module turns a name, a role and a number of overtime hours into a
//! full [`PayRecord`]: base pay, overtime, INSS, IR and net pay, with an
//! audit trail explaining each figure.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MONTHLY_BASE_HOURS, PayRecord, Role};

use super::tax::{compute_inss, compute_ir, inss_bracket, ir_bracket};

/// Multiplier applied to the hourly rate for overtime hours (100% premium).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Most overtime hours accepted for one month (every hour of a 31-day month).
pub const MAX_OVERTIME_HOURS: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

/// Computes the monthly pay of one employee.
///
/// Gross pay is 160 hours at the role's hourly rate. When the role is
/// eligible for overtime and `overtime_hours` is positive, each overtime hour
/// is added at twice the hourly rate. INSS is withheld from gross pay and IR
/// from gross pay minus INSS, floored at zero.
///
/// Negative `overtime_hours` add nothing; callers clamp them to zero before
/// calling so the record shows zero hours.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when `overtime_hours` exceeds
/// [`MAX_OVERTIME_HOURS`].
///
/// # Examples
///
/// ```
/// use quatro_cantos::calculation::process_employee;
/// use quatro_cantos::models::Role;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = process_employee("Ana", Role::Worker, Decimal::from(10)).unwrap();
/// assert_eq!(record.gross_pay, Decimal::from_str("2700").unwrap());
/// assert_eq!(record.inss, Decimal::from_str("243").unwrap());
/// // IR base 2457 is in the 7.5% bracket: 2457 x 0.075 - 169.44
/// assert_eq!(record.ir, Decimal::from_str("14.835").unwrap());
/// assert_eq!(record.net_pay, Decimal::from_str("2442.165").unwrap());
/// ```
pub fn process_employee(
    name: &str,
    role: Role,
    overtime_hours: Decimal,
) -> EngineResult<PayRecord> {
    if overtime_hours > MAX_OVERTIME_HOURS {
        return Err(EngineError::validation(
            "overtime_hours",
            format!("must be at most {MAX_OVERTIME_HOURS}, got {overtime_hours}"),
        ));
    }

    let rate = role.rate();
    let hourly_rate = rate.hourly_rate;
    let mut audit_trail = Vec::with_capacity(4);

    audit_trail.push(AuditStep {
        step_number: 1,
        rule_id: "role_rate".to_string(),
        rule_name: "Role Rate Lookup".to_string(),
        reference: "role table".to_string(),
        input: serde_json::json!({ "role": role.label() }),
        output: serde_json::json!({
            "hourly_rate": hourly_rate.normalize().to_string(),
            "overtime_eligible": rate.overtime_eligible
        }),
        reasoning: format!(
            "{} is paid R$ {}/h{}",
            role.label(),
            hourly_rate.normalize(),
            if rate.overtime_eligible {
                " with overtime"
            } else {
                ", position of trust without overtime"
            }
        ),
    });

    let base_pay = MONTHLY_BASE_HOURS * hourly_rate;
    let overtime_pay = if rate.overtime_eligible && overtime_hours > Decimal::ZERO {
        overtime_hours * hourly_rate * OVERTIME_MULTIPLIER
    } else {
        Decimal::ZERO
    };
    let gross_pay = base_pay + overtime_pay;

    audit_trail.push(AuditStep {
        step_number: 2,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime".to_string(),
        reference: "160h base, overtime at 200%".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "overtime_eligible": rate.overtime_eligible
        }),
        output: serde_json::json!({
            "base_pay": base_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "gross_pay": gross_pay.normalize().to_string()
        }),
        reasoning: if overtime_pay.is_zero() {
            format!(
                "160h x R$ {} = R$ {}, no overtime paid",
                hourly_rate.normalize(),
                gross_pay.normalize()
            )
        } else {
            format!(
                "160h x R$ {} + {}h x R$ {} = R$ {}",
                hourly_rate.normalize(),
                overtime_hours.normalize(),
                (hourly_rate * OVERTIME_MULTIPLIER).normalize(),
                gross_pay.normalize()
            )
        },
    });

    let inss = compute_inss(gross_pay);
    let inss_rule = inss_bracket(gross_pay);
    audit_trail.push(AuditStep {
        step_number: 3,
        rule_id: "inss".to_string(),
        rule_name: "INSS Withholding".to_string(),
        reference: format!("INSS 2025, bracket {}", inss_rule.number),
        input: serde_json::json!({ "gross_pay": gross_pay.normalize().to_string() }),
        output: serde_json::json!({
            "rate": inss_rule.rate.normalize().to_string(),
            "inss": inss.normalize().to_string()
        }),
        reasoning: format!(
            "R$ {} x {} = R$ {}",
            gross_pay.normalize(),
            inss_rule.rate.normalize(),
            inss.normalize()
        ),
    });

    let ir_base = gross_pay - inss;
    let raw_ir = compute_ir(ir_base);
    let ir = raw_ir.max(Decimal::ZERO);
    let ir_rule = ir_bracket(ir_base);
    audit_trail.push(AuditStep {
        step_number: 4,
        rule_id: "ir".to_string(),
        rule_name: "IR Withholding".to_string(),
        reference: format!("IR 2025, bracket {}", ir_rule.number),
        input: serde_json::json!({ "ir_base": ir_base.normalize().to_string() }),
        output: serde_json::json!({
            "raw_ir": raw_ir.normalize().to_string(),
            "ir": ir.normalize().to_string()
        }),
        reasoning: if ir_rule.rate.is_zero() {
            format!("R$ {} is exempt", ir_base.normalize())
        } else {
            format!(
                "R$ {} x {} - R$ {} = R$ {}{}",
                ir_base.normalize(),
                ir_rule.rate.normalize(),
                ir_rule.deduction.normalize(),
                raw_ir.normalize(),
                if raw_ir < Decimal::ZERO {
                    ", floored at R$ 0"
                } else {
                    ""
                }
            )
        },
    });

    let net_pay = gross_pay - inss - ir;

    tracing::debug!(
        employee = %name,
        role = role.label(),
        gross = %gross_pay,
        net = %net_pay,
        "Processed employee payroll"
    );

    Ok(PayRecord {
        name: name.to_string(),
        role,
        hourly_rate,
        overtime_hours,
        base_pay,
        overtime_pay,
        gross_pay,
        inss,
        ir,
        net_pay,
        audit_trail,
    })
}
