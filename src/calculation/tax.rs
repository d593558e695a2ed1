//! INSS and IR withholding tables.
//!
//! This module holds the 2025 INSS and IR bracket tables and the functions
//! that map a gross salary to its INSS deduction and an IR base to its IR
//! deduction.

use rust_decimal::Decimal;
use serde::Serialize;

/// One row of a withholding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    /// Position of the bracket in its table, starting at 1.
    pub number: u8,
    /// Inclusive upper bound of the bracket; `None` for the top bracket.
    pub upper_bound: Option<Decimal>,
    /// Rate applied to the whole amount.
    pub rate: Decimal,
    /// Fixed amount subtracted after applying the rate.
    pub deduction: Decimal,
}

impl TaxBracket {
    fn contains(&self, amount: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| amount <= bound)
    }
}

const fn dec(lo: u32, scale: u32) -> Decimal {
    Decimal::from_parts(lo, 0, 0, false, scale)
}

/// Maximum INSS withheld from a single salary.
pub const INSS_CEILING: Decimal = dec(90885, 2);

/// 2025 INSS table. The rate of the matched bracket applies to the whole salary.
pub const INSS_BRACKETS: [TaxBracket; 4] = [
    TaxBracket {
        number: 1,
        upper_bound: Some(dec(141200, 2)),
        rate: dec(75, 3),
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        number: 2,
        upper_bound: Some(dec(266668, 2)),
        rate: dec(9, 2),
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        number: 3,
        upper_bound: Some(dec(400003, 2)),
        rate: dec(12, 2),
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        number: 4,
        upper_bound: None,
        rate: dec(14, 2),
        deduction: Decimal::ZERO,
    },
];

/// 2025 IR table with the fixed deduction of each bracket.
pub const IR_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        number: 1,
        upper_bound: Some(dec(225920, 2)),
        rate: Decimal::ZERO,
        deduction: Decimal::ZERO,
    },
    TaxBracket {
        number: 2,
        upper_bound: Some(dec(282665, 2)),
        rate: dec(75, 3),
        deduction: dec(16944, 2),
    },
    TaxBracket {
        number: 3,
        upper_bound: Some(dec(375105, 2)),
        rate: dec(15, 2),
        deduction: dec(38144, 2),
    },
    TaxBracket {
        number: 4,
        upper_bound: Some(dec(466468, 2)),
        rate: dec(225, 3),
        deduction: dec(66277, 2),
    },
    TaxBracket {
        number: 5,
        upper_bound: None,
        rate: dec(275, 3),
        deduction: dec(89600, 2),
    },
];

fn find_bracket(table: &[TaxBracket], amount: Decimal) -> TaxBracket {
    // The last bracket is unbounded, so a match always exists.
    table
        .iter()
        .copied()
        .find(|bracket| bracket.contains(amount))
        .unwrap_or(table[table.len() - 1])
}

/// Returns the INSS bracket a gross salary falls in.
pub fn inss_bracket(gross: Decimal) -> TaxBracket {
    find_bracket(&INSS_BRACKETS, gross)
}

/// Returns the IR bracket an IR base falls in.
pub fn ir_bracket(base: Decimal) -> TaxBracket {
    find_bracket(&IR_BRACKETS, base)
}

/// Computes the INSS deduction for a gross salary.
///
/// The rate of the bracket the salary falls in applies to the whole salary.
/// In the top bracket the deduction is capped at [`INSS_CEILING`].
///
/// # Examples
///
/// ```
/// use quatro_cantos::calculation::compute_inss;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inss = compute_inss(Decimal::from_str("2700").unwrap());
/// assert_eq!(inss, Decimal::from_str("243").unwrap());
///
/// let capped = compute_inss(Decimal::from_str("10000").unwrap());
/// assert_eq!(capped, Decimal::from_str("908.85").unwrap());
/// ```
pub fn compute_inss(gross: Decimal) -> Decimal {
    let bracket = inss_bracket(gross);
    let amount = gross * bracket.rate;

    if bracket.upper_bound.is_none() {
        amount.min(INSS_CEILING)
    } else {
        amount
    }
}

/// Computes the raw IR deduction for an IR base (gross minus INSS).
///
/// Up to the exemption threshold the result is zero. Above it the result is
/// `base x rate - deduction`; callers floor it at zero.
///
/// # Examples
///
/// ```
/// use quatro_cantos::calculation::compute_ir;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(compute_ir(Decimal::from_str("2000").unwrap()), Decimal::ZERO);
/// assert_eq!(
///     compute_ir(Decimal::from_str("5000").unwrap()),
///     Decimal::from_str("479.00").unwrap()
/// );
/// ```
pub fn compute_ir(base: Decimal) -> Decimal {
    let bracket = ir_bracket(base);

    if bracket.rate.is_zero() {
        Decimal::ZERO
    } else {
        base * bracket.rate - bracket.deduction
    }
}
