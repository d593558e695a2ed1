//! Production capacity by number of active shifts.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Units one shift produces per day.
pub const UNITS_PER_SHIFT: u64 = 1666;

/// Most shifts the factory can run per day (morning, afternoon, night).
pub const MAX_SHIFTS: u8 = 3;

/// Working days counted per month.
pub const DAYS_PER_MONTH: u64 = 30;

/// Production capacity for a given number of shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityMetrics {
    /// Active shifts per day.
    pub shifts: u8,
    /// Units produced per shift.
    pub units_per_shift: u64,
    /// Units produced per day.
    pub daily: u64,
    /// Units produced per month (30 days).
    pub monthly: u64,
    /// Units produced per year (12 months).
    pub yearly: u64,
    /// Units produced per day with every shift active.
    pub max_daily: u64,
    /// Daily units left unproduced compared to full capacity.
    pub idle_daily: u64,
    /// Daily production as a percentage of full capacity.
    pub utilization_percent: Decimal,
}

impl CapacityMetrics {
    /// Returns true when every shift is active.
    pub fn is_at_full_capacity(&self) -> bool {
        self.idle_daily == 0
    }
}

/// Checks that a shift count is between 1 and [`MAX_SHIFTS`].
pub fn validate_shifts(shifts: u8) -> EngineResult<u8> {
    if (1..=MAX_SHIFTS).contains(&shifts) {
        Ok(shifts)
    } else {
        Err(EngineError::validation(
            "shifts",
            format!("must be between 1 and {MAX_SHIFTS}, got {shifts}"),
        ))
    }
}

/// Computes production capacity for the given number of active shifts.
///
/// The function is total; callers validate the shift count with
/// [`validate_shifts`] first.
///
/// # Examples
///
/// ```
/// use quatro_cantos::calculation::compute_capacity;
/// use rust_decimal::Decimal;
///
/// let metrics = compute_capacity(3);
/// assert_eq!(metrics.daily, 4998);
/// assert_eq!(metrics.idle_daily, 0);
/// assert_eq!(metrics.utilization_percent, Decimal::from(100));
/// ```
pub fn compute_capacity(shifts: u8) -> CapacityMetrics {
    let daily = UNITS_PER_SHIFT * u64::from(shifts);
    let monthly = daily * DAYS_PER_MONTH;
    let yearly = monthly * 12;
    let max_daily = UNITS_PER_SHIFT * u64::from(MAX_SHIFTS);
    let idle_daily = max_daily.saturating_sub(daily);
    let utilization_percent =
        Decimal::from(daily) / Decimal::from(max_daily) * Decimal::ONE_HUNDRED;

    CapacityMetrics {
        shifts,
        units_per_shift: UNITS_PER_SHIFT,
        daily,
        monthly,
        yearly,
        max_daily,
        idle_daily,
        utilization_percent,
    }
}
