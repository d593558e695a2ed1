//! Financial projections from monthly fixed costs.
//!
//! This module turns the monthly fixed costs of the factory into a unit
//! cost, a sale price at the target margin, revenue and profit projections,
//! a break-even point and a return on costs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default number of units produced per month.
pub const DEFAULT_UNIT_VOLUME: i64 = 1000;

/// Margin added on top of the unit cost to get the sale price.
pub const TARGET_MARGIN: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Monthly fixed costs of the factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCosts {
    /// Water bill.
    pub water: Decimal,
    /// Electricity bill.
    pub electricity: Decimal,
    /// Taxes.
    pub taxes: Decimal,
    /// Salaries.
    pub salaries: Decimal,
}

impl FixedCosts {
    /// Returns the sum of every cost, or `None` if it does not fit a `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        self.water
            .checked_add(self.electricity)?
            .checked_add(self.taxes)?
            .checked_add(self.salaries)
    }
}

/// Projections derived from fixed costs and monthly volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialMetrics {
    /// Units produced per month.
    pub unit_volume: i64,
    /// Total monthly fixed costs.
    pub total_costs: Decimal,
    /// Fixed cost carried by each unit.
    pub cost_per_unit: Decimal,
    /// Margin applied on top of the unit cost.
    pub target_margin: Decimal,
    /// Sale price per unit.
    pub sale_price: Decimal,
    /// Profit per unit sold.
    pub profit_per_unit: Decimal,
    /// Revenue per month.
    pub monthly_revenue: Decimal,
    /// Profit per month.
    pub monthly_profit: Decimal,
    /// Revenue per year.
    pub annual_revenue: Decimal,
    /// Profit per year.
    pub annual_profit: Decimal,
    /// Monthly profit as a percentage of monthly revenue.
    pub realized_margin_percent: Decimal,
    /// Units to sell to cover the monthly fixed costs.
    pub break_even_units: Decimal,
    /// Monthly profit as a percentage of total costs.
    pub roi_percent: Decimal,
}

fn in_range(field: &str, value: Option<Decimal>) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::validation(field, "result exceeds the decimal range"))
}

/// Computes financial projections for a month of production.
///
/// A non-positive `unit_volume` yields a zero unit cost. Break-even and ROI
/// are zero when their divisor is not positive.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming the first projection that
/// does not fit a `Decimal`.
///
/// # Examples
///
/// ```
/// use quatro_cantos::calculation::{compute_financials, FixedCosts, DEFAULT_UNIT_VOLUME};
/// use rust_decimal::Decimal;
///
/// let costs = FixedCosts {
///     water: Decimal::from(1000),
///     electricity: Decimal::from(3000),
///     taxes: Decimal::from(6000),
///     salaries: Decimal::from(40000),
/// };
/// let metrics = compute_financials(&costs, DEFAULT_UNIT_VOLUME)?;
/// assert_eq!(metrics.cost_per_unit, Decimal::from(50));
/// assert_eq!(metrics.sale_price, Decimal::from(75));
/// assert_eq!(metrics.break_even_units, Decimal::from(2000));
/// # Ok::<(), quatro_cantos::error::EngineError>(())
/// ```
pub fn compute_financials(costs: &FixedCosts, unit_volume: i64) -> EngineResult<FinancialMetrics> {
    let total_costs = in_range("total_costs", costs.total())?;
    let volume = Decimal::from(unit_volume);

    let cost_per_unit = if unit_volume > 0 {
        in_range("cost_per_unit", total_costs.checked_div(volume))?
    } else {
        Decimal::ZERO
    };

    let sale_price = in_range(
        "sale_price",
        cost_per_unit.checked_mul(Decimal::ONE + TARGET_MARGIN),
    )?;
    let profit_per_unit = in_range("profit_per_unit", sale_price.checked_sub(cost_per_unit))?;

    let monthly_revenue = in_range("monthly_revenue", sale_price.checked_mul(volume))?;
    let monthly_profit = in_range("monthly_profit", profit_per_unit.checked_mul(volume))?;
    let annual_revenue = in_range("annual_revenue", monthly_revenue.checked_mul(MONTHS_PER_YEAR))?;
    let annual_profit = in_range("annual_profit", monthly_profit.checked_mul(MONTHS_PER_YEAR))?;

    let realized_margin_percent = if monthly_revenue > Decimal::ZERO {
        in_range(
            "realized_margin_percent",
            monthly_profit
                .checked_div(monthly_revenue)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
        )?
    } else {
        Decimal::ZERO
    };
    let break_even_units = if profit_per_unit > Decimal::ZERO {
        in_range("break_even_units", total_costs.checked_div(profit_per_unit))?
    } else {
        Decimal::ZERO
    };
    let roi_percent = if total_costs > Decimal::ZERO {
        in_range(
            "roi_percent",
            monthly_profit
                .checked_div(total_costs)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
        )?
    } else {
        Decimal::ZERO
    };

    tracing::debug!(
        total_costs = %total_costs,
        unit_volume,
        sale_price = %sale_price,
        "Computed financial projections"
    );

    Ok(FinancialMetrics {
        unit_volume,
        total_costs,
        cost_per_unit,
        target_margin: TARGET_MARGIN,
        sale_price,
        profit_per_unit,
        monthly_revenue,
        monthly_profit,
        annual_revenue,
        annual_profit,
        realized_margin_percent,
        break_even_units,
        roi_percent,
    })
}
