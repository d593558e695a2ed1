//! Plain-text reports for the command line.
//!
//! Money is shown in Brazilian format (`R$ 1.234,56`) and counts use `.` as
//! the thousands separator. Every renderer returns the finished text; the
//! caller decides where it goes.

use rust_decimal::Decimal;

use crate::calculation::{CapacityMetrics, FinancialMetrics};
use crate::inventory::{InboundBatch, InboundReceipt, OutboundOutcome, Sale, stock_value};
use crate::models::{PayRecord, PayrollSummary, Product};

const RULE: &str = "------------------------------------------------------------";

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Formats a decimal with `.` thousands and `,` as the decimal mark.
///
/// # Examples
///
/// ```
/// use quatro_cantos::report::format_decimal_br;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_decimal_br(Decimal::new(123456789, 2), 2), "1.234.567,89");
/// assert_eq!(format_decimal_br(Decimal::from(1666), 0), "1.666");
/// ```
pub fn format_decimal_br(value: Decimal, decimal_places: u32) -> String {
    let rounded = value.round_dp(decimal_places);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", decimal_places as usize, rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// Formats money as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {}", format_decimal_br(value, 2))
}

/// Formats a percentage with two decimal places, e.g. `66,67%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_decimal_br(value, 2))
}

/// Formats a whole count with thousands separators.
pub fn format_count(value: impl Into<i128>) -> String {
    let value: i128 = value.into();
    let digits = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 { format!("-{digits}") } else { digits }
}

fn heading(title: &str) -> Vec<String> {
    vec![RULE.to_string(), title.to_string(), RULE.to_string()]
}

fn line(label: &str, value: impl AsRef<str>) -> String {
    format!("  {:<28}{:>20}", label, value.as_ref())
}

/// Renders production capacity.
pub fn render_capacity(metrics: &CapacityMetrics) -> String {
    let mut lines = heading(&format!("PRODUCTION CAPACITY ({} shift(s))", metrics.shifts));
    lines.push(line("Units per shift", format_count(metrics.units_per_shift)));
    lines.push(line("Daily", format_count(metrics.daily)));
    lines.push(line("Monthly (30 days)", format_count(metrics.monthly)));
    lines.push(line("Yearly", format_count(metrics.yearly)));
    lines.push(line("Maximum daily", format_count(metrics.max_daily)));
    lines.push(line("Idle daily", format_count(metrics.idle_daily)));
    lines.push(line("Utilization", format_percent(metrics.utilization_percent)));
    if metrics.is_at_full_capacity() {
        lines.push("  Running at full capacity.".to_string());
    }
    lines.join("\n")
}

/// Renders financial projections.
pub fn render_financials(metrics: &FinancialMetrics) -> String {
    let mut lines = heading("FINANCIAL PROJECTION");
    lines.push(line("Monthly volume (units)", format_count(metrics.unit_volume)));
    lines.push(line("Total fixed costs", format_brl(metrics.total_costs)));
    lines.push(line("Cost per unit", format_brl(metrics.cost_per_unit)));
    lines.push(line(
        "Target margin",
        format_percent(metrics.target_margin * Decimal::ONE_HUNDRED),
    ));
    lines.push(line("Sale price", format_brl(metrics.sale_price)));
    lines.push(line("Profit per unit", format_brl(metrics.profit_per_unit)));
    lines.push(line("Monthly revenue", format_brl(metrics.monthly_revenue)));
    lines.push(line("Monthly profit", format_brl(metrics.monthly_profit)));
    lines.push(line("Annual revenue", format_brl(metrics.annual_revenue)));
    lines.push(line("Annual profit", format_brl(metrics.annual_profit)));
    lines.push(line(
        "Realized margin",
        format_percent(metrics.realized_margin_percent),
    ));
    lines.push(line(
        "Break-even (units)",
        format_decimal_br(metrics.break_even_units, 0),
    ));
    lines.push(line("Return on costs", format_percent(metrics.roi_percent)));
    lines.join("\n")
}

/// Renders the pay slip of one employee.
pub fn render_pay_record(record: &PayRecord) -> String {
    let mut lines = heading(&format!("PAY SLIP: {} ({})", record.name, record.role.label()));
    lines.push(line("Hourly rate", format_brl(record.hourly_rate)));
    lines.push(line("Base pay (160h)", format_brl(record.base_pay)));
    if record.overtime_pay > Decimal::ZERO {
        lines.push(line(
            &format!("Overtime ({}h)", format_decimal_br(record.overtime_hours, 1)),
            format_brl(record.overtime_pay),
        ));
    }
    lines.push(line("Gross pay", format_brl(record.gross_pay)));
    lines.push(line("INSS", format!("-{}", format_brl(record.inss))));
    lines.push(line("IR", format!("-{}", format_brl(record.ir))));
    lines.push(line("Net pay", format_brl(record.net_pay)));
    lines.join("\n")
}

/// Renders the payroll sheet of a run.
pub fn render_payroll_summary(summary: &PayrollSummary, company: &str) -> String {
    let mut lines = heading(&format!("PAYROLL SHEET: {company}"));
    lines.push(format!("  Run {} at {}", summary.run_id, summary.timestamp.to_rfc3339()));
    lines.push(String::new());
    lines.push(format!(
        "  {:<20}{:<12}{:>16}{:>14}{:>14}{:>16}",
        "Name", "Role", "Gross", "INSS", "IR", "Net"
    ));
    for record in &summary.records {
        lines.push(format!(
            "  {:<20}{:<12}{:>16}{:>14}{:>14}{:>16}",
            record.name,
            record.role.label(),
            format_brl(record.gross_pay),
            format_brl(record.inss),
            format_brl(record.ir),
            format_brl(record.net_pay),
        ));
    }

    let totals = &summary.totals;
    lines.push(RULE.to_string());
    lines.push(line("Employees", format_count(totals.employees as u64)));
    lines.push(line(
        "Overtime hours",
        format_decimal_br(totals.overtime_hours, 1),
    ));
    lines.push(line("Overtime pay", format_brl(totals.overtime_pay)));
    lines.push(line("Total gross", format_brl(totals.gross_pay)));
    lines.push(line("Total INSS", format_brl(totals.inss)));
    lines.push(line("Total IR", format_brl(totals.ir)));
    lines.push(line("Total net", format_brl(totals.net_pay)));
    lines.push(line("Employer charges", format_brl(totals.employer_charges)));
    lines.push(line("Company cost", format_brl(totals.company_cost)));
    lines.join("\n")
}

/// Renders the result of a stock entry.
pub fn render_inbound_receipt(receipt: &InboundReceipt) -> String {
    let product = &receipt.product;
    let mut lines = Vec::new();
    if receipt.is_new {
        lines.push(format!(
            "[OK] New product registered: {} (code {})",
            product.name, product.code
        ));
    } else {
        lines.push(format!(
            "[OK] Stock updated: {} (code {})",
            product.name, product.code
        ));
        lines.push(line("Previous quantity", format_count(receipt.previous_quantity)));
    }
    lines.push(line("Added", format_count(receipt.quantity_added)));
    lines.push(line("Current quantity", format_count(product.quantity)));
    lines.push(line("Unit price", format_brl(product.unit_price)));
    lines.push(line("Stock value", format_brl(product.stock_value())));
    lines.join("\n")
}

/// Renders every receipt of a batch followed by its summary.
pub fn render_inbound_batch(batch: &InboundBatch) -> String {
    let mut blocks: Vec<String> = batch.receipts.iter().map(render_inbound_receipt).collect();

    let mut lines = vec![format!(
        "Batch: {} new, {} updated, {} skipped",
        batch.new_products(),
        batch.updated_products(),
        batch.skipped.len()
    )];
    for skipped in &batch.skipped {
        lines.push(format!("[ERROR] {}: {}", skipped.entry, skipped.reason));
    }
    if batch.truncated > 0 {
        lines.push(format!(
            "[WARN] {} entries over the batch limit were not processed",
            batch.truncated
        ));
    }
    blocks.push(lines.join("\n"));
    blocks.join("\n\n")
}

fn sale_lines(sale: &Sale, lines: &mut Vec<String>) {
    lines.push(line("Previous stock", format_count(sale.previous_stock)));
    lines.push(line("Requested", format_count(sale.quantity_requested)));
    lines.push(line("Sold", format_count(sale.quantity_sold)));
    lines.push(line("Remaining stock", format_count(sale.remaining_stock)));
    lines.push(line("Unit price", format_brl(sale.unit_price)));
    lines.push(line("Sale value", format_brl(sale.sale_value)));
}

/// Renders the result of a stock exit.
pub fn render_outbound_outcome(outcome: &OutboundOutcome) -> String {
    let mut lines = Vec::new();
    match outcome {
        OutboundOutcome::NotFound { name } => {
            lines.push(format!("[ERROR] Product not found: {name}"));
        }
        OutboundOutcome::Exhausted {
            product,
            quantity_requested,
        } => {
            lines.push(format!(
                "[ERROR] {} is out of stock; {} unit(s) not sold",
                product.name,
                format_count(*quantity_requested)
            ));
        }
        OutboundOutcome::Fulfilled(sale) => {
            lines.push(format!("[OK] Sale registered: {}", sale.product.name));
            sale_lines(sale, &mut lines);
        }
        OutboundOutcome::Partial(sale) => {
            lines.push(format!(
                "[PARTIAL] {}: only {} of {} unit(s) available, stock is now empty",
                sale.product.name,
                format_count(sale.quantity_sold),
                format_count(sale.quantity_requested)
            ));
            sale_lines(sale, &mut lines);
        }
    }
    lines.push(format!("  Status: {}", outcome.status().as_str()));
    lines.join("\n")
}

/// Renders the stock list with its total value.
pub fn render_stock_list(products: &[Product]) -> String {
    let mut lines = heading("STOCK");
    if products.is_empty() {
        lines.push("  No products registered.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "  {:>8}  {:<24}{:>10}{:>16}{:>18}",
        "Code", "Name", "Qty", "Unit price", "Value"
    ));
    for product in products {
        let marker = if product.is_out_of_stock() { " *" } else { "" };
        lines.push(format!(
            "  {:>8}  {:<24}{:>10}{:>16}{:>18}{}",
            product.code,
            product.name,
            format!("{} {}", format_count(product.quantity), product.unit_of_measure),
            format_brl(product.unit_price),
            format_brl(product.stock_value()),
            marker
        ));
    }
    lines.push(RULE.to_string());
    lines.push(line("Products", format_count(products.len() as u64)));
    lines.push(line("Total stock value", format_brl(stock_value(products))));
    if products.iter().any(Product::is_out_of_stock) {
        lines.push("  * out of stock".to_string());
    }
    lines.join("\n")
}
