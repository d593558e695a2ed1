//! `quatro-cantos`: the Quatro Cantos management command line.
//!
//! Runs payroll, registers stock entries and exits, and prints capacity and
//! financial projections.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quatro_cantos::auth::hash_password;
use quatro_cantos::calculation::{
    FixedCosts, compute_capacity, compute_financials, process_employee,
    summarize_payroll_with_rate, validate_shifts,
};
use quatro_cantos::config::ConfigLoader;
use quatro_cantos::inventory::{
    InboundEntry, SqliteProductRepository, list_products, register_inbound_batch,
    register_outbound,
};
use quatro_cantos::models::{PayRecord, Role};
use quatro_cantos::report;

/// Quatro Cantos management tool.
#[derive(Parser, Debug)]
#[command(name = "quatro-cantos", version, about = "Quatro Cantos management tool")]
struct Cli {
    /// Configuration directory.
    #[arg(long = "config", global = true, default_value = "./config/quatro_cantos")]
    config: PathBuf,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Production capacity for a number of shifts.
    Capacity {
        /// Active shifts per day (1 to 3).
        #[arg(long)]
        shifts: u8,
    },

    /// Cost, price and profit projection from monthly fixed costs.
    Financials {
        /// Water bill.
        #[arg(long)]
        water: Decimal,
        /// Electricity bill.
        #[arg(long)]
        electricity: Decimal,
        /// Taxes.
        #[arg(long)]
        taxes: Decimal,
        /// Salaries.
        #[arg(long)]
        salaries: Decimal,
        /// Units produced per month (defaults to the configured volume).
        #[arg(long)]
        volume: Option<i64>,
    },

    /// Pay slips and the payroll sheet for a group of employees.
    Payroll {
        /// Employee as "Name:Role:OvertimeHours"; repeat for each employee.
        #[arg(long = "employee", required = true)]
        employees: Vec<String>,
    },

    /// Register units arriving in stock.
    StockIn {
        /// Product code.
        #[arg(long)]
        code: Option<i64>,
        /// Product name.
        #[arg(long)]
        name: Option<String>,
        /// Units received.
        #[arg(long)]
        quantity: Option<i64>,
        /// Price per unit.
        #[arg(long)]
        price: Option<Decimal>,
        /// Manufacture date.
        #[arg(long)]
        date: Option<String>,
        /// Supplier.
        #[arg(long)]
        supplier: Option<String>,
        /// Storage location.
        #[arg(long)]
        location: Option<String>,
        /// Further entries as "Code:Name:Quantity[:Price]"; repeatable.
        #[arg(long = "item")]
        items: Vec<String>,
    },

    /// Register a sale out of stock.
    StockOut {
        /// Product name (case is ignored).
        #[arg(long)]
        name: String,
        /// Units requested.
        #[arg(long)]
        quantity: i64,
    },

    /// List every product with its stock value.
    StockList,

    /// Print the bcrypt hash of a password.
    HashPassword {
        /// The password to hash.
        #[arg(long)]
        password: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    info!(company = %loader.company().name, "Configuration loaded");

    run(cli.command, &loader, cli.json)
}

fn run(command: Commands, loader: &ConfigLoader, json: bool) -> Result<()> {
    let operations = loader.operations();

    match command {
        Commands::Capacity { shifts } => {
            let shifts = validate_shifts(shifts)?;
            let metrics = compute_capacity(shifts);
            emit(json, &metrics, || report::render_capacity(&metrics))
        }

        Commands::Financials {
            water,
            electricity,
            taxes,
            salaries,
            volume,
        } => {
            let costs = FixedCosts {
                water,
                electricity,
                taxes,
                salaries,
            };
            let volume = volume.unwrap_or(operations.default_unit_volume);
            let metrics = compute_financials(&costs, volume)?;
            emit(json, &metrics, || report::render_financials(&metrics))
        }

        Commands::Payroll { employees } => {
            let records = employees
                .iter()
                .map(|spec| {
                    let (name, role, hours) = parse_employee(spec)?;
                    process_employee(&name, role, hours)
                        .with_context(|| format!("computing pay for {name}"))
                })
                .collect::<Result<Vec<PayRecord>>>()?;
            let summary = summarize_payroll_with_rate(records, operations.employer_charge_rate);

            emit(json, &summary, || {
                let mut text: Vec<String> =
                    summary.records.iter().map(report::render_pay_record).collect();
                text.push(report::render_payroll_summary(&summary, &loader.company().name));
                text.join("\n\n")
            })
        }

        Commands::StockIn {
            code,
            name,
            quantity,
            price,
            date,
            supplier,
            location,
            items,
        } => {
            let mut entries = Vec::new();
            match (code, name, quantity) {
                (Some(code), Some(name), Some(quantity)) => {
                    let mut entry =
                        InboundEntry::new(code, name, quantity).with_unit_price(clamp_price(price));
                    entry.manufacture_date = date;
                    entry.supplier = supplier;
                    entry.location = location;
                    entries.push(entry);
                }
                (None, None, None) => {}
                _ => bail!("--code, --name and --quantity must be given together"),
            }
            let mut unreadable = Vec::new();
            for item in items {
                match parse_item(&item) {
                    Ok(entry) => entries.push(entry),
                    Err(err) => {
                        warn!(item = %item, error = %err, "Skipping unreadable item");
                        unreadable.push((item, err.to_string()));
                    }
                }
            }

            if entries.is_empty() && unreadable.is_empty() {
                bail!("nothing to register: give --code/--name/--quantity or --item");
            }

            let mut store = open_store(loader)?;
            let mut batch =
                register_inbound_batch(&mut store, entries, operations.inventory_batch_limit);
            for (item, reason) in unreadable {
                batch.skip(item, reason);
            }

            emit(json, &batch, || report::render_inbound_batch(&batch))
        }

        Commands::StockOut { name, quantity } => {
            let mut store = open_store(loader)?;
            let outcome = register_outbound(&mut store, &name, quantity)
                .with_context(|| format!("selling {name}"))?;
            emit(json, &outcome, || report::render_outbound_outcome(&outcome))
        }

        Commands::StockList => {
            let store = open_store(loader)?;
            let products = list_products(&store)?;
            emit(json, &products, || report::render_stock_list(&products))
        }

        Commands::HashPassword { password } => {
            let hashed = hash_password(&password)?;
            println!("{hashed}");
            Ok(())
        }
    }
}

fn emit<T, F>(json: bool, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render());
    }
    Ok(())
}

fn open_store(loader: &ConfigLoader) -> Result<SqliteProductRepository> {
    let url = &loader.operations().database_url;
    SqliteProductRepository::connect(url).with_context(|| format!("opening product store {url}"))
}

fn clamp_price(price: Option<Decimal>) -> Decimal {
    match price {
        Some(price) if price < Decimal::ZERO => {
            warn!(%price, "Negative unit price set to zero");
            Decimal::ZERO
        }
        Some(price) => price,
        None => Decimal::ZERO,
    }
}

/// Parses "Name:Role:OvertimeHours". Unknown roles fall back to Worker and
/// negative hours are set to zero.
fn parse_employee(spec: &str) -> Result<(String, Role, Decimal)> {
    let mut parts = spec.rsplitn(3, ':');
    let (Some(hours), Some(role), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("employee '{spec}' must look like Name:Role:OvertimeHours");
    };

    let name = name.trim();
    if name.is_empty() {
        bail!("employee '{spec}' has no name");
    }

    let hours = hours.trim();
    let hours = if hours.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::from_str(&hours.replace(',', "."))
            .map_err(|e| anyhow!("employee '{spec}' has invalid overtime hours: {e}"))?
    };
    let hours = if hours < Decimal::ZERO {
        warn!(employee = %name, %hours, "Negative overtime set to zero");
        Decimal::ZERO
    } else {
        hours
    };

    Ok((name.to_string(), Role::from_label(role.trim()), hours))
}

/// Parses "Code:Name:Quantity[:Price]".
fn parse_item(spec: &str) -> Result<InboundEntry> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let (code, name, quantity, price) = match parts.as_slice() {
        [code, name, quantity] => (code, name, quantity, None),
        [code, name, quantity, price] => (code, name, quantity, Some(price)),
        _ => bail!("item '{spec}' must look like Code:Name:Quantity[:Price]"),
    };

    let code = code
        .parse::<i64>()
        .with_context(|| format!("item '{spec}' has an invalid code"))?;
    let quantity = quantity
        .parse::<i64>()
        .with_context(|| format!("item '{spec}' has an invalid quantity"))?;
    let price = price
        .map(|p| Decimal::from_str(&p.replace(',', ".")))
        .transpose()
        .map_err(|e| anyhow!("item '{spec}' has an invalid price: {e}"))?;

    Ok(InboundEntry::new(code, *name, quantity).with_unit_price(clamp_price(price)))
}
