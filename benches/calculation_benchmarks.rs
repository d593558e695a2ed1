//! Performance benchmarks for the Quatro Cantos engine.
//!
//! Covers the hot paths of a monthly run:
//! - Tax withholding for a single salary
//! - One pay record with its audit trail
//! - Payroll sheets of 100 and 1000 employees
//! - Stock entries and exits against the in-memory and SQLite stores
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use quatro_cantos::calculation::{
    FixedCosts, compute_capacity, compute_financials, compute_inss, compute_ir, process_employee,
    summarize_payroll,
};
use quatro_cantos::inventory::{
    InMemoryProductRepository, InboundEntry, SqliteProductRepository, register_inbound,
    register_outbound,
};
use quatro_cantos::models::{PayRecord, Role};

/// Builds a team cycling through every role with varying overtime.
fn create_team(size: usize) -> Vec<(String, Role, Decimal)> {
    (0..size)
        .map(|i| {
            let role = Role::ALL[i % Role::ALL.len()];
            let overtime = Decimal::from((i % 25) as i64);
            (format!("emp_{:04}", i), role, overtime)
        })
        .collect()
}

fn process_team(team: &[(String, Role, Decimal)]) -> Vec<PayRecord> {
    team.iter()
        .map(|(name, role, hours)| process_employee(name, *role, *hours).unwrap())
        .collect()
}

/// Benchmark: INSS and IR for one salary.
fn bench_tax(c: &mut Criterion) {
    let gross = Decimal::new(675000, 2);

    c.bench_function("inss_and_ir", |b| {
        b.iter(|| {
            let inss = compute_inss(black_box(gross));
            black_box(compute_ir(gross - inss))
        })
    });
}

/// Benchmark: One pay record with audit trail.
fn bench_single_employee(c: &mut Criterion) {
    let overtime = Decimal::from(10);

    c.bench_function("single_employee", |b| {
        b.iter(|| black_box(process_employee("Ana", Role::Worker, black_box(overtime)).unwrap()))
    });
}

/// Benchmark: Payroll sheets of increasing size.
fn bench_payroll_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_batches");

    for size in [100usize, 1000] {
        let team = create_team(size);
        group.throughput(Throughput::Elements(size as u64));
        if size >= 1000 {
            group.sample_size(10);
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &team, |b, team| {
            b.iter(|| black_box(summarize_payroll(process_team(team))))
        });
    }

    group.finish();
}

/// Benchmark: Capacity and financial projections.
fn bench_projections(c: &mut Criterion) {
    let costs = FixedCosts {
        water: Decimal::from(1000),
        electricity: Decimal::from(3000),
        taxes: Decimal::from(6000),
        salaries: Decimal::from(40000),
    };

    c.bench_function("capacity_three_shifts", |b| {
        b.iter(|| black_box(compute_capacity(black_box(3))))
    });
    c.bench_function("financials", |b| {
        b.iter(|| black_box(compute_financials(&costs, black_box(1000)).unwrap()))
    });
}

/// Benchmark: 100 entries then 100 exits.
fn bench_stock_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_cycle");
    group.throughput(Throughput::Elements(200));

    group.bench_function("in_memory", |b| {
        b.iter(|| {
            let mut store = InMemoryProductRepository::new();
            for code in 0..100 {
                register_inbound(&mut store, InboundEntry::new(code, format!("P{code}"), 10))
                    .unwrap();
            }
            for code in 0..100 {
                black_box(register_outbound(&mut store, &format!("p{code}"), 3).unwrap());
            }
        })
    });

    group.sample_size(10);
    group.bench_function("sqlite_memory", |b| {
        b.iter(|| {
            let mut store = SqliteProductRepository::open_in_memory().unwrap();
            for code in 0..100 {
                register_inbound(&mut store, InboundEntry::new(code, format!("P{code}"), 10))
                    .unwrap();
            }
            for code in 0..100 {
                black_box(register_outbound(&mut store, &format!("p{code}"), 3).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tax,
    bench_single_employee,
    bench_payroll_batches,
    bench_projections,
    bench_stock_cycle,
);
criterion_main!(benches);
