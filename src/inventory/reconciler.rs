//! Inventory entry and exit reconciliation.
//!
//! Entries find a product by code and either add to its stock or create it.
//! Exits find a product by name and sell what the stock allows: the full
//! request, whatever is left, or nothing when the product is exhausted.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Product;

use super::repository::ProductRepository;

/// A batch of units arriving in stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundEntry {
    /// Product code used to find an existing product.
    pub code: i64,
    /// Product name; required.
    pub name: String,
    /// Units received; must be positive.
    pub quantity: i64,
    /// Price per unit; zero keeps the stored price of an existing product.
    pub unit_price: Decimal,
    /// Manufacture date of the batch.
    pub manufacture_date: Option<String>,
    /// Supplier of the batch.
    pub supplier: Option<String>,
    /// Where the batch is stored.
    pub location: Option<String>,
}

impl InboundEntry {
    /// Creates an entry with no price and no optional fields.
    pub fn new(code: i64, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            code,
            name: name.into(),
            quantity,
            ..Self::default()
        }
    }

    /// Sets the unit price.
    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Sets the manufacture date.
    pub fn with_manufacture_date(mut self, date: impl Into<String>) -> Self {
        self.manufacture_date = Some(date.into());
        self
    }

    /// Sets the supplier.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Sets the storage location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// What an inbound registration did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundReceipt {
    /// The product after the entry.
    pub product: Product,
    /// True if the entry created the product.
    pub is_new: bool,
    /// Stock before the entry (zero for new products).
    pub previous_quantity: i64,
    /// Units added by the entry.
    pub quantity_added: i64,
}

/// An entry left out of a batch and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// The entry as given, e.g. `"2: :3"` or `"code 2"`.
    pub entry: String,
    /// Why it was not registered.
    pub reason: String,
}

/// What a batch of inbound registrations did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InboundBatch {
    /// Receipts of the entries that were registered, in input order.
    pub receipts: Vec<InboundReceipt>,
    /// Entries that failed and were skipped.
    pub skipped: Vec<SkippedEntry>,
    /// Entries dropped because the batch was over its limit.
    pub truncated: usize,
}

impl InboundBatch {
    /// Products created by the batch.
    pub fn new_products(&self) -> usize {
        self.receipts.iter().filter(|r| r.is_new).count()
    }

    /// Existing products that gained stock.
    pub fn updated_products(&self) -> usize {
        self.receipts.len() - self.new_products()
    }

    /// Records an entry that failed before reaching the store.
    pub fn skip(&mut self, entry: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedEntry {
            entry: entry.into(),
            reason: reason.into(),
        });
    }
}

/// A completed sale out of stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    /// The product after the sale.
    pub product: Product,
    /// Stock before the sale.
    pub previous_stock: i64,
    /// Price per unit at the time of the sale.
    pub unit_price: Decimal,
    /// Units the customer asked for.
    pub quantity_requested: i64,
    /// Units actually sold.
    pub quantity_sold: i64,
    /// Units sold x unit price.
    pub sale_value: Decimal,
    /// Stock after the sale.
    pub remaining_stock: i64,
}

impl Sale {
    /// Units requested but not delivered.
    pub fn shortfall(&self) -> i64 {
        self.quantity_requested - self.quantity_sold
    }
}

/// Flat status of an outbound registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboundStatus {
    /// The full request was sold.
    Success,
    /// Part of the request was sold and the stock is now empty.
    Partial,
    /// Nothing was sold.
    Error,
}

impl OutboundStatus {
    /// Returns the status as a lowercase string.
    pub fn as_str(self) -> &'static str {
        match self {
            OutboundStatus::Success => "success",
            OutboundStatus::Partial => "partial",
            OutboundStatus::Error => "error",
        }
    }
}

/// The result of an outbound registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutboundOutcome {
    /// No product has this name.
    NotFound {
        /// The name that was searched for.
        name: String,
    },
    /// Stock covered the whole request.
    Fulfilled(Sale),
    /// Stock covered part of the request; the remainder was sold.
    Partial(Sale),
    /// The product has no stock; nothing was changed.
    Exhausted {
        /// The product as found.
        product: Product,
        /// Units the customer asked for.
        quantity_requested: i64,
    },
}

impl OutboundOutcome {
    /// Returns the flat status of the outcome.
    pub fn status(&self) -> OutboundStatus {
        match self {
            OutboundOutcome::Fulfilled(_) => OutboundStatus::Success,
            OutboundOutcome::Partial(_) => OutboundStatus::Partial,
            OutboundOutcome::NotFound { .. } | OutboundOutcome::Exhausted { .. } => {
                OutboundStatus::Error
            }
        }
    }

    /// Returns the sale, if anything was sold.
    pub fn sale(&self) -> Option<&Sale> {
        match self {
            OutboundOutcome::Fulfilled(sale) | OutboundOutcome::Partial(sale) => Some(sale),
            _ => None,
        }
    }

    /// Units sold (zero when nothing was sold).
    pub fn quantity_sold(&self) -> i64 {
        self.sale().map_or(0, |sale| sale.quantity_sold)
    }

    /// Value of the sale (zero when nothing was sold).
    pub fn sale_value(&self) -> Decimal {
        self.sale().map_or(Decimal::ZERO, |sale| sale.sale_value)
    }
}

fn require_name(name: &str) -> EngineResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::validation("name", "product name is required"));
    }
    Ok(name)
}

fn require_positive_quantity(quantity: i64) -> EngineResult<i64> {
    if quantity <= 0 {
        return Err(EngineError::validation(
            "quantity",
            "quantity must be greater than zero",
        ));
    }
    Ok(quantity)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Runs the writes of one registration and commits them, discarding them
/// instead if any step fails.
fn write_and_commit<R, T, F>(store: &mut R, write: F) -> EngineResult<T>
where
    R: ProductRepository + ?Sized,
    F: FnOnce(&mut R) -> EngineResult<T>,
{
    let result = write(&mut *store).and_then(|value| store.commit().map(|()| value));
    if let Err(err) = &result {
        tracing::warn!(error = %err, "Discarding pending stock writes");
        if let Err(rollback_err) = store.rollback() {
            tracing::error!(error = %rollback_err, "Failed to discard pending stock writes");
        }
    }
    result
}

/// Registers units arriving in stock.
///
/// Looks the product up by exact code. An existing product gains the units;
/// its price is replaced only by a positive price and its optional fields only
/// by non-empty values. Otherwise a new product is created with empty
/// optional fields where none were given. Each call commits once; a failed
/// call rolls back whatever it wrote.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the name is empty or the quantity
/// is not positive, and [`EngineError::Storage`] when the store fails.
///
/// # Examples
///
/// ```
/// use quatro_cantos::inventory::{register_inbound, InboundEntry, InMemoryProductRepository};
///
/// let mut store = InMemoryProductRepository::new();
/// let first = register_inbound(&mut store, InboundEntry::new(101, "Pallet PBR", 10)).unwrap();
/// assert!(first.is_new);
///
/// let second = register_inbound(&mut store, InboundEntry::new(101, "Pallet PBR", 5)).unwrap();
/// assert!(!second.is_new);
/// assert_eq!(second.product.quantity, 15);
/// ```
pub fn register_inbound<R>(store: &mut R, entry: InboundEntry) -> EngineResult<InboundReceipt>
where
    R: ProductRepository + ?Sized,
{
    let name = require_name(&entry.name)?.to_string();
    let quantity = require_positive_quantity(entry.quantity)?;
    let manufacture_date = non_empty(entry.manufacture_date);
    let supplier = non_empty(entry.supplier);
    let location = non_empty(entry.location);

    let receipt = write_and_commit(store, |store| match store.find_by_code(entry.code)? {
        Some(mut product) => {
            let previous_quantity = product.quantity;
            product.quantity = previous_quantity.checked_add(quantity).ok_or_else(|| {
                EngineError::validation("quantity", "stock would exceed the maximum quantity")
            })?;
            if entry.unit_price > Decimal::ZERO {
                product.unit_price = entry.unit_price;
            }
            if let Some(date) = manufacture_date {
                product.manufacture_date = date;
            }
            if let Some(supplier) = supplier {
                product.supplier = supplier;
            }
            if let Some(location) = location {
                product.location = location;
            }

            store.update(&product)?;
            Ok(InboundReceipt {
                product,
                is_new: false,
                previous_quantity,
                quantity_added: quantity,
            })
        }
        None => {
            let product = Product {
                quantity,
                unit_price: entry.unit_price.max(Decimal::ZERO),
                manufacture_date: manufacture_date.unwrap_or_default(),
                supplier: supplier.unwrap_or_default(),
                location: location.unwrap_or_default(),
                ..Product::new(entry.code, name)
            };

            let product = store.insert(product)?;
            Ok(InboundReceipt {
                product,
                is_new: true,
                previous_quantity: 0,
                quantity_added: quantity,
            })
        }
    })?;

    tracing::info!(
        code = receipt.product.code,
        product = %receipt.product.name,
        added = quantity,
        stock = receipt.product.quantity,
        is_new = receipt.is_new,
        "Registered inbound stock"
    );

    Ok(receipt)
}

/// Registers a batch of entries, at most `limit` of them.
///
/// Entries past the limit are dropped with a warning. Each remaining entry
/// is registered on its own: one that fails is skipped and logged, and the
/// rest of the batch still runs.
///
/// # Examples
///
/// ```
/// use quatro_cantos::inventory::{register_inbound_batch, InboundEntry, InMemoryProductRepository};
///
/// let mut store = InMemoryProductRepository::new();
/// let entries = vec![
///     InboundEntry::new(1, "Pallet", 5),
///     InboundEntry::new(2, " ", 3),
///     InboundEntry::new(3, "Caixa", 2),
/// ];
/// let batch = register_inbound_batch(&mut store, entries, 10);
/// assert_eq!(batch.new_products(), 2);
/// assert_eq!(batch.skipped.len(), 1);
/// ```
pub fn register_inbound_batch<R>(
    store: &mut R,
    mut entries: Vec<InboundEntry>,
    limit: usize,
) -> InboundBatch
where
    R: ProductRepository + ?Sized,
{
    let mut batch = InboundBatch::default();

    if entries.len() > limit {
        batch.truncated = entries.len() - limit;
        tracing::warn!(
            given = entries.len(),
            limit,
            dropped = batch.truncated,
            "Inbound batch over its limit, extra entries dropped"
        );
        entries.truncate(limit);
    }

    for entry in entries {
        let label = format!("code {}", entry.code);
        match register_inbound(store, entry) {
            Ok(receipt) => batch.receipts.push(receipt),
            Err(err) => {
                tracing::warn!(entry = %label, error = %err, "Skipping inbound entry");
                batch.skip(label, err.to_string());
            }
        }
    }

    tracing::info!(
        new = batch.new_products(),
        updated = batch.updated_products(),
        skipped = batch.skipped.len(),
        "Registered inbound batch"
    );

    batch
}

/// Registers units leaving stock by sale.
///
/// Looks the product up by name, ignoring case. A product with enough stock
/// sells the full request; one with less sells everything it has; one with
/// none is reported as exhausted. Only sales commit; a sale whose write
/// fails is rolled back.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the name is empty or the quantity
/// is not positive, and [`EngineError::Storage`] when the store fails.
/// A missing or exhausted product is an [`OutboundOutcome`], not an error.
///
/// # Examples
///
/// ```
/// use quatro_cantos::inventory::{
///     register_inbound, register_outbound, InboundEntry, InMemoryProductRepository,
///     OutboundStatus,
/// };
///
/// let mut store = InMemoryProductRepository::new();
/// register_inbound(&mut store, InboundEntry::new(7, "Caixa", 3)).unwrap();
///
/// let outcome = register_outbound(&mut store, "caixa", 5).unwrap();
/// assert_eq!(outcome.status(), OutboundStatus::Partial);
/// assert_eq!(outcome.quantity_sold(), 3);
/// ```
pub fn register_outbound<R>(
    store: &mut R,
    name: &str,
    quantity_requested: i64,
) -> EngineResult<OutboundOutcome>
where
    R: ProductRepository + ?Sized,
{
    let name = require_name(name)?;
    let quantity_requested = require_positive_quantity(quantity_requested)?;

    let Some(mut product) = store.find_by_name_ci(name)? else {
        tracing::warn!(product = %name, "Outbound product not found");
        return Ok(OutboundOutcome::NotFound {
            name: name.to_string(),
        });
    };

    let previous_stock = product.quantity;
    let unit_price = product.unit_price;

    if previous_stock <= 0 {
        tracing::warn!(product = %product.name, requested = quantity_requested, "Product exhausted");
        return Ok(OutboundOutcome::Exhausted {
            product,
            quantity_requested,
        });
    }

    let quantity_sold = previous_stock.min(quantity_requested);
    let sale_value = Decimal::from(quantity_sold)
        .checked_mul(unit_price)
        .ok_or_else(|| {
            EngineError::validation("sale_value", "sale value exceeds the decimal range")
        })?;
    product.quantity = previous_stock - quantity_sold;
    write_and_commit(store, |store| store.update(&product))?;

    let sale = Sale {
        remaining_stock: product.quantity,
        product,
        previous_stock,
        unit_price,
        quantity_requested,
        quantity_sold,
        sale_value,
    };

    if sale.quantity_sold < quantity_requested {
        tracing::warn!(
            product = %sale.product.name,
            requested = quantity_requested,
            sold = sale.quantity_sold,
            "Partial fulfillment, stock exhausted"
        );
        Ok(OutboundOutcome::Partial(sale))
    } else {
        tracing::info!(
            product = %sale.product.name,
            sold = sale.quantity_sold,
            remaining = sale.remaining_stock,
            "Registered outbound stock"
        );
        Ok(OutboundOutcome::Fulfilled(sale))
    }
}

/// Returns every product in the store ordered by code.
pub fn list_products<R>(store: &R) -> EngineResult<Vec<Product>>
where
    R: ProductRepository + ?Sized,
{
    store.list()
}

/// Returns the total value of the given stock.
pub fn stock_value(products: &[Product]) -> Decimal {
    products.iter().map(Product::stock_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InMemoryProductRepository;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn stocked_store(name: &str, quantity: i64, price: &str) -> InMemoryProductRepository {
        let mut store = InMemoryProductRepository::new();
        register_inbound(
            &mut store,
            InboundEntry::new(1, name, quantity).with_unit_price(dec(price)),
        )
        .unwrap();
        store
    }

    #[test]
    fn test_inbound_creates_new_product() {
        let mut store = InMemoryProductRepository::new();
        let entry = InboundEntry::new(101, "Pallet PBR", 10)
            .with_unit_price(dec("45.50"))
            .with_supplier("Madeireira Sul")
            .with_location("A-3")
            .with_manufacture_date("2025-03-01");

        let receipt = register_inbound(&mut store, entry).unwrap();

        assert!(receipt.is_new);
        assert_eq!(receipt.previous_quantity, 0);
        assert_eq!(receipt.product.id, Some(1));
        assert_eq!(receipt.product.quantity, 10);
        assert_eq!(receipt.product.unit_price, dec("45.50"));
        assert_eq!(receipt.product.supplier, "Madeireira Sul");
        assert_eq!(receipt.product.location, "A-3");
        assert_eq!(receipt.product.manufacture_date, "2025-03-01");
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn test_inbound_new_product_defaults_optional_fields_to_empty() {
        let mut store = InMemoryProductRepository::new();
        let receipt = register_inbound(&mut store, InboundEntry::new(2, "Prego", 100)).unwrap();

        assert_eq!(receipt.product.unit_price, Decimal::ZERO);
        assert_eq!(receipt.product.supplier, "");
        assert_eq!(receipt.product.location, "");
        assert_eq!(receipt.product.manufacture_date, "");
    }

    #[test]
    fn test_inbound_same_code_increments_quantity() {
        let mut store = InMemoryProductRepository::new();
        register_inbound(&mut store, InboundEntry::new(101, "Pallet PBR", 10)).unwrap();
        let receipt = register_inbound(&mut store, InboundEntry::new(101, "Pallet PBR", 5)).unwrap();

        assert!(!receipt.is_new);
        assert_eq!(receipt.previous_quantity, 10);
        assert_eq!(receipt.quantity_added, 5);
        assert_eq!(receipt.product.quantity, 15);
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.commit_count(), 2);
    }

    #[test]
    fn test_inbound_keeps_price_when_new_price_is_zero() {
        let mut store = stocked_store("Cola", 4, "12.50");
        let receipt = register_inbound(&mut store, InboundEntry::new(1, "Cola", 1)).unwrap();
        assert_eq!(receipt.product.unit_price, dec("12.50"));
    }

    #[test]
    fn test_inbound_replaces_price_when_new_price_is_positive() {
        let mut store = stocked_store("Cola", 4, "12.50");
        let receipt = register_inbound(
            &mut store,
            InboundEntry::new(1, "Cola", 1).with_unit_price(dec("13.90")),
        )
        .unwrap();
        assert_eq!(receipt.product.unit_price, dec("13.90"));
    }

    #[test]
    fn test_inbound_replaces_optional_fields_only_when_non_empty() {
        let mut store = InMemoryProductRepository::new();
        register_inbound(
            &mut store,
            InboundEntry::new(1, "Cola", 1)
                .with_supplier("Fornecedor A")
                .with_location("B-1"),
        )
        .unwrap();

        let receipt = register_inbound(
            &mut store,
            InboundEntry::new(1, "Cola", 1)
                .with_supplier("")
                .with_location("C-2"),
        )
        .unwrap();

        assert_eq!(receipt.product.supplier, "Fornecedor A");
        assert_eq!(receipt.product.location, "C-2");
    }

    #[test]
    fn test_inbound_rejects_empty_name() {
        let mut store = InMemoryProductRepository::new();
        let result = register_inbound(&mut store, InboundEntry::new(1, "   ", 1));

        match result {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(store.commit_count(), 0);
    }

    #[test]
    fn test_inbound_rejects_non_positive_quantity() {
        let mut store = InMemoryProductRepository::new();
        for quantity in [0, -3] {
            match register_inbound(&mut store, InboundEntry::new(1, "Cola", quantity)) {
                Err(EngineError::Validation { field, .. }) => assert_eq!(field, "quantity"),
                other => panic!("Expected validation error, got {:?}", other),
            }
        }
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_inbound_clamps_negative_price_on_new_product() {
        let mut store = InMemoryProductRepository::new();
        let receipt = register_inbound(
            &mut store,
            InboundEntry::new(1, "Cola", 1).with_unit_price(dec("-5")),
        )
        .unwrap();
        assert_eq!(receipt.product.unit_price, Decimal::ZERO);
    }

    #[test]
    fn test_outbound_full_fulfillment() {
        let mut store = stocked_store("Tábua", 10, "7.25");
        let outcome = register_outbound(&mut store, "Tábua", 4).unwrap();

        assert_eq!(outcome.status(), OutboundStatus::Success);
        let sale = outcome.sale().unwrap();
        assert_eq!(sale.previous_stock, 10);
        assert_eq!(sale.quantity_sold, 4);
        assert_eq!(sale.remaining_stock, 6);
        assert_eq!(sale.sale_value, dec("29.00"));
        assert_eq!(sale.shortfall(), 0);
        assert_eq!(store.find_by_code(1).unwrap().unwrap().quantity, 6);
    }

    #[test]
    fn test_outbound_exact_stock_is_full_fulfillment() {
        let mut store = stocked_store("Tábua", 4, "7.25");
        let outcome = register_outbound(&mut store, "Tábua", 4).unwrap();

        assert!(matches!(outcome, OutboundOutcome::Fulfilled(_)));
        assert_eq!(outcome.sale().unwrap().remaining_stock, 0);
    }

    #[test]
    fn test_outbound_partial_fulfillment_sells_remaining_stock() {
        let mut store = stocked_store("Tábua", 3, "7.25");
        let outcome = register_outbound(&mut store, "Tábua", 10).unwrap();

        assert_eq!(outcome.status(), OutboundStatus::Partial);
        let sale = outcome.sale().unwrap();
        assert_eq!(sale.quantity_sold, 3);
        assert_eq!(sale.remaining_stock, 0);
        assert_eq!(sale.sale_value, dec("21.75"));
        assert_eq!(sale.shortfall(), 7);
        assert_eq!(store.find_by_code(1).unwrap().unwrap().quantity, 0);
    }

    #[test]
    fn test_outbound_exhausted_does_not_mutate_or_commit() {
        let mut store = stocked_store("Tábua", 2, "7.25");
        register_outbound(&mut store, "Tábua", 2).unwrap();
        let commits = store.commit_count();

        let outcome = register_outbound(&mut store, "Tábua", 1).unwrap();

        assert!(matches!(outcome, OutboundOutcome::Exhausted { .. }));
        assert_eq!(outcome.status(), OutboundStatus::Error);
        assert_eq!(outcome.quantity_sold(), 0);
        assert_eq!(outcome.sale_value(), Decimal::ZERO);
        assert_eq!(store.commit_count(), commits);
        assert_eq!(store.find_by_code(1).unwrap().unwrap().quantity, 0);
    }

    #[test]
    fn test_outbound_not_found() {
        let mut store = stocked_store("Tábua", 2, "7.25");
        let outcome = register_outbound(&mut store, "Parafuso", 1).unwrap();

        assert_eq!(
            outcome,
            OutboundOutcome::NotFound {
                name: "Parafuso".to_string()
            }
        );
        assert_eq!(outcome.status(), OutboundStatus::Error);
    }

    #[test]
    fn test_outbound_matches_name_ignoring_case() {
        let mut store = stocked_store("Pallet PBR", 5, "45.50");
        let outcome = register_outbound(&mut store, "pallet pbr", 1).unwrap();
        assert_eq!(outcome.status(), OutboundStatus::Success);
    }

    #[test]
    fn test_outbound_rejects_empty_name_and_bad_quantity() {
        let mut store = stocked_store("Tábua", 2, "7.25");
        assert!(matches!(
            register_outbound(&mut store, "", 1),
            Err(EngineError::Validation { .. })
        ));
        assert!(matches!(
            register_outbound(&mut store, "Tábua", 0),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(OutboundStatus::Success.as_str(), "success");
        assert_eq!(OutboundStatus::Partial.as_str(), "partial");
        assert_eq!(OutboundStatus::Error.as_str(), "error");
    }

    #[test]
    fn test_stock_value_totals_products() {
        let mut store = InMemoryProductRepository::new();
        register_inbound(
            &mut store,
            InboundEntry::new(1, "A", 2).with_unit_price(dec("10.00")),
        )
        .unwrap();
        register_inbound(
            &mut store,
            InboundEntry::new(2, "B", 3).with_unit_price(dec("1.50")),
        )
        .unwrap();

        let products = list_products(&store).unwrap();
        assert_eq!(stock_value(&products), dec("24.50"));
    }

    #[test]
    fn test_batch_skips_failed_entries_and_keeps_going() {
        let mut store = InMemoryProductRepository::new();
        register_inbound(&mut store, InboundEntry::new(3, "Caixa", 1)).unwrap();

        let entries = vec![
            InboundEntry::new(1, "Pallet", 5),
            InboundEntry::new(2, " ", 3),
            InboundEntry::new(3, "Caixa", 2),
        ];
        let batch = register_inbound_batch(&mut store, entries, 10);

        assert_eq!(batch.receipts.len(), 2);
        assert_eq!(batch.new_products(), 1);
        assert_eq!(batch.updated_products(), 1);
        assert_eq!(batch.skipped[0].entry, "code 2");
        assert!(batch.skipped[0].reason.contains("name"));
        assert_eq!(batch.truncated, 0);

        let names: Vec<String> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Pallet", "Caixa"]);
        assert_eq!(store.find_by_code(3).unwrap().unwrap().quantity, 3);
        assert!(!store.has_pending_writes());
    }

    #[test]
    fn test_batch_over_limit_is_truncated() {
        let mut store = InMemoryProductRepository::new();
        let entries = (1..=12)
            .map(|code| InboundEntry::new(code, format!("Item {code}"), 1))
            .collect();

        let batch = register_inbound_batch(&mut store, entries, 10);

        assert_eq!(batch.receipts.len(), 10);
        assert_eq!(batch.truncated, 2);
        assert!(store.find_by_code(10).unwrap().is_some());
        assert!(store.find_by_code(11).unwrap().is_none());
    }

    /// Store whose next commit fails once.
    struct FlakyCommitStore {
        inner: InMemoryProductRepository,
        fail_next_commit: bool,
    }

    impl ProductRepository for FlakyCommitStore {
        fn find_by_code(&self, code: i64) -> EngineResult<Option<Product>> {
            self.inner.find_by_code(code)
        }

        fn find_by_name_ci(&self, name: &str) -> EngineResult<Option<Product>> {
            self.inner.find_by_name_ci(name)
        }

        fn insert(&mut self, product: Product) -> EngineResult<Product> {
            self.inner.insert(product)
        }

        fn update(&mut self, product: &Product) -> EngineResult<()> {
            self.inner.update(product)
        }

        fn commit(&mut self) -> EngineResult<()> {
            if std::mem::take(&mut self.fail_next_commit) {
                return Err(EngineError::Storage {
                    message: "disk full".to_string(),
                });
            }
            self.inner.commit()
        }

        fn rollback(&mut self) -> EngineResult<()> {
            self.inner.rollback()
        }

        fn list(&self) -> EngineResult<Vec<Product>> {
            self.inner.list()
        }
    }

    #[test]
    fn test_failed_inbound_commit_is_rolled_back() {
        let mut store = FlakyCommitStore {
            inner: InMemoryProductRepository::new(),
            fail_next_commit: true,
        };

        let result = register_inbound(&mut store, InboundEntry::new(1, "Pallet", 5));
        assert!(matches!(result, Err(EngineError::Storage { .. })));
        assert!(!store.inner.has_pending_writes());

        register_inbound(&mut store, InboundEntry::new(2, "Caixa", 1)).unwrap();
        let codes: Vec<i64> = store.inner.committed().iter().map(|p| p.code).collect();
        assert_eq!(codes, vec![2]);
    }

    #[test]
    fn test_failed_outbound_commit_keeps_the_stock() {
        let mut store = FlakyCommitStore {
            inner: stocked_store("Caixa", 4, "2.00"),
            fail_next_commit: true,
        };

        assert!(register_outbound(&mut store, "caixa", 3).is_err());
        assert_eq!(store.find_by_code(1).unwrap().unwrap().quantity, 4);
    }
}
