//! Product model.
//!
//! This module defines the [`Product`] stored in the inventory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit of measure given to products registered without one.
pub const DEFAULT_UNIT_OF_MEASURE: &str = "UN";

/// A product held in stock.
///
/// Codes identify products on entry; names identify them on exit. Neither is
/// enforced unique by the store.
///
/// # Example
///
/// ```
/// use quatro_cantos::models::Product;
/// use rust_decimal::Decimal;
///
/// let mut product = Product::new(101, "Pallet PBR");
/// product.quantity = 4;
/// product.unit_price = Decimal::new(4550, 2);
/// assert_eq!(product.stock_value(), Decimal::new(18200, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned by the store; `None` until first inserted.
    pub id: Option<i64>,
    /// The product code typed on entry.
    pub code: i64,
    /// The product name.
    pub name: String,
    /// Unit of measure (UN, KG, M, L, PC, SC, ...).
    pub unit_of_measure: String,
    /// Quantity on hand. Never negative.
    pub quantity: i64,
    /// Price per unit. Never negative.
    pub unit_price: Decimal,
    /// Supplier name, empty when unknown.
    pub supplier: String,
    /// Storage location in the warehouse, empty when unknown.
    pub location: String,
    /// Manufacture date as typed by the operator, empty when unknown.
    pub manufacture_date: String,
}

impl Product {
    /// Creates an unsaved product with no stock and empty optional fields.
    pub fn new(code: i64, name: impl Into<String>) -> Self {
        Self {
            id: None,
            code,
            name: name.into(),
            unit_of_measure: DEFAULT_UNIT_OF_MEASURE.to_string(),
            quantity: 0,
            unit_price: Decimal::ZERO,
            supplier: String::new(),
            location: String::new(),
            manufacture_date: String::new(),
        }
    }

    /// Returns the value of the stock on hand (quantity x unit price).
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }

    /// Returns true if no units are left.
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }
}
