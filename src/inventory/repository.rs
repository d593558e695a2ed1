//! The product store interface.

use crate::error::EngineResult;
use crate::models::Product;

/// Persistence operations the inventory reconciler relies on.
///
/// Writes made through [`insert`](ProductRepository::insert) and
/// [`update`](ProductRepository::update) are visible to later reads on the
/// same store immediately, and become durable on
/// [`commit`](ProductRepository::commit), or are discarded by
/// [`rollback`](ProductRepository::rollback).
pub trait ProductRepository {
    /// Finds the first product with exactly this code.
    fn find_by_code(&self, code: i64) -> EngineResult<Option<Product>>;

    /// Finds the first product whose name matches, ignoring case.
    fn find_by_name_ci(&self, name: &str) -> EngineResult<Option<Product>>;

    /// Stores a new product and returns it with its assigned id.
    fn insert(&mut self, product: Product) -> EngineResult<Product>;

    /// Overwrites a stored product. The product must carry an id.
    fn update(&mut self, product: &Product) -> EngineResult<()>;

    /// Makes every pending write durable.
    fn commit(&mut self) -> EngineResult<()>;

    /// Discards every pending write. A no-op when nothing is pending.
    fn rollback(&mut self) -> EngineResult<()>;

    /// Returns every stored product ordered by code.
    fn list(&self) -> EngineResult<Vec<Product>>;
}
