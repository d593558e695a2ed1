//! In-memory product store.

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::Product;

use super::repository::ProductRepository;

/// A [`ProductRepository`] kept in memory.
///
/// Writes are staged until [`commit`](ProductRepository::commit) and are
/// visible to reads while staged. Used by tests and by dry runs.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    committed: BTreeMap<i64, Product>,
    staged: BTreeMap<i64, Product>,
    next_id: i64,
    commits: usize,
}

impl InMemoryProductRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times [`commit`](ProductRepository::commit) was called.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Returns true if there are writes waiting for a commit.
    pub fn has_pending_writes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Returns committed products only, ignoring staged writes.
    pub fn committed(&self) -> Vec<Product> {
        self.committed.values().cloned().collect()
    }

    fn current(&self) -> impl Iterator<Item = &Product> {
        let staged_only = self
            .staged
            .iter()
            .filter(|(id, _)| !self.committed.contains_key(*id))
            .map(|(_, p)| p);
        let committed = self
            .committed
            .iter()
            .map(|(id, p)| self.staged.get(id).unwrap_or(p));
        committed.chain(staged_only)
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn find_by_code(&self, code: i64) -> EngineResult<Option<Product>> {
        Ok(self.current().find(|p| p.code == code).cloned())
    }

    fn find_by_name_ci(&self, name: &str) -> EngineResult<Option<Product>> {
        let wanted = name.to_lowercase();
        Ok(self
            .current()
            .find(|p| p.name.to_lowercase() == wanted)
            .cloned())
    }

    fn insert(&mut self, mut product: Product) -> EngineResult<Product> {
        self.next_id += 1;
        product.id = Some(self.next_id);
        self.staged.insert(self.next_id, product.clone());
        Ok(product)
    }

    fn update(&mut self, product: &Product) -> EngineResult<()> {
        let id = product.id.ok_or_else(|| EngineError::Storage {
            message: format!("product {} has no id", product.code),
        })?;

        if !self.committed.contains_key(&id) && !self.staged.contains_key(&id) {
            return Err(EngineError::Storage {
                message: format!("product id {id} does not exist"),
            });
        }

        self.staged.insert(id, product.clone());
        Ok(())
    }

    fn commit(&mut self) -> EngineResult<()> {
        self.committed.append(&mut self.staged);
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> EngineResult<()> {
        self.staged.clear();
        Ok(())
    }

    fn list(&self) -> EngineResult<Vec<Product>> {
        let mut products: Vec<Product> = self.current().cloned().collect();
        products.sort_by_key(|p| (p.code, p.id));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = InMemoryProductRepository::new();
        let a = store.insert(Product::new(1, "A")).unwrap();
        let b = store.insert(Product::new(2, "B")).unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[test]
    fn test_staged_writes_are_visible_before_commit() {
        let mut store = InMemoryProductRepository::new();
        store.insert(Product::new(10, "Pallet")).unwrap();

        assert!(store.has_pending_writes());
        assert!(store.committed().is_empty());
        assert!(store.find_by_code(10).unwrap().is_some());
    }

    #[test]
    fn test_commit_moves_staged_writes() {
        let mut store = InMemoryProductRepository::new();
        store.insert(Product::new(10, "Pallet")).unwrap();
        store.commit().unwrap();

        assert!(!store.has_pending_writes());
        assert_eq!(store.committed().len(), 1);
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn test_update_overrides_committed_product() {
        let mut store = InMemoryProductRepository::new();
        let mut product = store.insert(Product::new(10, "Pallet")).unwrap();
        store.commit().unwrap();

        product.quantity = 42;
        store.update(&product).unwrap();

        assert_eq!(store.find_by_code(10).unwrap().unwrap().quantity, 42);
        assert_eq!(store.committed()[0].quantity, 0);
        store.commit().unwrap();
        assert_eq!(store.committed()[0].quantity, 42);
    }

    #[test]
    fn test_rollback_discards_staged_writes() {
        let mut store = InMemoryProductRepository::new();
        let mut product = store.insert(Product::new(10, "Pallet")).unwrap();
        store.commit().unwrap();

        product.quantity = 42;
        store.update(&product).unwrap();
        store.insert(Product::new(11, "Caixa")).unwrap();
        store.rollback().unwrap();

        assert!(!store.has_pending_writes());
        assert_eq!(store.find_by_code(10).unwrap().unwrap().quantity, 0);
        assert!(store.find_by_code(11).unwrap().is_none());
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn test_update_without_id_fails() {
        let mut store = InMemoryProductRepository::new();
        let result = store.update(&Product::new(1, "Ghost"));
        assert!(matches!(result, Err(EngineError::Storage { .. })));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut store = InMemoryProductRepository::new();
        let mut product = Product::new(1, "Ghost");
        product.id = Some(99);
        assert!(store.update(&product).is_err());
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let mut store = InMemoryProductRepository::new();
        store.insert(Product::new(5, "Caixa de Papelão")).unwrap();

        assert!(store.find_by_name_ci("caixa de papelão").unwrap().is_some());
        assert!(store.find_by_name_ci("CAIXA DE PAPELÃO").unwrap().is_some());
        assert!(store.find_by_name_ci("caixa").unwrap().is_none());
    }

    #[test]
    fn test_find_returns_first_match_by_id() {
        let mut store = InMemoryProductRepository::new();
        store.insert(Product::new(7, "Primeiro")).unwrap();
        store.insert(Product::new(7, "Segundo")).unwrap();
        store.commit().unwrap();

        assert_eq!(store.find_by_code(7).unwrap().unwrap().name, "Primeiro");
    }

    #[test]
    fn test_list_orders_by_code() {
        let mut store = InMemoryProductRepository::new();
        store.insert(Product::new(30, "C")).unwrap();
        store.insert(Product::new(10, "A")).unwrap();
        store.commit().unwrap();
        store.insert(Product::new(20, "B")).unwrap();

        let codes: Vec<i64> = store.list().unwrap().iter().map(|p| p.code).collect();
        assert_eq!(codes, vec![10, 20, 30]);
    }
}
