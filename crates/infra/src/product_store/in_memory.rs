use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::ProductId;
use catalog_products::{NewProduct, Product, ProductFilter};

use super::r#trait::{ProductStore, StoreError};

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<ProductId, Product>,
    codes: HashMap<String, ProductId>,
}

/// In-memory product store.
///
/// Intended for tests/dev. The code check and the insert happen under one
/// write lock, which plays the role of the UNIQUE constraint. Ids start at 1
/// and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    state: RwLock<State>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        match self.state.read() {
            Ok(state) => state.rows.len(),
            Err(poisoned) => poisoned.into_inner().rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, draft: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;

        if state.codes.contains_key(draft.code()) {
            tracing::debug!(code = %draft.code(), "duplicate product code rejected");
            return Err(StoreError::duplicate_code(draft.code()));
        }

        state.last_id += 1;
        let id = ProductId::new(state.last_id);
        let product = Product::from_draft(id, draft);

        state.codes.insert(product.code.clone(), id);
        state.rows.insert(id, product.clone());

        tracing::debug!(id = %id, code = %product.code, "product created");
        Ok(product)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn list_all(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;

        // Code lookups go through the index; everything else is a scan in id order.
        if let Some(code) = filter.code.as_deref() {
            return Ok(state
                .codes
                .get(code)
                .and_then(|id| state.rows.get(id))
                .filter(|p| filter.matches(p))
                .cloned()
                .into_iter()
                .collect());
        }

        Ok(state
            .rows
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn draft(name: &str, code: &str) -> NewProduct {
        NewProduct::new(name, code, "tools", "9.99").unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = InMemoryProductStore::new();
        let created = store.create(draft("Widget", "W1")).await.unwrap();
        assert_eq!(created.id, ProductId::new(1));

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected_without_writing() {
        let store = InMemoryProductStore::new();
        store.create(draft("Widget", "W1")).await.unwrap();

        let err = store.create(draft("Other", "W1")).await.unwrap_err();
        assert_eq!(err, StoreError::duplicate_code("W1"));
        assert_eq!(store.len(), 1);

        let all = store.list_all(&ProductFilter::default()).await.unwrap();
        assert_eq!(all[0].name, "Widget");
    }

    #[tokio::test]
    async fn len_still_counts_rows_after_poisoning() {
        let store = Arc::new(InMemoryProductStore::new());
        store.create(draft("Widget", "W1")).await.unwrap();
        store.create(draft("Gadget", "G1")).await.unwrap();

        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(store.state.is_poisoned());
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert!(matches!(
            store.get_by_id(ProductId::new(1)).await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = InMemoryProductStore::new();
        let err = store.get_by_id(ProductId::new(999)).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound { id: ProductId::new(999) });
    }

    #[tokio::test]
    async fn list_all_applies_exact_match_filters() {
        let store = InMemoryProductStore::new();
        store.create(draft("X", "A")).await.unwrap();
        store.create(draft("X", "B")).await.unwrap();
        store.create(draft("Y", "C")).await.unwrap();

        let by_name = store.list_all(&ProductFilter::by_name("X")).await.unwrap();
        assert_eq!(by_name.iter().map(|p| p.code.as_str()).collect::<Vec<_>>(), ["A", "B"]);

        let by_code = store.list_all(&ProductFilter::by_code("A")).await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "A");

        let both = ProductFilter::new(Some("X".into()), Some("B".into()));
        let both = store.list_all(&both).await.unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].code, "B");

        let mismatch = ProductFilter::new(Some("Y".into()), Some("A".into()));
        assert!(store.list_all(&mismatch).await.unwrap().is_empty());

        let all = store.list_all(&ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_on_same_code_yield_one_winner() {
        let store = Arc::new(InMemoryProductStore::new());
        let n = 32;

        let handles: Vec<_> = (0..n)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(draft(&format!("racer-{i}"), "SAME")).await })
            })
            .collect();

        let mut ok = 0;
        let mut dup = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(StoreError::DuplicateCode { code }) => {
                    assert_eq!(code, "SAME");
                    dup += 1;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(dup, n - 1);
        let rows = store.list_all(&ProductFilter::by_code("SAME")).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
