//! In-memory collection of tracked products with write-through persistence.

use parking_lot::Mutex;

use crate::domain::product::Product;
use crate::repository::{ProductStore, RepositoryError, RepositoryResult};

/// Result of writing the collection after a change.
#[derive(Debug)]
pub enum Persistence {
    /// The new collection was written to the store.
    Saved,
    /// Nothing changed so nothing was written.
    Unchanged,
    /// The in-memory change stands but the write failed.
    Failed(RepositoryError),
}

impl Persistence {
    pub fn is_failed(&self) -> bool {
        matches!(self, Persistence::Failed(_))
    }
}

/// Outcome of [`ProductTracker::remove`].
#[derive(Debug)]
pub struct Removal {
    /// The removed product, `None` when the id was not tracked.
    pub removed: Option<Product>,
    pub persistence: Persistence,
}

/// Ordered collection of tracked products, most recently added first.
///
/// Every change is written to the store while the collection lock is held,
/// so the stored payload always matches the latest in-memory state unless a
/// write reports [`Persistence::Failed`].
pub struct ProductTracker<S> {
    store: S,
    products: Mutex<Vec<Product>>,
}

impl<S: ProductStore> ProductTracker<S> {
    /// Initialise the collection from what `store` holds.
    pub fn load(store: S) -> RepositoryResult<Self> {
        let products = store.load_products()?;
        log::info!("Loaded {} tracked product(s)", products.len());
        Ok(Self {
            store,
            products: Mutex::new(products),
        })
    }

    /// Put `product` at the front of the collection.
    pub fn add(&self, product: Product) -> Persistence {
        let mut products = self.products.lock();
        log::info!("Tracking product {} ({})", product.id, product.details.title);
        products.insert(0, product);
        self.persist(&products)
    }

    /// Drop the first product with `id`. Unknown ids are a no-op.
    pub fn remove(&self, id: &str) -> Removal {
        let mut products = self.products.lock();
        let Some(index) = products.iter().position(|product| product.id == id) else {
            return Removal {
                removed: None,
                persistence: Persistence::Unchanged,
            };
        };

        let removed = products.remove(index);
        log::info!("Stopped tracking product {}", removed.id);
        Removal {
            removed: Some(removed),
            persistence: self.persist(&products),
        }
    }

    /// Snapshot of the whole collection in display order.
    pub fn list(&self) -> Vec<Product> {
        self.products.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products
            .lock()
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.products.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.lock().is_empty()
    }

    fn persist(&self, products: &[Product]) -> Persistence {
        match self.store.save_products(products) {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                log::error!("Failed to save tracked products: {err}");
                Persistence::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::tests::sample_details;
    use crate::repository::mock::MockProductStore;

    fn product(title: &str) -> Product {
        Product::track(sample_details(title, &[20.0, 18.0]))
    }

    fn store_with(products: Vec<Product>) -> MockProductStore {
        let mut store = MockProductStore::new();
        store
            .expect_load_products()
            .times(1)
            .returning(move || Ok(products.clone()));
        store
    }

    #[test]
    fn add_prepends_and_saves_full_collection() {
        let existing = product("Kettle");
        let existing_id = existing.id.clone();
        let mut store = store_with(vec![existing]);
        let added = product("Headphones");
        let added_id = added.id.clone();

        let expected = (added_id.clone(), existing_id.clone());
        store
            .expect_save_products()
            .times(1)
            .withf(move |products| {
                products.len() == 2 && products[0].id == expected.0 && products[1].id == expected.1
            })
            .returning(|_| Ok(()));

        let tracker = ProductTracker::load(store).unwrap();
        let persistence = tracker.add(added);

        assert!(matches!(persistence, Persistence::Saved));
        let ids: Vec<String> = tracker.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![added_id, existing_id]);
    }

    #[test]
    fn add_then_remove_restores_previous_collection() {
        let before = vec![product("Kettle"), product("Toaster")];
        let mut store = store_with(before.clone());
        store.expect_save_products().times(2).returning(|_| Ok(()));

        let tracker = ProductTracker::load(store).unwrap();
        let added = product("Headphones");
        let added_id = added.id.clone();

        tracker.add(added);
        let removal = tracker.remove(&added_id);

        assert_eq!(removal.removed.map(|p| p.id), Some(added_id));
        assert!(matches!(removal.persistence, Persistence::Saved));
        assert_eq!(tracker.list(), before);
    }

    #[test]
    fn removing_unknown_id_is_noop_without_write() {
        let before = vec![product("Kettle")];
        let mut store = store_with(before.clone());
        store.expect_save_products().never();

        let tracker = ProductTracker::load(store).unwrap();
        let removal = tracker.remove("missing");

        assert!(removal.removed.is_none());
        assert!(matches!(removal.persistence, Persistence::Unchanged));
        assert_eq!(tracker.list(), before);
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let mut store = store_with(Vec::new());
        store.expect_save_products().times(1).returning(|_| {
            Err(RepositoryError::Database(
                diesel::result::Error::RollbackTransaction,
            ))
        });

        let tracker = ProductTracker::load(store).unwrap();
        let persistence = tracker.add(product("Kettle"));

        assert!(persistence.is_failed());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn load_error_propagates() {
        let mut store = MockProductStore::new();
        store.expect_load_products().times(1).returning(|| {
            Err(RepositoryError::Database(diesel::result::Error::NotFound))
        });

        assert!(ProductTracker::load(store).is_err());
    }

    #[test]
    fn get_finds_tracked_product() {
        let kettle = product("Kettle");
        let id = kettle.id.clone();
        let tracker = ProductTracker::load(store_with(vec![kettle])).unwrap();

        assert_eq!(tracker.get(&id).map(|p| p.details.title), Some("Kettle".into()));
        assert!(tracker.get("missing").is_none());
        assert!(!tracker.is_empty());
    }
}
