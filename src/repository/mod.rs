use crate::db::{DbConnection, DbPool};
use crate::domain::product::Product;

pub mod errors;
pub mod product;
pub mod slot;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Storage key holding the serialized list of tracked products.
pub const PRODUCTS_STORAGE_KEY: &str = "primetrack_products";

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read access to named key-value slots.
pub trait SlotReader {
    /// Payload stored under `key`, `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> RepositoryResult<Option<String>>;
}

/// Write access to named key-value slots.
pub trait SlotWriter {
    /// Overwrite the slot `key` with `payload`.
    fn write_slot(&self, key: &str, payload: &str) -> RepositoryResult<()>;
}

/// Persistence of the whole tracked-products collection.
pub trait ProductStore {
    /// Load the collection saved by the last [`ProductStore::save_products`].
    ///
    /// A missing slot yields an empty collection. A payload that cannot be
    /// decoded is logged and also yields an empty collection; it is left in
    /// place rather than deleted.
    fn load_products(&self) -> RepositoryResult<Vec<Product>>;

    /// Replace the stored collection with `products`.
    fn save_products(&self, products: &[Product]) -> RepositoryResult<()>;
}
