use mockall::mock;

use super::{ProductStore, RepositoryResult};
use crate::domain::product::Product;

mock! {
    pub ProductStore {}

    impl ProductStore for ProductStore {
        fn load_products(&self) -> RepositoryResult<Vec<Product>>;
        fn save_products(&self, products: &[Product]) -> RepositoryResult<()>;
    }
}
