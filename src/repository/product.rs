use std::collections::HashSet;

use validator::Validate;

use crate::{
    domain::product::Product,
    repository::{
        DieselRepository, PRODUCTS_STORAGE_KEY, ProductStore, RepositoryResult, SlotReader,
        SlotWriter,
    },
};

impl ProductStore for DieselRepository {
    fn load_products(&self) -> RepositoryResult<Vec<Product>> {
        let payload = self.read_slot(PRODUCTS_STORAGE_KEY)?;
        Ok(decode_products(payload.as_deref()))
    }

    fn save_products(&self, products: &[Product]) -> RepositoryResult<()> {
        let payload = encode_products(products)?;
        self.write_slot(PRODUCTS_STORAGE_KEY, &payload)
    }
}

/// Serialize the collection into the stored JSON array.
pub fn encode_products(products: &[Product]) -> RepositoryResult<String> {
    Ok(serde_json::to_string(products)?)
}

/// Decode a stored payload, treating a missing or malformed one as empty.
pub fn decode_products(payload: Option<&str>) -> Vec<Product> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    let products: Vec<Product> = match serde_json::from_str(payload) {
        Ok(products) => products,
        Err(err) => {
            log::error!("Failed to parse saved products: {err}");
            return Vec::new();
        }
    };

    if let Some((product, err)) = products
        .iter()
        .find_map(|product| product.validate().err().map(|err| (product, err)))
    {
        log::error!("Saved product {} is invalid, ignoring saved products: {err}", product.id);
        return Vec::new();
    }

    if let Some(id) = first_duplicate_id(&products) {
        log::error!("Saved product id {id} appears more than once, ignoring saved products");
        return Vec::new();
    }

    products
}

fn first_duplicate_id(products: &[Product]) -> Option<String> {
    let mut ids = HashSet::with_capacity(products.len());
    products
        .iter()
        .find(|product| !ids.insert(product.id.as_str()))
        .map(|product| product.id.clone())
}
