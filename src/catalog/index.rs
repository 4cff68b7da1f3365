use crate::model::Product;
use std::collections::HashMap;

/// Products bucketed by their exact manufacturer string.
///
/// Built once, read-only afterwards. Bucket order is insertion order and
/// duplicate products stay as separate candidates.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    buckets: HashMap<String, Vec<Product>>,
    product_count: usize,
}

impl CatalogIndex {
    /// Indexes products in a single forward pass.
    pub fn build<I>(products: I) -> Self
    where
        I: IntoIterator<Item = Product>,
    {
        let mut index = Self::default();
        for product in products {
            index.insert(product);
        }
        index
    }

    /// Same as [`CatalogIndex::build`] for a fallible source; stops at the first error.
    pub fn try_build<I, E>(products: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<Product, E>>,
    {
        let mut index = Self::default();
        for product in products {
            index.insert(product?);
        }
        Ok(index)
    }

    fn insert(&mut self, product: Product) {
        self.buckets
            .entry(product.manufacturer.clone())
            .or_default()
            .push(product);
        self.product_count += 1;
    }

    /// Products for a manufacturer; an unknown manufacturer gives an empty slice.
    pub fn candidates(&self, manufacturer: &str) -> &[Product] {
        self.buckets
            .get(manufacturer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_manufacturer(&self, manufacturer: &str) -> bool {
        self.buckets.contains_key(manufacturer)
    }

    pub fn len(&self) -> usize {
        self.product_count
    }

    pub fn is_empty(&self) -> bool {
        self.product_count == 0
    }

    pub fn manufacturer_count(&self) -> usize {
        self.buckets.len()
    }
}
