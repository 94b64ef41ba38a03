pub mod dashboard;
pub mod query;
pub mod seed;

use std::collections::HashMap;

use crate::models::{Category, Product};

pub use dashboard::{Dashboard, WeeklySummary, recommended, trending, weekly_summary};
pub use query::{CatalogFilter, NutritionFilter, filter_products, resolve_product};

/// Read access to the product list.
pub trait ProductSource {
    fn all_products(&self) -> &[Product];
    fn product_by_id(&self, id: &str) -> Option<&Product>;
}

impl ProductSource for [Product] {
    fn all_products(&self) -> &[Product] {
        self
    }

    fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.iter().find(|p| p.id == id)
    }
}

/// Products in catalog order with an id index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog. A repeated id replaces the earlier product in place.
    pub fn new(products: Vec<Product>) -> Self {
        let mut catalog = Self::default();
        for product in products {
            match catalog.index.get(&product.id) {
                Some(&pos) => catalog.products[pos] = product,
                None => {
                    catalog.index.insert(product.id.clone(), catalog.products.len());
                    catalog.products.push(product);
                }
            }
        }
        catalog
    }

    /// Products of one category, catalog order.
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl ProductSource for Catalog {
    fn all_products(&self) -> &[Product] {
        &self.products
    }

    fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }
}
