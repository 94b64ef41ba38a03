use clap::ValueEnum;
use strsim::jaro_winkler;
use tracing::debug;

use crate::catalog::ProductSource;
use crate::error::{MartError, Result};
use crate::models::{Category, Product};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Nutrition shortcut filters offered by the catalog screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NutritionFilter {
    #[default]
    All,
    HighProtein,
    HighFiber,
    HighIron,
    LowCalorie,
}

impl NutritionFilter {
    pub fn matches(self, product: &Product) -> bool {
        let n = &product.nutrition;
        match self {
            NutritionFilter::All => true,
            NutritionFilter::HighProtein => n.protein >= 5.0,
            NutritionFilter::HighFiber => n.fiber >= 4.0,
            NutritionFilter::HighIron => n.iron >= 2.0,
            NutritionFilter::LowCalorie => n.calories <= 120.0,
        }
    }
}

/// Catalog screen filters. `None` category means all aisles.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub nutrition: NutritionFilter,
}

impl CatalogFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self.category.is_none_or(|c| product.category == c);
        let search_ok = self.search.as_deref().is_none_or(|term| {
            product.name.to_lowercase().contains(&term.to_lowercase())
        });
        category_ok && search_ok && self.nutrition.matches(product)
    }

    /// True when every product passes.
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.search.is_none() && self.nutrition == NutritionFilter::All
    }
}

/// Products passing the filter, catalog order.
pub fn filter_products<'a, S>(products: &'a S, filter: &CatalogFilter) -> Vec<&'a Product>
where
    S: ProductSource + ?Sized,
{
    products
        .all_products()
        .iter()
        .filter(|p| filter.matches(p))
        .collect()
}

/// Resolve a product from a user-typed id or name.
///
/// Tries exact id, then case-insensitive name, then the closest fuzzy name.
pub fn resolve_product<'a, S>(products: &'a S, query: &str) -> Result<&'a Product>
where
    S: ProductSource + ?Sized,
{
    let query = query.trim();
    if let Some(product) = products.product_by_id(query) {
        return Ok(product);
    }

    let lower = query.to_lowercase();
    let all = products.all_products();
    if let Some(product) = all.iter().find(|p| p.name.to_lowercase() == lower) {
        return Ok(product);
    }

    let best = all
        .iter()
        .map(|p| (p, jaro_winkler(&p.name.to_lowercase(), &lower)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    match best {
        Some((product, score)) => {
            debug!("resolved '{}' to {} (score {:.2})", query, product.name, score);
            Ok(product)
        }
        None => Err(MartError::ProductNotFound(query.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, seed};

    #[test]
    fn test_filter_by_category_and_search() {
        let catalog = Catalog::new(seed::products());
        let filter = CatalogFilter {
            category: Some(Category::Fruits),
            search: Some("AN".to_string()),
            ..Default::default()
        };
        let names: Vec<&str> = filter_products(&catalog, &filter)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Banana", "Orange", "Mango", "Pomegranate"]);
    }

    #[test]
    fn test_is_unfiltered() {
        assert!(CatalogFilter::default().is_unfiltered());
        let filter = CatalogFilter {
            nutrition: NutritionFilter::HighIron,
            ..Default::default()
        };
        assert!(!filter.is_unfiltered());
    }

    #[test]
    fn test_nutrition_filter() {
        let catalog = Catalog::new(seed::products());
        let filter = CatalogFilter {
            nutrition: NutritionFilter::LowCalorie,
            ..Default::default()
        };
        let found = filter_products(&catalog, &filter);
        assert!(!found.is_empty());
        assert!(found.iter().all(|p| p.nutrition.calories <= 120.0));
    }

    #[test]
    fn test_resolve_by_id_name_and_fuzzy() {
        let catalog = Catalog::new(seed::products());
        assert_eq!(resolve_product(&catalog, "veg-kale").unwrap().name, "Kale");
        assert_eq!(resolve_product(&catalog, "sweet potato").unwrap().id, "veg-sweet-potato");
        assert_eq!(resolve_product(&catalog, "brocoli").unwrap().id, "veg-broccoli");
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = Catalog::new(seed::products());
        assert!(matches!(
            resolve_product(&catalog, "zzzzqqq"),
            Err(MartError::ProductNotFound(_))
        ));
    }
}
