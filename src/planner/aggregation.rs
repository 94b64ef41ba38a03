use serde::Serialize;

use crate::catalog::ProductSource;
use crate::models::{CartEntry, NutrientProfile, OrderItem, PlanEntry, WeeklyPlan, Weekday};
use crate::planner::targets::ComparisonTargets;

/// A (product, quantity) pair that can be summed.
pub trait Portion {
    fn product_id(&self) -> &str;
    fn quantity(&self) -> u32;
}

impl Portion for PlanEntry {
    fn product_id(&self) -> &str {
        &self.product_id
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl Portion for CartEntry {
    fn product_id(&self) -> &str {
        &self.product_id
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl Portion for OrderItem {
    fn product_id(&self) -> &str {
        &self.product_id
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Summed nutrients and units for a cart, a planner day, or a week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
    pub vitamin_c: f64,
    pub calcium: f64,
    pub iron: f64,
    pub total_quantity: u32,
}

impl NutrientTotals {
    /// Add `quantity` units of a product's nutrition.
    pub fn add(&mut self, nutrition: &NutrientProfile, quantity: u32) {
        let q = quantity as f64;
        self.calories += nutrition.calories * q;
        self.protein += nutrition.protein * q;
        self.fiber += nutrition.fiber * q;
        self.vitamin_c += nutrition.vitamin_c_or_zero() * q;
        self.calcium += nutrition.calcium_or_estimate() * q;
        self.iron += nutrition.iron * q;
        self.total_quantity = self.total_quantity.saturating_add(quantity);
    }

    pub fn is_empty(&self) -> bool {
        self.total_quantity == 0
    }

    /// Progress of each comparison metric against its target.
    pub fn progress(&self, targets: &ComparisonTargets) -> [MetricProgress; 5] {
        [
            MetricProgress::new("Vitamin C", self.vitamin_c, targets.vitamin_c, "mg"),
            MetricProgress::new("Protein", self.protein, targets.protein, "g"),
            MetricProgress::new("Fiber", self.fiber, targets.fiber, "g"),
            MetricProgress::new("Calcium", self.calcium, targets.calcium, "mg"),
            MetricProgress::new("Iron", self.iron, targets.iron, "mg"),
        ]
    }
}

/// One metric's value against its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricProgress {
    pub label: &'static str,
    pub value: f64,
    pub target: f64,
    pub unit: &'static str,
}

impl MetricProgress {
    pub fn new(label: &'static str, value: f64, target: f64, unit: &'static str) -> Self {
        Self {
            label,
            value,
            target,
            unit,
        }
    }

    /// Percentage of target reached, 0 when the target is 0.
    pub fn percent(&self) -> f64 {
        if self.target > 0.0 {
            self.value / self.target * 100.0
        } else {
            0.0
        }
    }
}

/// Sum nutrients over any list of portions.
///
/// Portions whose product is unknown contribute nothing, not even to the
/// unit count.
pub fn aggregate<'a, P, S>(portions: impl IntoIterator<Item = &'a P>, products: &S) -> NutrientTotals
where
    P: Portion + 'a,
    S: ProductSource + ?Sized,
{
    let mut totals = NutrientTotals::default();
    for portion in portions {
        if let Some(product) = products.product_by_id(portion.product_id()) {
            totals.add(&product.nutrition, portion.quantity());
        }
    }
    totals
}

pub fn aggregate_day<S>(plan: &WeeklyPlan, day: Weekday, products: &S) -> NutrientTotals
where
    S: ProductSource + ?Sized,
{
    aggregate(plan.day(day), products)
}

/// Sum the whole week. The same product on two days counts twice.
pub fn aggregate_week<S>(plan: &WeeklyPlan, products: &S) -> NutrientTotals
where
    S: ProductSource + ?Sized,
{
    aggregate(plan.entries(), products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{Category, Product};

    fn product(id: &str, nutrition: NutrientProfile) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            category: Category::Fruits,
            price: 10.0,
            unit: "1 pc".to_string(),
            image: String::new(),
            description: String::new(),
            popularity: 0,
            health_benefits: Vec::new(),
            nutrition,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(
                "banana",
                NutrientProfile {
                    calories: 100.0,
                    protein: 1.0,
                    fiber: 3.0,
                    iron: 0.5,
                    calcium: None,
                    potassium: Some(400.0),
                    vitamin_c: Some(10.0),
                },
            ),
            product(
                "kale",
                NutrientProfile {
                    calories: 50.0,
                    protein: 4.0,
                    fiber: 4.0,
                    iron: 1.5,
                    calcium: Some(150.0),
                    potassium: Some(500.0),
                    vitamin_c: None,
                },
            ),
        ])
    }

    #[test]
    fn test_calcium_fallback_applied_once() {
        let totals = aggregate(&[PlanEntry::new("banana", 1)], &catalog());
        assert!((totals.calcium - 140.0).abs() < 1e-9);

        let totals = aggregate(&[PlanEntry::new("banana", 3)], &catalog());
        assert!((totals.calcium - 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_vitamin_c_is_zero() {
        let totals = aggregate(&[CartEntry {
            product_id: "kale".to_string(),
            quantity: 2,
        }], &catalog());
        assert_eq!(totals.vitamin_c, 0.0);
        assert_eq!(totals.calcium, 300.0);
        assert_eq!(totals.total_quantity, 2);
    }

    #[test]
    fn test_stale_reference_skipped() {
        let entries = vec![PlanEntry::new("ghost", 5), PlanEntry::new("kale", 1)];
        let totals = aggregate(&entries, &catalog());
        assert_eq!(totals.total_quantity, 1);
        assert_eq!(totals.calories, 50.0);
    }

    #[test]
    fn test_total_quantity_saturates() {
        let entries = vec![PlanEntry::new("kale", u32::MAX), PlanEntry::new("banana", 1)];
        let totals = aggregate(&entries, &catalog());
        assert_eq!(totals.total_quantity, u32::MAX);
        assert!(totals.calories > 0.0);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let entries: Vec<PlanEntry> = Vec::new();
        assert_eq!(aggregate(&entries, &catalog()), NutrientTotals::default());
    }

    #[test]
    fn test_progress_percent() {
        let totals = NutrientTotals {
            protein: 25.0,
            ..Default::default()
        };
        let progress = totals.progress(&ComparisonTargets::fallback());
        assert_eq!(progress[1].label, "Protein");
        assert!((progress[1].percent() - 50.0).abs() < 1e-9);

        let zero = MetricProgress::new("X", 5.0, 0.0, "g");
        assert_eq!(zero.percent(), 0.0);
    }
}
