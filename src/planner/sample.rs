use crate::models::{Category, PlanEntry, Product, WeeklyPlan, Weekday};

/// Deterministic starter week: one vegetable, one fruit, and one salad a day.
///
/// Day `i` takes item `i % len` of each category list, so short lists
/// repeat. An empty category leaves its slot unfilled.
pub fn sample_week(products: &[Product]) -> WeeklyPlan {
    let by_category = |category: Category| {
        products
            .iter()
            .filter(|p| p.category == category)
            .collect::<Vec<&Product>>()
    };
    let slots = [
        by_category(Category::Vegetables),
        by_category(Category::Fruits),
        by_category(Category::Salads),
    ];

    let mut plan = WeeklyPlan::new();
    for day in Weekday::ALL {
        let entries = plan.day_mut(day);
        for list in &slots {
            let Some(product) = list.get(day.index() % list.len().max(1)) else {
                continue;
            };
            if !entries.iter().any(|e| e.product_id == product.id) {
                entries.push(PlanEntry::new(product.id.clone(), 1));
            }
        }
    }
    plan
}
