use chrono::NaiveDateTime;
use rand::Rng;
use serde::Serialize;

use crate::catalog::ProductSource;
use crate::models::{Order, Product};
use crate::planner::constants::{ESTIMATED_SAVINGS, RAIL_SIZE, TRENDING_JITTER};
use crate::planner::report::{WeeklyReport, weekly_report};
use crate::state::Session;

/// Most popular products, shuffled slightly so the rail changes between visits.
///
/// Each product gets one jitter draw in `[0, TRENDING_JITTER)` added to its
/// popularity.
pub fn trending<'a>(products: &'a [Product], rng: &mut impl Rng) -> Vec<&'a Product> {
    let mut scored: Vec<(&Product, f64)> = products
        .iter()
        .map(|p| (p, p.popularity as f64 + rng.gen_range(0.0..TRENDING_JITTER)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(RAIL_SIZE).map(|(p, _)| p).collect()
}

/// Protein- or fiber-rich products, catalog order.
pub fn recommended(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.nutrition.protein >= 2.0 || p.nutrition.fiber >= 3.0)
        .take(RAIL_SIZE)
        .collect()
}

/// All-time order summary for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub items_ordered: u32,
    pub estimated_savings: f64,
    /// Protein per order line, one decimal.
    pub avg_protein: f64,
}

pub fn weekly_summary<S>(orders: &[&Order], products: &S) -> WeeklySummary
where
    S: ProductSource + ?Sized,
{
    let lines: Vec<_> = orders.iter().flat_map(|o| o.items.iter()).collect();

    let items_ordered = lines
        .iter()
        .fold(0u32, |acc, i| acc.saturating_add(i.quantity));
    let protein_sum: f64 = lines
        .iter()
        .map(|i| {
            products
                .product_by_id(&i.product_id)
                .map(|p| p.nutrition.protein)
                .unwrap_or(0.0)
                * i.quantity as f64
        })
        .sum();

    let avg = protein_sum / lines.len().max(1) as f64;

    WeeklySummary {
        items_ordered,
        estimated_savings: ESTIMATED_SAVINGS,
        avg_protein: (avg * 10.0).round() / 10.0,
    }
}

/// Everything the dashboard screen shows.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    pub trending: Vec<&'a Product>,
    pub recommended: Vec<&'a Product>,
    pub summary: WeeklySummary,
    pub report: WeeklyReport,
}

impl<'a> Dashboard<'a> {
    pub fn build(session: &'a Session, now: NaiveDateTime, rng: &mut impl Rng) -> Self {
        let products = session.catalog().all_products();
        let orders = session.all_orders_for_user();

        Self {
            trending: trending(products, rng),
            recommended: recommended(products),
            summary: weekly_summary(&orders, session.catalog()),
            report: weekly_report(
                now,
                orders.iter().copied(),
                session.catalog(),
                &session.comparison_targets(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;
    use crate::models::{OrderItem, OrderStatus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_trending_respects_popularity_gap() {
        let mut products = seed::products();
        products[5].popularity = 1000;

        let mut rng = StdRng::seed_from_u64(7);
        let rail = trending(&products, &mut rng);
        assert_eq!(rail.len(), RAIL_SIZE);
        assert_eq!(rail[0].id, products[5].id);
    }

    #[test]
    fn test_recommended_filter() {
        let products = seed::products();
        let rail = recommended(&products);
        assert!(rail.len() <= RAIL_SIZE);
        assert!(rail
            .iter()
            .all(|p| p.nutrition.protein >= 2.0 || p.nutrition.fiber >= 3.0));
    }

    #[test]
    fn test_summary_average_per_line() {
        let products = seed::products();
        let order = Order {
            id: "o1".to_string(),
            user_id: "u1".to_string(),
            ordered_at: "2026-10-13".to_string(),
            status: OrderStatus::Delivered,
            total: 0.0,
            items: vec![
                OrderItem { product_id: "veg-spinach".to_string(), quantity: 2, price: 40.0 },
                OrderItem { product_id: "missing".to_string(), quantity: 1, price: 5.0 },
            ],
        };

        let summary = weekly_summary(&[&order], products.as_slice());
        assert_eq!(summary.items_ordered, 3);
        // (7.2 * 2 + 0) / 2 lines
        assert_eq!(summary.avg_protein, 7.2);
        assert_eq!(summary.estimated_savings, 260.0);
    }

    #[test]
    fn test_summary_item_count_saturates() {
        let products = seed::products();
        let order = Order {
            id: "o1".to_string(),
            user_id: "u1".to_string(),
            ordered_at: "2026-10-13".to_string(),
            status: OrderStatus::Delivered,
            total: 0.0,
            items: vec![
                OrderItem { product_id: "veg-kale".to_string(), quantity: u32::MAX, price: 70.0 },
                OrderItem { product_id: "fruit-apple".to_string(), quantity: 1, price: 150.0 },
            ],
        };

        let summary = weekly_summary(&[&order], products.as_slice());
        assert_eq!(summary.items_ordered, u32::MAX);
    }

    #[test]
    fn test_summary_without_orders() {
        let products = seed::products();
        let summary = weekly_summary(&[], products.as_slice());
        assert_eq!(summary.items_ordered, 0);
        assert_eq!(summary.avg_protein, 0.0);
    }
}
