//! Built-in nutrition fact table and demo records.
//!
//! Nutrition is per sold unit (see `unit`). Produce without a calcium
//! measurement carries potassium instead.

use crate::models::{
    ActivityLevel, Category, NutrientProfile, Order, OrderItem, OrderStatus, Product, UserProfile,
};
use crate::state::MartDatabase;

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: Category,
    price: f64,
    unit: &str,
    popularity: u32,
    benefits: &[&str],
    nutrition: NutrientProfile,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category,
        price,
        unit: unit.to_string(),
        image: format!("/images/{}.jpg", id),
        description: String::new(),
        popularity,
        health_benefits: benefits.iter().map(|b| b.to_string()).collect(),
        nutrition,
    }
}

fn nutrition(
    calories: f64,
    protein: f64,
    fiber: f64,
    iron: f64,
    calcium: Option<f64>,
    potassium: Option<f64>,
    vitamin_c: Option<f64>,
) -> NutrientProfile {
    NutrientProfile {
        calories,
        protein,
        fiber,
        iron,
        calcium,
        potassium,
        vitamin_c,
    }
}

/// The seeded catalog.
#[rustfmt::skip]
pub fn products() -> Vec<Product> {
    use Category::*;

    vec![
        // Vegetables
        product("veg-spinach", "Spinach", Vegetables, 40.0, "250 g", 88,
            &["Iron for blood health", "Vitamin K for bones"],
            nutrition(58.0, 7.2, 5.5, 6.8, Some(248.0), Some(1396.0), Some(70.0))),
        product("veg-carrot", "Carrot", Vegetables, 50.0, "500 g", 82,
            &["Beta-carotene for eyesight"],
            nutrition(205.0, 4.7, 14.0, 1.5, None, Some(1600.0), Some(30.0))),
        product("veg-broccoli", "Broccoli", Vegetables, 90.0, "1 head (300 g)", 79,
            &["Vitamin C", "Sulforaphane"],
            nutrition(102.0, 8.5, 7.8, 2.2, Some(141.0), Some(948.0), Some(268.0))),
        product("veg-beetroot", "Beetroot", Vegetables, 45.0, "500 g", 61,
            &["Nitrates for stamina"],
            nutrition(215.0, 8.0, 14.0, 4.0, None, Some(1625.0), Some(24.5))),
        product("veg-sweet-potato", "Sweet Potato", Vegetables, 35.0, "500 g", 66,
            &["Slow carbs", "Vitamin A"],
            nutrition(430.0, 8.0, 15.0, 3.0, Some(150.0), Some(1685.0), Some(12.0))),
        product("veg-bell-pepper", "Bell Pepper", Vegetables, 80.0, "2 pcs (300 g)", 58,
            &["Three times the vitamin C of oranges"],
            nutrition(93.0, 3.0, 6.3, 1.3, None, Some(633.0), Some(384.0))),
        product("veg-kale", "Kale", Vegetables, 70.0, "200 g", 54,
            &["Calcium", "Vitamin K"],
            nutrition(98.0, 8.6, 8.2, 3.0, Some(508.0), Some(696.0), Some(186.0))),
        // Fruits
        product("fruit-banana", "Banana", Fruits, 50.0, "6 pcs", 93,
            &["Potassium against cramps", "Quick energy"],
            nutrition(630.0, 7.8, 18.6, 1.6, None, Some(2532.0), Some(61.8))),
        product("fruit-apple", "Apple", Fruits, 150.0, "1 kg", 90,
            &["Pectin fiber for digestion"],
            nutrition(520.0, 2.6, 24.0, 1.2, Some(60.0), Some(1070.0), Some(46.0))),
        product("fruit-orange", "Orange", Fruits, 80.0, "1 kg", 77,
            &["Vitamin C for immunity"],
            nutrition(470.0, 9.4, 24.0, 1.0, Some(400.0), Some(1810.0), Some(532.0))),
        product("fruit-mango", "Mango", Fruits, 200.0, "1 kg", 85,
            &["Vitamin A", "Digestive enzymes"],
            nutrition(600.0, 8.2, 16.0, 1.6, None, Some(1680.0), Some(366.0))),
        product("fruit-papaya", "Papaya", Fruits, 60.0, "1 pc (1 kg)", 48,
            &["Papain aids digestion"],
            nutrition(430.0, 4.7, 17.0, 2.5, Some(200.0), Some(1820.0), Some(609.0))),
        product("fruit-pomegranate", "Pomegranate", Fruits, 180.0, "500 g", 63,
            &["Antioxidants for heart health"],
            nutrition(415.0, 8.5, 20.0, 1.5, None, Some(1180.0), Some(51.0))),
        // Salads
        product("salad-greek", "Greek Salad", Salads, 180.0, "1 bowl", 71,
            &["Healthy fats", "Hydrating vegetables"],
            nutrition(310.0, 9.0, 4.5, 1.4, Some(350.0), None, Some(38.0))),
        product("salad-caesar", "Caesar Salad", Salads, 200.0, "1 bowl", 68,
            &["Calcium from parmesan"],
            nutrition(360.0, 12.0, 3.2, 1.6, Some(240.0), None, Some(22.0))),
        product("salad-quinoa", "Quinoa Power Bowl", Salads, 250.0, "1 bowl", 74,
            &["Complete plant protein"],
            nutrition(520.0, 18.0, 11.0, 5.2, None, Some(980.0), Some(30.0))),
        product("salad-detox", "Detox Green Salad", Salads, 190.0, "1 bowl", 52,
            &["Leafy greens", "Low calorie"],
            nutrition(160.0, 6.0, 7.0, 3.4, Some(280.0), Some(870.0), Some(120.0))),
        // Ice creams
        product("ice-vanilla", "Classic Vanilla", IceCreams, 120.0, "500 ml", 84,
            &[],
            nutrition(207.0, 3.5, 0.7, 0.1, Some(128.0), None, None)),
        product("ice-chocolate", "Dark Chocolate Fudge", IceCreams, 150.0, "500 ml", 80,
            &[],
            nutrition(245.0, 4.2, 1.6, 1.1, Some(110.0), None, None)),
        product("ice-mango-sorbet", "Mango Sorbet", IceCreams, 110.0, "500 ml", 57,
            &["Dairy free"],
            nutrition(130.0, 0.4, 1.2, 0.2, None, Some(160.0), Some(18.0))),
    ]
}

/// The demo user the storefront logs in as.
pub fn demo_user() -> UserProfile {
    UserProfile {
        id: "user-1".to_string(),
        name: "Aarav Mehta".to_string(),
        weight: 70.0,
        height: 175.0,
        age: 30,
        activity_level: ActivityLevel::Moderate,
        city: "Bengaluru".to_string(),
    }
}

fn order(id: &str, ordered_at: &str, status: OrderStatus, items: &[(&str, u32, f64)]) -> Order {
    let items: Vec<OrderItem> = items
        .iter()
        .map(|&(product_id, quantity, price)| OrderItem {
            product_id: product_id.to_string(),
            quantity,
            price,
        })
        .collect();
    let total = items.iter().map(|i| i.price * i.quantity as f64).sum();

    Order {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        ordered_at: ordered_at.to_string(),
        status,
        total,
        items,
    }
}

/// Seed database used when no data file exists yet.
pub fn default_database() -> MartDatabase {
    MartDatabase {
        users: vec![demo_user()],
        products: products(),
        orders: vec![
            order(
                "order-1001",
                "2026-10-05T10:20:00Z",
                OrderStatus::Delivered,
                &[("veg-spinach", 2, 40.0), ("fruit-banana", 1, 50.0)],
            ),
            order(
                "order-1002",
                "2026-10-13T18:05:00Z",
                OrderStatus::Delivered,
                &[("fruit-orange", 1, 80.0), ("salad-quinoa", 1, 250.0), ("veg-kale", 1, 70.0)],
            ),
            order(
                "order-1003",
                "2026-10-15T09:40:00Z",
                OrderStatus::Pending,
                &[("veg-broccoli", 1, 90.0), ("ice-vanilla", 1, 120.0)],
            ),
        ],
    }
}
