use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Delivered,
    #[default]
    Pending,
    Cancelled,
}

/// A purchased line: product, quantity, and the unit price paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    pub price: f64,
}

/// A past order from the order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,

    /// ISO-8601 timestamp or plain `YYYY-MM-DD` date.
    pub ordered_at: String,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub total: f64,

    pub items: Vec<OrderItem>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }
}

/// A product waiting in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    #[serde(rename = "id")]
    pub product_id: String,
    pub quantity: u32,
}
