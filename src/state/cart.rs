use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::ProductSource;
use crate::error::{MartError, Result};
use crate::models::{CartEntry, Order, OrderItem, OrderStatus};
use crate::planner::aggregation::{NutrientTotals, aggregate};
use crate::planner::constants::{DELIVERY_FEE, FREE_DELIVERY_THRESHOLD};
use crate::state::persistence::{CART_KEY, KvStore};
use crate::state::session::Session;

/// Price breakdown of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPricing {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub grand_total: f64,
}

impl CartPricing {
    pub fn from_subtotal(subtotal: f64) -> Self {
        let delivery_fee = if subtotal >= FREE_DELIVERY_THRESHOLD {
            0.0
        } else {
            DELIVERY_FEE
        };
        Self {
            subtotal,
            delivery_fee,
            grand_total: subtotal + delivery_fee,
        }
    }
}

/// Products staged for checkout. Ids are unique and quantities positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stored cart. Unreadable data starts an empty cart.
    pub fn load(store: &KvStore) -> Self {
        let Some(raw) = store.get(CART_KEY) else {
            return Self::new();
        };

        match serde_json::from_str::<Vec<CartEntry>>(raw) {
            Ok(entries) => {
                let mut cart = Self::new();
                for entry in entries {
                    cart.add(&entry.product_id, entry.quantity);
                }
                cart
            }
            Err(e) => {
                warn!("stored cart is unreadable ({}), starting empty", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut KvStore) -> Result<()> {
        store.set(CART_KEY, serde_json::to_string(&self.items)?);
        Ok(())
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add units of a product, creating the entry when absent.
    pub fn add(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.items.push(CartEntry {
                product_id: product_id.to_string(),
                quantity,
            }),
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|e| e.product_id != product_id);
    }

    /// Set the quantity of an entry already in the cart; `n <= 0` removes it.
    pub fn update_quantity(&mut self, product_id: &str, n: i64) {
        if n <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(entry) = self.items.iter_mut().find(|e| e.product_id == product_id) {
            entry.quantity = n.min(u32::MAX as i64) as u32;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.quantity))
    }

    /// Pricing over the products that still exist in the catalog.
    pub fn pricing<S>(&self, products: &S) -> CartPricing
    where
        S: ProductSource + ?Sized,
    {
        let subtotal = self
            .items
            .iter()
            .filter_map(|e| {
                products
                    .product_by_id(&e.product_id)
                    .map(|p| p.price * e.quantity as f64)
            })
            .sum();
        CartPricing::from_subtotal(subtotal)
    }

    pub fn nutrition<S>(&self, products: &S) -> NutrientTotals
    where
        S: ProductSource + ?Sized,
    {
        aggregate(&self.items, products)
    }

    /// Turn the cart into a pending order, record it, and empty the cart.
    ///
    /// Entries whose product no longer exists are left out of the order.
    pub fn checkout(&mut self, session: &mut Session, now: NaiveDateTime) -> Result<Order> {
        let items: Vec<OrderItem> = self
            .items
            .iter()
            .filter_map(|e| match session.catalog().product_by_id(&e.product_id) {
                Some(product) => Some(OrderItem {
                    product_id: e.product_id.clone(),
                    quantity: e.quantity,
                    price: product.price,
                }),
                None => {
                    warn!("skipping unknown product {} at checkout", e.product_id);
                    None
                }
            })
            .collect();

        if items.is_empty() {
            return Err(MartError::EmptyCart);
        }

        let pricing = self.pricing(session.catalog());
        let order = Order {
            id: session.next_order_id(),
            user_id: session.profile().id.clone(),
            ordered_at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
            status: OrderStatus::Pending,
            total: pricing.grand_total,
            items,
        };

        info!("checkout {} total {:.2}", order.id, order.total);
        session.record_order(order.clone());
        self.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_add_is_additive() {
        let mut cart = Cart::new();
        cart.add("fruit-apple", 1);
        cart.add("fruit-apple", 2);
        cart.add("veg-kale", 0);
        assert_eq!(cart.quantity_of("fruit-apple"), 3);
        assert_eq!(cart.entries().len(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add("fruit-apple", 1);
        cart.update_quantity("fruit-apple", 5);
        assert_eq!(cart.quantity_of("fruit-apple"), 5);

        // Absent entries are not created.
        cart.update_quantity("veg-kale", 2);
        assert_eq!(cart.quantity_of("veg-kale"), 0);

        cart.update_quantity("fruit-apple", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_items_saturates() {
        let mut cart = Cart::new();
        cart.add("veg-kale", u32::MAX);
        cart.add("fruit-apple", 1);
        assert_eq!(cart.total_items(), u32::MAX);

        let products = seed::products();
        assert_eq!(cart.nutrition(products.as_slice()).total_quantity, u32::MAX);
    }

    #[test]
    fn test_delivery_fee_threshold() {
        assert_eq!(CartPricing::from_subtotal(499.0).delivery_fee, 35.0);
        assert_eq!(CartPricing::from_subtotal(499.0).grand_total, 534.0);
        assert_eq!(CartPricing::from_subtotal(500.0).delivery_fee, 0.0);
    }

    #[test]
    fn test_pricing_skips_stale_products() {
        let products = seed::products();
        let mut cart = Cart::new();
        cart.add("fruit-apple", 2);
        cart.add("gone", 10);
        let pricing = cart.pricing(products.as_slice());
        assert_eq!(pricing.subtotal, 300.0);
        assert_eq!(pricing.delivery_fee, 35.0);
        assert_eq!(cart.total_items(), 12);
    }

    #[test]
    fn test_checkout_records_order_and_clears() {
        let mut session = Session::open(seed::default_database(), None).unwrap();
        let mut cart = Cart::new();
        cart.add("salad-quinoa", 2);

        let order = cart.checkout(&mut session, at("2026-10-16 19:30")).unwrap();
        assert!(cart.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 500.0);
        assert_eq!(order.ordered_at, "2026-10-16T19:30:00");
        assert_eq!(session.orders_for_user(1)[0].id, order.id);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut session = Session::open(seed::default_database(), None).unwrap();
        let mut cart = Cart::new();
        assert!(matches!(
            cart.checkout(&mut session, at("2026-10-16 19:30")),
            Err(MartError::EmptyCart)
        ));
    }

    #[test]
    fn test_store_roundtrip_merges_duplicates() {
        let mut kv = KvStore::in_memory();
        kv.set(CART_KEY, r#"[{"id": "veg-kale", "quantity": 1, "name": "Kale"}, {"id": "veg-kale", "quantity": 2}]"#);
        let cart = Cart::load(&kv);
        assert_eq!(cart.quantity_of("veg-kale"), 3);

        let mut out = KvStore::in_memory();
        cart.save(&mut out).unwrap();
        assert_eq!(Cart::load(&out), cart);
    }
}
