use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{MartError, Result};
use crate::models::{Order, ProfileUpdate, UserProfile};
use crate::planner::report::order_instant;
use crate::planner::targets::{ComparisonTargets, NutrientTargets, compute_targets};
use crate::state::persistence::MartDatabase;

/// Order numbers start above this when no numbered order exists.
const ORDER_ID_BASE: u64 = 1000;

/// State for one signed-in user: their profile, the catalog, and order history.
///
/// Targets are derived from the profile on every call, so an update is
/// visible immediately.
pub struct Session {
    users: Vec<UserProfile>,
    active: usize,
    catalog: Catalog,
    orders: Vec<Order>,
}

impl Session {
    /// Open a session for `user_id`, or the first user when `None`.
    pub fn open(db: MartDatabase, user_id: Option<&str>) -> Result<Self> {
        let active = match user_id {
            Some(id) => db
                .users
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| MartError::UserNotFound(id.to_string()))?,
            None if db.users.is_empty() => return Err(MartError::NoUsers),
            None => 0,
        };

        let catalog = Catalog::new(db.products);
        debug!(
            "session for {} ({} products, {} orders)",
            db.users[active].id,
            catalog.len(),
            db.orders.len()
        );

        Ok(Self {
            users: db.users,
            active,
            catalog,
            orders: db.orders,
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.users[self.active]
    }

    /// Merge a partial update into the active profile.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> &UserProfile {
        let profile = &mut self.users[self.active];
        profile.apply(update);
        info!("updated profile for {}", profile.id);
        profile
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All of the active user's orders, newest instant first.
    ///
    /// Unreadable timestamps sort after every dated order.
    pub fn all_orders_for_user(&self) -> Vec<&Order> {
        let user_id = &self.profile().id;
        let mut orders: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| &o.user_id == user_id)
            .collect();
        orders.sort_by_key(|o| Reverse((order_instant(&o.ordered_at), o.ordered_at.clone())));
        orders
    }

    /// The active user's `limit` most recent orders.
    pub fn orders_for_user(&self, limit: usize) -> Vec<&Order> {
        let mut orders = self.all_orders_for_user();
        orders.truncate(limit);
        orders
    }

    pub fn record_order(&mut self, order: Order) {
        info!("recorded order {} ({} items)", order.id, order.item_count());
        self.orders.push(order);
    }

    /// Next free `order-N` id.
    ///
    /// One past the highest numbered id; when that overflows, the lowest
    /// unused number above the base.
    pub fn next_order_id(&self) -> String {
        let taken: HashSet<u64> = self
            .orders
            .iter()
            .filter_map(|o| o.id.strip_prefix("order-")?.parse::<u64>().ok())
            .collect();
        let max = taken.iter().copied().max().unwrap_or(ORDER_ID_BASE);

        let next = max.checked_add(1).unwrap_or_else(|| {
            (ORDER_ID_BASE + 1..u64::MAX)
                .find(|n| !taken.contains(n))
                .unwrap_or(u64::MAX)
        });
        format!("order-{}", next)
    }

    pub fn daily_targets(&self) -> NutrientTargets {
        compute_targets(self.profile())
    }

    /// Daily five-metric targets for the active profile.
    pub fn comparison_targets(&self) -> ComparisonTargets {
        ComparisonTargets::for_profile(Some(self.profile()))
    }

    pub fn into_database(self) -> MartDatabase {
        MartDatabase {
            users: self.users,
            products: self.catalog.into_products(),
            orders: self.orders,
        }
    }
}
