use tracing::{debug, info};

use crate::error::Result;
use crate::models::{PlanEntry, Product, WeeklyPlan, Weekday};
use crate::planner::normalize::normalize_plan_str;
use crate::planner::sample::sample_week;
use crate::state::persistence::{KvStore, PLAN_KEY};

/// The planner session's weekly plan plus the currently selected day.
///
/// Per-day operations act on the selected day only.
#[derive(Debug, Clone, Default)]
pub struct WeeklyPlanStore {
    plan: WeeklyPlan,
    selected: Weekday,
}

impl WeeklyPlanStore {
    pub fn new(plan: WeeklyPlan) -> Self {
        Self {
            plan,
            selected: Weekday::Monday,
        }
    }

    /// Load the stored plan, normalizing whatever shape was saved.
    pub fn load(store: &KvStore) -> Self {
        let plan = match store.get(PLAN_KEY) {
            Some(raw) => normalize_plan_str(raw),
            None => {
                debug!("no stored plan under {}", PLAN_KEY);
                WeeklyPlan::new()
            }
        };
        Self::new(plan)
    }

    /// Serialize the whole plan into the store. Last writer wins.
    pub fn save(&self, store: &mut KvStore) -> Result<()> {
        let json = serde_json::to_string(&self.plan)?;
        store.set(PLAN_KEY, json);
        Ok(())
    }

    pub fn plan(&self) -> &WeeklyPlan {
        &self.plan
    }

    pub fn selected_day(&self) -> Weekday {
        self.selected
    }

    pub fn select_day(&mut self, day: Weekday) {
        self.selected = day;
    }

    /// Entries of the selected day.
    pub fn entries(&self) -> &[PlanEntry] {
        self.plan.day(self.selected)
    }

    pub fn current_quantity(&self, product_id: &str) -> u32 {
        self.plan.quantity(self.selected, product_id)
    }

    /// Set a product's quantity on the selected day.
    ///
    /// `n <= 0` removes the entry; otherwise the quantity is replaced, and
    /// a new entry is appended when the product was absent.
    pub fn set_quantity(&mut self, product_id: &str, n: i64) {
        let entries = self.plan.day_mut(self.selected);

        if n <= 0 {
            entries.retain(|e| e.product_id != product_id);
            return;
        }

        let quantity = n.min(u32::MAX as i64) as u32;
        match entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity = quantity,
            None => entries.push(PlanEntry::new(product_id, quantity)),
        }
    }

    pub fn add_one(&mut self, product_id: &str) {
        let next = self.current_quantity(product_id) as i64 + 1;
        self.set_quantity(product_id, next);
    }

    pub fn remove_one(&mut self, product_id: &str) {
        let next = self.current_quantity(product_id) as i64 - 1;
        self.set_quantity(product_id, next);
    }

    /// Replace the selected day with exactly the given products.
    ///
    /// Products already on the day keep their quantity, new ones get 1, and
    /// anything not listed is dropped.
    pub fn select_all_filtered(&mut self, products: &[&Product]) {
        let mut next: Vec<PlanEntry> = Vec::with_capacity(products.len());
        for product in products {
            if next.iter().any(|e| e.product_id == product.id) {
                continue;
            }
            let quantity = match self.current_quantity(&product.id) {
                0 => 1,
                q => q,
            };
            next.push(PlanEntry::new(product.id.clone(), quantity));
        }
        *self.plan.day_mut(self.selected) = next;
    }

    /// Empty the selected day. Other days are untouched.
    pub fn clear_day(&mut self) {
        self.plan.day_mut(self.selected).clear();
    }

    /// Replace the whole week with the generated sample plan.
    pub fn auto_generate(&mut self, products: &[Product]) {
        self.plan = sample_week(products);
        info!("generated sample weekly plan");
    }

    /// Auto-generate when every day is empty. Returns whether it did.
    pub fn seed_if_empty(&mut self, products: &[Product]) -> bool {
        if !self.plan.is_empty() {
            return false;
        }
        self.auto_generate(products);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;

    fn by_id<'a>(products: &'a [Product], id: &str) -> &'a Product {
        products.iter().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_set_quantity_replaces_not_adds() {
        let mut store = WeeklyPlanStore::default();
        store.set_quantity("veg-kale", 3);
        store.set_quantity("veg-kale", 2);
        assert_eq!(store.entries(), &[PlanEntry::new("veg-kale", 2)]);
    }

    #[test]
    fn test_zero_quantity_removes_entry() {
        let mut store = WeeklyPlanStore::default();
        store.set_quantity("veg-kale", 3);
        store.set_quantity("veg-kale", 0);
        assert_eq!(store.current_quantity("veg-kale"), 0);
        assert!(store.entries().is_empty());

        store.set_quantity("veg-kale", -2);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_add_and_remove_one() {
        let mut store = WeeklyPlanStore::default();
        store.add_one("fruit-apple");
        store.add_one("fruit-apple");
        assert_eq!(store.current_quantity("fruit-apple"), 2);

        store.remove_one("fruit-apple");
        store.remove_one("fruit-apple");
        assert!(store.entries().is_empty());

        // Removing an absent product is a no-op.
        store.remove_one("fruit-apple");
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_select_all_filtered_overwrites_day() {
        let products = seed::products();
        let mut store = WeeklyPlanStore::default();
        store.set_quantity("veg-kale", 3);
        store.set_quantity("salad-greek", 4);

        store.select_all_filtered(&[by_id(&products, "veg-kale"), by_id(&products, "fruit-apple")]);
        assert_eq!(
            store.entries(),
            &[PlanEntry::new("veg-kale", 3), PlanEntry::new("fruit-apple", 1)]
        );
    }

    #[test]
    fn test_day_operations_are_scoped() {
        let mut store = WeeklyPlanStore::default();
        store.add_one("veg-kale");
        store.select_day(Weekday::Wednesday);
        store.add_one("veg-kale");
        store.clear_day();

        assert!(store.entries().is_empty());
        assert_eq!(store.plan().quantity(Weekday::Monday, "veg-kale"), 1);
    }

    #[test]
    fn test_seed_if_empty() {
        let products = seed::products();
        let mut store = WeeklyPlanStore::default();
        assert!(store.seed_if_empty(&products));
        assert!(!store.plan().is_empty());

        store.clear_day();
        assert!(!store.seed_if_empty(&products));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut kv = KvStore::in_memory();
        let mut store = WeeklyPlanStore::default();
        store.select_day(Weekday::Saturday);
        store.set_quantity("fruit-mango", 2);
        store.save(&mut kv).unwrap();

        let loaded = WeeklyPlanStore::load(&kv);
        assert_eq!(loaded.plan(), store.plan());
        assert_eq!(loaded.selected_day(), Weekday::Monday);
    }

    #[test]
    fn test_load_legacy_id_list() {
        let mut kv = KvStore::in_memory();
        kv.set(PLAN_KEY, r#"{"Monday": ["veg-kale", "veg-kale", "fruit-apple"]}"#);

        let loaded = WeeklyPlanStore::load(&kv);
        assert_eq!(loaded.current_quantity("veg-kale"), 2);
        assert_eq!(loaded.current_quantity("fruit-apple"), 1);
    }
}
