use assert_float_eq::*;
use serde_json::json;

use fresh_mart_rs::catalog::{
    Catalog, CatalogFilter, NutritionFilter, ProductSource, filter_products, seed,
};
use fresh_mart_rs::models::{Category, PlanEntry, Weekday};
use fresh_mart_rs::planner::{aggregate_day, aggregate_week, normalize_plan, normalize_plan_str};
use fresh_mart_rs::state::{KvStore, PLAN_KEY, WeeklyPlanStore};

fn catalog() -> Catalog {
    Catalog::new(seed::products())
}

#[test]
fn test_legacy_shapes_normalize_to_quantities() {
    let plan = normalize_plan(&json!({
        "Monday": ["veg-kale", {"id": "veg-kale", "quantity": 2}, "fruit-apple", null, 42],
        "Tuesday": [{"id": "fruit-mango"}, {"id": "fruit-mango", "quantity": 0}, {"id": "veg-carrot", "quantity": 2.7}],
        "Wednesday": "not a list",
        "Funday": ["veg-kale"]
    }));

    assert_eq!(
        plan.day(Weekday::Monday),
        &[
            PlanEntry::new("veg-kale", 3),
            PlanEntry::new("fruit-apple", 1),
            PlanEntry::new("42", 1),
        ]
    );
    assert_eq!(
        plan.day(Weekday::Tuesday),
        &[PlanEntry::new("fruit-mango", 2), PlanEntry::new("veg-carrot", 2)]
    );
    assert!(plan.day(Weekday::Wednesday).is_empty());
    assert_eq!(plan.entries().count(), 5);
}

#[test]
fn test_normalize_is_a_fixed_point() {
    let first = normalize_plan(&json!({
        "Friday": ["veg-kale", "veg-kale", {"id": "salad-greek", "quantity": 3}],
        "Sunday": [{"id": "ice-vanilla", "quantity": -4}]
    }));
    let stored = serde_json::to_value(&first).unwrap();
    assert_eq!(normalize_plan(&stored), first);
}

#[test]
fn test_garbage_text_is_an_empty_week() {
    assert!(normalize_plan_str("{not json").is_empty());
    assert!(normalize_plan_str("[1, 2, 3]").is_empty());
    assert!(normalize_plan_str("null").is_empty());
}

#[test]
fn test_select_all_then_day_aggregate() {
    let catalog = catalog();
    let mut store = WeeklyPlanStore::default();
    store.select_day(Weekday::Thursday);
    store.set_quantity("salad-greek", 2);

    let filter = CatalogFilter {
        category: Some(Category::Salads),
        nutrition: NutritionFilter::HighProtein,
        ..Default::default()
    };
    let salads = filter_products(&catalog, &filter);
    store.select_all_filtered(&salads);

    let ids: Vec<&str> = store.entries().iter().map(|e| e.product_id.as_str()).collect();
    assert_eq!(ids, vec!["salad-greek", "salad-caesar", "salad-quinoa", "salad-detox"]);
    assert_eq!(store.current_quantity("salad-greek"), 2);

    let totals = aggregate_day(store.plan(), Weekday::Thursday, &catalog);
    assert_eq!(totals.total_quantity, 5);
    // 2 * 9.0 + 12.0 + 18.0 + 6.0
    assert_float_absolute_eq!(totals.protein, 54.0, 1e-9);
    // 2 * 350 + 240 + 980 * 0.35 + 280
    assert_float_absolute_eq!(totals.calcium, 1563.0, 1e-9);
    assert!(aggregate_day(store.plan(), Weekday::Monday, &catalog).is_empty());
}

#[test]
fn test_calcium_falls_back_to_potassium() {
    let catalog = catalog();
    let mut store = WeeklyPlanStore::default();
    store.set_quantity("veg-carrot", 2);

    let totals = aggregate_day(store.plan(), Weekday::Monday, &catalog);
    assert_float_absolute_eq!(totals.calcium, 2.0 * 1600.0 * 0.35, 1e-9);
    assert_float_absolute_eq!(totals.vitamin_c, 60.0, 1e-9);
}

#[test]
fn test_week_aggregate_counts_every_day() {
    let catalog = catalog();
    let mut store = WeeklyPlanStore::default();
    store.add_one("veg-kale");
    store.select_day(Weekday::Tuesday);
    store.add_one("veg-kale");
    store.add_one("discontinued-item");

    let week = aggregate_week(store.plan(), &catalog);
    assert_eq!(week.total_quantity, 2);
    assert_float_absolute_eq!(week.protein, 17.2, 1e-9);
    assert_float_absolute_eq!(week.calcium, 1016.0, 1e-9);
}

#[test]
fn test_generated_week_persists_through_file_store() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut kv = KvStore::open(&path).unwrap();
    let mut store = WeeklyPlanStore::load(&kv);
    assert!(store.seed_if_empty(catalog.all_products()));
    store.save(&mut kv).unwrap();
    kv.flush().unwrap();

    let reopened = KvStore::open(&path).unwrap();
    assert!(reopened.get(PLAN_KEY).is_some());
    let loaded = WeeklyPlanStore::load(&reopened);
    assert_eq!(loaded.plan(), store.plan());
    for day in Weekday::ALL {
        assert_eq!(loaded.plan().day(day).len(), 3, "{} should hold three items", day);
    }
}
