use crate::catalog::{Dashboard, ProductSource};
use crate::models::{Order, Product, UserProfile, WeeklyPlan};
use crate::planner::{
    ComparisonTargets, MetricProgress, NutrientTargets, WeeklyReport, aggregate_day,
    primary_nutrient, top_nutrients,
};
use crate::state::{Cart, WeeklyPlanStore};

/// Width of the text progress bars.
const BAR_WIDTH: usize = 20;

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Print value/target rows with a bar per metric.
pub fn display_progress(metrics: &[MetricProgress]) {
    for m in metrics {
        println!(
            "  {:<10} {} {:>8.1} / {:>7.1} {:<2} ({:>3.0}%)",
            m.label,
            progress_bar(m.percent()),
            m.value,
            m.target,
            m.unit,
            m.percent()
        );
    }
}

/// Display a list of products with price and headline nutrition.
pub fn display_product_list(products: &[&Product], title: &str) {
    if products.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, products.len());
    println!();

    let max_name_len = products.iter().map(|p| p.name.len()).max().unwrap_or(10);

    for product in products {
        println!(
            "  {:<width$}  {:<18} Rs {:>6.0} / {:<14} {:>5.0} kcal  P:{:<5.1} F:{:<5.1}",
            product.name,
            product.id,
            product.price,
            product.unit,
            product.nutrition.calories,
            product.nutrition.protein,
            product.nutrition.fiber,
            width = max_name_len
        );
    }

    println!();
}

/// Display one product with its top nutrients.
pub fn display_product(product: &Product) {
    println!();
    println!("=== {} ===", product.name);
    println!("{} | {} | Rs {:.0} / {}", product.id, product.category, product.price, product.unit);
    if !product.description.is_empty() {
        println!("{}", product.description);
    }
    println!();

    println!("Top nutrients:");
    for reading in top_nutrients(&product.nutrition) {
        println!("  {:<10} {:>8.1} {}", reading.label, reading.value, reading.unit);
    }

    if !product.health_benefits.is_empty() {
        println!();
        println!("Benefits:");
        for benefit in &product.health_benefits {
            println!("  - {}", benefit);
        }
    }
    println!();
}

pub fn display_profile(profile: &UserProfile) {
    println!();
    println!("=== {} ===", profile.name);
    println!("Id: {}", profile.id);
    println!("Age: {}", profile.age);
    println!("Height: {:.0} cm", profile.height);
    println!("Weight: {:.1} kg", profile.weight);
    println!("Activity: {}", profile.activity_level);
    println!("City: {}", profile.city);
    println!();
}

pub fn display_targets(daily: &NutrientTargets, comparison: &ComparisonTargets) {
    println!();
    println!("=== Daily Targets ===");
    println!("  Calories   {:>7.0} kcal", daily.calories);
    println!("  Protein    {:>7.0} g", comparison.protein);
    println!("  Fiber      {:>7.0} g", comparison.fiber);
    println!("  Iron       {:>7.0} mg", comparison.iron);
    println!("  Vitamin C  {:>7.0} mg", comparison.vitamin_c);
    println!("  Calcium    {:>7.0} mg", comparison.calcium);
    println!();
}

/// Display the selected planner day as a table plus progress against targets.
pub fn display_day<S>(store: &WeeklyPlanStore, products: &S, targets: &ComparisonTargets)
where
    S: ProductSource + ?Sized,
{
    let day = store.selected_day();
    let rows: Vec<(&Product, u32)> = store
        .entries()
        .iter()
        .filter_map(|e| products.product_by_id(&e.product_id).map(|p| (p, e.quantity)))
        .collect();

    println!();
    println!("=== Weekly Diet Table ({}) ===", day.short());
    println!();

    if rows.is_empty() {
        println!("  No items selected");
    } else {
        let max_name_len = rows.iter().map(|(p, _)| p.name.len()).max().unwrap_or(10);
        println!(
            "  {:<width$} {:>4} {:>6} {:>6} {:>6}  Primary",
            "Item",
            "Qty",
            "Cal",
            "Prot",
            "Fib",
            width = max_name_len
        );
        for (product, qty) in &rows {
            let q = *qty as f64;
            println!(
                "  {:<width$} {:>4} {:>6.0} {:>6.1} {:>6.1}  {}",
                product.name,
                qty,
                product.nutrition.calories * q,
                product.nutrition.protein * q,
                product.nutrition.fiber * q,
                primary_nutrient(&product.nutrition),
                width = max_name_len
            );
        }
    }

    let totals = aggregate_day(store.plan(), day, products);
    println!();
    println!(
        "--- {} total: {} items, {:.0} kcal ---",
        day,
        totals.total_quantity,
        totals.calories
    );
    display_progress(&totals.progress(targets));
    println!();
}

/// One summary line per weekday.
pub fn display_week<S>(plan: &WeeklyPlan, products: &S, routine: bool)
where
    S: ProductSource + ?Sized,
{
    println!();
    println!(
        "=== Weekly Plan (routine {}) ===",
        if routine { "on" } else { "off" }
    );
    println!();

    for (day, entries) in plan.iter_days() {
        let totals = aggregate_day(plan, day, products);
        let names: Vec<String> = entries
            .iter()
            .map(|e| match products.product_by_id(&e.product_id) {
                Some(p) if e.quantity > 1 => format!("{} x{}", p.name, e.quantity),
                Some(p) => p.name.clone(),
                None => format!("{} (unavailable)", e.product_id),
            })
            .collect();

        println!(
            "  {}  {:>3} items {:>6.0} kcal  {}",
            day.short(),
            totals.total_quantity,
            totals.calories,
            if names.is_empty() { "-".to_string() } else { names.join(", ") }
        );
    }
    println!();
}

pub fn display_cart<S>(cart: &Cart, products: &S, targets: &ComparisonTargets)
where
    S: ProductSource + ?Sized,
{
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }

    println!();
    println!("=== Cart ({} item(s)) ===", cart.total_items());
    println!();

    for entry in cart.entries() {
        match products.product_by_id(&entry.product_id) {
            Some(p) => println!(
                "  {:>3} x {:<24} Rs {:>7.0}",
                entry.quantity,
                p.name,
                p.price * entry.quantity as f64
            ),
            None => println!("  {:>3} x {:<24} (unavailable)", entry.quantity, entry.product_id),
        }
    }

    let pricing = cart.pricing(products);
    println!();
    println!("Subtotal:     Rs {:>7.0}", pricing.subtotal);
    if pricing.delivery_fee > 0.0 {
        println!("Delivery:     Rs {:>7.0}", pricing.delivery_fee);
    } else {
        println!("Delivery:         FREE");
    }
    println!("Total:        Rs {:>7.0}", pricing.grand_total);
    println!();
    println!("Nutrition vs daily targets:");
    display_progress(&cart.nutrition(products).progress(targets));
    println!();
}

pub fn display_order(order: &Order) {
    println!(
        "Order {} placed {} ({} items, Rs {:.0}, {:?})",
        order.id,
        order.ordered_at,
        order.item_count(),
        order.total,
        order.status
    );
}

pub fn display_report(report: &WeeklyReport) {
    println!();
    println!("=== Weekly Report: {} ===", report.period_label);
    println!("Nutrition from Monday to today ({} day(s) of targets)", report.elapsed_days);
    println!();
    display_progress(&report.values.progress(&report.targets));
    if report.reset_applied {
        println!();
        println!("Weekly report reset applied after Sunday 12:00 PM.");
    }
    println!();
}

pub fn display_dashboard(dashboard: &Dashboard<'_>) {
    display_product_list(&dashboard.trending, "Trending");
    display_product_list(&dashboard.recommended, "Recommended");

    println!("=== This Week ===");
    println!("  Items ordered:  {}", dashboard.summary.items_ordered);
    println!("  Saved:          Rs {:.0}", dashboard.summary.estimated_savings);
    println!("  Avg protein:    {:.1} g", dashboard.summary.avg_protein);

    display_report(&dashboard.report);
}
