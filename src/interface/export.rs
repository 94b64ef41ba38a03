use std::io::Write;
use std::path::Path;

use crate::catalog::ProductSource;
use crate::error::Result;
use crate::models::WeeklyPlan;

const HEADER: [&str; 10] = [
    "day",
    "product_id",
    "name",
    "quantity",
    "calories",
    "protein_g",
    "fiber_g",
    "vitamin_c_mg",
    "calcium_mg",
    "iron_mg",
];

/// Write one row per day and entry with the entry's nutrient contribution.
///
/// Entries whose product is gone from the catalog are skipped. Returns the
/// number of data rows written.
pub fn write_plan_csv_to<W, S>(plan: &WeeklyPlan, products: &S, writer: W) -> Result<usize>
where
    W: Write,
    S: ProductSource + ?Sized,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    let mut rows = 0;
    for (day, entries) in plan.iter_days() {
        for entry in entries {
            let Some(product) = products.product_by_id(&entry.product_id) else {
                continue;
            };
            let n = &product.nutrition;
            let q = entry.quantity as f64;
            wtr.write_record([
                day.name().to_string(),
                product.id.clone(),
                product.name.clone(),
                entry.quantity.to_string(),
                format!("{:.1}", n.calories * q),
                format!("{:.2}", n.protein * q),
                format!("{:.2}", n.fiber * q),
                format!("{:.2}", n.vitamin_c_or_zero() * q),
                format!("{:.2}", n.calcium_or_estimate() * q),
                format!("{:.2}", n.iron * q),
            ])?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}

/// Export the weekly plan to a CSV file.
pub fn write_plan_csv<S>(plan: &WeeklyPlan, products: &S, path: &Path) -> Result<usize>
where
    S: ProductSource + ?Sized,
{
    let file = std::fs::File::create(path)?;
    write_plan_csv_to(plan, products, file)
}
