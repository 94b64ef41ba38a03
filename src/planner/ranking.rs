use serde::Serialize;

use crate::models::NutrientProfile;
use crate::planner::constants::TOP_NUTRIENT_COUNT;

/// One labelled nutrient value of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientReading {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// The largest nutrient values of a product, at most four, zeros dropped.
///
/// Values are compared as raw numbers across units (kcal, g, mg), so this
/// orders by magnitude on the label, not by nutritional importance: a few
/// hundred mg of potassium outranks any realistic amount of protein in g.
/// Ties keep the listing order below.
pub fn top_nutrients(nutrition: &NutrientProfile) -> Vec<NutrientReading> {
    let mut readings = vec![
        NutrientReading { label: "Calories", value: nutrition.calories, unit: "kcal" },
        NutrientReading { label: "Protein", value: nutrition.protein, unit: "g" },
        NutrientReading { label: "Fiber", value: nutrition.fiber, unit: "g" },
        NutrientReading { label: "Iron", value: nutrition.iron, unit: "mg" },
        NutrientReading { label: "Potassium", value: nutrition.potassium_or_zero(), unit: "mg" },
        NutrientReading { label: "Vitamin C", value: nutrition.vitamin_c_or_zero(), unit: "mg" },
    ];

    readings.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));

    readings
        .into_iter()
        .take(TOP_NUTRIENT_COUNT)
        .filter(|r| r.value > 0.0)
        .collect()
}

/// Short label naming the standout micronutrient, for the planner table.
///
/// Calcium is weighed at 1/20 of its mg value against vitamin C and iron.
pub fn primary_nutrient(nutrition: &NutrientProfile) -> String {
    let vitamin_c = nutrition.vitamin_c_or_zero();
    let iron = nutrition.iron;
    let calcium = nutrition.calcium_or_estimate();

    if vitamin_c >= iron && vitamin_c >= calcium / 20.0 {
        format!("Vit C {:.0}mg", vitamin_c)
    } else if calcium / 20.0 >= iron {
        format!("Calcium {:.0}mg", calcium)
    } else {
        format!("Iron {:.1}mg", iron)
    }
}
