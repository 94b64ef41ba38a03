use serde::{Deserialize, Serialize};

use crate::planner::constants::CALCIUM_PER_POTASSIUM;

/// Per-unit nutrient composition of a product.
///
/// Calories in kcal, protein and fiber in g, minerals and vitamin C in mg.
/// The optional fields are absent for products the fact table has no
/// measurement for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientProfile {
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
    pub iron: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<f64>,
}

impl NutrientProfile {
    /// Measured calcium, or `potassium * 0.35` when calcium is absent.
    ///
    /// This is the only place the estimate is made; aggregation goes
    /// through here so it is never applied twice.
    #[inline]
    pub fn calcium_or_estimate(&self) -> f64 {
        match self.calcium {
            Some(calcium) => calcium,
            None => self.potassium.unwrap_or(0.0) * CALCIUM_PER_POTASSIUM,
        }
    }

    #[inline]
    pub fn vitamin_c_or_zero(&self) -> f64 {
        self.vitamin_c.unwrap_or(0.0)
    }

    #[inline]
    pub fn potassium_or_zero(&self) -> f64 {
        self.potassium.unwrap_or(0.0)
    }

    /// All present values are non-negative.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.fiber, self.iron]
            .into_iter()
            .chain(self.calcium)
            .chain(self.potassium)
            .chain(self.vitamin_c)
            .all(|v| v >= 0.0)
    }
}

/// Storefront aisle a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Vegetables,
    Fruits,
    Salads,
    #[serde(rename = "Ice Creams")]
    IceCreams,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Vegetables,
        Category::Fruits,
        Category::Salads,
        Category::IceCreams,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Salads => "Salads",
            Category::IceCreams => "Ice Creams",
        }
    }

    /// Lenient parse of free text. Unknown text falls back to `Vegetables`.
    pub fn from_label(text: &str) -> Category {
        match text.trim().to_lowercase().as_str() {
            "fruits" | "fruit" => Category::Fruits,
            "salads" | "salad" => Category::Salads,
            "ice creams" | "icecreams" | "ice-creams" | "icecream" => Category::IceCreams,
            _ => Category::Vegetables,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog product. Read-only once seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub unit: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub popularity: u32,

    #[serde(default)]
    pub health_benefits: Vec<String>,

    pub nutrition: NutrientProfile,
}

impl Product {
    /// Basic validation: non-empty id, non-negative price and nutrients.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && self.price >= 0.0 && self.nutrition.is_valid()
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} kcal, P:{} F:{} Fe:{} [{}]",
            self.name,
            self.id,
            self.nutrition.calories,
            self.nutrition.protein,
            self.nutrition.fiber,
            self.nutrition.iron,
            self.category
        )
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}
