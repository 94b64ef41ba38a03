use crate::models::ActivityLevel;

/// Calcium estimate per mg of potassium when calcium was never measured.
pub const CALCIUM_PER_POTASSIUM: f64 = 0.35;

// ─────────────────────────────────────────────────────────────────────────────
// Daily target formula
// ─────────────────────────────────────────────────────────────────────────────

/// Protein target in g per kg of bodyweight.
pub const PROTEIN_G_PER_KG: f64 = 1.1;

/// Fiber target base in g, before the bodyweight term.
pub const FIBER_BASE_G: f64 = 25.0;

/// Fiber target increment in g per kg of bodyweight.
pub const FIBER_G_PER_KG: f64 = 0.08;

/// Age at which the iron target drops.
pub const IRON_AGE_CUTOFF: u32 = 50;

/// Iron target in mg below the age cutoff.
pub const IRON_TARGET_YOUNGER_MG: f64 = 18.0;

/// Iron target in mg at or above the age cutoff.
pub const IRON_TARGET_OLDER_MG: f64 = 10.0;

/// Fixed vitamin C target in mg, merged in by callers.
pub const VITAMIN_C_TARGET_MG: f64 = 90.0;

/// Fixed calcium target in mg, merged in by callers.
pub const CALCIUM_TARGET_MG: f64 = 1000.0;

/// Protein target used when no profile is loaded.
pub const FALLBACK_PROTEIN_G: f64 = 50.0;

/// Fiber target used when no profile is loaded.
pub const FALLBACK_FIBER_G: f64 = 25.0;

/// Calories per kg of bodyweight per day for an activity level.
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Low => 28.0,
        ActivityLevel::Moderate => 32.0,
        ActivityLevel::High => 36.0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Weekly report window
// ─────────────────────────────────────────────────────────────────────────────

/// Hour on Sunday at which the weekly report resets.
pub const RESET_HOUR: u32 = 12;

/// Days in a full reporting window.
pub const DAYS_PER_WEEK: i64 = 7;

// ─────────────────────────────────────────────────────────────────────────────
// Cart pricing
// ─────────────────────────────────────────────────────────────────────────────

/// Subtotal from which delivery is free.
pub const FREE_DELIVERY_THRESHOLD: f64 = 500.0;

/// Delivery fee charged below the threshold.
pub const DELIVERY_FEE: f64 = 35.0;

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────────────────

/// Upper bound of the random popularity jitter for trending products.
pub const TRENDING_JITTER: f64 = 8.0;

/// Products shown in each dashboard rail.
pub const RAIL_SIZE: usize = 6;

/// Fixed savings figure shown in the weekly summary.
pub const ESTIMATED_SAVINGS: f64 = 260.0;

/// Nutrients shown in a product's top list.
pub const TOP_NUTRIENT_COUNT: usize = 4;
