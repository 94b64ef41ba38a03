use serde::Serialize;

use crate::models::UserProfile;
use crate::planner::constants::*;

/// Personalized daily intake computed from a profile.
///
/// Holds only the four computed metrics. Vitamin C and calcium are fixed
/// constants that callers merge in through [`ComparisonTargets`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientTargets {
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
    pub iron: f64,
}

/// Daily recommended intake for a profile.
///
/// Values are rounded to whole units. Never cache the result across a
/// profile change.
pub fn compute_targets(profile: &UserProfile) -> NutrientTargets {
    let multiplier = activity_multiplier(profile.activity_level);

    NutrientTargets {
        calories: (profile.weight * multiplier).round(),
        protein: (profile.weight * PROTEIN_G_PER_KG).round(),
        fiber: (FIBER_BASE_G + profile.weight * FIBER_G_PER_KG).round(),
        iron: if profile.age < IRON_AGE_CUTOFF {
            IRON_TARGET_YOUNGER_MG
        } else {
            IRON_TARGET_OLDER_MG
        },
    }
}

/// The five metrics the planner, cart, and weekly report compare against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTargets {
    pub vitamin_c: f64,
    pub protein: f64,
    pub fiber: f64,
    pub calcium: f64,
    pub iron: f64,
}

impl ComparisonTargets {
    /// Merge computed daily targets with the fixed vitamin C and calcium values.
    pub fn from_daily(daily: &NutrientTargets) -> Self {
        Self {
            vitamin_c: VITAMIN_C_TARGET_MG,
            protein: daily.protein,
            fiber: daily.fiber,
            calcium: CALCIUM_TARGET_MG,
            iron: daily.iron,
        }
    }

    /// Targets shown before any profile has been loaded.
    pub fn fallback() -> Self {
        Self {
            vitamin_c: VITAMIN_C_TARGET_MG,
            protein: FALLBACK_PROTEIN_G,
            fiber: FALLBACK_FIBER_G,
            calcium: CALCIUM_TARGET_MG,
            iron: IRON_TARGET_YOUNGER_MG,
        }
    }

    pub fn for_profile(profile: Option<&UserProfile>) -> Self {
        match profile {
            Some(p) => Self::from_daily(&compute_targets(p)),
            None => Self::fallback(),
        }
    }

    /// Every metric multiplied by `days`, constants included.
    pub fn scaled(&self, days: i64) -> Self {
        let f = days as f64;
        Self {
            vitamin_c: self.vitamin_c * f,
            protein: self.protein * f,
            fiber: self.fiber * f,
            calcium: self.calcium * f,
            iron: self.iron * f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    fn profile(weight: f64, age: u32, activity_level: ActivityLevel) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Test".to_string(),
            weight,
            height: 170.0,
            age,
            activity_level,
            city: String::new(),
        }
    }

    #[test]
    fn test_moderate_seventy_kg() {
        let targets = compute_targets(&profile(70.0, 30, ActivityLevel::Moderate));
        assert_eq!(
            targets,
            NutrientTargets {
                calories: 2240.0,
                protein: 77.0,
                fiber: 31.0,
                iron: 18.0,
            }
        );
    }

    #[test]
    fn test_older_low_activity() {
        let targets = compute_targets(&profile(70.0, 60, ActivityLevel::Low));
        assert_eq!(targets.iron, 10.0);
        assert_eq!(targets.calories, 1960.0);
    }

    #[test]
    fn test_iron_cutoff_is_exclusive() {
        assert_eq!(compute_targets(&profile(70.0, 49, ActivityLevel::High)).iron, 18.0);
        assert_eq!(compute_targets(&profile(70.0, 50, ActivityLevel::High)).iron, 10.0);
    }

    #[test]
    fn test_comparison_merges_constants() {
        let daily = compute_targets(&profile(55.0, 25, ActivityLevel::High));
        let cmp = ComparisonTargets::from_daily(&daily);
        assert_eq!(cmp.vitamin_c, 90.0);
        assert_eq!(cmp.calcium, 1000.0);
        assert_eq!(cmp.protein, daily.protein);
        assert_eq!(cmp.iron, daily.iron);
    }

    #[test]
    fn test_scaled_includes_constants() {
        let week = ComparisonTargets::fallback().scaled(3);
        assert_eq!(week.vitamin_c, 270.0);
        assert_eq!(week.calcium, 3000.0);
        assert_eq!(week.protein, 150.0);
    }

    #[test]
    fn test_zero_weight_profile() {
        let targets = compute_targets(&profile(0.0, 10, ActivityLevel::Moderate));
        assert_eq!(targets.calories, 0.0);
        assert_eq!(targets.fiber, 25.0);
    }
}
