use serde::{Deserialize, Serialize};

/// Self-reported activity level.
///
/// Unrecognized stored text deserializes to `Moderate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [
        ActivityLevel::Low,
        ActivityLevel::Moderate,
        ActivityLevel::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }

    pub fn from_label(text: &str) -> ActivityLevel {
        match text.trim().to_lowercase().as_str() {
            "low" => ActivityLevel::Low,
            "high" => ActivityLevel::High,
            _ => ActivityLevel::Moderate,
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(text: String) -> Self {
        ActivityLevel::from_label(&text)
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Body metrics and preferences of a storefront user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,

    /// Body weight in kg.
    pub weight: f64,

    /// Height in cm.
    pub height: f64,

    /// Age in years.
    pub age: u32,

    #[serde(default)]
    pub activity_level: ActivityLevel,

    #[serde(default)]
    pub city: String,
}

/// Partial profile update. Absent fields leave the profile untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<u32>,
    pub activity_level: Option<ActivityLevel>,
    pub city: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }
}

impl UserProfile {
    /// Merge the present fields of `update` into this profile.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(level) = update.activity_level {
            self.activity_level = level;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
    }
}
