use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Day of the planning week. The week starts on Monday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based position in the week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn short(self) -> &'static str {
        &self.name()[..3]
    }

    /// Case-insensitive lookup by full or three-letter name.
    pub fn from_name(text: &str) -> Option<Weekday> {
        let lower = text.trim().to_lowercase();
        Weekday::ALL.into_iter().find(|day| {
            day.name().to_lowercase() == lower || day.short().to_lowercase() == lower
        })
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Weekday::from_name(s).ok_or_else(|| format!("unknown weekday '{}'", s))
    }
}

/// One product on one planner day. Quantity is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(rename = "id")]
    pub product_id: String,
    pub quantity: u32,
}

impl PlanEntry {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Seven day plans, one list of entries per weekday.
///
/// Product ids are unique within a day. The same product may appear on
/// several days. Serializes as an object keyed by weekday name; reading it
/// back goes through `planner::normalize_plan`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyPlan {
    days: [Vec<PlanEntry>; 7],
}

impl WeeklyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Weekday) -> &[PlanEntry] {
        &self.days[day.index()]
    }

    pub(crate) fn day_mut(&mut self, day: Weekday) -> &mut Vec<PlanEntry> {
        &mut self.days[day.index()]
    }

    /// Quantity of a product on a day, 0 when absent.
    pub fn quantity(&self, day: Weekday, product_id: &str) -> u32 {
        self.day(day)
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    /// Summed quantity of a product over all seven days.
    pub fn quantity_across_week(&self, product_id: &str) -> u32 {
        Weekday::ALL
            .into_iter()
            .map(|day| self.quantity(day, product_id))
            .fold(0u32, u32::saturating_add)
    }

    /// All entries of the week, Monday first, without deduplication.
    pub fn entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.days.iter().flatten()
    }

    pub fn iter_days(&self) -> impl Iterator<Item = (Weekday, &[PlanEntry])> {
        Weekday::ALL
            .into_iter()
            .map(move |day| (day, self.day(day)))
    }

    /// True when every day is empty.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }
}

impl Serialize for WeeklyPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (day, entries) in self.iter_days() {
            map.serialize_entry(day.name(), entries)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_from_name() {
        assert_eq!(Weekday::from_name("sunday"), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_name("Wed"), Some(Weekday::Wednesday));
        assert_eq!(Weekday::from_name("Funday"), None);
    }

    #[test]
    fn test_serializes_all_days() {
        let mut plan = WeeklyPlan::new();
        plan.day_mut(Weekday::Friday).push(PlanEntry::new("veg-kale", 2));

        let value = serde_json::to_value(&plan).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert_eq!(value["Friday"][0]["id"], "veg-kale");
        assert_eq!(value["Friday"][0]["quantity"], 2);
        assert_eq!(value["Monday"], serde_json::json!([]));
    }

    #[test]
    fn test_quantity_across_week() {
        let mut plan = WeeklyPlan::new();
        plan.day_mut(Weekday::Monday).push(PlanEntry::new("fruit-apple", 1));
        plan.day_mut(Weekday::Thursday).push(PlanEntry::new("fruit-apple", 2));
        assert_eq!(plan.quantity_across_week("fruit-apple"), 3);

        plan.day_mut(Weekday::Sunday).push(PlanEntry::new("fruit-apple", u32::MAX));
        assert_eq!(plan.quantity_across_week("fruit-apple"), u32::MAX);
        assert_eq!(plan.entries().count(), 2);
    }
}
