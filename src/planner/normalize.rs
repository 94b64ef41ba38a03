use serde_json::Value;
use tracing::debug;

use crate::models::{PlanEntry, WeeklyPlan, Weekday};

/// Build a canonical weekly plan from any stored plan shape.
///
/// Recognized day list elements:
/// - a bare product id (string or integer); each repetition adds 1
/// - an object with an `id`; adds its positive `quantity` floored to an
///   integer, or 1 when the quantity is missing or not positive
///
/// Anything else is skipped. A non-object input, or a day that is not a
/// list, yields empty days. Entries keep first-seen order and ids are
/// unique per day. Never fails.
pub fn normalize_plan(raw: &Value) -> WeeklyPlan {
    let mut plan = WeeklyPlan::new();

    let Some(input) = raw.as_object() else {
        debug!("stored plan is not an object, starting from an empty week");
        return plan;
    };

    for day in Weekday::ALL {
        let Some(items) = input.get(day.name()).and_then(Value::as_array) else {
            continue;
        };

        let mut totals: Vec<(String, u32)> = Vec::new();
        for item in items {
            if let Some((id, qty)) = read_element(item) {
                match totals.iter_mut().find(|(seen, _)| *seen == id) {
                    Some((_, total)) => *total = total.saturating_add(qty),
                    None => totals.push((id, qty)),
                }
            }
        }

        // Flooring a fractional quantity below 1 contributes nothing.
        *plan.day_mut(day) = totals
            .into_iter()
            .filter(|(_, qty)| *qty > 0)
            .map(|(id, qty)| PlanEntry::new(id, qty))
            .collect();
    }

    plan
}

/// Parse stored JSON text, falling back to an empty week when it is not JSON.
pub fn normalize_plan_str(text: &str) -> WeeklyPlan {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => normalize_plan(&value),
        Err(e) => {
            debug!("stored plan is not valid JSON ({}), starting from an empty week", e);
            WeeklyPlan::new()
        }
    }
}

fn read_element(item: &Value) -> Option<(String, u32)> {
    if let Some(id) = id_of(item) {
        return Some((id, 1));
    }

    let object = item.as_object()?;
    let id = object.get("id").and_then(id_of)?;
    let qty = match object.get("quantity").and_then(Value::as_f64) {
        Some(q) if q > 0.0 => q.floor().min(u32::MAX as f64) as u32,
        _ => 1,
    };
    Some((id, qty))
}

fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_u64().map(|n| n.to_string()),
        _ => None,
    }
}
