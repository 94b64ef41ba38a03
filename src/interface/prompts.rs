use dialoguer::{Confirm, Input, Select};

use crate::error::{MartError, Result};
use crate::models::{ActivityLevel, ProfileUpdate, UserProfile};

/// Prompt for a yes/no answer.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn prompt_number<T>(prompt: &str, current: T) -> Result<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| MartError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Walk through every profile field, pre-filled with current values.
///
/// Only fields whose value changed end up in the returned update.
pub fn prompt_profile_update(profile: &UserProfile) -> Result<ProfileUpdate> {
    let name: String = Input::new()
        .with_prompt("Name")
        .default(profile.name.clone())
        .interact_text()?;

    let age: u32 = prompt_number("Age (years)", profile.age)?;
    let height: f64 = prompt_number("Height (cm)", profile.height)?;
    let weight: f64 = prompt_number("Weight (kg)", profile.weight)?;

    if weight < 0.0 || height < 0.0 {
        return Err(MartError::InvalidInput(
            "Height and weight must be non-negative".to_string(),
        ));
    }

    let levels: Vec<&str> = ActivityLevel::ALL.iter().map(|l| l.label()).collect();
    let current = ActivityLevel::ALL
        .iter()
        .position(|l| *l == profile.activity_level)
        .unwrap_or(1);
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&levels)
        .default(current)
        .interact()?;
    let activity_level = ActivityLevel::ALL[selection];

    let city: String = Input::new()
        .with_prompt("City")
        .default(profile.city.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(ProfileUpdate {
        name: (name != profile.name).then_some(name),
        weight: (weight != profile.weight).then_some(weight),
        height: (height != profile.height).then_some(height),
        age: (age != profile.age).then_some(age),
        activity_level: (activity_level != profile.activity_level).then_some(activity_level),
        city: (city != profile.city).then_some(city),
    })
}
