use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{NutriError, Result};
use crate::models::{ActivityLevel, Gender, Profile};
use crate::prediction::DishClass;

/// Minimum Jaro-Winkler similarity for a dish name suggestion.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Profile fields already supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub activity: Option<ActivityLevel>,
}

fn prompt_positive(prompt: &str, default: Option<f64>) -> Result<f64> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    let raw = input.interact_text()?;

    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| NutriError::InvalidInput(format!("'{}' is not a number", raw.trim())))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(NutriError::InvalidInput(format!(
            "{} must be positive",
            prompt
        )));
    }
    Ok(value)
}

/// Prompt for body weight in kilograms.
pub fn prompt_weight(default: Option<f64>) -> Result<f64> {
    prompt_positive("Weight (kg)", default)
}

/// Prompt for height in centimeters.
pub fn prompt_height(default: Option<f64>) -> Result<f64> {
    prompt_positive("Height (cm)", default)
}

pub fn prompt_age(default: Option<u32>) -> Result<u32> {
    let mut input = Input::<String>::new().with_prompt("Age");
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    let raw = input.interact_text()?;

    match raw.trim().parse::<u32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(NutriError::InvalidInput(format!(
            "'{}' is not a valid age",
            raw.trim()
        ))),
    }
}

pub fn prompt_gender(default: Gender) -> Result<Gender> {
    let options = [Gender::Male, Gender::Female];
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&options)
        .default(options.iter().position(|g| *g == default).unwrap_or(0))
        .interact()?;
    Ok(options[selection])
}

pub fn prompt_activity(default: ActivityLevel) -> Result<ActivityLevel> {
    let options = ActivityLevel::ALL;
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(options.iter().position(|a| *a == default).unwrap_or(1))
        .interact()?;
    Ok(options[selection])
}

/// Fill in missing profile fields interactively.
///
/// `previous` supplies defaults, normally the last saved profile.
pub fn collect_profile(draft: ProfileDraft, previous: Option<&Profile>) -> Result<Profile> {
    let weight = match draft.weight {
        Some(w) => w,
        None => prompt_weight(previous.map(|p| p.weight))?,
    };
    let height = match draft.height {
        Some(h) => h,
        None => prompt_height(previous.map(|p| p.height))?,
    };
    let age = match draft.age {
        Some(a) => a,
        None => prompt_age(previous.map(|p| p.age))?,
    };
    let gender = match draft.gender {
        Some(g) => g,
        None => prompt_gender(previous.map(|p| p.gender).unwrap_or(Gender::Male))?,
    };
    let activity = match draft.activity {
        Some(a) => a,
        None => prompt_activity(previous.map(|p| p.activity).unwrap_or_default())?,
    };

    Ok(Profile {
        weight,
        height,
        age,
        gender,
        activity,
    })
}

/// Dishes whose label resembles `input`, best match first.
pub fn fuzzy_candidates(input: &str) -> Vec<(DishClass, f64)> {
    let needle = input.trim().to_lowercase().replace([' ', '-'], "_");
    let mut candidates: Vec<(DishClass, f64)> = DishClass::ALL
        .into_iter()
        .map(|d| (d, jaro_winkler(d.label(), &needle)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Turn user text into a dish, asking for confirmation on fuzzy matches.
pub fn resolve_dish(input: &str) -> Result<DishClass> {
    if let Ok(dish) = input.parse::<DishClass>() {
        return Ok(dish);
    }

    let candidates = fuzzy_candidates(input);

    match candidates.as_slice() {
        [] => Err(NutriError::UnknownDish(input.to_string())),
        [(dish, _)] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", dish))
                .default(true)
                .interact()?;
            if confirm {
                Ok(*dish)
            } else {
                Err(NutriError::UnknownDish(input.to_string()))
            }
        }
        many => {
            let mut options: Vec<String> = many.iter().take(5).map(|(d, _)| d.to_string()).collect();
            let shown = options.len();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            if selection < shown {
                Ok(many[selection].0)
            } else {
                Err(NutriError::UnknownDish(input.to_string()))
            }
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
