use crate::models::{ActivityLevel, Gender};

/// BMR coefficient per kilogram of body weight.
pub const BMR_WEIGHT_COEF: f64 = 10.0;

/// BMR coefficient per centimeter of height.
pub const BMR_HEIGHT_COEF: f64 = 6.25;

/// BMR coefficient per year of age (subtracted).
pub const BMR_AGE_COEF: f64 = 5.0;

pub const BMR_MALE_CONSTANT: f64 = 5.0;
pub const BMR_FEMALE_CONSTANT: f64 = -161.0;

/// Share of daily calories allotted to carbohydrates.
pub const CARBS_CALORIE_SHARE: f64 = 0.5;

/// kcal per gram of carbohydrate.
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

// ─────────────────────────────────────────────────────────────────────────────
// Goals used until a profile has been saved
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_CALORIE_GOAL: i64 = 2000;
pub const DEFAULT_PROTEIN_GOAL: i64 = 100;
pub const DEFAULT_CARBS_GOAL: i64 = 250;

/// Activity multiplier applied to BMR.
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
    }
}

/// Grams of protein per kilogram of body weight.
pub fn protein_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.0,
        ActivityLevel::Moderate => 1.6,
        ActivityLevel::Active => 2.0,
    }
}

pub fn gender_constant(gender: Gender) -> f64 {
    match gender {
        Gender::Male => BMR_MALE_CONSTANT,
        Gender::Female => BMR_FEMALE_CONSTANT,
    }
}
