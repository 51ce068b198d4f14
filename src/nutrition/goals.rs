use crate::models::{ActivityLevel, Gender, Goals};
use crate::nutrition::constants::*;

/// Round to the nearest integer, halves going up (2.5 -> 3, -2.5 -> -2).
#[inline]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Basal Metabolic Rate in kcal/day.
///
/// `10·weight + 6.25·height − 5·age + s`, with `s = +5` for men and `−161` for women.
pub fn basal_metabolic_rate(weight: f64, height: f64, age: u32, gender: Gender) -> f64 {
    BMR_WEIGHT_COEF * weight + BMR_HEIGHT_COEF * height - BMR_AGE_COEF * age as f64
        + gender_constant(gender)
}

/// Derive daily calorie, protein and carb targets from a body profile.
///
/// Pure and infallible. Inputs are not validated here; use
/// [`Profile::goals`](crate::models::Profile::goals) for checked input.
pub fn compute_goals(
    weight: f64,
    height: f64,
    age: u32,
    gender: Gender,
    activity: ActivityLevel,
) -> Goals {
    let bmr = basal_metabolic_rate(weight, height, age, gender);

    let calorie_goal = round_half_up(bmr * activity_multiplier(activity));
    let protein_goal = round_half_up(weight * protein_factor(activity));
    let carbs_goal =
        round_half_up((calorie_goal as f64 * CARBS_CALORIE_SHARE) / KCAL_PER_GRAM_CARBS);

    Goals {
        calorie_goal,
        protein_goal,
        carbs_goal,
    }
}
