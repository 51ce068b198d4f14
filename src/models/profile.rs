use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};
use crate::nutrition::{self, DEFAULT_CALORIE_GOAL, DEFAULT_CARBS_GOAL, DEFAULT_PROTEIN_GOAL};

/// Biological sex used to pick the BMR constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(NutriError::InvalidInput(format!(
                "gender must be 'male' or 'female', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Self-reported activity level.
///
/// Parsing never fails: anything that is not `sedentary` or `active`
/// is treated as `moderate`, which is also the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Moderate,
    Active,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
    ];

    /// Map a free-text label to an activity level, falling back to `Moderate`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "active" => ActivityLevel::Active,
            _ => ActivityLevel::Moderate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(label: String) -> Self {
        ActivityLevel::from_label(&label)
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body profile used to derive daily macro goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Body weight in kilograms.
    pub weight: f64,

    /// Height in centimeters.
    pub height: f64,

    /// Age in years.
    pub age: u32,

    pub gender: Gender,

    #[serde(default)]
    pub activity: ActivityLevel,
}

impl Profile {
    /// Reject values the goal formula cannot produce meaningful numbers for.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(NutriError::InvalidInput(format!(
                "weight must be a positive number of kilograms, got {}",
                self.weight
            )));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(NutriError::InvalidInput(format!(
                "height must be a positive number of centimeters, got {}",
                self.height
            )));
        }
        if self.age == 0 {
            return Err(NutriError::InvalidInput(
                "age must be a positive number of years".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate the profile and compute its daily goals.
    pub fn goals(&self) -> Result<Goals> {
        self.validate()?;
        Ok(nutrition::compute_goals(
            self.weight,
            self.height,
            self.age,
            self.gender,
            self.activity,
        ))
    }
}

/// Daily macro targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    /// kcal/day
    pub calorie_goal: i64,

    /// grams/day
    pub protein_goal: i64,

    /// grams/day
    pub carbs_goal: i64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calorie_goal: DEFAULT_CALORIE_GOAL,
            protein_goal: DEFAULT_PROTEIN_GOAL,
            carbs_goal: DEFAULT_CARBS_GOAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            weight: 70.0,
            height: 175.0,
            age: 30,
            gender: Gender::Male,
            activity: ActivityLevel::Sedentary,
        }
    }

    #[test]
    fn test_activity_fallback_to_moderate() {
        assert_eq!(ActivityLevel::from_label("Sedentary"), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::from_label(" active "), ActivityLevel::Active);
        assert_eq!(ActivityLevel::from_label("moderate"), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_label("couch potato"), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_label(""), ActivityLevel::Moderate);
    }

    #[test]
    fn test_activity_deserialize_unknown() {
        let level: ActivityLevel = serde_json::from_str("\"marathoner\"").unwrap();
        assert_eq!(level, ActivityLevel::Moderate);

        let level: ActivityLevel = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(level, ActivityLevel::Active);
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"active\"");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert!(sample_profile().validate().is_ok());

        let mut p = sample_profile();
        p.weight = 0.0;
        assert!(matches!(p.validate(), Err(NutriError::InvalidInput(_))));

        let mut p = sample_profile();
        p.height = f64::NAN;
        assert!(p.validate().is_err());

        let mut p = sample_profile();
        p.age = 0;
        assert!(p.goals().is_err());
    }

    #[test]
    fn test_profile_goals() {
        let goals = sample_profile().goals().unwrap();
        assert_eq!(goals.calorie_goal, 1979);
        assert_eq!(goals.protein_goal, 70);
        assert_eq!(goals.carbs_goal, 247);
    }

    #[test]
    fn test_goals_json_field_names() {
        let json = serde_json::to_string(&Goals::default()).unwrap();
        assert!(json.contains("\"calorieGoal\":2000"));
        assert!(json.contains("\"proteinGoal\":100"));
        assert!(json.contains("\"carbsGoal\":250"));
    }
}
