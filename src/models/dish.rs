use serde::{Deserialize, Serialize};

/// Static nutrition facts for one serving of a dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishInfo {
    /// Human-readable serving size, e.g. "1 plate (6 pieces)".
    pub per_serving: String,

    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl DishInfo {
    pub fn new(per_serving: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            per_serving: per_serving.to_string(),
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Non-negative values only.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}
