use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::DishInfo;

fn default_quantity() -> u32 {
    1
}

/// A JSON scalar that older app builds wrote where a number or label belongs.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

/// Number, numeric string or `null`; anything unusable counts as 0.
fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Number(n)) => n,
        Some(Scalar::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

/// Serving count; `null` or a non-positive value counts as 1.
fn lenient_quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Number(n)) => n,
        Some(Scalar::Text(s)) => s.trim().parse().unwrap_or(1.0),
        None => 1.0,
    };
    if !value.is_finite() || value < 1.0 {
        return Ok(1);
    }
    Ok(value.min(u32::MAX as f64) as u32)
}

/// Serving label; numbers are stringified and `null` becomes empty.
fn lenient_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// One logged dish.
///
/// Nutrition values are per serving; totals are always derived by
/// multiplying with `quantity` at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Stable identifier. Entries stored without one deserialize as nil and
    /// are assigned a derived id by the log store.
    #[serde(default)]
    pub id: Uuid,

    pub dish: String,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub calories: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub protein: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub carbs: f64,

    #[serde(default, deserialize_with = "lenient_amount")]
    pub fat: f64,

    #[serde(default, deserialize_with = "lenient_label")]
    pub per_serving: String,

    /// Number of servings, never below 1.
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,

    /// Creation time, serialized as RFC 3339.
    pub date: DateTime<Utc>,
}

impl LogEntry {
    /// Build a fresh single-serving entry stamped with the current time.
    pub fn new(dish: &str, info: &DishInfo) -> Self {
        Self::at(dish, info, Utc::now())
    }

    /// Build a single-serving entry with an explicit timestamp.
    pub fn at(dish: &str, info: &DishInfo, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            dish: dish.to_string(),
            calories: info.calories,
            protein: info.protein,
            carbs: info.carbs,
            fat: info.fat,
            per_serving: info.per_serving.clone(),
            quantity: 1,
            date,
        }
    }

    /// Apply a signed change to the serving count, flooring at 1.
    ///
    /// Returns the new quantity.
    pub fn adjust_quantity(&mut self, delta: i64) -> u32 {
        let next = (self.quantity as i64).saturating_add(delta);
        self.quantity = next.clamp(1, u32::MAX as i64) as u32;
        self.quantity
    }

    #[inline]
    pub fn total_calories(&self) -> f64 {
        self.calories * self.quantity as f64
    }

    #[inline]
    pub fn total_protein(&self) -> f64 {
        self.protein * self.quantity as f64
    }

    #[inline]
    pub fn total_carbs(&self) -> f64 {
        self.carbs * self.quantity as f64
    }

    #[inline]
    pub fn total_fat(&self) -> f64 {
        self.fat * self.quantity as f64
    }

    /// Whether the entry was created on the given UTC calendar day.
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date.date_naive() == day
    }
}
