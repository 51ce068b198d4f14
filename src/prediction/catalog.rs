use std::fmt;
use std::str::FromStr;

use crate::error::{NutriError, Result};
use crate::models::DishInfo;

/// Dish categories, in the classifier's output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DishClass {
    Momos,
    Omelette,
    Paratha,
    RasMalai,
    Rasgulla,
    Samosa,
    TomatoChutney,
    Uttapam,
    VadaPav,
}

impl DishClass {
    pub const ALL: [DishClass; 9] = [
        DishClass::Momos,
        DishClass::Omelette,
        DishClass::Paratha,
        DishClass::RasMalai,
        DishClass::Rasgulla,
        DishClass::Samosa,
        DishClass::TomatoChutney,
        DishClass::Uttapam,
        DishClass::VadaPav,
    ];

    /// Number of classes the model scores.
    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Label as emitted by the model and stored in the log.
    pub fn label(&self) -> &'static str {
        match self {
            DishClass::Momos => "momos",
            DishClass::Omelette => "omelette",
            DishClass::Paratha => "paratha",
            DishClass::RasMalai => "ras_malai",
            DishClass::Rasgulla => "rasgulla",
            DishClass::Samosa => "samosa",
            DishClass::TomatoChutney => "tomato_chutney",
            DishClass::Uttapam => "uttapam",
            DishClass::VadaPav => "vada_pav",
        }
    }

    /// Static per-serving nutrition facts.
    pub fn info(&self) -> DishInfo {
        match self {
            DishClass::Momos => DishInfo::new("6 pieces (steamed)", 210.0, 9.0, 30.0, 6.0),
            DishClass::Omelette => DishInfo::new("2-egg omelette", 190.0, 13.0, 2.0, 14.0),
            DishClass::Paratha => DishInfo::new("1 plain paratha", 260.0, 5.0, 36.0, 10.0),
            DishClass::RasMalai => DishInfo::new("2 pieces", 250.0, 8.0, 30.0, 11.0),
            DishClass::Rasgulla => DishInfo::new("2 pieces", 186.0, 4.0, 40.0, 1.5),
            DishClass::Samosa => DishInfo::new("1 piece", 262.0, 3.5, 24.0, 17.0),
            DishClass::TomatoChutney => DishInfo::new("2 tablespoons", 40.0, 0.8, 7.0, 1.2),
            DishClass::Uttapam => DishInfo::new("1 medium uttapam", 200.0, 5.0, 35.0, 4.5),
            DishClass::VadaPav => DishInfo::new("1 piece", 290.0, 6.0, 40.0, 12.0),
        }
    }
}

impl FromStr for DishClass {
    type Err = NutriError;

    /// Exact label match, ignoring case and treating spaces as underscores.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|d| d.label() == normalized)
            .ok_or_else(|| NutriError::UnknownDish(s.to_string()))
    }
}

impl fmt::Display for DishClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
