use crate::models::{Goals, LogEntry};

/// Consumption of one macro against its daily goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroProgress {
    pub total: f64,
    pub goal: i64,
}

impl MacroProgress {
    pub fn new(total: f64, goal: i64) -> Self {
        Self { total, goal }
    }

    /// Fraction of the goal reached, clamped to `[0, 1]`.
    ///
    /// `None` when the goal is not positive.
    pub fn ratio(&self) -> Option<f64> {
        if self.goal <= 0 {
            return None;
        }
        Some((self.total / self.goal as f64).clamp(0.0, 1.0))
    }

    /// Amount left before the goal is met (zero once exceeded).
    pub fn remaining(&self) -> f64 {
        (self.goal as f64 - self.total).max(0.0)
    }
}

/// Aggregated totals of a set of log entries.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub entry_count: usize,
    pub servings: u64,
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    /// Fat has no goal; tracked for display only.
    pub total_fat: f64,
}

/// Sum quantity-weighted nutrition over `entries` and compare with `goals`.
pub fn summarize(entries: &[LogEntry], goals: &Goals) -> DailySummary {
    let total_calories: f64 = entries.iter().map(LogEntry::total_calories).sum();
    let total_protein: f64 = entries.iter().map(LogEntry::total_protein).sum();
    let total_carbs: f64 = entries.iter().map(LogEntry::total_carbs).sum();
    let total_fat: f64 = entries.iter().map(LogEntry::total_fat).sum();

    DailySummary {
        entry_count: entries.len(),
        servings: entries.iter().map(|e| e.quantity as u64).sum(),
        calories: MacroProgress::new(total_calories, goals.calorie_goal),
        protein: MacroProgress::new(total_protein, goals.protein_goal),
        carbs: MacroProgress::new(total_carbs, goals.carbs_goal),
        total_fat,
    }
}
