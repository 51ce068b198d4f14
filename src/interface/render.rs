use crate::models::Goals;
use crate::nutrition::{DailySummary, MacroProgress};
use crate::prediction::{DishClass, Prediction};
use crate::state::LogView;

/// Width of the textual progress bars.
const BAR_WIDTH: usize = 30;

/// Render a `[#####.....]` bar for a ratio in `[0, 1]`.
///
/// `None` (goal not set) renders an empty bar with `?` markers.
pub fn progress_bar(ratio: Option<f64>, width: usize) -> String {
    match ratio {
        Some(r) => {
            let filled = ((r.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
            format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
        }
        None => format!("[{}]", "?".repeat(width)),
    }
}

fn display_macro(label: &str, unit: &str, progress: &MacroProgress) {
    let percent = progress
        .ratio()
        .map(|r| format!("{:>3.0}%", r * 100.0))
        .unwrap_or_else(|| "  -".to_string());
    println!(
        "  {:<9} {:>7.1} / {:<5} {:<4} {} {}  ({:.0} {} left)",
        label,
        progress.total,
        progress.goal,
        unit,
        progress_bar(progress.ratio(), BAR_WIDTH),
        percent,
        progress.remaining(),
        unit
    );
}

pub fn display_goals(goals: &Goals, from_profile: bool) {
    println!();
    if from_profile {
        println!("=== Daily Goals ===");
    } else {
        println!("=== Daily Goals (defaults, no profile saved) ===");
    }
    println!("  Calories: {} kcal", goals.calorie_goal);
    println!("  Protein:  {} g", goals.protein_goal);
    println!("  Carbs:    {} g", goals.carbs_goal);
    println!();
}

/// Totals against goals.
pub fn display_summary(summary: &DailySummary) {
    println!("--- Progress ---");
    display_macro("Calories", "kcal", &summary.calories);
    display_macro("Protein", "g", &summary.protein);
    display_macro("Carbs", "g", &summary.carbs);
    println!("  Fat       {:>7.1} g", summary.total_fat);
    println!(
        "  {} entries, {} servings",
        summary.entry_count, summary.servings
    );
    println!();
}

/// Log entries, most recent first, numbered by display position.
pub fn display_log(view: &LogView) {
    println!();
    println!("=== Daily Food Log ===");
    println!();

    if view.is_empty() {
        println!("No entries yet. Add some food!");
        println!();
        return;
    }

    let max_name_len = view.iter().map(|e| e.dish.len()).max().unwrap_or(10);

    for (i, entry) in view.iter().enumerate() {
        println!(
            "{:>3}. {:<width$} x{:<3} {:>6.0} kcal | P {:>5.1} g | C {:>5.1} g | {} | {}",
            i + 1,
            entry.dish,
            entry.quantity,
            entry.total_calories(),
            entry.total_protein(),
            entry.total_carbs(),
            entry.per_serving,
            entry.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
            width = max_name_len
        );
    }
    println!();
}

pub fn display_dishes() {
    println!();
    println!("=== Dishes ===");
    println!();
    for dish in DishClass::ALL {
        let info = dish.info();
        println!(
            "  {:<15} {:>4.0} kcal  P {:>4.1} g  C {:>4.1} g  F {:>4.1} g  per {}",
            dish.label(),
            info.calories,
            info.protein,
            info.carbs,
            info.fat,
            info.per_serving
        );
    }
    println!();
}

pub fn display_prediction(prediction: &Prediction) {
    let info = prediction.dish.info();
    println!(
        "Dish: {} ({:.2}% confidence)",
        prediction.dish, prediction.confidence
    );
    println!("Nutrition per {}", info.per_serving);
    println!("  Calories: {} kcal", info.calories);
    println!("  Protein:  {} g", info.protein);
    println!("  Carbs:    {} g", info.carbs);
    println!("  Fat:      {} g", info.fat);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(Some(0.0), 4), "[....]");
        assert_eq!(progress_bar(Some(0.5), 4), "[##..]");
        assert_eq!(progress_bar(Some(1.0), 4), "[####]");
        assert_eq!(progress_bar(Some(7.0), 4), "[####]");
        assert_eq!(progress_bar(None, 2), "[??]");
    }
}
