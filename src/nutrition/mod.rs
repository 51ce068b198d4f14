pub mod constants;
pub mod goals;
pub mod progress;

pub use constants::*;
pub use goals::{basal_metabolic_rate, compute_goals, round_half_up};
pub use progress::{summarize, DailySummary, MacroProgress};
