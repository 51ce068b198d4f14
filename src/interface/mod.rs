pub mod prompts;
pub mod render;

pub use prompts::{collect_profile, fuzzy_candidates, prompt_yes_no, resolve_dish, ProfileDraft};
pub use render::{
    display_dishes, display_goals, display_log, display_prediction, display_summary, progress_bar,
};
