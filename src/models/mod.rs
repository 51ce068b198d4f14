mod dish;
mod log_entry;
mod profile;

pub use dish::DishInfo;
pub use log_entry::LogEntry;
pub use profile::{ActivityLevel, Gender, Goals, Profile};
