pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod nutrition;
pub mod prediction;
pub mod state;

pub use error::{NutriError, Result};
pub use models::{ActivityLevel, DishInfo, Gender, Goals, LogEntry, Profile};
