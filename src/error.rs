use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Stored log is corrupted: {0}")]
    CorruptLog(String),

    #[error("Log entry {index} is out of range (log has {len} entries)")]
    EntryOutOfRange { index: usize, len: usize },

    #[error("Log entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Unknown dish: {0}")]
    UnknownDish(String),

    #[error("Invalid prediction: {0}")]
    InvalidPrediction(String),

    #[error("Model load failed: {0}")]
    ModelLoad(String),
}

pub type Result<T> = std::result::Result<T, NutriError>;
