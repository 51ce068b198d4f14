mod export;
mod log_store;
mod persistence;
mod profile_store;

pub use export::{export_csv, write_log_csv};
pub use log_store::{LogStore, LogView, LOG_KEY};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use profile_store::{ProfileStore, SavedProfile, PROFILE_KEY};
