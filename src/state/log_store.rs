use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{NutriError, Result};
use crate::models::{DishInfo, LogEntry};
use crate::state::persistence::KeyValueStore;

/// Storage key holding the serialized log.
pub const LOG_KEY: &str = "dailyLog";

/// Persisted, ordered list of log entries.
///
/// Every mutation reads the whole collection, changes it in memory and
/// writes the whole collection back. Mutating methods take `&mut self`,
/// so a single `LogStore` serializes its writers.
pub struct LogStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LogStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, LOG_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// All entries in storage (creation) order. Empty if nothing was logged yet.
    pub fn read_all(&self) -> Result<Vec<LogEntry>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<LogEntry> =
            serde_json::from_str(&raw).map_err(|e| NutriError::CorruptLog(e.to_string()))?;

        for (index, entry) in entries.iter_mut().enumerate() {
            if entry.id.is_nil() {
                entry.id = legacy_id(entry, index);
            }
        }

        debug!(count = entries.len(), "loaded log");
        Ok(entries)
    }

    fn write_all(&mut self, entries: &[LogEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(&self.key, &json)?;
        debug!(count = entries.len(), "saved log");
        Ok(())
    }

    /// Log one serving of `dish` with the given per-serving facts.
    ///
    /// Negative or non-finite facts are rejected before anything is written.
    pub fn append(&mut self, dish: &str, info: &DishInfo) -> Result<LogEntry> {
        if !info.is_valid() {
            return Err(NutriError::InvalidInput(format!(
                "nutrition facts for '{}' must be non-negative numbers",
                dish
            )));
        }
        let entry = LogEntry::new(dish, info);
        self.append_entry(entry.clone())?;
        Ok(entry)
    }

    /// Append a prebuilt entry to the end of the log.
    pub fn append_entry(&mut self, entry: LogEntry) -> Result<()> {
        let mut entries = self.read_all()?;
        info!(dish = %entry.dish, calories = entry.calories, "logging entry");
        entries.push(entry);
        self.write_all(&entries)
    }

    /// Remove the entry at storage `index` and return it.
    pub fn remove(&mut self, index: usize) -> Result<LogEntry> {
        let mut entries = self.read_all()?;
        check_index(index, entries.len())?;

        let removed = entries.remove(index);
        self.write_all(&entries)?;
        info!(dish = %removed.dish, index, "removed entry");
        Ok(removed)
    }

    /// Change the serving count of the entry at storage `index` by `delta`.
    ///
    /// The quantity never drops below 1. Returns the new quantity.
    pub fn adjust_quantity(&mut self, index: usize, delta: i64) -> Result<u32> {
        let mut entries = self.read_all()?;
        check_index(index, entries.len())?;

        let quantity = entries[index].adjust_quantity(delta);
        self.write_all(&entries)?;
        info!(dish = %entries[index].dish, index, delta, quantity, "adjusted quantity");
        Ok(quantity)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Result<LogEntry> {
        let index = self.position_of(id)?;
        self.remove(index)
    }

    pub fn adjust_quantity_by_id(&mut self, id: Uuid, delta: i64) -> Result<u32> {
        let index = self.position_of(id)?;
        self.adjust_quantity(index, delta)
    }

    fn position_of(&self, id: Uuid) -> Result<usize> {
        self.read_all()?
            .iter()
            .position(|e| e.id == id)
            .ok_or(NutriError::EntryNotFound(id))
    }

    /// Entries most-recent-first, each tagged with its storage index.
    pub fn display_view(&self) -> Result<LogView> {
        Ok(LogView::from_entries(self.read_all()?))
    }

    /// Entries created on the given UTC day, in storage order.
    pub fn entries_on(&self, day: NaiveDate) -> Result<Vec<LogEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.is_on(day))
            .collect())
    }

    /// Drop every entry by deleting the stored collection.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.key)?;
        info!("cleared log");
        Ok(())
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(NutriError::EntryOutOfRange { index, len });
    }
    Ok(())
}

/// Deterministic id for an entry stored without one, stable until the log is rewritten.
fn legacy_id(entry: &LogEntry, index: usize) -> Uuid {
    Uuid::from_u64_pair(entry.date.timestamp_millis() as u64, index as u64)
}

/// The log in display order (most recent first).
#[derive(Debug, Clone, Default)]
pub struct LogView {
    rows: Vec<(usize, LogEntry)>,
}

impl LogView {
    /// Reverse storage-ordered `entries` for display.
    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        let mut rows: Vec<(usize, LogEntry)> = entries.into_iter().enumerate().collect();
        rows.reverse();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only entries created on `day`; storage indices are preserved.
    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.rows.retain(|(_, e)| e.is_on(day));
        self
    }

    /// Entry shown at display `position` (0-based).
    pub fn get(&self, position: usize) -> Option<&LogEntry> {
        self.rows.get(position).map(|(_, e)| e)
    }

    /// Storage index of the entry shown at display `position` (0-based).
    pub fn storage_index(&self, position: usize) -> Result<usize> {
        self.rows
            .get(position)
            .map(|(index, _)| *index)
            .ok_or(NutriError::EntryOutOfRange {
                index: position,
                len: self.rows.len(),
            })
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.rows.iter().map(|(_, e)| e)
    }

    /// Owned entries in display order, e.g. for aggregation.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::persistence::MemoryStore;

    fn info(calories: f64) -> DishInfo {
        DishInfo::new("1 serving", calories, 5.0, 20.0, 3.0)
    }

    fn store_with(dishes: &[(&str, f64)]) -> LogStore<MemoryStore> {
        let mut log = LogStore::new(MemoryStore::new());
        for (dish, cal) in dishes {
            log.append(dish, &info(*cal)).unwrap();
        }
        log
    }

    #[test]
    fn test_read_all_empty() {
        let log = LogStore::new(MemoryStore::new());
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_keeps_order() {
        let log = store_with(&[("momos", 210.0), ("samosa", 262.0)]);
        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].dish, "momos");
        assert_eq!(entries[1].dish, "samosa");
        assert_eq!(entries[1].quantity, 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut log = store_with(&[("momos", 210.0)]);
        let err = log.remove(1).unwrap_err();
        assert!(matches!(err, NutriError::EntryOutOfRange { index: 1, len: 1 }));
        assert_eq!(log.read_all().unwrap().len(), 1);

        let mut empty = LogStore::new(MemoryStore::new());
        assert!(empty.remove(0).is_err());
    }

    #[test]
    fn test_adjust_quantity_floor() {
        let mut log = store_with(&[("momos", 210.0)]);
        assert_eq!(log.adjust_quantity(0, -5).unwrap(), 1);
        assert_eq!(log.adjust_quantity(0, 3).unwrap(), 4);
        assert_eq!(log.read_all().unwrap()[0].quantity, 4);
    }

    #[test]
    fn test_display_view_reverses() {
        let log = store_with(&[("momos", 210.0), ("samosa", 262.0), ("uttapam", 180.0)]);
        let view = log.display_view().unwrap();
        assert_eq!(view.get(0).unwrap().dish, "uttapam");
        assert_eq!(view.storage_index(0).unwrap(), 2);
        assert_eq!(view.storage_index(2).unwrap(), 0);
        assert!(view.storage_index(3).is_err());
    }

    #[test]
    fn test_view_on_day_keeps_storage_index() {
        let mut log = LogStore::new(MemoryStore::new());
        let day1 = "2025-03-01T08:00:00Z".parse().unwrap();
        let day2 = "2025-03-02T08:00:00Z".parse().unwrap();
        log.append_entry(LogEntry::at("momos", &info(210.0), day1)).unwrap();
        log.append_entry(LogEntry::at("samosa", &info(262.0), day2)).unwrap();
        log.append_entry(LogEntry::at("paratha", &info(260.0), day1)).unwrap();

        let day_one = log.entries_on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()).unwrap();
        let names: Vec<&str> = day_one.iter().map(|e| e.dish.as_str()).collect();
        assert_eq!(names, vec!["momos", "paratha"]);

        let view = log
            .display_view()
            .unwrap()
            .on_day(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(0).unwrap().dish, "paratha");
        assert_eq!(view.storage_index(0).unwrap(), 2);
        assert_eq!(view.storage_index(1).unwrap(), 0);
    }

    #[test]
    fn test_corrupt_log_fails_closed() {
        let mut store = MemoryStore::new();
        store.set(LOG_KEY, "{not json").unwrap();
        let log = LogStore::new(store);
        assert!(matches!(log.read_all(), Err(NutriError::CorruptLog(_))));

        let mut store = MemoryStore::new();
        store.set(LOG_KEY, "{\"dish\":\"momos\"}").unwrap();
        let log = LogStore::new(store);
        assert!(matches!(log.read_all(), Err(NutriError::CorruptLog(_))));
    }

    #[test]
    fn test_legacy_entries_get_stable_ids() {
        let mut store = MemoryStore::new();
        store
            .set(
                LOG_KEY,
                r#"[{"dish":"momos","calories":210,"quantity":0,"date":"2025-03-01T08:00:00.000Z"}]"#,
            )
            .unwrap();
        let mut log = LogStore::new(store);

        let first = log.read_all().unwrap();
        let second = log.read_all().unwrap();
        assert!(!first[0].id.is_nil());
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].quantity, 1);

        assert_eq!(log.adjust_quantity_by_id(first[0].id, 1).unwrap(), 2);
        // Id is persisted with the rewrite.
        assert_eq!(log.read_all().unwrap()[0].id, first[0].id);
    }

    #[test]
    fn test_by_id_operations() {
        let mut log = store_with(&[("momos", 210.0), ("samosa", 262.0)]);
        let samosa_id = log.read_all().unwrap()[1].id;

        assert_eq!(log.adjust_quantity_by_id(samosa_id, 2).unwrap(), 3);
        let removed = log.remove_by_id(samosa_id).unwrap();
        assert_eq!(removed.dish, "samosa");
        assert_eq!(removed.quantity, 3);

        assert!(matches!(
            log.remove_by_id(samosa_id),
            Err(NutriError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let mut log = LogStore::with_key(MemoryStore::new(), "archivedLog");
        log.append("momos", &info(210.0)).unwrap();

        let store = log.into_inner();
        assert!(store.get(LOG_KEY).unwrap().is_none());
        assert!(store.get("archivedLog").unwrap().is_some());
    }

    #[test]
    fn test_clear() {
        let mut log = store_with(&[("momos", 210.0)]);
        log.clear().unwrap();
        assert!(log.read_all().unwrap().is_empty());

        let store = log.into_inner();
        assert!(store.get(LOG_KEY).unwrap().is_none());
    }

    #[test]
    fn test_append_rejects_negative_facts() {
        let mut log = store_with(&[("momos", 210.0)]);
        let bad = DishInfo::new("1 serving", 120.0, -1.0, 10.0, 2.0);
        assert!(matches!(
            log.append("mystery", &bad),
            Err(NutriError::InvalidInput(_))
        ));

        let mut nan = info(100.0);
        nan.calories = f64::NAN;
        assert!(log.append("mystery", &nan).is_err());
        assert_eq!(log.read_all().unwrap().len(), 1);
    }
}
