use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::LogEntry;

const HEADER: [&str; 12] = [
    "id",
    "date",
    "dish",
    "per_serving",
    "quantity",
    "calories",
    "protein",
    "carbs",
    "fat",
    "total_calories",
    "total_protein",
    "total_carbs",
];

/// Write entries as CSV, one row per entry with per-serving values and totals.
pub fn write_log_csv<W: Write>(entries: &[LogEntry], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for entry in entries {
        wtr.write_record([
            entry.id.to_string(),
            entry.date.to_rfc3339(),
            entry.dish.clone(),
            entry.per_serving.clone(),
            entry.quantity.to_string(),
            format!("{:.1}", entry.calories),
            format!("{:.1}", entry.protein),
            format!("{:.1}", entry.carbs),
            format!("{:.1}", entry.fat),
            format!("{:.1}", entry.total_calories()),
            format!("{:.1}", entry.total_protein()),
            format!("{:.1}", entry.total_carbs()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write entries to a CSV file at `path`.
pub fn export_csv(entries: &[LogEntry], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_log_csv(entries, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DishInfo;

    #[test]
    fn test_csv_rows() {
        let mut entry = LogEntry::new("vada_pav", &DishInfo::new("1 piece", 290.0, 6.0, 40.0, 12.0));
        entry.quantity = 2;

        let mut buf = Vec::new();
        write_log_csv(&[entry], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,date,dish"));
        assert!(lines[1].contains(",vada_pav,1 piece,2,290.0,"));
        assert!(lines[1].ends_with(",580.0,12.0,80.0"));
    }

    #[test]
    fn test_csv_empty_log_has_header() {
        let mut buf = Vec::new();
        write_log_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
