//! Workout history ingest.
//!
//! Histories arrive as CSV exports from the backing store. Rows that fail to
//! parse are skipped with a warning so one bad row cannot hide an entire
//! history from the classifier.

use crate::{Result, WorkoutCategory, WorkoutRecord};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for workout history exports
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    category: String,
    performed_at: String,
    duration_minutes: u32,
    xp_awarded: Option<u64>,
}

impl TryFrom<CsvRow> for WorkoutRecord {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Records(format!("Invalid UUID: {}", e)))?;

        let performed_at = DateTime::parse_from_rfc3339(&row.performed_at)
            .map_err(|e| crate::Error::Records(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        let category = match row.category.to_lowercase().as_str() {
            "strength" => WorkoutCategory::Strength,
            "cardio" => WorkoutCategory::Cardio,
            "functional" => WorkoutCategory::Functional,
            other => {
                return Err(crate::Error::Records(format!(
                    "Unknown workout category: {}",
                    other
                )))
            }
        };

        Ok(WorkoutRecord {
            id,
            category,
            performed_at,
            duration_minutes: row.duration_minutes,
            xp_awarded: row.xp_awarded.unwrap_or(0),
        })
    }
}

/// Load workout records from a CSV export, newest first.
///
/// Malformed rows are skipped with a warning; a missing file is an error.
pub fn load_workout_records(path: &Path) -> Result<Vec<WorkoutRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut records = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match WorkoutRecord::try_from(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping workout row: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize workout row: {}", e);
            }
        }
    }

    // Sort by performed_at, newest first
    records.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));

    tracing::info!("Loaded {} workout records from {:?}", records.len(), path);

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,category,performed_at,duration_minutes,xp_awarded\n";

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_load_and_sort_newest_first() {
        let csv = format!(
            "{}\
             11111111-1111-1111-1111-111111111111,strength,2026-01-03T10:00:00Z,45,450\n\
             22222222-2222-2222-2222-222222222222,cardio,2026-01-05T10:00:00Z,30,300\n\
             33333333-3333-3333-3333-333333333333,functional,2026-01-04T10:00:00Z,20,\n",
            HEADER
        );
        let (_dir, path) = write_csv(&csv);

        let records = load_workout_records(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].category, WorkoutCategory::Cardio);
        assert_eq!(records[1].category, WorkoutCategory::Functional);
        assert_eq!(records[2].category, WorkoutCategory::Strength);

        // Missing xp_awarded defaults to zero
        assert_eq!(records[1].xp_awarded, 0);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let csv = format!(
            "{}\
             not-a-uuid,strength,2026-01-03T10:00:00Z,45,450\n\
             11111111-1111-1111-1111-111111111111,yoga,2026-01-03T10:00:00Z,45,450\n\
             22222222-2222-2222-2222-222222222222,cardio,2026-01-05T10:00:00Z,30,300\n",
            HEADER
        );
        let (_dir, path) = write_csv(&csv);

        let records = load_workout_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, WorkoutCategory::Cardio);
    }

    #[test]
    fn test_category_parsing_case_insensitive() {
        let csv = format!(
            "{}\
             11111111-1111-1111-1111-111111111111,Strength,2026-01-03T10:00:00Z,45,450\n",
            HEADER
        );
        let (_dir, path) = write_csv(&csv);

        let records = load_workout_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, WorkoutCategory::Strength);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent.csv");

        assert!(load_workout_records(&path).is_err());
    }

    #[test]
    fn test_empty_file_yields_no_records() {
        let (_dir, path) = write_csv(HEADER);

        let records = load_workout_records(&path).unwrap();
        assert!(records.is_empty());
    }
}
