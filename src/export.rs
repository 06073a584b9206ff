//! Spreadsheet export and JSON import for the workout log.
//!
//! Both exports carry the same columns as the store:
//! `date,category,exercise,weight,reps`, one row per record.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::data::WorkoutSet;

/// Write the rows as CSV to any writer.
pub fn write_csv<W: Write>(sets: &[WorkoutSet], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for set in sets {
        csv_writer.serialize(set)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the rows as a CSV file.
pub fn export_csv(sets: &[WorkoutSet], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(sets, file).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the rows as a single-sheet XLSX workbook.
pub fn export_xlsx(sets: &[WorkoutSet], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Workout Log")?;

    let header = Format::new().set_bold();
    for (col, title) in ["date", "category", "exercise", "weight", "reps"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, set) in sets.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, set.date.to_string())?;
        sheet.write_string(row, 1, &set.category)?;
        sheet.write_string(row, 2, &set.exercise)?;
        sheet.write_number(row, 3, set.weight)?;
        sheet.write_number(row, 4, f64::from(set.reps))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read a JSON array of `{date, category, exercise, weight, reps}` objects.
///
/// Every record passes through the same validation as the entry form: rows
/// with `reps > 0` must be well-formed performed sets, rows with `reps == 0`
/// become catalog rows.
pub fn import_json(path: &Path) -> Result<Vec<WorkoutSet>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let raw: Vec<WorkoutSet> = serde_json::from_reader(BufReader::new(file))
        .context("Invalid workout JSON: expected an array of set records")?;
    raw.iter()
        .enumerate()
        .map(|(i, record)| {
            let checked = if record.reps > 0 {
                WorkoutSet::logged(
                    record.date,
                    &record.category,
                    &record.exercise,
                    record.weight,
                    record.reps,
                )
            } else {
                WorkoutSet::catalog_row(record.date, &record.category, &record.exercise)
            };
            checked.with_context(|| format!("Invalid record {} in {}", i + 1, path.display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn set(date: &str, category: &str, exercise: &str, weight: f64, reps: u32) -> WorkoutSet {
        WorkoutSet {
            date: date.parse::<NaiveDate>().unwrap(),
            category: category.to_string(),
            exercise: exercise.to_string(),
            weight,
            reps,
        }
    }

    fn fixture() -> Vec<WorkoutSet> {
        vec![
            set("2025-05-01", "Legs", "Squat", 60.0, 8),
            set("2025-05-01", "Legs", "Leg Press", 100.0, 10),
            set("2025-05-05", "Chest", "Barbell Bench Press", 40.0, 10),
        ]
    }

    #[test]
    fn test_csv_round_trips_through_serde() {
        let sets = fixture();
        let mut buffer = Vec::new();
        write_csv(&sets, &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let parsed: Vec<WorkoutSet> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(parsed, sets);
    }

    #[test]
    fn test_csv_row_count_matches_log() {
        let sets = fixture();
        let mut buffer = Vec::new();
        write_csv(&sets, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,category,exercise,weight,reps"));
        assert_eq!(lines.count(), sets.len());
    }

    #[test]
    fn test_xlsx_export_writes_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workout_log.xlsx");
        export_xlsx(&fixture(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // XLSX is a zip container
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_json_import_reads_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workout_data.json");
        std::fs::write(
            &path,
            r#"[
                {"date": "2025-05-01", "category": "Legs", "exercise": "Squat", "weight": 60.0, "reps": 8},
                {"date": "2025-05-02", "category": "Back", "exercise": "Pull Ups", "weight": 0.0, "reps": 10}
            ]"#,
        )
        .unwrap();

        let sets = import_json(&path).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0], set("2025-05-01", "Legs", "Squat", 60.0, 8));
        assert_eq!(sets[1].exercise, "Pull Ups");
    }

    #[test]
    fn test_json_import_rejects_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"date": "2025-05-01"}"#).unwrap();
        assert!(import_json(&path).is_err());
    }

    #[test]
    fn test_json_import_validates_each_record() {
        let dir = tempfile::tempdir().unwrap();

        // Negative weight fails the same check the entry form applies
        let path = dir.path().join("negative_weight.json");
        std::fs::write(
            &path,
            r#"[{"date": "2025-05-01", "category": "Legs", "exercise": "Squat", "weight": -60.0, "reps": 8}]"#,
        )
        .unwrap();
        assert!(import_json(&path).is_err());

        // Empty exercise name is rejected even when the row parses
        let path = dir.path().join("empty_exercise.json");
        std::fs::write(
            &path,
            r#"[{"date": "2025-05-01", "category": "Legs", "exercise": "", "weight": 60.0, "reps": 8}]"#,
        )
        .unwrap();
        assert!(import_json(&path).is_err());
    }

    #[test]
    fn test_json_import_accepts_catalog_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"date": "2025-05-01", "category": "Legs", "exercise": "Hack Squat", "weight": 0.0, "reps": 0}]"#,
        )
        .unwrap();

        let sets = import_json(&path).unwrap();
        assert_eq!(sets.len(), 1);
        assert!(!sets[0].is_logged());
        assert_eq!(sets[0].exercise, "Hack Squat");
    }
}
