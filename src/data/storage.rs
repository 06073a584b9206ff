//! SQLite storage layer for the workout log.
//!
//! One database file holding a single `sets` table:
//! id, date (ISO-8601 TEXT), category, exercise, weight, reps,
//! logged_at (RFC 3339 insertion timestamp).
//!
//! Rows are append-only. The API exposes inserts and reads, nothing else.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};

use super::models::{WorkoutSet, DEFAULT_CATALOG};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sets (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    date      TEXT    NOT NULL,
    category  TEXT    NOT NULL,
    exercise  TEXT    NOT NULL,
    weight    REAL    NOT NULL,
    reps      INTEGER NOT NULL,
    logged_at TEXT    NOT NULL
)";

const INSERT_SET: &str = "INSERT INTO sets (date, category, exercise, weight, reps, logged_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// Map a `date, category, exercise, weight, reps` row to a model.
fn row_to_set(row: &Row) -> rusqlite::Result<WorkoutSet> {
    let date_text: String = row.get(0)?;
    let date = date_text.parse::<NaiveDate>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(WorkoutSet {
        date,
        category: row.get(1)?,
        exercise: row.get(2)?,
        weight: row.get(3)?,
        reps: row.get(4)?,
    })
}

/// Storage interface for the workout database
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the database at `path`, creating parent directories
    /// and seeding the default exercise catalog on first run.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {dir:?}"))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {path:?}"))?;
        Self::init(conn)
    }

    /// Open an in-memory database (used by tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        let storage = Storage { conn };
        if storage.row_count()? == 0 {
            storage.seed_catalog()?;
        }
        Ok(storage)
    }

    fn row_count(&self) -> Result<usize> {
        let count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM sets", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Write catalog rows for the stock categories into an empty store.
    fn seed_catalog(&self) -> Result<()> {
        let today = Utc::now().date_naive();
        for (category, exercises) in DEFAULT_CATALOG {
            for exercise in *exercises {
                self.append(&WorkoutSet::catalog_row(today, category, exercise)?)?;
            }
        }
        Ok(())
    }

    /// Append one row. This is the only write path.
    pub fn append(&self, set: &WorkoutSet) -> Result<()> {
        self.conn
            .execute(
                INSERT_SET,
                params![
                    set.date.to_string(),
                    set.category,
                    set.exercise,
                    set.weight,
                    set.reps,
                    Utc::now().to_rfc3339(),
                ],
            )
            .context("Failed to append set")?;
        Ok(())
    }

    /// Append a batch of rows in one transaction. Returns the row count.
    pub fn append_all(&mut self, sets: &[WorkoutSet]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_SET)?;
            let logged_at = Utc::now().to_rfc3339();
            for set in sets {
                stmt.execute(params![
                    set.date.to_string(),
                    set.category,
                    set.exercise,
                    set.weight,
                    set.reps,
                    logged_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(sets.len())
    }

    /// Every row in the log, ordered by date then insertion order.
    pub fn all_sets(&self) -> Result<Vec<WorkoutSet>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, category, exercise, weight, reps FROM sets ORDER BY date, id",
        )?;
        let rows = stmt.query_map([], row_to_set)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read workout log")
    }

    /// Every row logged on `date`, in insertion order (catalog rows included,
    /// matching the day view and per-day export).
    pub fn sets_on(&self, date: NaiveDate) -> Result<Vec<WorkoutSet>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, category, exercise, weight, reps FROM sets WHERE date = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([date.to_string()], row_to_set)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read sets for {date}"))
    }

    /// Performed sets for one exercise, newest date first.
    pub fn sets_for_exercise(&self, exercise: &str) -> Result<Vec<WorkoutSet>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, category, exercise, weight, reps FROM sets
             WHERE exercise = ?1 AND reps > 0 ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([exercise], row_to_set)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read history for {exercise:?}"))
    }

    /// Distinct categories: union of the stored rows and the stock catalog,
    /// sorted.
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT category FROM sets")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names: BTreeSet<String> = rows.collect::<rusqlite::Result<_>>()?;
        for (category, _) in DEFAULT_CATALOG {
            names.insert((*category).to_string());
        }
        Ok(names.into_iter().collect())
    }

    /// Distinct exercises under a category: union of the stored rows and the
    /// stock catalog, sorted.
    pub fn exercises_in(&self, category: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT exercise FROM sets WHERE category = ?1")?;
        let rows = stmt.query_map([category], |row| row.get::<_, String>(0))?;

        let mut names: BTreeSet<String> = rows.collect::<rusqlite::Result<_>>()?;
        if let Some((_, stock)) = DEFAULT_CATALOG.iter().find(|(c, _)| *c == category) {
            for exercise in *stock {
                names.insert((*exercise).to_string());
            }
        }
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn seeded_row_count() -> usize {
        DEFAULT_CATALOG.iter().map(|(_, exs)| exs.len()).sum()
    }

    #[test]
    fn test_fresh_store_is_seeded_with_catalog() {
        let storage = Storage::open_in_memory().unwrap();
        let sets = storage.all_sets().unwrap();
        assert_eq!(sets.len(), seeded_row_count());
        assert!(sets.iter().all(|s| !s.is_logged()));
    }

    #[test]
    fn test_append_is_visible_to_subsequent_reads() {
        let storage = Storage::open_in_memory().unwrap();
        let before = storage.all_sets().unwrap().len();

        let set = WorkoutSet::logged(day("2025-05-01"), "Legs", "Squat", 60.0, 8).unwrap();
        storage.append(&set).unwrap();

        let after = storage.all_sets().unwrap();
        assert_eq!(after.len(), before + 1);
        assert!(after.contains(&set));
    }

    #[test]
    fn test_sets_on_returns_only_that_day() {
        let storage = Storage::open_in_memory().unwrap();
        let a = WorkoutSet::logged(day("2025-05-01"), "Legs", "Squat", 60.0, 8).unwrap();
        let b = WorkoutSet::logged(day("2025-05-01"), "Legs", "Leg Press", 100.0, 10).unwrap();
        let c = WorkoutSet::logged(day("2025-05-02"), "Back", "Barbell Row", 40.0, 8).unwrap();
        storage.append(&a).unwrap();
        storage.append(&b).unwrap();
        storage.append(&c).unwrap();

        let on_first = storage.sets_on(day("2025-05-01")).unwrap();
        assert_eq!(on_first, vec![a, b]);
        assert!(storage.sets_on(day("2025-05-03")).unwrap().is_empty());
    }

    #[test]
    fn test_exercise_history_is_logged_only_newest_first() {
        let storage = Storage::open_in_memory().unwrap();
        let old = WorkoutSet::logged(day("2025-04-28"), "Legs", "Squat", 55.0, 8).unwrap();
        let new = WorkoutSet::logged(day("2025-05-01"), "Legs", "Squat", 60.0, 8).unwrap();
        let other = WorkoutSet::logged(day("2025-05-01"), "Legs", "Leg Press", 100.0, 10).unwrap();
        storage.append(&old).unwrap();
        storage.append(&new).unwrap();
        storage.append(&other).unwrap();

        // The seeded "Squat" catalog row must not show up in history
        let history = storage.sets_for_exercise("Squat").unwrap();
        assert_eq!(history, vec![new, old]);
    }

    #[test]
    fn test_categories_merge_stored_and_stock() {
        let storage = Storage::open_in_memory().unwrap();
        let set = WorkoutSet::logged(day("2025-05-01"), "Cardio", "Rowing", 0.0, 20).unwrap();
        storage.append(&set).unwrap();

        let categories = storage.categories().unwrap();
        assert!(categories.contains(&"Cardio".to_string()));
        assert!(categories.contains(&"Chest".to_string()));
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_exercises_in_merges_custom_rows() {
        let storage = Storage::open_in_memory().unwrap();
        let row = WorkoutSet::catalog_row(day("2025-05-01"), "Legs", "Romanian Deadlift").unwrap();
        storage.append(&row).unwrap();

        let exercises = storage.exercises_in("Legs").unwrap();
        assert!(exercises.contains(&"Squat".to_string()));
        assert!(exercises.contains(&"Romanian Deadlift".to_string()));

        // Unknown category without stock entries is empty
        assert!(storage.exercises_in("Yoga").unwrap().is_empty());
    }

    #[test]
    fn test_append_all_batches_rows() {
        let mut storage = Storage::open_in_memory().unwrap();
        let before = storage.all_sets().unwrap().len();
        let batch = vec![
            WorkoutSet::logged(day("2025-05-01"), "Legs", "Squat", 60.0, 8).unwrap(),
            WorkoutSet::logged(day("2025-05-01"), "Legs", "Squat", 60.0, 7).unwrap(),
            WorkoutSet::logged(day("2025-05-02"), "Chest", "Dumbbell Fly", 12.5, 12).unwrap(),
        ];

        let appended = storage.append_all(&batch).unwrap();
        assert_eq!(appended, 3);
        assert_eq!(storage.all_sets().unwrap().len(), before + 3);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("workouts.db");
        let storage = Storage::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(storage.all_sets().unwrap().len(), seeded_row_count());

        // Reopening must not reseed
        drop(storage);
        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.all_sets().unwrap().len(), seeded_row_count());
    }
}
