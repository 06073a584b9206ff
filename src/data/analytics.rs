//! Aggregate computations behind the progress charts.
//!
//! All functions are pure over a slice of log rows and consider performed
//! sets only (`reps > 0`); catalog rows never contribute to an aggregate.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use super::models::{Period, RankBy, WorkoutSet};

/// Per-day totals for one exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub reps: u32,
    pub weight: f64,
    pub volume: f64,
}

/// Group one exercise's performed sets by date and sum reps, weight, and
/// volume per day. Sorted by date.
pub fn exercise_progress(sets: &[WorkoutSet], exercise: &str) -> Vec<ProgressPoint> {
    let mut by_date: BTreeMap<NaiveDate, ProgressPoint> = BTreeMap::new();
    for set in sets.iter().filter(|s| s.is_logged() && s.exercise == exercise) {
        let point = by_date.entry(set.date).or_insert_with(|| ProgressPoint {
            date: set.date,
            reps: 0,
            weight: 0.0,
            volume: 0.0,
        });
        point.reps += set.reps;
        point.weight += set.weight;
        point.volume += set.volume();
    }
    by_date.into_values().collect()
}

/// Label for the period containing `date`, e.g. "2025-W18" or "2025-05".
fn period_key(date: NaiveDate, period: Period) -> String {
    match period {
        Period::Week => {
            let week = date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Period::Month => format!("{}-{:02}", date.year(), date.month()),
    }
}

/// Count of distinct workout days per period, sorted by period label.
pub fn consistency(sets: &[WorkoutSet], period: Period) -> Vec<(String, u64)> {
    let mut days: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
    for set in sets.iter().filter(|s| s.is_logged()) {
        days.entry(period_key(set.date, period))
            .or_default()
            .insert(set.date);
    }
    days.into_iter()
        .map(|(label, dates)| (label, dates.len() as u64))
        .collect()
}

fn measure(set: &WorkoutSet, rank_by: RankBy) -> f64 {
    match rank_by {
        RankBy::Sets => 1.0,
        RankBy::Volume => set.volume(),
    }
}

/// Sum totals per key, largest first; ties break on the key so the order is
/// deterministic.
fn ranked_totals<F>(sets: &[WorkoutSet], rank_by: RankBy, key: F) -> Vec<(String, f64)>
where
    F: Fn(&WorkoutSet) -> &str,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for set in sets.iter().filter(|s| s.is_logged()) {
        *totals.entry(key(set).to_string()).or_default() += measure(set, rank_by);
    }
    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}

/// Per-category totals (set count or volume), sorted descending.
pub fn category_distribution(sets: &[WorkoutSet], rank_by: RankBy) -> Vec<(String, f64)> {
    ranked_totals(sets, rank_by, |s| &s.category)
}

/// Top `n` exercises by set count or volume, sorted descending.
pub fn top_exercises(sets: &[WorkoutSet], n: usize, rank_by: RankBy) -> Vec<(String, f64)> {
    let mut ranked = ranked_totals(sets, rank_by, |s| &s.exercise);
    ranked.truncate(n);
    ranked
}

/// Distinct exercise names across the whole log (catalog rows included),
/// sorted. Feeds the progress-chart exercise selector.
pub fn exercise_names(sets: &[WorkoutSet]) -> Vec<String> {
    let names: BTreeSet<&str> = sets.iter().map(|s| s.exercise.as_str()).collect();
    names.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(date: &str, category: &str, exercise: &str, weight: f64, reps: u32) -> WorkoutSet {
        WorkoutSet {
            date: date.parse().unwrap(),
            category: category.to_string(),
            exercise: exercise.to_string(),
            weight,
            reps,
        }
    }

    fn fixture() -> Vec<WorkoutSet> {
        vec![
            // Two squat sets on one day, one on another
            set("2025-05-01", "Legs", "Squat", 60.0, 8),
            set("2025-05-01", "Legs", "Squat", 60.0, 6),
            set("2025-05-08", "Legs", "Squat", 62.5, 8),
            // Other exercises
            set("2025-05-01", "Legs", "Leg Press", 100.0, 10),
            set("2025-05-05", "Chest", "Barbell Bench Press", 40.0, 10),
            // Catalog row, must never count
            set("2025-05-01", "Arms", "Hammer Curls", 0.0, 0),
        ]
    }

    #[test]
    fn test_progress_groups_by_date_and_sums() {
        let points = exercise_progress(&fixture(), "Squat");
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].date, "2025-05-01".parse().unwrap());
        assert_eq!(points[0].reps, 14);
        assert_eq!(points[0].weight, 120.0);
        assert_eq!(points[0].volume, 60.0 * 8.0 + 60.0 * 6.0);

        assert_eq!(points[1].date, "2025-05-08".parse().unwrap());
        assert_eq!(points[1].reps, 8);
        assert_eq!(points[1].volume, 62.5 * 8.0);
    }

    #[test]
    fn test_progress_of_unlogged_exercise_is_empty() {
        assert!(exercise_progress(&fixture(), "Hammer Curls").is_empty());
        assert!(exercise_progress(&fixture(), "Deadlift").is_empty());
    }

    #[test]
    fn test_consistency_counts_unique_days_per_week() {
        // 2025-05-01 is in ISO week 18, 2025-05-05 and 2025-05-08 in week 19
        let weekly = consistency(&fixture(), Period::Week);
        assert_eq!(
            weekly,
            vec![
                ("2025-W18".to_string(), 1),
                ("2025-W19".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_consistency_counts_unique_days_per_month() {
        let mut sets = fixture();
        sets.push(set("2025-06-02", "Back", "Pull Ups", 0.0, 10));
        // A second set on an already-counted day must not add a workout day
        sets.push(set("2025-05-01", "Legs", "Leg Press", 100.0, 8));

        let monthly = consistency(&sets, Period::Month);
        assert_eq!(
            monthly,
            vec![("2025-05".to_string(), 3), ("2025-06".to_string(), 1)]
        );
    }

    #[test]
    fn test_category_distribution_by_sets() {
        let by_sets = category_distribution(&fixture(), RankBy::Sets);
        assert_eq!(
            by_sets,
            vec![("Legs".to_string(), 4.0), ("Chest".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_category_distribution_by_volume() {
        let by_volume = category_distribution(&fixture(), RankBy::Volume);
        let legs = 60.0 * 8.0 + 60.0 * 6.0 + 62.5 * 8.0 + 100.0 * 10.0;
        let chest = 40.0 * 10.0;
        assert_eq!(
            by_volume,
            vec![("Legs".to_string(), legs), ("Chest".to_string(), chest)]
        );
    }

    #[test]
    fn test_top_exercises_truncates_and_sorts() {
        let top = top_exercises(&fixture(), 2, RankBy::Volume);
        assert_eq!(top.len(), 2);
        // Squat: 1340, Leg Press: 1000, Bench: 400
        assert_eq!(top[0].0, "Squat");
        assert_eq!(top[1].0, "Leg Press");

        let all = top_exercises(&fixture(), 10, RankBy::Sets);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], ("Squat".to_string(), 3.0));
    }

    #[test]
    fn test_rank_ties_break_alphabetically() {
        let sets = vec![
            set("2025-05-01", "Chest", "Dumbbell Fly", 10.0, 10),
            set("2025-05-01", "Back", "Barbell Row", 10.0, 10),
        ];
        let ranked = category_distribution(&sets, RankBy::Volume);
        assert_eq!(ranked[0].0, "Back");
        assert_eq!(ranked[1].0, "Chest");
    }

    #[test]
    fn test_exercise_names_include_catalog_rows() {
        let names = exercise_names(&fixture());
        assert!(names.contains(&"Hammer Curls".to_string()));
        assert!(names.contains(&"Squat".to_string()));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
