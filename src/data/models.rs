//! Data models for the workout log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stock categories and their exercises, used to seed a fresh store.
pub const DEFAULT_CATALOG: &[(&str, &[&str])] = &[
    ("Chest", &["Barbell Bench Press", "Dumbbell Fly"]),
    ("Back", &["Pull Ups", "Barbell Row"]),
    ("Arms", &["Dumbbell Curls", "Tricep Pushdown"]),
    ("Legs", &["Squat", "Leg Press"]),
    ("Shoulders", &["Shoulder Press", "Lateral Raise"]),
];

/// One row of the workout log.
///
/// A row with `reps == 0` is a catalog row: it declares that `exercise`
/// exists under `category` without recording a performed set. Aggregates and
/// history views consider logged rows only; pick-lists consider every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub date: NaiveDate,
    pub category: String,
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
}

impl WorkoutSet {
    /// Create a performed set, enforcing the input rules: non-empty names,
    /// finite non-negative weight, at least one rep.
    pub fn logged(
        date: NaiveDate,
        category: &str,
        exercise: &str,
        weight: f64,
        reps: u32,
    ) -> Result<Self, ValidationError> {
        let (category, exercise) = validated_names(category, exercise)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(ValidationError::NegativeWeight);
        }
        if reps == 0 {
            return Err(ValidationError::ZeroReps);
        }
        Ok(WorkoutSet {
            date,
            category,
            exercise,
            weight,
            reps,
        })
    }

    /// Create a catalog row for a category/exercise pair (weight 0, reps 0).
    pub fn catalog_row(
        date: NaiveDate,
        category: &str,
        exercise: &str,
    ) -> Result<Self, ValidationError> {
        let (category, exercise) = validated_names(category, exercise)?;
        Ok(WorkoutSet {
            date,
            category,
            exercise,
            weight: 0.0,
            reps: 0,
        })
    }

    /// Whether this row records a performed set rather than a catalog entry.
    pub fn is_logged(&self) -> bool {
        self.reps > 0
    }

    /// Training volume of the set (weight x reps).
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

fn validated_names(category: &str, exercise: &str) -> Result<(String, String), ValidationError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    let exercise = exercise.trim();
    if exercise.is_empty() {
        return Err(ValidationError::EmptyExercise);
    }
    Ok((category.to_string(), exercise.to_string()))
}

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("category is empty")]
    EmptyCategory,
    #[error("exercise name is empty")]
    EmptyExercise,
    #[error("weight {0:?} is not a number")]
    WeightNotNumeric(String),
    #[error("weight must be zero or positive")]
    NegativeWeight,
    #[error("reps {0:?} is not a whole number")]
    RepsNotNumeric(String),
    #[error("a set needs at least one rep")]
    ZeroReps,
}

/// Raw entry-form input, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct SetDraft {
    pub category: String,
    pub exercise: String,
    pub weight: String,
    pub reps: String,
}

impl SetDraft {
    /// Parse and validate the draft into a performed set dated `date`.
    pub fn validate(&self, date: NaiveDate) -> Result<WorkoutSet, ValidationError> {
        let weight: f64 = self
            .weight
            .trim()
            .parse()
            .map_err(|_| ValidationError::WeightNotNumeric(self.weight.clone()))?;
        let reps: u32 = self
            .reps
            .trim()
            .parse()
            .map_err(|_| ValidationError::RepsNotNumeric(self.reps.clone()))?;
        WorkoutSet::logged(date, &self.category, &self.exercise, weight, reps)
    }
}

/// Grouping period for the consistency chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
}

impl Period {
    pub fn toggled(self) -> Self {
        match self {
            Period::Week => Period::Month,
            Period::Month => Period::Week,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

/// Ranking measure for the category and top-exercise charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Sets,
    Volume,
}

impl RankBy {
    pub fn toggled(self) -> Self {
        match self {
            RankBy::Sets => RankBy::Volume,
            RankBy::Volume => RankBy::Sets,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankBy::Sets => "number of sets",
            RankBy::Volume => "total volume",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_logged_set_is_valid() {
        let set = WorkoutSet::logged(day("2025-05-01"), "Legs", "Squat", 60.0, 8).unwrap();
        assert!(set.is_logged());
        assert_eq!(set.volume(), 480.0);
    }

    #[test]
    fn test_bodyweight_set_allowed() {
        // Push ups and pull ups are logged at 0 kg
        let set = WorkoutSet::logged(day("2025-05-01"), "Back", "Pull Ups", 0.0, 10).unwrap();
        assert!(set.is_logged());
        assert_eq!(set.volume(), 0.0);
    }

    #[test]
    fn test_logged_set_rejects_bad_input() {
        let d = day("2025-05-01");
        assert_eq!(
            WorkoutSet::logged(d, "", "Squat", 60.0, 8),
            Err(ValidationError::EmptyCategory)
        );
        assert_eq!(
            WorkoutSet::logged(d, "Legs", "   ", 60.0, 8),
            Err(ValidationError::EmptyExercise)
        );
        assert_eq!(
            WorkoutSet::logged(d, "Legs", "Squat", -5.0, 8),
            Err(ValidationError::NegativeWeight)
        );
        assert_eq!(
            WorkoutSet::logged(d, "Legs", "Squat", f64::NAN, 8),
            Err(ValidationError::NegativeWeight)
        );
        assert_eq!(
            WorkoutSet::logged(d, "Legs", "Squat", 60.0, 0),
            Err(ValidationError::ZeroReps)
        );
    }

    #[test]
    fn test_catalog_row_is_not_logged() {
        let row = WorkoutSet::catalog_row(day("2025-05-01"), "Arms", "Hammer Curls").unwrap();
        assert!(!row.is_logged());
        assert_eq!(row.weight, 0.0);
        assert_eq!(row.reps, 0);
    }

    #[test]
    fn test_draft_parses_and_trims() {
        let draft = SetDraft {
            category: " Legs ".to_string(),
            exercise: "Squat".to_string(),
            weight: " 62.5 ".to_string(),
            reps: "8".to_string(),
        };
        let set = draft.validate(day("2025-05-01")).unwrap();
        assert_eq!(set.category, "Legs");
        assert_eq!(set.weight, 62.5);
        assert_eq!(set.reps, 8);
    }

    #[test]
    fn test_draft_rejects_non_numeric() {
        let mut draft = SetDraft {
            category: "Legs".to_string(),
            exercise: "Squat".to_string(),
            weight: "heavy".to_string(),
            reps: "8".to_string(),
        };
        assert!(matches!(
            draft.validate(day("2025-05-01")),
            Err(ValidationError::WeightNotNumeric(_))
        ));

        draft.weight = "60".to_string();
        draft.reps = "a few".to_string();
        assert!(matches!(
            draft.validate(day("2025-05-01")),
            Err(ValidationError::RepsNotNumeric(_))
        ));

        draft.reps = String::new();
        assert!(matches!(
            draft.validate(day("2025-05-01")),
            Err(ValidationError::RepsNotNumeric(_))
        ));
    }

    #[test]
    fn test_toggles() {
        assert_eq!(Period::Week.toggled(), Period::Month);
        assert_eq!(Period::Month.toggled(), Period::Week);
        assert_eq!(RankBy::Sets.toggled(), RankBy::Volume);
        assert_eq!(RankBy::Volume.toggled(), RankBy::Sets);
    }
}
