//! Command-line interface argument parsing for irontrack.
//!
//! The dashboard is `irontrack show`; the log can also be driven without the
//! TUI:
//! - `irontrack log --category Legs --exercise Squat --weight 60 --reps 8`
//! - `irontrack export --format xlsx --output workout_log.xlsx`
//! - `irontrack import workout_data.json`

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// A keyboard-driven terminal workout logger.
///
/// Records workout sets in a local database, charts your progress, and
/// exports the log to CSV or XLSX spreadsheets.
#[derive(Parser, Debug)]
#[command(name = "irontrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the workout database file.
    /// Defaults to $IRONTRACK_DIR/workouts.db, else the platform data
    /// directory.
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive dashboard
    Show {
        /// Date to open the log on (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Append one performed set to the log
    Log {
        /// Day the set was performed (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        exercise: String,

        /// Weight in kg (0 for bodyweight exercises)
        #[arg(short, long)]
        weight: f64,

        #[arg(short, long)]
        reps: u32,
    },
    /// Register an exercise under a category without logging a set
    AddExercise {
        #[arg(short, long)]
        category: String,

        /// Name of the new exercise
        #[arg(short, long)]
        name: String,
    },
    /// Export the log to a spreadsheet file
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file (defaults to workout_log.csv / workout_log.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Restrict the export to a single day
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Import sets from a JSON array of records
    Import {
        /// JSON file to read
        input: PathBuf,
    },
}

/// Spreadsheet formats the log can be exported to
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn default_filename(self) -> &'static str {
        match self {
            ExportFormat::Csv => "workout_log.csv",
            ExportFormat::Xlsx => "workout_log.xlsx",
        }
    }
}

/// Configuration for the dashboard, derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub start_date: NaiveDate,
}

/// Resolve the database file: explicit flag, then $IRONTRACK_DIR, then the
/// platform data directory.
pub fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| {
        let dir = if let Ok(irontrack_dir) = std::env::var("IRONTRACK_DIR") {
            PathBuf::from(irontrack_dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("irontrack")
        };
        dir.join("workouts.db")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let flag = PathBuf::from("/tmp/custom.db");
        assert_eq!(resolve_db_path(Some(flag.clone())), flag);
    }

    #[test]
    fn test_default_db_path_is_a_workouts_file() {
        let path = resolve_db_path(None);
        assert_eq!(path.file_name().unwrap(), "workouts.db");
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::parse_from(["irontrack", "export"]);
        match cli.command {
            Commands::Export {
                format,
                output,
                date,
            } => {
                assert_eq!(format, ExportFormat::Csv);
                assert!(output.is_none());
                assert!(date.is_none());
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_log_parses_a_full_set() {
        let cli = Cli::parse_from([
            "irontrack",
            "log",
            "--date",
            "2025-05-01",
            "--category",
            "Legs",
            "--exercise",
            "Squat",
            "--weight",
            "62.5",
            "--reps",
            "8",
        ]);
        match cli.command {
            Commands::Log {
                date,
                category,
                exercise,
                weight,
                reps,
            } => {
                assert_eq!(date, Some("2025-05-01".parse().unwrap()));
                assert_eq!(category, "Legs");
                assert_eq!(exercise, "Squat");
                assert_eq!(weight, 62.5);
                assert_eq!(reps, 8);
            }
            other => panic!("expected log, got {other:?}"),
        }
    }

    #[test]
    fn test_default_export_filenames() {
        assert_eq!(ExportFormat::Csv.default_filename(), "workout_log.csv");
        assert_eq!(ExportFormat::Xlsx.default_filename(), "workout_log.xlsx");
    }
}
