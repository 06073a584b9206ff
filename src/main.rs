//! irontrack: a keyboard-driven terminal workout logger.
//!
//! Records workout sets (exercise, category, weight, reps, date) in a local
//! append-only store, charts consistency and progress, and exports the log
//! to CSV or XLSX spreadsheets.

mod app;
mod cli;
mod data;
mod export;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use cli::{AppConfig, Cli, Commands, ExportFormat};
use data::{Storage, WorkoutSet};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let db_path = cli::resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Show { date } => {
            let config = AppConfig {
                db_path,
                start_date: date.unwrap_or_else(|| Local::now().date_naive()),
            };
            app::run(config)?;
        }
        Commands::Log {
            date,
            category,
            exercise,
            weight,
            reps,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let set = WorkoutSet::logged(date, &category, &exercise, weight, reps)?;
            let storage = Storage::open(&db_path)?;
            storage.append(&set)?;
            println!(
                "Saved: {} reps @ {}kg for {} on {}",
                set.reps, set.weight, set.exercise, set.date
            );
        }
        Commands::AddExercise { category, name } => {
            let row = WorkoutSet::catalog_row(Local::now().date_naive(), &category, &name)?;
            let storage = Storage::open(&db_path)?;
            storage.append(&row)?;
            println!("Added exercise '{}' to category '{}'", row.exercise, row.category);
        }
        Commands::Export {
            format,
            output,
            date,
        } => {
            let storage = Storage::open(&db_path)?;
            let sets = match date {
                Some(day) => storage.sets_on(day)?,
                None => storage.all_sets()?,
            };
            let path = output.unwrap_or_else(|| PathBuf::from(format.default_filename()));
            match format {
                ExportFormat::Csv => export::export_csv(&sets, &path)?,
                ExportFormat::Xlsx => export::export_xlsx(&sets, &path)?,
            }
            println!("Exported {} rows to {}", sets.len(), path.display());
        }
        Commands::Import { input } => {
            let sets = export::import_json(&input)?;
            let mut storage = Storage::open(&db_path)?;
            let appended = storage.append_all(&sets)?;
            println!("Imported {} sets from {}", appended, input.display());
        }
    }

    Ok(())
}
