//! Data layer: the workout-set model, SQLite storage, and the aggregate
//! computations behind the progress charts.

pub mod analytics;
mod models;
mod storage;

pub use models::{Period, RankBy, SetDraft, WorkoutSet};
pub use storage::Storage;
