//! Data models for habitboard

pub mod event;
pub mod stats;
pub mod validation;

pub use event::HabitEvent;
pub use stats::{CategoryStats, CategorySummary, DailyMetrics, EventRef, TrendBucket};
pub use validation::ValidationResult;
