//! habitboard-types - Shared data types for habitboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No regex, no file loading - just serde-serializable types.
//!
//! Used by:
//! - habitboard-core (taxonomy, validation, analytics)
//! - habitboard (CLI output)

pub mod models;

pub use models::{
    CategoryStats, CategorySummary, DailyMetrics, EventRef, HabitEvent, TrendBucket,
    ValidationResult,
};
