//! habitboard-core - Core library for habitboard
//!
//! Provides the tag taxonomy, tag validation and the analytics rollup
//! engine (category statistics, umbrella drill-down, daily trends) over
//! habit events supplied by external data sources.

pub mod analytics;
pub mod config;
pub mod error;
pub mod taxonomy;
pub mod validation;

pub use analytics::{
    aggregate_by_umbrella, aggregate_categories, aggregate_trends, specific_breakdown,
    AnalyticsData, CategoryMap, DrillDown, DrillDownState, Period, RollupMode,
};
pub use config::HabitboardConfig;
pub use error::CoreError;
pub use habitboard_types::{
    CategoryStats, CategorySummary, DailyMetrics, EventRef, HabitEvent, TrendBucket,
    ValidationResult,
};
pub use taxonomy::{TagKind, Taxonomy, TaxonomySeed, UmbrellaSeed};
pub use validation::{normalize_tag, normalize_tags, suggest_tags, validate_tags, TagValidator};
