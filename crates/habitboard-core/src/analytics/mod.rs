//! Analytics over habit events
//!
//! Provides per-tag category statistics, umbrella rollups with drill-down,
//! daily trends, and headline summaries. Every function here is pure and
//! synchronous over a caller-supplied event snapshot, so concurrent callers
//! need no locking.

use chrono::{DateTime, Local, NaiveDate, Utc};
use habitboard_types::{CategorySummary, HabitEvent, TrendBucket};

use crate::taxonomy::Taxonomy;

pub mod categories;
pub mod drilldown;
pub mod query;
pub mod summary;
pub mod trends;


pub use categories::{
    aggregate_by_umbrella, aggregate_by_umbrella_with, aggregate_categories, filter_categories,
    specific_breakdown, CategoryMap, RollupMode,
};
pub use drilldown::{DrillDown, DrillDownState};
pub use query::{available_tags, EventQuery, SortField, SortOrder};
pub use summary::{daily_metrics, summarize_categories};
pub use trends::{
    aggregate_trends, aggregate_trends_at, events_in_window, window_bounds, MAX_WINDOW_DAYS,
};

/// Period selection for analytics computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Last N days, today included
    Days(u32),
    /// Every supplied event; the trend window spans back to the oldest one
    Available,
}

impl Period {
    /// Last 7 days
    pub fn last_7d() -> Self {
        Self::Days(7)
    }

    /// Last 30 days
    pub fn last_30d() -> Self {
        Self::Days(30)
    }

    /// Last 90 days
    pub fn last_90d() -> Self {
        Self::Days(90)
    }

    /// Trend window length for this period
    ///
    /// For `Available` this reaches back to the oldest event (at least 1 day).
    pub fn window_days(&self, events: &[HabitEvent], today: NaiveDate) -> u32 {
        match self {
            Period::Days(n) => *n,
            Period::Available => events
                .iter()
                .map(|e| e.local_date())
                .min()
                .map(|oldest| (today - oldest).num_days().max(0) + 1)
                .map(|days| u32::try_from(days).unwrap_or(u32::MAX))
                .unwrap_or(1),
        }
    }

    /// Display label (shows loaded count for Available)
    pub fn display(&self, total_loaded: usize) -> String {
        match self {
            Period::Days(n) => format!("Last {} days", n),
            Period::Available => format!("All loaded ({} events)", total_loaded),
        }
    }
}

/// Complete analytics data for a period
#[derive(Debug, Clone)]
pub struct AnalyticsData {
    /// Per-tag statistics
    pub categories: CategoryMap,
    /// Umbrella rollup of `categories`
    pub umbrellas: CategoryMap,
    /// Zero-filled daily buckets, oldest first
    pub trends: Vec<TrendBucket>,
    pub summary: CategorySummary,
    /// Timestamp of computation
    pub computed_at: DateTime<Utc>,
    /// Period analyzed
    pub period: Period,
    /// Rollup mode used for `umbrellas`
    pub mode: RollupMode,
}

impl AnalyticsData {
    /// Compute analytics for the period ending on the local current date
    pub fn compute(
        events: &[HabitEvent],
        taxonomy: &Taxonomy,
        period: Period,
        mode: RollupMode,
    ) -> Self {
        Self::compute_at(events, taxonomy, period, mode, Local::now().date_naive())
    }

    /// Compute analytics for the period ending on `today`
    ///
    /// Category statistics cover the same window as the trends, so both
    /// views describe the same events.
    pub fn compute_at(
        events: &[HabitEvent],
        taxonomy: &Taxonomy,
        period: Period,
        mode: RollupMode,
        today: NaiveDate,
    ) -> Self {
        let window_days = period.window_days(events, today);
        let in_window = events_in_window(events, window_days, today);

        let categories = aggregate_categories(&in_window);
        let umbrellas = aggregate_by_umbrella_with(&categories, taxonomy, mode);
        let trends = aggregate_trends_at(&in_window, window_days, today);
        let summary = summarize_categories(&categories);

        tracing::debug!(
            events = in_window.len(),
            categories = categories.len(),
            window_days,
            "Computed analytics"
        );

        Self {
            categories,
            umbrellas,
            trends,
            summary,
            computed_at: Utc::now(),
            period,
            mode,
        }
    }

    /// Drill-down navigator over this data's categories
    pub fn drill_down<'a>(&'a self, taxonomy: &'a Taxonomy) -> DrillDown<'a> {
        DrillDown::new(taxonomy, &self.categories).with_mode(self.mode)
    }
}
