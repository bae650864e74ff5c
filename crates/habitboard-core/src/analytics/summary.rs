//! Headline summaries over categories and events

use habitboard_types::{CategorySummary, DailyMetrics, HabitEvent};

use super::categories::CategoryMap;

/// Totals over a category map
///
/// `total_events` sums per-tag counts, so an event with several tags is
/// counted once per tag.
pub fn summarize_categories(stats: &CategoryMap) -> CategorySummary {
    let total_categories = stats.len();
    let total_events: u64 = stats.values().map(|s| s.count).sum();
    let total_duration_minutes: u64 = stats.values().map(|s| s.total_duration_minutes).sum();

    let average_events_per_category = if total_categories > 0 {
        total_events as f64 / total_categories as f64
    } else {
        0.0
    };

    CategorySummary {
        total_categories,
        total_events,
        total_duration_minutes,
        average_events_per_category,
    }
}

/// Event-level metrics: each event counted once, tags tallied per event
pub fn daily_metrics(events: &[HabitEvent]) -> DailyMetrics {
    let mut metrics = DailyMetrics::default();

    for event in events {
        metrics.total_events += 1;
        metrics.total_duration_minutes += u64::from(event.duration_minutes);
        for tag in event.unique_tags() {
            *metrics.categories_count.entry(tag.to_string()).or_insert(0) += 1;
        }
    }

    if metrics.total_events > 0 {
        metrics.average_duration_minutes =
            metrics.total_duration_minutes as f64 / metrics.total_events as f64;
    }

    metrics
}
