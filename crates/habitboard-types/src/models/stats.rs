//! Aggregated statistics models
//!
//! All of these are derived views recomputed from events on demand;
//! none of them is ever the system of record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to an event that contributed to a statistic (for UI display)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRef {
    /// Position of the source event in the slice it was aggregated from
    ///
    /// Identifies the event within one aggregation even when upstream ids
    /// are empty or repeated.
    #[serde(default)]
    pub seq: usize,
    pub id: String,
    pub name: String,
    /// Calendar date in the event's own offset
    pub date: NaiveDate,
    pub duration_minutes: u32,
}

/// Per-tag statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// Number of contributions (events, or tag assignments for sum rollups)
    pub count: u64,
    /// Sum of contributing durations in minutes
    pub total_duration_minutes: u64,
    /// total / count, 0 when count is 0
    pub average_duration_minutes: f64,
    /// Contributing events in fold order
    pub events: Vec<EventRef>,
}

impl CategoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one contributing event into the counters
    ///
    /// Does not touch the average; call [`CategoryStats::finalize`] once
    /// all events have been recorded.
    pub fn record(&mut self, event: EventRef) {
        self.count += 1;
        self.total_duration_minutes += u64::from(event.duration_minutes);
        self.events.push(event);
    }

    /// Add another bucket's counters and event refs into this one
    pub fn absorb(&mut self, other: &CategoryStats) {
        self.count += other.count;
        self.total_duration_minutes += other.total_duration_minutes;
        self.events.extend(other.events.iter().cloned());
    }

    /// Recompute the derived average
    pub fn finalize(&mut self) {
        self.average_duration_minutes = if self.count > 0 {
            self.total_duration_minutes as f64 / self.count as f64
        } else {
            0.0
        };
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Per-day totals for charting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub date: NaiveDate,
    pub total_events: usize,
    pub total_duration_minutes: u64,
    /// Number of distinct tag strings seen that day
    pub unique_category_count: usize,
    /// The distinct tags, sorted
    pub categories: Vec<String>,
}

impl TrendBucket {
    /// Zero-filled bucket for a day with no events
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_events: 0,
            total_duration_minutes: 0,
            unique_category_count: 0,
            categories: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_events == 0
    }
}

/// Headline numbers over a category mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub total_categories: usize,
    /// Sum of per-tag counts (an event with N tags counts N times)
    pub total_events: u64,
    pub total_duration_minutes: u64,
    pub average_events_per_category: f64,
}

/// Event-level metrics over a window (each event counted once)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    pub total_events: usize,
    pub total_duration_minutes: u64,
    pub categories_count: BTreeMap<String, u64>,
    pub average_duration_minutes: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_ref(id: &str, minutes: u32) -> EventRef {
        EventRef {
            seq: 0,
            id: id.to_string(),
            name: format!("Event {}", id),
            date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            duration_minutes: minutes,
        }
    }

    #[test]
    fn test_record_and_finalize() {
        let mut stats = CategoryStats::new();
        stats.record(event_ref("a", 30));
        stats.record(event_ref("b", 15));
        stats.finalize();

        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_duration_minutes, 45);
        assert_eq!(stats.average_duration_minutes, 22.5);
        assert_eq!(stats.events.len(), 2);
    }

    #[test]
    fn test_finalize_empty_average_is_zero() {
        let mut stats = CategoryStats::new();
        stats.finalize();
        assert!(stats.is_empty());
        assert_eq!(stats.average_duration_minutes, 0.0);
    }

    #[test]
    fn test_absorb_adds_counters() {
        let mut left = CategoryStats::new();
        left.record(event_ref("a", 10));
        let mut right = CategoryStats::new();
        right.record(event_ref("b", 20));

        left.absorb(&right);
        left.finalize();

        assert_eq!(left.count, 2);
        assert_eq!(left.total_duration_minutes, 30);
        assert_eq!(left.average_duration_minutes, 15.0);
    }
}
