//! Daily trend buckets
//!
//! Buckets events by calendar day over a window ending today. Every day in
//! the window gets a bucket, so charts need no gap filling.

use chrono::{Days, Local, NaiveDate};
use habitboard_types::{HabitEvent, TrendBucket};
use std::collections::BTreeSet;

/// Longest window, in days, any trend computation covers (ten years)
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// First and last day of a window of `window_days` ending on `today`
///
/// `None` for an empty window. Windows longer than [`MAX_WINDOW_DAYS`] are
/// capped to it.
pub fn window_bounds(window_days: u32, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if window_days == 0 {
        return None;
    }
    let window_days = window_days.min(MAX_WINDOW_DAYS);
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days) - 1))
        .unwrap_or(NaiveDate::MIN);
    Some((start, today))
}

/// Events whose local date falls inside the window
pub fn events_in_window(
    events: &[HabitEvent],
    window_days: u32,
    today: NaiveDate,
) -> Vec<HabitEvent> {
    let Some((start, end)) = window_bounds(window_days, today) else {
        return Vec::new();
    };
    events
        .iter()
        .filter(|e| (start..=end).contains(&e.local_date()))
        .cloned()
        .collect()
}

/// Compute trends for the window ending on the local current date
///
/// The window is capped at [`MAX_WINDOW_DAYS`].
pub fn aggregate_trends(events: &[HabitEvent], window_days: u32) -> Vec<TrendBucket> {
    aggregate_trends_at(events, window_days, Local::now().date_naive())
}

/// Compute one bucket per day in `[today - window_days + 1, today]`
///
/// Returns `min(window_days, MAX_WINDOW_DAYS)` buckets, ordered oldest to
/// newest and zero-filled. Events are placed
/// by the calendar date in their own offset; events outside the window are
/// ignored.
///
/// # Performance
/// Single pass over events, O(events + window_days)
pub fn aggregate_trends_at(
    events: &[HabitEvent],
    window_days: u32,
    today: NaiveDate,
) -> Vec<TrendBucket> {
    let Some((start, end)) = window_bounds(window_days, today) else {
        return Vec::new();
    };

    let mut buckets: Vec<TrendBucket> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(TrendBucket::empty)
        .collect();
    let mut tags_per_day: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); buckets.len()];

    for event in events {
        let date = event.local_date();
        if date < start || date > end {
            tracing::trace!(id = %event.id, %date, "Event outside trend window, skipping");
            continue;
        }

        let idx = (date - start).num_days() as usize;
        let bucket = &mut buckets[idx];
        bucket.total_events += 1;
        bucket.total_duration_minutes += u64::from(event.duration_minutes);
        tags_per_day[idx].extend(event.tags.iter().map(String::as_str));
    }

    for (bucket, tags) in buckets.iter_mut().zip(tags_per_day) {
        bucket.unique_category_count = tags.len();
        bucket.categories = tags.into_iter().map(str::to_string).collect();
    }

    buckets
}
