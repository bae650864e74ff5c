//! CLI helpers: event file loading and table/JSON formatting
//!
//! Every formatter returns a `String` so commands stay testable without a TTY.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use habitboard_core::analytics::CategoryMap;
use habitboard_core::{HabitEvent, TagKind, Taxonomy, TrendBucket, ValidationResult};
use std::path::Path;
use tracing::debug;

/// Largest trend window the CLI accepts
pub const MAX_WINDOW_DAYS: u32 = 365;

// ============================================================================
// Event Loading
// ============================================================================

/// Load events from a JSON array or a JSONL file (one event per line)
pub fn load_events(path: &Path) -> Result<Vec<HabitEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;
    let events = parse_events(&content)
        .with_context(|| format!("Failed to parse events file: {}", path.display()))?;

    debug!(path = %path.display(), count = events.len(), "Loaded events");
    Ok(events)
}

/// Parse events from file content; blank JSONL lines are skipped
pub fn parse_events(content: &str) -> Result<Vec<HabitEvent>> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).context("Invalid JSON event array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid event on line {}", idx + 1))
        })
        .collect()
}

/// Clamp a requested trend window into `1..=MAX_WINDOW_DAYS`
pub fn clamp_window(days: u32) -> u32 {
    days.clamp(1, MAX_WINDOW_DAYS)
}

// ============================================================================
// Formatting
// ============================================================================

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Format a validation verdict (human or JSON)
pub fn format_validation(result: &ValidationResult, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string());
    }

    let mut lines = vec![format!(
        "Valid:            {}",
        if result.is_valid { "yes" } else { "no" }
    )];
    for (label, messages) in [
        ("Error", &result.errors),
        ("Warning", &result.warnings),
        ("Suggestion", &result.suggestions),
    ] {
        for message in messages {
            lines.push(format!("{:<18}{}", format!("{}:", label), message));
        }
    }
    lines.join("\n")
}

/// Format a plain tag list, one per line
pub fn format_tags(tags: &[String], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(tags).unwrap_or_else(|_| "[]".to_string());
    }
    if tags.is_empty() {
        return "No tags.".to_string();
    }
    tags.join("\n")
}

/// Format the taxonomy: one row per umbrella, then the contextual tags
pub fn format_taxonomy(taxonomy: &Taxonomy, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(taxonomy.seed()).unwrap_or_else(|_| "{}".to_string());
    }

    let mut table = new_table(&["Tag", "Kind", "Specific tags"], no_color);
    for umbrella in taxonomy.umbrellas() {
        let kind = TagKind::Umbrella.label();
        let children = taxonomy.children_of(umbrella).join(", ");
        table.add_row(Row::from(vec![umbrella, kind, children.as_str()]));
    }
    for tag in taxonomy.contextual_tags() {
        table.add_row(Row::from(vec![tag.as_str(), TagKind::Contextual.label(), "-"]));
    }
    table.to_string()
}

/// Format per-tag statistics (count, total, average)
pub fn format_categories(stats: &CategoryMap, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(stats).unwrap_or_else(|_| "{}".to_string());
    }
    if stats.is_empty() {
        return "No categories found.".to_string();
    }

    let mut table = new_table(&["Tag", "Events", "Total", "Average"], no_color);
    for (tag, bucket) in stats {
        table.add_row(Row::from(vec![
            tag.clone(),
            bucket.count.to_string(),
            format_minutes(bucket.total_duration_minutes),
            format!("{:.1}m", bucket.average_duration_minutes),
        ]));
    }
    table.to_string()
}

/// Format daily trend buckets, oldest first
pub fn format_trends(buckets: &[TrendBucket], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(buckets).unwrap_or_else(|_| "[]".to_string());
    }
    if buckets.is_empty() {
        return "No days in window.".to_string();
    }

    let mut table = new_table(&["Date", "Events", "Total", "Tags"], no_color);
    for bucket in buckets {
        table.add_row(Row::from(vec![
            bucket.date.format("%Y-%m-%d").to_string(),
            bucket.total_events.to_string(),
            format_minutes(bucket.total_duration_minutes),
            truncate(&bucket.categories.join(", "), 50),
        ]));
    }
    table.to_string()
}

/// Format an event listing
pub fn format_events(events: &[&HabitEvent], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(events).unwrap_or_else(|_| "[]".to_string());
    }
    if events.is_empty() {
        return "No habits found.".to_string();
    }

    let mut table = new_table(&["Date", "Name", "Duration", "Tags"], no_color);
    for event in events {
        table.add_row(Row::from(vec![
            event.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            truncate(&event.name, 30),
            format_minutes(u64::from(event.duration_minutes)),
            event.tags.join(", "),
        ]));
    }
    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

fn format_minutes(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use habitboard_core::aggregate_categories;

    const JSONL: &str = r#"{"id": "a", "name": "Cooking", "timestamp": "2025-01-14T18:00:00Z", "durationMinutes": 45, "tags": ["food", "cooking"]}

{"id": "b", "name": "Laundry", "timestamp": "2025-01-14T09:00:00Z", "durationMinutes": 30, "tags": ["home", "laundry"]}
"#;

    #[test]
    fn test_parse_events_jsonl() {
        let events = parse_events(JSONL).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, "b");
    }

    #[test]
    fn test_parse_events_array_with_legacy_names() {
        let content = r#"[{"id": "x", "name": "Gym", "date": "2025-01-14T06:00:00Z",
                          "duration": 60, "categories": ["health"]}]"#;
        let events = parse_events(content).unwrap();
        assert_eq!(events[0].duration_minutes, 60);
        assert_eq!(events[0].tags, vec!["health"]);
    }

    #[test]
    fn test_parse_events_reports_line() {
        let err = parse_events("{\"id\": \"a\"}\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_load_events_missing_file() {
        let err = load_events(Path::new("/nonexistent/events.jsonl")).unwrap_err();
        assert!(err.to_string().contains("Failed to read events file"));
    }

    #[test]
    fn test_clamp_window() {
        assert_eq!(clamp_window(0), 1);
        assert_eq!(clamp_window(30), 30);
        assert_eq!(clamp_window(1000), MAX_WINDOW_DAYS);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h 00m");
        assert_eq!(format_minutes(135), "2h 15m");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("café au lait", 5), "café…");
    }

    #[test]
    fn test_format_validation_lists_messages() {
        let result = habitboard_core::validate_tags(&["Cooking"]);
        let output = format_validation(&result, false);
        assert!(output.starts_with("Valid:            no"));
        assert!(output.contains("Error:"));
        assert!(output.contains("kebab-case"));
    }

    #[test]
    fn test_format_validation_json() {
        let result = habitboard_core::validate_tags(&["food", "cooking"]);
        let output = format_validation(&result, true);
        assert!(output.starts_with('{'));
        assert!(output.contains("\"isValid\": true"));
    }

    #[test]
    fn test_format_categories_table_and_json() {
        let stats = aggregate_categories(&parse_events(JSONL).unwrap());
        let table = format_categories(&stats, false, true);
        assert!(table.contains("cooking"));
        assert!(table.contains("laundry"));

        let json = format_categories(&stats, true, true);
        assert!(json.starts_with('{'));
        assert!(json.contains("\"food\""));
    }

    #[test]
    fn test_format_categories_empty() {
        assert_eq!(
            format_categories(&CategoryMap::new(), false, false),
            "No categories found."
        );
    }

    #[test]
    fn test_format_taxonomy_lists_all_classes() {
        let output = format_taxonomy(Taxonomy::baseline(), false, true);
        assert!(output.contains("transportation"));
        assert!(output.contains("meal-prep"));
        assert!(output.contains("restock"));
    }

    #[test]
    fn test_format_events_empty() {
        assert_eq!(format_events(&[], false, false), "No habits found.");
    }
}
