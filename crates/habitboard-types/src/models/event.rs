//! Habit event model
//!
//! Events are produced by external data sources (sheets, calendars, databases)
//! and consumed read-only by the analytics. Field aliases accept the legacy
//! backend names (`date`, `duration`, `categories`).

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single logged activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEvent {
    /// Opaque identifier assigned by the data source
    pub id: String,

    /// Human-readable activity name ("Cooking Dinner")
    pub name: String,

    /// Start time, keeping the offset it was recorded with
    #[serde(alias = "date")]
    pub timestamp: DateTime<FixedOffset>,

    /// Duration in minutes
    #[serde(alias = "duration")]
    pub duration_minutes: u32,

    /// Tags in the order they were entered
    #[serde(alias = "categories", default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,

    /// Label of the data source the event came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl HabitEvent {
    /// Create an event with no participants and no source label
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        duration_minutes: u32,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            timestamp,
            duration_minutes,
            tags,
            participants: None,
            source: None,
        }
    }

    /// Calendar date in the event's own offset
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Distinct tags, first occurrence wins
    pub fn unique_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .enumerate()
            .filter(|(i, tag)| !self.tags[..*i].contains(tag))
            .map(|(_, tag)| tag.as_str())
    }

    /// Check if the event carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_legacy_field_names() {
        let json = r#"{
            "id": "cal_003",
            "name": "Cooking Dinner",
            "date": "2025-01-14T18:00:00.000Z",
            "participants": ["partner"],
            "duration": 90,
            "categories": ["food", "cooking"],
            "source": "mock_data"
        }"#;

        let event: HabitEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "cal_003");
        assert_eq!(event.duration_minutes, 90);
        assert_eq!(event.tags, vec!["food", "cooking"]);
        assert_eq!(event.participants, Some(vec!["partner".to_string()]));
        assert_eq!(event.source.as_deref(), Some("mock_data"));
    }

    #[test]
    fn test_local_date_uses_original_offset() {
        // 23:30 at -08:00 is already the next day in UTC
        let ts = DateTime::parse_from_rfc3339("2025-01-14T23:30:00-08:00").unwrap();
        let event = HabitEvent::new("e1", "Late walk", ts, 20, vec!["transportation".into()]);

        assert_eq!(
            event.local_date(),
            NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
        );
    }

    #[test]
    fn test_unique_tags_skips_duplicates() {
        let ts = DateTime::parse_from_rfc3339("2025-01-14T10:00:00Z").unwrap();
        let event = HabitEvent::new(
            "e1",
            "Groceries",
            ts,
            45,
            vec!["food".into(), "grocery".into(), "food".into()],
        );

        let tags: Vec<&str> = event.unique_tags().collect();
        assert_eq!(tags, vec!["food", "grocery"]);
        assert!(event.has_tag("grocery"));
        assert!(!event.has_tag("home"));
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let ts = DateTime::parse_from_rfc3339("2025-01-14T10:00:00+02:00").unwrap();
        let event = HabitEvent::new("e1", "Laundry", ts, 40, vec!["home".into()]);

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["durationMinutes"], 40);
        assert_eq!(value["timestamp"], "2025-01-14T10:00:00+02:00");
        assert!(value.get("participants").is_none());
    }
}
