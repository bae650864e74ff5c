//! Event listing: search, tag filter, sort and limit

use habitboard_types::HabitEvent;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Field to sort events by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Duration,
    /// Case-insensitive
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter and sort options for an event list (newest first by default)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    /// Case-insensitive substring of the name or any tag
    pub search: Option<String>,
    /// Exact tag the event must carry
    pub tag: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn sort(mut self, sort_by: SortField, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, event: &HabitEvent) -> bool {
        if let Some(tag) = &self.tag {
            if !event.has_tag(tag) {
                return false;
            }
        }

        match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                event.name.to_lowercase().contains(&needle)
                    || event.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    fn compare(&self, a: &HabitEvent, b: &HabitEvent) -> Ordering {
        let ordering = match self.sort_by {
            SortField::Date => a.timestamp.cmp(&b.timestamp),
            SortField::Duration => a.duration_minutes.cmp(&b.duration_minutes),
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Apply filters, then sort (stable), then limit
    pub fn apply<'e>(&self, events: &'e [HabitEvent]) -> Vec<&'e HabitEvent> {
        let mut matched: Vec<&HabitEvent> = events.iter().filter(|e| self.matches(e)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Every tag used by any event, sorted (for filter dropdowns)
pub fn available_tags(events: &[HabitEvent]) -> Vec<String> {
    events
        .iter()
        .flat_map(|e| e.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
