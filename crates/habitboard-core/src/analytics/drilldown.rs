//! Umbrella -> specific drill-down navigation
//!
//! Two states: the umbrella overview (initial) and the specific-tag view of
//! one umbrella. Selecting an umbrella only drills down when it has a
//! non-empty specific breakdown; "back" always returns to the overview.

use super::categories::{aggregate_by_umbrella_with, specific_breakdown, CategoryMap, RollupMode};
use crate::taxonomy::Taxonomy;

/// Current drill-down level
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DrillDownState {
    #[default]
    UmbrellaView,
    SpecificView(String),
}

impl DrillDownState {
    /// Breadcrumb label ("All categories > food")
    pub fn breadcrumb(&self) -> String {
        match self {
            DrillDownState::UmbrellaView => "All categories".to_string(),
            DrillDownState::SpecificView(umbrella) => format!("All categories > {}", umbrella),
        }
    }
}

/// Drill-down navigator over one set of category statistics
#[derive(Debug, Clone)]
pub struct DrillDown<'a> {
    taxonomy: &'a Taxonomy,
    stats: &'a CategoryMap,
    mode: RollupMode,
    state: DrillDownState,
}

impl<'a> DrillDown<'a> {
    pub fn new(taxonomy: &'a Taxonomy, stats: &'a CategoryMap) -> Self {
        Self {
            taxonomy,
            stats,
            mode: RollupMode::default(),
            state: DrillDownState::UmbrellaView,
        }
    }

    /// Use a different rollup mode for the umbrella overview
    pub fn with_mode(mut self, mode: RollupMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn state(&self) -> &DrillDownState {
        &self.state
    }

    /// Whether selecting `umbrella` would drill down
    pub fn can_drill(&self, umbrella: &str) -> bool {
        !specific_breakdown(umbrella, self.stats, self.taxonomy).is_empty()
    }

    /// Select an umbrella from the overview
    ///
    /// Returns true if the state changed. Ignored outside the overview and
    /// for umbrellas with no specific breakdown.
    pub fn select(&mut self, umbrella: &str) -> bool {
        if self.state != DrillDownState::UmbrellaView || !self.can_drill(umbrella) {
            return false;
        }
        tracing::debug!(umbrella, "Drill down");
        self.state = DrillDownState::SpecificView(umbrella.to_string());
        true
    }

    /// Return to the overview; returns true if the state changed
    pub fn back(&mut self) -> bool {
        if self.state == DrillDownState::UmbrellaView {
            return false;
        }
        self.state = DrillDownState::UmbrellaView;
        true
    }

    /// Statistics for the current level
    pub fn current_view(&self) -> CategoryMap {
        match &self.state {
            DrillDownState::UmbrellaView => {
                aggregate_by_umbrella_with(self.stats, self.taxonomy, self.mode)
            }
            DrillDownState::SpecificView(umbrella) => {
                specific_breakdown(umbrella, self.stats, self.taxonomy)
            }
        }
    }
}
