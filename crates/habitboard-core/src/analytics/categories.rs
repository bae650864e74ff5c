//! Category aggregation and umbrella rollups
//!
//! Folds events into per-tag statistics, rolls specific tags up into their
//! umbrella, and narrows an umbrella to its specific-tag breakdown.

use habitboard_types::{CategoryStats, EventRef, HabitEvent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

use crate::taxonomy::{TagKind, Taxonomy};

/// Tag -> statistics, ordered by tag
pub type CategoryMap = BTreeMap<String, CategoryStats>;

/// How specific-tag statistics are combined into an umbrella bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollupMode {
    /// Each contributing event counts once per umbrella, even when it carries
    /// the umbrella and one of its children (or several children)
    #[default]
    DistinctEvents,
    /// Plain sum of the umbrella's own count and every child tag's count
    TagSum,
}

impl RollupMode {
    pub fn label(&self) -> &'static str {
        match self {
            RollupMode::DistinctEvents => "distinct-events",
            RollupMode::TagSum => "tag-sum",
        }
    }
}

fn event_ref(seq: usize, event: &HabitEvent) -> EventRef {
    EventRef {
        seq,
        id: event.id.clone(),
        name: event.name.clone(),
        date: event.local_date(),
        duration_minutes: event.duration_minutes,
    }
}

/// Fold events into per-tag statistics
///
/// An event with N distinct tags contributes its full duration to each of
/// the N buckets (duration is not split). Repeated tags on one event count
/// once. Averages are computed after all events are folded.
///
/// # Graceful Degradation
/// - Empty input: empty map
/// - Events without tags: contribute nothing
pub fn aggregate_categories(events: &[HabitEvent]) -> CategoryMap {
    let mut stats = CategoryMap::new();

    for (seq, event) in events.iter().enumerate() {
        for tag in event.unique_tags() {
            stats
                .entry(tag.to_string())
                .or_default()
                .record(event_ref(seq, event));
        }
    }

    for bucket in stats.values_mut() {
        bucket.finalize();
    }

    stats
}

/// Roll tag statistics up to umbrella level ([`RollupMode::DistinctEvents`])
pub fn aggregate_by_umbrella(stats: &CategoryMap, taxonomy: &Taxonomy) -> CategoryMap {
    aggregate_by_umbrella_with(stats, taxonomy, RollupMode::default())
}

/// Roll tag statistics up to umbrella level
///
/// Each umbrella tag present in `stats` seeds its own bucket; each specific
/// tag is added into its parent umbrella's bucket. Contextual and unknown
/// tags are dropped from this view (they stay in the flat map). Umbrellas
/// that accumulate nothing are omitted.
pub fn aggregate_by_umbrella_with(
    stats: &CategoryMap,
    taxonomy: &Taxonomy,
    mode: RollupMode,
) -> CategoryMap {
    // umbrella -> contributing buckets, own bucket first
    let mut contributions: BTreeMap<&str, Vec<&CategoryStats>> = BTreeMap::new();

    for (tag, bucket) in stats {
        if taxonomy.is_umbrella(tag) {
            contributions.entry(tag.as_str()).or_default().push(bucket);
        }
    }

    for (tag, bucket) in stats {
        match taxonomy.classify(tag) {
            TagKind::Specific { umbrella } => {
                contributions.entry(umbrella).or_default().push(bucket);
            }
            TagKind::Umbrella => {}
            TagKind::Contextual | TagKind::Unknown => {
                trace!(tag = %tag, "Tag has no umbrella, left out of rollup");
            }
        }
    }

    contributions
        .into_iter()
        .map(|(umbrella, buckets)| (umbrella.to_string(), combine(&buckets, mode)))
        .filter(|(_, rolled)| !rolled.is_empty())
        .collect()
}

fn combine(buckets: &[&CategoryStats], mode: RollupMode) -> CategoryStats {
    let mut rolled = CategoryStats::new();

    match mode {
        RollupMode::TagSum => {
            for bucket in buckets {
                rolled.absorb(bucket);
            }
        }
        RollupMode::DistinctEvents => {
            // seq, not id: upstream ids may be empty or shared
            let mut seen: HashSet<usize> = HashSet::new();
            for event in buckets.iter().flat_map(|b| b.events.iter()) {
                if seen.insert(event.seq) {
                    rolled.record(event.clone());
                }
            }
        }
    }

    rolled.finalize();
    rolled
}

/// Specific-tag statistics under one umbrella (drill-down target)
///
/// Never contains the umbrella itself nor tags of another umbrella. Empty
/// when `umbrella` is not an umbrella of `taxonomy`.
pub fn specific_breakdown(umbrella: &str, stats: &CategoryMap, taxonomy: &Taxonomy) -> CategoryMap {
    taxonomy
        .children_of(umbrella)
        .iter()
        .filter_map(|child| stats.get(child).map(|s| (child.clone(), s.clone())))
        .collect()
}

/// Restrict a category map to a single tag, if present
///
/// Falls back to the full map when the filter is absent or names a tag
/// with no statistics.
pub fn filter_categories(stats: &CategoryMap, tag: Option<&str>) -> CategoryMap {
    match tag.and_then(|t| stats.get_key_value(t)) {
        Some((key, bucket)) => CategoryMap::from([(key.clone(), bucket.clone())]),
        None => stats.clone(),
    }
}
