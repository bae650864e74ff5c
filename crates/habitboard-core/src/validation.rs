//! Tag validation, normalization and suggestion
//!
//! Validation never fails: every problem is reported as data in a
//! [`ValidationResult`] so callers can always render a report.
//!
//! # Examples
//!
//! ```
//! use habitboard_core::validation::validate_tags;
//!
//! let result = validate_tags(&["food", "cooking"]);
//! assert!(result.is_valid);
//!
//! let result = validate_tags(&["cooking"]);
//! assert!(!result.is_valid);
//! assert!(result.suggestions.iter().any(|s| s.contains("food")));
//! ```

use crate::taxonomy::{TagKind, Taxonomy};
use habitboard_types::ValidationResult;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Lowercase ASCII words joined by single hyphens
fn kebab_regex() -> &'static Regex {
    static KEBAB_RE: OnceLock<Regex> = OnceLock::new();
    KEBAB_RE.get_or_init(|| Regex::new(r"^[a-z]+(-[a-z]+)*$").unwrap())
}

fn separator_regex() -> &'static Regex {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[_\s]+").unwrap())
}

fn disallowed_regex() -> &'static Regex {
    static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
    DISALLOWED_RE.get_or_init(|| Regex::new(r"[^a-z0-9-]").unwrap())
}

fn hyphen_run_regex() -> &'static Regex {
    static HYPHEN_RUN_RE: OnceLock<Regex> = OnceLock::new();
    HYPHEN_RUN_RE.get_or_init(|| Regex::new(r"-{2,}").unwrap())
}

/// Activity-name keywords and the tags they hint at
const KEYWORD_TAGS: &[(&str, &[&str])] = &[
    // Health
    ("workout", &["health", "exercise", "workout"]),
    ("gym", &["health", "exercise", "workout"]),
    ("run", &["health", "exercise"]),
    ("exercise", &["health", "exercise"]),
    ("fitness", &["health", "exercise"]),
    // Food
    ("cook", &["food", "cooking"]),
    ("meal", &["food", "cooking", "meal"]),
    ("prep", &["food", "meal-prep"]),
    ("grocery", &["food", "grocery", "restock"]),
    ("trader", &["food", "grocery", "restock"]),
    ("safeway", &["food", "grocery", "restock"]),
    ("takeout", &["food", "takeout"]),
    ("pickup", &["food", "takeout"]),
    ("dinner", &["food", "cooking", "meal"]),
    ("lunch", &["food", "cooking", "meal"]),
    ("breakfast", &["food", "cooking", "meal"]),
    // Home
    ("clean", &["home", "cleaning"]),
    ("laundry", &["home", "laundry", "cleaning"]),
    ("bathroom", &["home", "bathroom", "cleaning"]),
    ("house", &["home", "cleaning"]),
    // Transportation
    ("bart", &["transportation", "public-transit"]),
    ("bus", &["transportation", "public-transit"]),
    ("train", &["transportation", "public-transit"]),
    ("transit", &["transportation", "public-transit"]),
    ("walk", &["transportation", "walking-errand"]),
    ("uber", &["transportation", "rideshare"]),
    ("lyft", &["transportation", "rideshare"]),
];

/// Check kebab-case: lowercase ASCII letters, single hyphens between words
pub fn is_kebab_case(tag: &str) -> bool {
    kebab_regex().is_match(tag)
}

/// Best-effort conversion of free text to a tag
///
/// Lowercases, turns spaces/underscores into hyphens, drops anything outside
/// `[a-z0-9-]`, collapses hyphen runs and trims hyphens. Digits survive
/// normalization but still fail [`is_kebab_case`].
pub fn normalize_tag(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let hyphenated = separator_regex().replace_all(&lowered, "-");
    let cleaned = disallowed_regex().replace_all(&hyphenated, "");
    let collapsed = hyphen_run_regex().replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

/// Normalize a list of tags, dropping empties and duplicates (first wins)
pub fn normalize_tags<S: AsRef<str>>(raws: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(raws.len());
    for raw in raws {
        let tag = normalize_tag(raw.as_ref());
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

/// Validate tags against the baseline taxonomy
pub fn validate_tags<S: AsRef<str>>(tags: &[S]) -> ValidationResult {
    TagValidator::baseline().validate(tags)
}

/// Prefix/substring suggestions from the baseline taxonomy
pub fn suggest_tags<S: AsRef<str>>(partial: &str, existing: &[S]) -> Vec<String> {
    TagValidator::baseline().suggest_tags(partial, existing)
}

/// Checks tag sets against a taxonomy
#[derive(Debug, Clone, Copy)]
pub struct TagValidator<'a> {
    taxonomy: &'a Taxonomy,
}

impl TagValidator<'static> {
    /// Validator over the process-wide baseline taxonomy
    pub fn baseline() -> Self {
        Self::new(Taxonomy::baseline())
    }
}

impl<'a> TagValidator<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    /// Validate a tag set
    ///
    /// Tags are checked exactly as given (no normalization); duplicates are
    /// reported once.
    ///
    /// - malformed (not kebab-case) tags are errors
    /// - every tag missing from the taxonomy is a warning, malformed or not
    /// - a set without any umbrella tag is an error
    /// - each umbrella missing for a specific tag in the set is suggested
    pub fn validate<S: AsRef<str>>(&self, tags: &[S]) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        let mut unique: Vec<&str> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.as_ref();
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        // Format
        for tag in &unique {
            if !is_kebab_case(tag) {
                errors.push(format!(
                    "Tag '{}' must use kebab-case format (lowercase words joined by single hyphens)",
                    tag
                ));
            }
        }

        // Approval
        let unapproved: Vec<&str> = unique
            .iter()
            .copied()
            .filter(|tag| !self.taxonomy.is_approved(tag))
            .collect();
        for tag in &unapproved {
            warnings.push(format!("Unapproved tag detected: '{}'", tag));
        }
        if !unapproved.is_empty() {
            suggestions.push(format!(
                "Consider using approved tags or request approval for: {}",
                unapproved.join(", ")
            ));
        }

        // Umbrella presence
        let kinds: Vec<TagKind<'_>> = unique.iter().map(|t| self.taxonomy.classify(t)).collect();
        let has_umbrella = kinds.iter().any(|k| matches!(k, TagKind::Umbrella));
        if !has_umbrella {
            let umbrellas: Vec<&str> = self.taxonomy.umbrellas().collect();
            errors.push(format!(
                "At least one umbrella tag is required ({})",
                umbrellas.join(", ")
            ));
        }

        let mut missing: Vec<(&str, Vec<&str>)> = Vec::new();
        for (tag, kind) in unique.iter().zip(&kinds) {
            let TagKind::Specific { umbrella } = kind else {
                continue;
            };
            if unique.contains(umbrella) {
                continue;
            }
            match missing.iter_mut().find(|(u, _)| u == umbrella) {
                Some((_, children)) => children.push(*tag),
                None => missing.push((*umbrella, vec![*tag])),
            }
        }
        for (umbrella, children) in &missing {
            suggestions.push(format!(
                "Consider adding umbrella tag '{}' (parent of {})",
                umbrella,
                children.join(", ")
            ));
        }

        let has_specific = kinds.iter().any(|k| matches!(k, TagKind::Specific { .. }));
        if has_umbrella && !has_specific {
            suggestions.push(
                "Consider adding specific tags to describe the activity in more detail"
                    .to_string(),
            );
        }

        ValidationResult::new(errors, warnings, suggestions)
    }

    /// Autocomplete candidates for a partially typed tag
    ///
    /// Pool: approved tags not already in `existing`, containing `partial`
    /// (case-insensitive). Order:
    /// 1. tags starting with `partial` before those merely containing it
    /// 2. umbrella tags before other tags
    /// 3. lexicographic
    pub fn suggest_tags<S: AsRef<str>>(&self, partial: &str, existing: &[S]) -> Vec<String> {
        let needle = partial.to_lowercase();

        let mut candidates: Vec<&str> = self
            .taxonomy
            .approved_tags()
            .into_iter()
            .filter(|tag| !existing.iter().any(|e| e.as_ref() == *tag))
            .filter(|tag| tag.contains(needle.as_str()))
            .collect();

        candidates.sort_by(|a, b| self.suggestion_order(a, b, &needle));
        candidates.into_iter().map(str::to_string).collect()
    }

    fn suggestion_order(&self, a: &str, b: &str, needle: &str) -> Ordering {
        let prefix_rank = |tag: &str| !tag.starts_with(needle);
        let umbrella_rank = |tag: &str| !self.taxonomy.is_umbrella(tag);

        prefix_rank(a)
            .cmp(&prefix_rank(b))
            .then_with(|| umbrella_rank(a).cmp(&umbrella_rank(b)))
            .then_with(|| a.cmp(b))
    }

    /// Keyword-based tag suggestions for an activity name
    ///
    /// Only tags approved by this taxonomy are returned: umbrellas first,
    /// then the rest, each group sorted, truncated to `limit`.
    pub fn suggest_tags_for_name(&self, habit_name: &str, limit: usize) -> Vec<String> {
        let name = habit_name.to_lowercase();

        let mut matched: Vec<&str> = KEYWORD_TAGS
            .iter()
            .filter(|(keyword, _)| name.contains(keyword))
            .flat_map(|(_, tags)| tags.iter().copied())
            .filter(|tag| self.taxonomy.is_approved(tag))
            .collect();
        matched.sort_by(|a, b| {
            (!self.taxonomy.is_umbrella(a))
                .cmp(&!self.taxonomy.is_umbrella(b))
                .then_with(|| a.cmp(b))
        });
        matched.dedup();

        matched.into_iter().take(limit).map(str::to_string).collect()
    }
}
