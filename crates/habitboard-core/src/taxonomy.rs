//! Tag taxonomy: umbrella tags, their specific children, and contextual tags
//!
//! Every tag string resolves to exactly one [`TagKind`]. All consumers
//! (validator, aggregators, CLI) classify tags through this module instead
//! of re-deriving membership.
//!
//! The baseline taxonomy is built once per process and never mutated.
//! Larger taxonomies are a data-only extension loaded from a seed file:
//!
//! ```toml
//! contextual = ["cost-saving", "restock"]
//!
//! [[umbrellas]]
//! name = "food"
//! children = ["cooking", "grocery"]
//! ```

use crate::error::CoreError;
use crate::validation::is_kebab_case;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Classification of a tag string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind<'a> {
    /// Top-level category used for rollups
    Umbrella,
    /// Child of exactly one umbrella
    Specific { umbrella: &'a str },
    /// Cross-cutting, belongs to no umbrella
    Contextual,
    /// Not in the taxonomy (tolerated with a warning)
    Unknown,
}

impl TagKind<'_> {
    pub fn is_approved(&self) -> bool {
        !matches!(self, TagKind::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TagKind::Umbrella => "umbrella",
            TagKind::Specific { .. } => "specific",
            TagKind::Contextual => "contextual",
            TagKind::Unknown => "unknown",
        }
    }
}

/// One umbrella row of the seed table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmbrellaSeed {
    pub name: String,
    #[serde(default)]
    pub children: Vec<String>,
}

impl UmbrellaSeed {
    fn new(name: &str, children: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Static, version-controlled taxonomy table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySeed {
    #[serde(default)]
    pub contextual: Vec<String>,
    #[serde(default)]
    pub umbrellas: Vec<UmbrellaSeed>,
}

impl TaxonomySeed {
    /// The four-umbrella baseline
    pub fn baseline() -> Self {
        Self {
            umbrellas: vec![
                UmbrellaSeed::new("health", &["exercise", "workout"]),
                UmbrellaSeed::new(
                    "food",
                    &["cooking", "meal-prep", "meal", "takeout", "grocery"],
                ),
                UmbrellaSeed::new("home", &["cleaning", "laundry", "bathroom"]),
                UmbrellaSeed::new(
                    "transportation",
                    &["public-transit", "walking-errand", "rideshare"],
                ),
            ],
            contextual: vec!["cost-saving".to_string(), "restock".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Umbrella,
    Specific(usize),
    Contextual,
}

static BASELINE: Lazy<Taxonomy> = Lazy::new(|| Taxonomy::index(TaxonomySeed::baseline()));

/// Immutable tag hierarchy with O(1) lookups
#[derive(Debug, Clone)]
pub struct Taxonomy {
    seed: TaxonomySeed,
    index: HashMap<String, Entry>,
}

impl Taxonomy {
    /// Process-wide baseline taxonomy
    pub fn baseline() -> &'static Taxonomy {
        &BASELINE
    }

    /// Build a taxonomy from a seed table, checking its invariants
    ///
    /// Fails if a tag is not kebab-case, an umbrella or contextual tag is
    /// listed twice, or a tag belongs to more than one class.
    pub fn from_seed(seed: TaxonomySeed) -> Result<Self, CoreError> {
        let mut claims: Vec<(&str, String)> = Vec::new();
        for umbrella in &seed.umbrellas {
            claims.push((umbrella.name.as_str(), "umbrella".to_string()));
            for child in &umbrella.children {
                claims.push((child.as_str(), format!("child of '{}'", umbrella.name)));
            }
        }
        for tag in &seed.contextual {
            claims.push((tag.as_str(), "contextual".to_string()));
        }

        let mut seen: HashMap<&str, String> = HashMap::new();
        for (tag, role) in claims {
            if !is_kebab_case(tag) {
                return Err(CoreError::InvalidTaxonomy {
                    message: format!("tag '{}' ({}) is not kebab-case", tag, role),
                });
            }
            if let Some(previous) = seen.get(tag) {
                return Err(CoreError::InvalidTaxonomy {
                    message: format!("tag '{}' is listed as {} and as {}", tag, previous, role),
                });
            }
            seen.insert(tag, role);
        }

        let taxonomy = Self::index(seed);
        debug!(
            umbrellas = taxonomy.seed.umbrellas.len(),
            tags = taxonomy.index.len(),
            "Built taxonomy"
        );
        Ok(taxonomy)
    }

    /// Load a seed table from `.toml`, `.yaml`/`.yml` or `.json`
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let seed: TaxonomySeed = match extension.as_deref() {
            Some("toml") => toml::from_str(&content).map_err(|e| CoreError::TomlParse {
                path: path.to_path_buf(),
                message: e.message().to_string(),
                source: e,
            })?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| CoreError::YamlParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                    source: e,
                })?
            }
            Some("json") => serde_json::from_str(&content).map_err(|e| CoreError::JsonParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                source: e,
            })?,
            _ => {
                return Err(CoreError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        debug!(?path, "Loaded taxonomy seed");
        Self::from_seed(seed)
    }

    fn index(seed: TaxonomySeed) -> Self {
        let mut index = HashMap::new();
        for (i, umbrella) in seed.umbrellas.iter().enumerate() {
            index.insert(umbrella.name.clone(), Entry::Umbrella);
            for child in &umbrella.children {
                index.insert(child.clone(), Entry::Specific(i));
            }
        }
        for tag in &seed.contextual {
            index.insert(tag.clone(), Entry::Contextual);
        }
        Self { seed, index }
    }

    /// Resolve a tag to its classification
    pub fn classify(&self, tag: &str) -> TagKind<'_> {
        match self.index.get(tag) {
            Some(Entry::Umbrella) => TagKind::Umbrella,
            Some(Entry::Specific(i)) => TagKind::Specific {
                umbrella: &self.seed.umbrellas[*i].name,
            },
            Some(Entry::Contextual) => TagKind::Contextual,
            None => TagKind::Unknown,
        }
    }

    pub fn is_umbrella(&self, tag: &str) -> bool {
        matches!(self.classify(tag), TagKind::Umbrella)
    }

    /// Specific tags of an umbrella, in seed order (empty if unknown)
    pub fn children_of(&self, umbrella: &str) -> &[String] {
        self.seed
            .umbrellas
            .iter()
            .find(|u| u.name == umbrella)
            .map(|u| u.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent umbrella of a specific tag
    ///
    /// `None` for umbrella tags themselves, contextual tags and unknown tags.
    pub fn umbrella_of(&self, tag: &str) -> Option<&str> {
        match self.classify(tag) {
            TagKind::Specific { umbrella } => Some(umbrella),
            _ => None,
        }
    }

    pub fn is_contextual(&self, tag: &str) -> bool {
        matches!(self.classify(tag), TagKind::Contextual)
    }

    /// True for umbrella, specific and contextual tags
    pub fn is_approved(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    /// Umbrella names in seed order
    pub fn umbrellas(&self) -> impl Iterator<Item = &str> {
        self.seed.umbrellas.iter().map(|u| u.name.as_str())
    }

    pub fn contextual_tags(&self) -> &[String] {
        &self.seed.contextual
    }

    /// Every approved tag, sorted
    pub fn approved_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.index.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// The seed table this taxonomy was built from
    pub fn seed(&self) -> &TaxonomySeed {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_passes_seed_checks() {
        assert!(Taxonomy::from_seed(TaxonomySeed::baseline()).is_ok());
    }

    #[test]
    fn test_classify_each_kind() {
        let taxonomy = Taxonomy::baseline();
        assert_eq!(taxonomy.classify("food"), TagKind::Umbrella);
        assert_eq!(
            taxonomy.classify("cooking"),
            TagKind::Specific { umbrella: "food" }
        );
        assert_eq!(taxonomy.classify("restock"), TagKind::Contextual);
        assert_eq!(taxonomy.classify("career"), TagKind::Unknown);
        assert_eq!(taxonomy.classify("Food"), TagKind::Unknown);
    }

    #[test]
    fn test_children_of() {
        let taxonomy = Taxonomy::baseline();
        assert_eq!(taxonomy.children_of("health"), ["exercise", "workout"]);
        assert!(taxonomy.children_of("career").is_empty());
        assert!(taxonomy.children_of("cooking").is_empty());
    }

    #[test]
    fn test_umbrella_of() {
        let taxonomy = Taxonomy::baseline();
        assert_eq!(taxonomy.umbrella_of("public-transit"), Some("transportation"));
        assert_eq!(taxonomy.umbrella_of("transportation"), None);
        assert_eq!(taxonomy.umbrella_of("cost-saving"), None);
        assert_eq!(taxonomy.umbrella_of("unknown-tag"), None);
    }

    #[test]
    fn test_approval() {
        let taxonomy = Taxonomy::baseline();
        assert!(taxonomy.is_approved("home"));
        assert!(taxonomy.is_approved("laundry"));
        assert!(taxonomy.is_approved("cost-saving"));
        assert!(!taxonomy.is_approved("morning"));
        assert!(taxonomy.is_contextual("cost-saving"));
        assert!(!taxonomy.is_contextual("home"));
    }

    #[test]
    fn test_approved_tags_sorted_and_complete() {
        let tags = Taxonomy::baseline().approved_tags();
        assert_eq!(tags.len(), 4 + 13 + 2);
        assert!(tags.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_seed_rejects_duplicate_across_classes() {
        let mut seed = TaxonomySeed::baseline();
        seed.umbrellas[1].children.push("restock".to_string());

        let err = Taxonomy::from_seed(seed).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTaxonomy { .. }));
        assert!(err.to_string().contains("restock"));
    }

    #[test]
    fn test_from_seed_rejects_child_under_two_umbrellas() {
        let seed = TaxonomySeed {
            umbrellas: vec![
                UmbrellaSeed::new("food", &["meal"]),
                UmbrellaSeed::new("home", &["meal"]),
            ],
            contextual: vec![],
        };
        assert!(Taxonomy::from_seed(seed).is_err());
    }

    #[test]
    fn test_from_seed_rejects_non_kebab_tag() {
        let seed = TaxonomySeed {
            umbrellas: vec![UmbrellaSeed::new("Food", &[])],
            contextual: vec![],
        };
        let err = Taxonomy::from_seed(seed).unwrap_err();
        assert!(err.to_string().contains("kebab-case"));
    }

    #[test]
    fn test_extended_taxonomy_is_data_only() {
        let mut seed = TaxonomySeed::baseline();
        seed.umbrellas
            .push(UmbrellaSeed::new("learning", &["reading", "course-work"]));
        let taxonomy = Taxonomy::from_seed(seed).unwrap();

        assert!(taxonomy.is_umbrella("learning"));
        assert_eq!(taxonomy.umbrella_of("course-work"), Some("learning"));
        assert_eq!(taxonomy.umbrellas().count(), 5);
    }
}
