//! Tag validation report

use serde::{Deserialize, Serialize};

/// Outcome of checking a tag set against the taxonomy
///
/// Problems are always reported as data, never as a failure, so a caller
/// can render a report even for badly-formed input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when `errors` is empty
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Non-fatal findings (unapproved tags)
    pub warnings: Vec<String>,
    /// Actionable hints (missing umbrellas, approval requests)
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// Build a result, deriving `is_valid` from `errors`
    pub fn new(errors: Vec<String>, warnings: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
