//! Rule evaluation engine.
//!
//! Each rule is a pure function of `(BepFacts, ModelSummary, RulePolicy)`
//! returning exactly one outcome. The engine wraps outcomes into [`Check`]s
//! carrying the rule's stable id and label, in declaration order:
//! identification, disciplines, formats, georeference, LOD, categories.
//!
//! # Module Structure
//!
//! - `source`: model_source_recognized
//! - `disciplines`: disciplines_coverage
//! - `exchange_format`: exchange_format_match
//! - `georeference`: georeference_present
//! - `lod`: lod_info_available
//! - `categories`: element_categories_present

mod categories;
mod disciplines;
mod exchange_format;
mod georeference;
mod lod;
mod source;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Check, CheckStatus, ModelSummary};
use crate::requirements::BepFacts;

// ============================================================================
// Rule Types
// ============================================================================

/// Tunable thresholds for partial-coverage rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulePolicy {
    /// Coverage ratio that must be strictly exceeded for missing disciplines
    /// to be a warning instead of a fail
    pub discipline_majority_threshold: f64,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            discipline_majority_threshold: 0.5,
        }
    }
}

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub facts: &'a BepFacts,
    pub model: &'a ModelSummary,
    pub policy: &'a RulePolicy,
}

/// Status and explanation produced by one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub status: CheckStatus,
    pub details: String,
}

impl RuleOutcome {
    pub fn pass(details: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            details: details.into(),
        }
    }

    pub fn warning(details: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            details: details.into(),
        }
    }

    pub fn fail(details: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            details: details.into(),
        }
    }

    /// The BEP lacks a fact this rule needs.
    pub fn missing_bep_field(field: &str) -> Self {
        Self::warning(format!("cannot evaluate: missing BEP field {}", field))
    }

    /// Fold unrecognized values into the outcome: a pass degrades to warning,
    /// and every value is named in the details.
    pub fn with_unrecognized<'v>(mut self, values: impl IntoIterator<Item = &'v str>) -> Self {
        let notes: Vec<String> = values
            .into_iter()
            .map(|v| format!("unrecognized value: {}", v))
            .collect();
        if notes.is_empty() {
            return self;
        }
        if self.status == CheckStatus::Pass {
            self.status = CheckStatus::Warning;
        }
        self.details = format!("{} {}.", self.details, notes.join("; "));
        self
    }
}

/// A rule with its stable identity
pub struct RuleDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub evaluator: fn(&RuleInput<'_>) -> RuleOutcome,
}

impl RuleDefinition {
    pub fn evaluate(&self, input: &RuleInput<'_>) -> Check {
        let outcome = (self.evaluator)(input);
        debug!("Rule {} -> {}", self.id, outcome.status.as_str());
        Check {
            id: self.id.to_string(),
            label: self.label.to_string(),
            status: outcome.status,
            details: outcome.details,
        }
    }
}

// ============================================================================
// Rule Set
// ============================================================================

/// Ordered collection of rules
pub struct RuleSet {
    pub rules: Vec<RuleDefinition>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: vec![
                RuleDefinition {
                    id: "model_source_recognized",
                    label: "Model source",
                    evaluator: source::check_model_source,
                },
                RuleDefinition {
                    id: "disciplines_coverage",
                    label: "Discipline coverage",
                    evaluator: disciplines::check_disciplines_coverage,
                },
                RuleDefinition {
                    id: "exchange_format_match",
                    label: "Main exchange format",
                    evaluator: exchange_format::check_exchange_format_match,
                },
                RuleDefinition {
                    id: "georeference_present",
                    label: "Georeferencing",
                    evaluator: georeference::check_georeference_present,
                },
                RuleDefinition {
                    id: "lod_info_available",
                    label: "LOD/LOI information",
                    evaluator: lod::check_lod_info_available,
                },
                RuleDefinition {
                    id: "element_categories_present",
                    label: "Element categories",
                    evaluator: categories::check_element_categories_present,
                },
            ],
        }
    }
}

impl RuleSet {
    /// Rule ids in declaration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }

    /// Evaluate every rule; output follows declaration order.
    pub fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Check> {
        self.rules.iter().map(|rule| rule.evaluate(input)).collect()
    }

    /// Evaluate rules in the given order and return checks in declaration
    /// order. Indices not listed, or listed twice, are evaluated once each.
    pub fn evaluate_in_order(&self, input: &RuleInput<'_>, order: &[usize]) -> Vec<Check> {
        let mut slots: Vec<Option<Check>> = vec![None; self.rules.len()];
        for &idx in order {
            if let Some(slot) = slots.get_mut(idx)
                && slot.is_none()
            {
                *slot = Some(self.rules[idx].evaluate(input));
            }
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| slot.unwrap_or_else(|| self.rules[idx].evaluate(input)))
            .collect()
    }
}

/// Join codes for details text, e.g. "architecture, structure".
pub(crate) fn join_codes<I, S>(codes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
