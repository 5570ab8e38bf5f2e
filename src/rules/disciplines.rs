use crate::models::{CodeDomain, DisciplineCode};

use super::{RuleInput, RuleOutcome, join_codes};

/// Every discipline the BEP declares should be modelled.
///
/// Coverage above the majority threshold with gaps is a warning; anything at
/// or below it (including no overlap) fails.
pub(super) fn check_disciplines_coverage(input: &RuleInput<'_>) -> RuleOutcome {
    let declared = &input.facts.disciplines;
    if declared.is_empty() {
        return RuleOutcome::missing_bep_field("disciplines");
    }

    let unrecognized = declared
        .iter()
        .filter_map(|d| d.unrecognized())
        .chain(input.model.unrecognized_disciplines());

    let declared_known: Vec<DisciplineCode> = declared.iter().filter_map(|d| d.known()).collect();
    if declared_known.is_empty() {
        return RuleOutcome::warning("None of the disciplines declared in the BEP is recognized.")
            .with_unrecognized(unrecognized);
    }

    let (present, missing): (Vec<DisciplineCode>, Vec<DisciplineCode>) = declared_known
        .iter()
        .partition(|d| input.model.has_discipline(**d));

    let total = declared_known.len();
    let outcome = if missing.is_empty() {
        RuleOutcome::pass(format!(
            "All {} declared disciplines are present in the model: {}.",
            total,
            join_codes(present.iter().map(|d| d.as_str()))
        ))
    } else if present.is_empty() {
        RuleOutcome::fail(format!(
            "None of the declared disciplines ({}) is present in the model; model contains: {}.",
            join_codes(missing.iter().map(|d| d.as_str())),
            join_codes(input.model.disciplines_present.iter().map(|d| d.as_str()))
        ))
    } else {
        let ratio = present.len() as f64 / total as f64;
        let text = format!(
            "{} of {} declared disciplines are present; missing: {}.",
            present.len(),
            total,
            join_codes(missing.iter().map(|d| d.as_str()))
        );
        if ratio > input.policy.discipline_majority_threshold {
            RuleOutcome::warning(text)
        } else {
            RuleOutcome::fail(text)
        }
    };

    outcome.with_unrecognized(unrecognized)
}
