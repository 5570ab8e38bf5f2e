use super::{RuleInput, RuleOutcome};

/// Declared LOD targets need LOD/LOI information in the model.
pub(super) fn check_lod_info_available(input: &RuleInput<'_>) -> RuleOutcome {
    let targets = input.facts.lod_targets();
    if targets.is_empty() {
        return RuleOutcome::missing_bep_field("lod_target_pt/lod_target_dde/lod_target_execution");
    }

    let mut declared = targets
        .iter()
        .map(|t| format!("{} {}", t.phase, t.value))
        .collect::<Vec<_>>()
        .join(", ");
    if let Some(scale) = &input.facts.lod_scale {
        declared.push_str(&format!(" (scale {})", scale));
    }

    match input.model.lod_info_available {
        Some(true) => RuleOutcome::pass(format!(
            "LOD/LOI information is available for the declared targets: {}.",
            declared
        )),
        Some(false) => RuleOutcome::fail(format!(
            "The BEP declares LOD targets ({}) but the model has no LOD/LOI information.",
            declared
        )),
        None => RuleOutcome::warning(format!(
            "The BEP declares LOD targets ({}) but LOD/LOI availability in the model is unconfirmed.",
            declared
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckStatus;
    use crate::rules::RulePolicy;
    use crate::rules::test_support::{facts, model};

    fn run(targets: bool, available: Option<bool>) -> RuleOutcome {
        let mut f = facts();
        if !targets {
            f.lod_target_pt = None;
            f.lod_target_dde = None;
            f.lod_target_execution = None;
        }
        let mut m = model();
        m.lod_info_available = available;
        let p = RulePolicy::default();
        check_lod_info_available(&RuleInput { facts: &f, model: &m, policy: &p })
    }

    #[test]
    fn test_available_with_targets_passes() {
        let outcome = run(true, Some(true));
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert_eq!(
            outcome.details,
            "LOD/LOI information is available for the declared targets: pt LOD 300, dde LOD 350 (scale LOD 100-500)."
        );
    }

    #[test]
    fn test_explicitly_unavailable_fails() {
        assert_eq!(run(true, Some(false)).status, CheckStatus::Fail);
    }

    #[test]
    fn test_unconfirmed_warns() {
        let outcome = run(true, None);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.details.contains("unconfirmed"));
    }

    #[test]
    fn test_no_targets_cannot_evaluate() {
        let outcome = run(false, Some(true));
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.details.starts_with("cannot evaluate: missing BEP field lod_target"));
    }
}
