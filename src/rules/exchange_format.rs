use crate::models::{CodeDomain, Coded, ExchangeFormatCode};

use super::{RuleInput, RuleOutcome, join_codes};

/// The BEP's main exchange format must be deliverable from the model.
pub(super) fn check_exchange_format_match(input: &RuleInput<'_>) -> RuleOutcome {
    let declared = match &input.facts.main_exchange_format {
        None => return RuleOutcome::missing_bep_field("main_exchange_format"),
        Some(Coded::Unrecognized(raw)) => {
            return RuleOutcome::warning(format!(
                "The BEP's main exchange format cannot be matched; unrecognized value: {}.",
                raw
            ));
        }
        Some(Coded::Known(format)) => *format,
    };

    let model = input.model;
    let unrecognized = model.unrecognized_formats();

    if model.has_format(declared) {
        return RuleOutcome::pass(format!(
            "Declared exchange format {} ({}) is available.",
            declared.as_str(),
            declared.label()
        ))
        .with_unrecognized(unrecognized);
    }

    let siblings: Vec<&'static str> = model
        .exchange_formats_available
        .iter()
        .filter_map(|f| f.known())
        .filter(|f| f.is_family_of(&declared))
        .map(|f| f.as_str())
        .collect();
    if !siblings.is_empty() {
        return RuleOutcome::warning(format!(
            "Declared exchange format {} is not available; only the same-family format {} is provided.",
            declared.as_str(),
            join_codes(&siblings)
        ))
        .with_unrecognized(unrecognized);
    }

    let available = if model.exchange_formats_available.is_empty() {
        "none".to_string()
    } else {
        join_codes(model.exchange_formats_available.iter().map(|f| f.as_str()))
    };
    RuleOutcome::fail(format!(
        "Declared exchange format {} ({}) is missing; available formats: {}.",
        declared.as_str(),
        declared.label(),
        available
    ))
    .with_unrecognized(unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckStatus;
    use crate::rules::RulePolicy;
    use crate::rules::test_support::{codes, facts, model};

    fn run(declared: Option<&str>, available: &[&str]) -> RuleOutcome {
        let mut f = facts();
        f.main_exchange_format = declared.map(Coded::parse);
        let mut m = model();
        m.exchange_formats_available = codes(available);
        let p = RulePolicy::default();
        check_exchange_format_match(&RuleInput { facts: &f, model: &m, policy: &p })
    }

    #[test]
    fn test_exact_format_passes() {
        let outcome = run(Some("ifc4_3"), &["dwg", "ifc4_3"]);
        assert_eq!(outcome.status, CheckStatus::Pass);
    }

    #[test]
    fn test_absent_format_fails_and_is_named() {
        let outcome = run(Some("ifc4_3"), &["dwg"]);
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert_eq!(
            outcome.details,
            "Declared exchange format ifc4_3 (IFC 4.3) is missing; available formats: dwg."
        );
    }

    #[test]
    fn test_same_family_warns() {
        let outcome = run(Some("ifc4_3"), &["ifc2x3"]);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.details.contains("same-family format ifc2x3"));

        let outcome = run(Some("nwd"), &["nwc"]);
        assert_eq!(outcome.status, CheckStatus::Warning);
    }

    #[test]
    fn test_no_formats_fails() {
        let outcome = run(Some("dwg"), &[]);
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert!(outcome.details.ends_with("available formats: none."));
    }

    #[test]
    fn test_missing_bep_format() {
        let outcome = run(None, &["ifc4_3"]);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(
            outcome.details,
            "cannot evaluate: missing BEP field main_exchange_format"
        );
    }

    #[test]
    fn test_unrecognized_available_format_degrades_pass_only() {
        let outcome = run(Some("ifc4_3"), &["ifc4_3", "step"]);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.details.contains("unrecognized value: step"));

        let outcome = run(Some("ifc4_3"), &["ifc5"]);
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert!(outcome.details.contains("unrecognized value: ifc5"));
    }

    #[test]
    fn test_absent_format_still_fails_next_to_unknown_one() {
        let outcome = run(Some("ifc4_3"), &["dwg", "ifc5"]);
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert_eq!(
            outcome.details,
            "Declared exchange format ifc4_3 (IFC 4.3) is missing; available formats: dwg, ifc5. unrecognized value: ifc5."
        );
    }

    #[test]
    fn test_unrecognized_declared_format() {
        let outcome = run(Some("rvt"), &["ifc4_3"]);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.details.contains("unrecognized value: rvt"));
    }
}
