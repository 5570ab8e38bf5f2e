//! The verification pipeline: intake and extraction, rule evaluation,
//! aggregation, rendering.

use serde_json::Value;
use tracing::info;

use crate::error::VerifyError;
use crate::intake::parse_model_summary;
use crate::models::{ModelSummary, Summary, VerificationOutcome};
use crate::report::{ReportHeader, render_report};
use crate::requirements::{BepFacts, BepRecord};
use crate::rules::{RuleInput, RulePolicy, RuleSet};

/// Runs the fixed rule set under a policy.
pub struct Verifier {
    rules: RuleSet,
    policy: RulePolicy,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(RulePolicy::default())
    }
}

impl Verifier {
    pub fn new(policy: RulePolicy) -> Self {
        Self {
            rules: RuleSet::default(),
            policy,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Verify a raw payload against the stored record of `project_code`.
    ///
    /// Intake and extraction errors stop the run; after that a complete
    /// outcome is always produced.
    pub fn verify(
        &self,
        record: Option<&BepRecord>,
        project_code: &str,
        payload: &Value,
    ) -> Result<VerificationOutcome, VerifyError> {
        let facts = BepFacts::extract(record, project_code)?;
        let model = parse_model_summary(payload)?;

        let mut header = header_for(&facts, &model);
        header.project = record.map(BepRecord::display_name);

        info!(
            "Verifying BEP vs model: project={}, disciplines=[{}]",
            project_code,
            model
                .disciplines_present
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let outcome = self.evaluate(&facts, &model, &header);

        info!(
            "Verification complete: project={}, overall={}, pass={}, warning={}, fail={}",
            project_code,
            outcome.summary.overall_status.as_str(),
            outcome.summary.pass_count,
            outcome.summary.warning_count,
            outcome.summary.fail_count
        );
        Ok(outcome)
    }

    /// Evaluate already-materialized facts and model summary.
    pub fn evaluate(
        &self,
        facts: &BepFacts,
        model: &ModelSummary,
        header: &ReportHeader,
    ) -> VerificationOutcome {
        let input = RuleInput {
            facts,
            model,
            policy: &self.policy,
        };
        let checks = self.rules.evaluate(&input);
        let summary = Summary::from_checks(&checks);
        let report_markdown = render_report(header, &checks, &summary);

        VerificationOutcome {
            report_markdown,
            checks,
            summary,
        }
    }
}

/// Header lines derived from the facts and the submitted model.
pub fn header_for(facts: &BepFacts, model: &ModelSummary) -> ReportHeader {
    let iso = facts.iso_parts();
    let standards = format!(
        "{}; EIR: {}",
        if iso.is_empty() {
            "none declared".to_string()
        } else {
            iso.join(", ")
        },
        if facts.has_eir { "yes" } else { "no" }
    );

    ReportHeader {
        project: None,
        source: Some(model.source.to_string()),
        standards: Some(standards),
        notes: model.notes.clone(),
    }
}
