use serde::{Deserialize, Serialize};

use super::check::{Check, CheckStatus, VerificationOutcome};
use super::project::ProjectStatus;

/// A saved verification report with its rollup, as listed in project history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub project_code: String,
    pub title: String,
    /// RFC 3339 timestamp of the run
    pub verified_at: String,
    pub summary_status: CheckStatus,
    pub total_checks: usize,
    pub fail_count: usize,
    pub warning_count: usize,
    pub previous_status: ProjectStatus,
    pub project_status: ProjectStatus,
    pub checks: Vec<Check>,
    pub report_markdown: String,
}

impl VerificationRecord {
    pub fn new(
        project_code: &str,
        outcome: &VerificationOutcome,
        previous_status: ProjectStatus,
        verified_at: String,
    ) -> Self {
        Self {
            project_code: project_code.to_string(),
            title: format!("BEP verification report - {}", project_code),
            verified_at,
            summary_status: outcome.summary.overall_status,
            total_checks: outcome.summary.total_checks,
            fail_count: outcome.summary.fail_count,
            warning_count: outcome.summary.warning_count,
            previous_status,
            project_status: ProjectStatus::after_verification(&outcome.checks),
            checks: outcome.checks.clone(),
            report_markdown: outcome.report_markdown.clone(),
        }
    }
}
