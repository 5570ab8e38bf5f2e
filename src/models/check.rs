use serde::{Deserialize, Serialize};

/// Outcome of a single rule
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Fail => "fail",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✅",
            CheckStatus::Warning => "⚠️",
            CheckStatus::Fail => "❌",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "Compliant",
            CheckStatus::Warning => "Attention",
            CheckStatus::Fail => "Non-compliant",
        }
    }
}

/// One evaluated rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Check {
    /// Stable rule identifier (e.g. "disciplines_coverage")
    pub id: String,
    pub label: String,
    pub status: CheckStatus,
    /// Explanation of the specific observation behind the status
    pub details: String,
}

/// Aggregated counts and overall status for a list of checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub total_checks: usize,
    pub pass_count: usize,
    pub warning_count: usize,
    pub fail_count: usize,
    pub overall_status: CheckStatus,
}

/// Response body of a verification run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub report_markdown: String,
    pub checks: Vec<Check>,
    pub summary: Summary,
}
