//! Rule-based conformance checking of BIM Execution Plans (BEP) against
//! submitted model summaries.
//!
//! The pipeline is deterministic and free of text-generation calls:
//! intake and requirement extraction feed a fixed ordered rule set, whose
//! checks are rolled up into a summary and rendered as a markdown report.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod intake;
pub mod models;
pub mod output;
pub mod report;
pub mod requirements;
pub mod rules;
pub mod slug;
pub mod store;
pub mod verifier;

// Re-export main types
pub use config::{OutputConfig, StoreConfig, VerifierConfig};
pub use error::VerifyError;
pub use intake::{ModelSummaryPayload, parse_model_summary, parse_model_summary_str, payload_schema};
pub use models::{
    Check, CheckStatus, ModelSummary, ProjectContext, ProjectStatus, Summary,
    VerificationOutcome, VerificationRecord,
};
pub use output::{FileReportWriter, ReportWriter};
pub use report::{ReportHeader, render_report};
pub use requirements::{BepFacts, BepRecord};
pub use rules::{RulePolicy, RuleSet};
pub use store::{ProjectListing, ProjectStore};
pub use verifier::Verifier;

pub use slug::project_dir_name;

/// Verify a raw model-summary payload against a stored project record
/// using the default rule policy.
pub fn verify(
    record: Option<&BepRecord>,
    project_code: &str,
    payload: &serde_json::Value,
) -> Result<VerificationOutcome, VerifyError> {
    Verifier::default().verify(record, project_code, payload)
}
