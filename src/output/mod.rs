pub mod files;

pub use files::*;

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

use crate::models::VerificationRecord;

/// Trait for persisting verification results
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Save a verification record and its report; returns the report path
    async fn write_record(&self, record: &VerificationRecord) -> Result<PathBuf>;

    /// Saved records for a project, newest first
    async fn history(&self, project_code: &str) -> Result<Vec<VerificationRecord>>;
}
