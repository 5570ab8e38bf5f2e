use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::OutputConfig;
use crate::models::VerificationRecord;
use crate::slug::project_dir_name;

use super::ReportWriter;

const RECORD_PREFIX: &str = "verification-";

/// File-based writer: one markdown report plus one JSON record per run,
/// grouped per project under the reports directory.
pub struct FileReportWriter {
    config: OutputConfig,
}

impl FileReportWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn project_dir(&self, project_code: &str) -> PathBuf {
        self.config.reports_dir.join(project_dir_name(project_code))
    }

    /// File stem derived from the run timestamp, e.g. `verification-20260317-101502-123`
    fn file_stem(record: &VerificationRecord) -> String {
        let stamp = chrono::DateTime::parse_from_rfc3339(&record.verified_at)
            .map(|dt| {
                dt.with_timezone(&chrono::Utc)
                    .format("%Y%m%d-%H%M%S-%3f")
                    .to_string()
            })
            .unwrap_or_else(|_| project_dir_name(&record.verified_at));
        format!("{}{}", RECORD_PREFIX, stamp)
    }
}

#[async_trait]
impl ReportWriter for FileReportWriter {
    async fn write_record(&self, record: &VerificationRecord) -> Result<PathBuf> {
        let dir = self.project_dir(&record.project_code);
        fs::create_dir_all(&dir)
            .await
            .context("Failed to create reports directory")?;

        let stem = Self::file_stem(record);

        let report_path = dir.join(format!("{}.md", stem));
        fs::write(&report_path, &record.report_markdown)
            .await
            .context(format!("Failed to write report {:?}", report_path))?;
        info!("Wrote {:?}", report_path);

        let json_path = dir.join(format!("{}.json", stem));
        fs::write(&json_path, serde_json::to_string_pretty(record)?)
            .await
            .context(format!("Failed to write record {:?}", json_path))?;
        info!("Wrote {:?}", json_path);

        Ok(report_path)
    }

    async fn history(&self, project_code: &str) -> Result<Vec<VerificationRecord>> {
        let dir = self.project_dir(project_code);
        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut entries = fs::read_dir(&dir)
            .await
            .context(format!("Failed to read reports directory: {:?}", dir))?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !(name.starts_with(RECORD_PREFIX) && name.ends_with(".json")) {
                continue;
            }

            let content = fs::read_to_string(entry.path()).await?;
            match serde_json::from_str::<VerificationRecord>(&content) {
                Ok(record) if record.project_code.trim() == project_code.trim() => {
                    records.push(record)
                }
                Ok(record) => debug!(
                    "Skipping record of project {} in {:?}",
                    record.project_code,
                    entry.path()
                ),
                Err(e) => warn!("Skipping unreadable record {:?}: {}", entry.path(), e),
            }
        }

        records.sort_by(|a, b| b.verified_at.cmp(&a.verified_at));
        Ok(records)
    }
}
