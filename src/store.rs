//! File-based project store.
//!
//! Layout under the projects directory:
//!
//! ```text
//! <projects_dir>/<project_code>/context.yaml   (or context.yml / context.json)
//! <projects_dir>/<project_code>/bep.md         latest generated BEP
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::VerifyError;
use crate::models::ProjectContext;
use crate::requirements::BepRecord;

const CONTEXT_FILES: [&str; 3] = ["context.yaml", "context.yml", "context.json"];
const BEP_FILE: &str = "bep.md";

/// Project code with whether a BEP has been generated for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListing {
    pub project_code: String,
    pub has_bep: bool,
}

pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the record for a project, or `None` if the project is unknown.
    pub fn load(&self, project_code: &str) -> Result<Option<BepRecord>, VerifyError> {
        let dir = self.project_dir(project_code)?;
        if !dir.is_dir() {
            debug!("Project directory not found: {:?}", dir);
            return Ok(None);
        }

        let context = match CONTEXT_FILES.iter().map(|f| dir.join(f)).find(|p| p.is_file()) {
            Some(path) => Some(read_context(&path)?),
            None => None,
        };

        let bep_path = dir.join(BEP_FILE);
        let bep_markdown = if bep_path.is_file() {
            Some(std::fs::read_to_string(&bep_path).map_err(|e| VerifyError::io(&bep_path, e))?)
        } else {
            None
        };

        Ok(Some(BepRecord {
            project_code: project_code.to_string(),
            context,
            bep_markdown,
        }))
    }

    /// List projects (directories under the root), sorted by code.
    pub fn list(&self) -> Result<Vec<ProjectListing>, VerifyError> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = Path::new(&root).join("*");
        let entries = glob::glob(&pattern.to_string_lossy())
            .map_err(|e| VerifyError::Validation(format!("invalid projects path: {}", e)))?;

        let mut listings = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| VerifyError::io(e.path().to_path_buf(), e.into_error()))?;
            if !path.is_dir() {
                continue;
            }
            let Some(code) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let has_bep = std::fs::read_to_string(path.join(BEP_FILE))
                .map(|md| !md.trim().is_empty())
                .unwrap_or(false);
            listings.push(ProjectListing {
                project_code: code.to_string(),
                has_bep,
            });
        }
        listings.sort_by(|a, b| a.project_code.cmp(&b.project_code));
        Ok(listings)
    }

    fn project_dir(&self, project_code: &str) -> Result<PathBuf, VerifyError> {
        let code = project_code.trim();
        if code.is_empty()
            || code == "."
            || code == ".."
            || code.contains(['/', '\\'])
        {
            return Err(VerifyError::Validation(format!(
                "invalid project code '{}'",
                project_code
            )));
        }
        Ok(self.root.join(code))
    }
}

fn read_context(path: &Path) -> Result<ProjectContext, VerifyError> {
    let content = std::fs::read_to_string(path).map_err(|e| VerifyError::io(path, e))?;
    let parsed = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| VerifyError::Parse {
        path: path.to_path_buf(),
        message,
    })
}
