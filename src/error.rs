use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a verification run before any rule is evaluated.
///
/// Rule-level problems (missing BEP fields, unrecognized codes) never surface
/// here; they are reported as `warning` checks instead.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Malformed or missing required input fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// No project or generated BEP exists for the referenced project
    #[error("Not found: {0}")]
    NotFound(String),

    /// The payload schema itself could not be compiled
    #[error("Payload schema error: {0}")]
    Schema(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl VerifyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the caller's request (bad payload, unknown project).
    pub fn is_client_error(&self) -> bool {
        matches!(self, VerifyError::Validation(_) | VerifyError::NotFound(_))
    }
}
