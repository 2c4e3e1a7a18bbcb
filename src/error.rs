use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that abort a pipeline run.
///
/// Per-field decode failures are not represented here: they degrade to empty
/// values inside the parser and never leave it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("record source unreadable at {path:?}: {reason}")]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("expected artifact '{name}' not found in {dir:?}")]
    MissingArtifact { name: String, dir: PathBuf },

    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },
}

pub type PipelineResult<T> = Result<T, PipelineError>;
