//! Git collaborator error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while collecting changes from git.
#[derive(Error, Debug)]
pub enum GitOpsError {
    #[error("Git repository not initialized at '{0}'")]
    GitNotInitialized(PathBuf),

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("Unknown revision '{0}'")]
    UnknownRevision(String),

    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Classifies git stderr into a more specific error variant.
pub fn classify_git_error(stderr: &str, revision: Option<&str>) -> GitOpsError {
    let lower = stderr.to_lowercase();

    if let Some(revision) = revision {
        if lower.contains("unknown revision") || lower.contains("bad revision") {
            return GitOpsError::UnknownRevision(revision.to_string());
        }
    }

    GitOpsError::GitOperation(stderr.trim().to_string())
}

/// Result type for git operations.
pub type Result<T> = std::result::Result<T, GitOpsError>;
