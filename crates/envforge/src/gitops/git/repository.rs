//! Git repository handle used to collect changed files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::{debug, info};

use super::parse::{format_git_error, parse_name_status, parse_porcelain, strip_prefix};
use crate::gitops::error::{classify_git_error, GitOpsError, Result};
use crate::smart::ChangedFiles;

/// Git repository wrapper for change collection.
pub struct GitRepository {
    /// Path to the repository root.
    repo_path: PathBuf,
}

impl GitRepository {
    /// Creates a new git repository handle.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Returns the repository path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Checks if the directory is inside a git work tree.
    pub fn is_git_repo(&self) -> bool {
        self.run_git(&["rev-parse", "--is-inside-work-tree"])
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Path of `repo_path` below the work tree top, with a trailing `/`, or
    /// empty at the top itself.
    pub fn prefix(&self) -> Result<String> {
        let output = self.run_git(&["rev-parse", "--show-prefix"])?;
        if !output.status.success() {
            return Err(classify_git_error(&format_git_error(&output), None));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Collects files changed since `base_revision` plus uncommitted changes.
    ///
    /// Without a base revision only the working tree state counts. Uncommitted
    /// changes override the committed verb for the same path. Paths are
    /// relative to `repo_path`, which may sit below the work tree top; changes
    /// outside it are dropped.
    pub fn changed_files(&self, base_revision: Option<&str>) -> Result<ChangedFiles> {
        if !self.is_git_repo() {
            return Err(GitOpsError::GitNotInitialized(self.repo_path.clone()));
        }

        let mut files = ChangedFiles::new();

        if let Some(revision) = base_revision {
            let output =
                self.run_git(&["diff", "--name-status", "--no-renames", revision, "--"])?;
            if !output.status.success() {
                return Err(classify_git_error(&format_git_error(&output), Some(revision)));
            }
            let committed = parse_name_status(&String::from_utf8_lossy(&output.stdout));
            debug!("{} file(s) changed since {}", committed.len(), revision);
            files.merge(committed);
        }

        let output = self.run_git(&["status", "--porcelain", "--untracked-files=all"])?;
        if !output.status.success() {
            return Err(classify_git_error(&format_git_error(&output), None));
        }
        let uncommitted = parse_porcelain(&String::from_utf8_lossy(&output.stdout));
        debug!("{} uncommitted file(s)", uncommitted.len());
        files.merge(uncommitted);

        // git reports paths from the work tree top
        let prefix = self.prefix()?;
        if !prefix.is_empty() {
            debug!("Scoping changes to {}", prefix);
            files = strip_prefix(files, &prefix);
        }

        info!(
            "Collected {} changed file(s) in {}",
            files.len(),
            self.repo_path.display()
        );
        Ok(files)
    }

    fn run_git(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new("git")
            .current_dir(&self.repo_path)
            // Report non-ASCII paths verbatim instead of octal-escaped
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .output()?;
        Ok(output)
    }
}
