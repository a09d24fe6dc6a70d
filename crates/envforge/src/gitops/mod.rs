//! Git integration for smart mode.
//!
//! Turns the difference between a baseline revision and the working tree
//! into [`ChangedFiles`](crate::smart::ChangedFiles):
//! - committed changes via `git diff --name-status`
//! - uncommitted and untracked files via `git status --porcelain`

pub mod error;
pub mod git;

pub use error::{GitOpsError, Result};
pub use git::GitRepository;
