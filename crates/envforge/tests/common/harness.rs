//! Test repository for isolated test execution.
//!
//! `TestRepo` lays out a GitOps repository in a temporary directory:
//! environment data files, prototypes, per-environment application overrides
//! and previously rendered output. It can also turn the tree into a git
//! repository for end-to-end smart mode runs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use envforge::config::Conventions;
use envforge::Globe;

use super::builders::EnvDataBuilder;

/// Temporary GitOps repository.
pub struct TestRepo {
    temp_dir: TempDir,
    root: PathBuf,
    conventions: Conventions,
}

impl TestRepo {
    /// Create an empty repository with default conventions and an empty
    /// environments directory.
    pub fn new() -> Self {
        Self::with_conventions(Conventions::default())
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self::build(None, conventions)
    }

    /// Create a repository whose GitOps root is `subdir` below the work tree top.
    pub fn in_subdirectory(subdir: &str) -> Self {
        Self::build(Some(subdir), Conventions::default())
    }

    fn build(subdir: Option<&str>, conventions: Conventions) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = match subdir {
            Some(subdir) => temp_dir.path().join(subdir),
            None => temp_dir.path().to_path_buf(),
        };
        std::fs::create_dir_all(root.join(&conventions.environment_base_dir))
            .expect("Failed to create environments dir");
        Self {
            temp_dir,
            root,
            conventions,
        }
    }

    /// GitOps root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top of the git work tree, the GitOps root or one of its ancestors.
    pub fn top(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Write a file at a repository-relative path, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().expect("path has a parent"))
            .expect("Failed to create parent dir");
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write `<env_path>/env-data.ytt.yaml`.
    pub fn write_environment(&self, env_path: &str, data: EnvDataBuilder) -> PathBuf {
        self.write(&format!("{}/env-data.ytt.yaml", env_path), &data.to_yaml())
    }

    /// Create a prototype directory with a data file.
    pub fn write_prototype(&self, name: &str) -> PathBuf {
        self.write(
            &format!("{}/{}/app-data.ytt.yaml", self.conventions.prototypes_base_dir, name),
            "app: {}\n",
        )
    }

    /// Mark an application as rendered for the environment with `env_id`.
    pub fn render(&self, env_id: &str, app: &str) -> PathBuf {
        let dir = self
            .root()
            .join(&self.conventions.rendered_dir)
            .join(&self.conventions.rendered_environments_dir)
            .join(env_id)
            .join(app);
        std::fs::create_dir_all(&dir).expect("Failed to create rendered dir");
        std::fs::write(dir.join("manifest.yaml"), "kind: ConfigMap\n")
            .expect("Failed to write rendered manifest");
        dir
    }

    /// Build the environment index from disk.
    pub fn load_globe(&self) -> Globe {
        Globe::load(self.root(), self.conventions.clone()).expect("Failed to load globe")
    }

    /// Whether a usable git binary is on PATH.
    pub fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Run git at the work tree top, panicking on failure.
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .current_dir(self.top())
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Initialize git and commit everything written so far under `tag`.
    pub fn commit_baseline(&self, tag: &str) {
        self.git(&["init", "--quiet"]);
        self.git(&["config", "user.email", "test@example.com"]);
        self.git(&["config", "user.name", "Test"]);
        self.git(&["config", "commit.gpgsign", "false"]);
        self.git(&["add", "."]);
        self.git(&["commit", "--quiet", "-m", "baseline"]);
        self.git(&["tag", tag]);
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
