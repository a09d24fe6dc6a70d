//! Run context for one invocation: repository conventions plus the
//! environment index.
//!
//! A [`Globe`] is built once (usually by [`Globe::load`]) and then only read.
//! Everything downstream takes it by shared reference.

pub mod env_data;
pub mod loader;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Conventions;

pub use env_data::{ApplicationSpec, EnvironmentData, EnvironmentSpec};

/// A node in the environment hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Identifier used for rendered output, by default the leaf directory name.
    pub id: String,
    /// Repository-relative path, always prefixed by the environment base dir.
    pub path: String,
    /// Application reference to resolved application name.
    found_applications: BTreeMap<String, String>,
}

impl Environment {
    /// Creates an environment whose id is the leaf segment of `path`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let id = path.rsplit('/').next().unwrap_or(path.as_str()).to_string();
        Self {
            id,
            path,
            found_applications: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Records an application instantiation.
    pub fn with_application(
        mut self,
        reference: impl Into<String>,
        resolved_name: impl Into<String>,
    ) -> Self {
        self.found_applications
            .insert(reference.into(), resolved_name.into());
        self
    }

    pub fn found_applications(&self) -> &BTreeMap<String, String> {
        &self.found_applications
    }

    /// Iterates over the distinct resolved application names.
    pub fn application_names(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self.found_applications.values().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        names.into_iter()
    }
}

/// Process-wide run context.
#[derive(Debug, Clone)]
pub struct Globe {
    root_dir: PathBuf,
    conventions: Conventions,
    environments: BTreeMap<String, Environment>,
}

impl Globe {
    /// Creates a globe with an empty environment index.
    pub fn new(root_dir: impl Into<PathBuf>, conventions: Conventions) -> Self {
        Self {
            root_dir: root_dir.into(),
            conventions,
            environments: BTreeMap::new(),
        }
    }

    /// Adds an environment to the index, keyed by its path.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environments
            .insert(environment.path.clone(), environment);
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    pub fn environment_base_dir(&self) -> &str {
        &self.conventions.environment_base_dir
    }

    pub fn environments(&self) -> impl Iterator<Item = &Environment> {
        self.environments.values()
    }

    pub fn environment(&self, path: &str) -> Option<&Environment> {
        self.environments.get(path)
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Directory holding the rendered applications of `environment`.
    pub fn rendered_environment_dir(&self, environment: &Environment) -> PathBuf {
        self.root_dir
            .join(&self.conventions.rendered_dir)
            .join(&self.conventions.rendered_environments_dir)
            .join(&environment.id)
    }

    pub fn prototype_dir(&self, reference: &str) -> PathBuf {
        self.root_dir
            .join(&self.conventions.prototypes_base_dir)
            .join(reference)
    }
}
