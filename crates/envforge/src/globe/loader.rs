//! Builds the environment index by walking the environments tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use super::env_data::EnvironmentData;
use super::{Environment, Globe};
use crate::config::Conventions;
use crate::error::IndexError;

impl Globe {
    /// Walks `<root>/<environment base dir>` and indexes every directory that
    /// holds an environment data file.
    ///
    /// The base dir itself is not an environment: its data file is global
    /// configuration. Reserved `_`-prefixed directories are not descended into.
    pub fn load(root_dir: impl Into<PathBuf>, conventions: Conventions) -> Result<Globe, IndexError> {
        let root_dir = root_dir.into();
        let base_dir = root_dir.join(&conventions.environment_base_dir);
        if !base_dir.is_dir() {
            return Err(IndexError::RootNotFound(base_dir));
        }

        let data_files = collect_environment_data_files(&root_dir, &base_dir, &conventions)?;

        let mut globe = Globe::new(root_dir, conventions);
        for (env_path, files) in data_files {
            let environment = globe.build_environment(&env_path, &files)?;
            debug!(
                "Indexed environment {} with {} application(s)",
                environment.path,
                environment.found_applications().len()
            );
            globe = globe.with_environment(environment);
        }

        info!(
            "Indexed {} environment(s) under {}",
            globe.len(),
            globe.environment_base_dir()
        );
        Ok(globe)
    }

    fn build_environment(&self, env_path: &str, files: &[PathBuf]) -> Result<Environment, IndexError> {
        if files.len() > 1 {
            warn!(
                "Environment {} has {} data files, merging them in name order",
                env_path,
                files.len()
            );
        }

        let mut environment = Environment::new(env_path);
        for file in files {
            let content = fs::read_to_string(file).map_err(|e| IndexError::ReadFile {
                path: file.clone(),
                source: e,
            })?;
            let data = EnvironmentData::from_yaml(&content).map_err(|e| IndexError::ParseYaml {
                path: file.clone(),
                message: e.to_string(),
            })?;

            if let Some(id) = data.environment.id.filter(|id| !id.is_empty()) {
                environment = environment.with_id(id);
            }

            for spec in &data.environment.applications {
                if environment.found_applications().contains_key(&spec.proto) {
                    warn!(
                        "Environment {} instantiates {} more than once, keeping the last one",
                        env_path, spec.proto
                    );
                }
                if !self.prototype_dir(&spec.proto).is_dir() {
                    warn!(
                        "Environment {} references unknown prototype {}",
                        env_path, spec.proto
                    );
                }
                environment = environment.with_application(spec.proto.clone(), spec.resolved_name());
            }
        }

        Ok(environment)
    }
}

/// Groups environment data files by the repository-relative path of their directory.
fn collect_environment_data_files(
    root_dir: &Path,
    base_dir: &Path,
    conventions: &Conventions,
) -> Result<BTreeMap<String, Vec<PathBuf>>, IndexError> {
    let mut found: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    let walker = WalkDir::new(base_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !conventions.is_reserved_dir(&entry.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = entry.map_err(|e| IndexError::Walk {
            path: base_dir.to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() || entry.depth() < 2 {
            continue;
        }
        if !conventions.is_environment_data_file(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let env_path = to_repo_path(root_dir, dir, conventions)?;
        found.entry(env_path).or_default().push(entry.path().to_path_buf());
    }

    Ok(found)
}

/// Converts an absolute directory into a `/`-separated repository path.
fn to_repo_path(root_dir: &Path, dir: &Path, conventions: &Conventions) -> Result<String, IndexError> {
    let relative = dir.strip_prefix(root_dir).unwrap_or(dir);
    let path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let base = &conventions.environment_base_dir;
    if !path.starts_with(&format!("{}/", base)) {
        return Err(IndexError::OutsideBaseDir {
            path,
            base: base.clone(),
        });
    }
    Ok(path)
}
