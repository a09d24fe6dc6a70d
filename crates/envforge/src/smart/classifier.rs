//! Structural matchers for repository paths.
//!
//! Paths are `/`-separated and relative to the repository root. Each matcher
//! looks at whole segments, never substrings, so the recognized shapes are
//! disjoint: a path has at most one [`PathShape`].

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::Conventions;

/// An application directory touched inside an environment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHit {
    /// Owning environment path, prefixed by the environment base dir.
    pub environment: String,
    /// Application name as it appears on disk.
    pub application: String,
}

/// A recognized path shape with its captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathShape {
    /// Root environment data, the common library, or the common ytt library.
    GlobalConfig,
    /// Data file of a single environment.
    EnvironmentData { environment: String },
    /// Any file under a prototype directory.
    Prototype { prototype: String },
    /// Any file under `<environment>/_apps/<application>/`.
    Application(ApplicationHit),
}

type Matcher = fn(&Conventions, &[&str]) -> Option<PathShape>;

/// Matchers tried in order by [`PathClassifier::classify`].
const MATCHERS: &[(&str, Matcher)] = &[
    ("global-config", global_config),
    ("environment-data", environment_data),
    ("prototype", prototype),
    ("application", application),
];

/// Stateless path classifier bound to a set of directory conventions.
#[derive(Debug, Clone, Copy)]
pub struct PathClassifier<'a> {
    conventions: &'a Conventions,
}

impl<'a> PathClassifier<'a> {
    pub fn new(conventions: &'a Conventions) -> Self {
        Self { conventions }
    }

    /// Returns the shape of `path`, or `None` for paths smart mode ignores.
    pub fn classify(&self, path: &str) -> Option<PathShape> {
        let segments = split(path);
        MATCHERS.iter().find_map(|(name, matcher)| {
            let shape = matcher(self.conventions, &segments)?;
            log::trace!("{} matched {}", path, name);
            Some(shape)
        })
    }

    /// True if a change to `path` invalidates every environment.
    pub fn match_global_config(&self, path: &str) -> bool {
        global_config(self.conventions, &split(path)).is_some()
    }

    /// Environment path owning the data file at `path`.
    pub fn match_environment_data(&self, path: &str) -> Option<String> {
        match environment_data(self.conventions, &split(path))? {
            PathShape::EnvironmentData { environment } => Some(environment),
            _ => None,
        }
    }

    /// Prototype identifier owning `path`.
    pub fn match_prototype(&self, path: &str) -> Option<String> {
        match prototype(self.conventions, &split(path))? {
            PathShape::Prototype { prototype } => Some(prototype),
            _ => None,
        }
    }

    /// Environment and application owning `path`.
    pub fn match_application(&self, path: &str) -> Option<ApplicationHit> {
        match application(self.conventions, &split(path))? {
            PathShape::Application(hit) => Some(hit),
            _ => None,
        }
    }

    /// True if any of `paths` is global configuration. False for no paths.
    pub fn any_global_config<'p>(&self, paths: impl IntoIterator<Item = &'p str>) -> bool {
        paths.into_iter().any(|path| self.match_global_config(path))
    }

    /// Distinct prototype identifiers touched by `paths`.
    pub fn prototypes<'p>(&self, paths: impl IntoIterator<Item = &'p str>) -> BTreeSet<String> {
        paths
            .into_iter()
            .filter_map(|path| self.match_prototype(path))
            .collect()
    }
}

fn global_config(c: &Conventions, segments: &[&str]) -> Option<PathShape> {
    let root_data = matches!(segments, [base, file]
        if *base == c.environment_base_dir && c.is_environment_data_file(file));
    let common_lib = matches!(segments, [lib, _, ..] if *lib == c.lib_dir);
    let common_ytt = matches!(segments, [base, common, ytt, _, ..]
        if *base == c.environment_base_dir && *common == c.common_env_dir && *ytt == c.common_ytt_dir);

    (root_data || common_lib || common_ytt).then_some(PathShape::GlobalConfig)
}

fn environment_data(c: &Conventions, segments: &[&str]) -> Option<PathShape> {
    let (file, dirs) = segments.split_last()?;
    let (base, env_segments) = dirs.split_first()?;

    if *base != c.environment_base_dir
        || env_segments.is_empty()
        || !c.is_environment_data_file(file)
        || env_segments.iter().any(|s| c.is_reserved_dir(s))
    {
        return None;
    }

    Some(PathShape::EnvironmentData {
        environment: dirs.join("/"),
    })
}

fn prototype(c: &Conventions, segments: &[&str]) -> Option<PathShape> {
    match segments {
        [base, prototype, _, ..] if *base == c.prototypes_base_dir => Some(PathShape::Prototype {
            prototype: (*prototype).to_string(),
        }),
        _ => None,
    }
}

fn application(c: &Conventions, segments: &[&str]) -> Option<PathShape> {
    if segments.first().copied() != Some(c.environment_base_dir.as_str()) {
        return None;
    }

    let marker = segments
        .iter()
        .skip(1)
        .position(|s| *s == c.applications_dir)?
        + 1;
    let env_segments = &segments[1..marker];
    // The application directory must contain the changed file
    if env_segments.is_empty()
        || segments.len() < marker + 3
        || env_segments.iter().any(|s| c.is_reserved_dir(s))
    {
        return None;
    }

    Some(PathShape::Application(ApplicationHit {
        environment: segments[..marker].join("/"),
        application: segments[marker + 1].to_string(),
    }))
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
