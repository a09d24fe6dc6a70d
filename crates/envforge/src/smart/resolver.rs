//! Change-impact resolution: which environments and applications must be
//! re-rendered for a set of changed files.

use std::collections::BTreeSet;

use log::{debug, info};
use serde::Serialize;

use super::audit::RenderedStateAuditor;
use super::changes::ChangedFiles;
use super::classifier::{ApplicationHit, PathClassifier};
use super::usage::find_prototype_usage;
use crate::globe::Globe;

/// What the render pipeline has to do.
///
/// When `full_rebuild` is set, `environments` holds only the environment base
/// dir and `applications` is empty: render everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSet {
    pub full_rebuild: bool,
    pub environments: BTreeSet<String>,
    pub applications: BTreeSet<String>,
}

impl ImpactSet {
    pub fn full_rebuild(environment_base_dir: &str) -> Self {
        Self {
            full_rebuild: true,
            environments: BTreeSet::from([environment_base_dir.to_string()]),
            applications: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty() && self.applications.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Stateless resolver over an environment index.
pub struct ChangeImpactResolver<'a> {
    globe: &'a Globe,
    classifier: PathClassifier<'a>,
}

impl<'a> ChangeImpactResolver<'a> {
    pub fn new(globe: &'a Globe) -> Self {
        Self {
            globe,
            classifier: PathClassifier::new(globe.conventions()),
        }
    }

    /// Resolves `changes` into affected environments and applications,
    /// including applications missing from rendered output.
    pub fn resolve(&self, changes: &ChangedFiles) -> ImpactSet {
        let mut impact = self.resolve_changes(changes);
        if impact.full_rebuild {
            return impact;
        }

        let missing = RenderedStateAuditor::new(self.globe).missing_applications(&impact.environments);
        if !missing.is_empty() {
            info!("{} application(s) missing from rendered output", missing.len());
        }
        // Only the names surface; their environments stay out of the environment set
        impact.applications.extend(missing);

        debug!(
            "Smart mode selected {} environment(s) and {} application(s)",
            impact.environments.len(),
            impact.applications.len()
        );
        impact
    }

    /// The change-driven part of [`resolve`](Self::resolve), without the
    /// rendered-state audit.
    pub fn resolve_changes(&self, changes: &ChangedFiles) -> ImpactSet {
        let deleted_envs: BTreeSet<String> = changes
            .iter()
            .filter(|(_, verb)| verb.is_deleted())
            .filter_map(|(path, _)| self.classifier.match_environment_data(path))
            .collect();

        if let Some(path) = changes.paths().find(|p| self.classifier.match_global_config(p)) {
            info!("Global configuration changed ({}), rendering everything", path);
            return ImpactSet::full_rebuild(self.globe.environment_base_dir());
        }

        let full_envs: BTreeSet<String> = changes
            .iter()
            .filter(|(_, verb)| !verb.is_deleted())
            .filter_map(|(path, _)| self.classifier.match_environment_data(path))
            .filter(|env| !deleted_envs.contains(env))
            .collect();

        let prototypes = self.classifier.prototypes(changes.paths());
        let usage = find_prototype_usage(self.globe, &prototypes);

        let app_hits: BTreeSet<ApplicationHit> = changes
            .paths()
            .filter_map(|path| self.classifier.match_application(path))
            .filter(|hit| !deleted_envs.contains(&hit.environment))
            .collect();

        let environments: BTreeSet<String> = full_envs
            .iter()
            .chain(&usage.environments)
            .chain(app_hits.iter().map(|hit| &hit.environment))
            .filter(|env| !deleted_envs.contains(*env))
            .cloned()
            .collect();

        // A full environment render already covers its applications
        let applications: BTreeSet<String> = usage
            .hits
            .iter()
            .chain(&app_hits)
            .filter(|hit| !full_envs.contains(&hit.environment) && !deleted_envs.contains(&hit.environment))
            .map(|hit| hit.application.clone())
            .collect();

        debug!(
            "Changes: {} deleted, {} full, {} prototype(s), {} application hit(s)",
            deleted_envs.len(),
            full_envs.len(),
            prototypes.len(),
            app_hits.len()
        );

        ImpactSet {
            full_rebuild: false,
            environments,
            applications,
        }
    }
}
