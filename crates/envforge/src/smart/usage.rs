//! Maps modified prototypes onto the environments and applications using them.

use std::collections::BTreeSet;

use super::classifier::ApplicationHit;
use crate::globe::Globe;

/// Consumers of a set of prototypes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrototypeUsage {
    pub environments: BTreeSet<String>,
    /// One entry per (environment, resolved application name).
    pub hits: BTreeSet<ApplicationHit>,
}

impl PrototypeUsage {
    /// Distinct resolved application names across all environments.
    pub fn applications(&self) -> BTreeSet<String> {
        self.hits.iter().map(|hit| hit.application.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty() && self.hits.is_empty()
    }
}

/// True if `reference` instantiates `prototype`, either directly or through a
/// group-qualified name such as `group/prototype`.
pub fn reference_matches(reference: &str, prototype: &str) -> bool {
    reference == prototype
        || reference
            .strip_suffix(prototype)
            .is_some_and(|head| head.ends_with('/'))
}

/// Finds every environment and resolved application name that instantiates
/// one of `prototypes`.
pub fn find_prototype_usage(globe: &Globe, prototypes: &BTreeSet<String>) -> PrototypeUsage {
    let mut usage = PrototypeUsage::default();
    if prototypes.is_empty() {
        return usage;
    }

    for environment in globe.environments() {
        for (reference, resolved_name) in environment.found_applications() {
            if prototypes.iter().any(|p| reference_matches(reference, p)) {
                usage.environments.insert(environment.path.clone());
                usage.hits.insert(ApplicationHit {
                    environment: environment.path.clone(),
                    application: resolved_name.clone(),
                });
            }
        }
    }

    usage
}
