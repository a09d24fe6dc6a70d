//! Reconciles configured applications against previously rendered output.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;

use log::{debug, warn};

use crate::globe::{Environment, Globe};

pub struct RenderedStateAuditor<'a> {
    globe: &'a Globe,
}

impl<'a> RenderedStateAuditor<'a> {
    pub fn new(globe: &'a Globe) -> Self {
        Self { globe }
    }

    /// Names of the application directories rendered for `environment`.
    ///
    /// A missing rendered directory means nothing was rendered yet. Other
    /// listing failures are logged and also read as nothing rendered.
    pub fn rendered_applications(&self, environment: &Environment) -> BTreeSet<String> {
        let dir = self.globe.rendered_environment_dir(environment);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeSet::new(),
            Err(e) => {
                warn!("Failed to list rendered output {}: {}", dir.display(), e);
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            // Follows symlinks so linked application dirs count as rendered
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Configured application names missing from rendered output, over every
    /// environment whose path is not in `skip`.
    pub fn missing_applications(&self, skip: &BTreeSet<String>) -> BTreeSet<String> {
        let mut missing = BTreeSet::new();

        for environment in self.globe.environments() {
            if skip.contains(&environment.path) {
                continue;
            }

            let rendered = self.rendered_applications(environment);
            for name in environment.application_names() {
                if !rendered.contains(name) {
                    debug!("{} is not rendered for {}", name, environment.path);
                    missing.insert(name.to_string());
                }
            }
        }

        missing
    }
}
