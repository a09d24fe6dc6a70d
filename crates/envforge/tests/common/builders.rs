//! Builder patterns for creating test data.

#![allow(dead_code)]

use envforge::{ChangeVerb, ChangedFiles};

/// Builder for `env-data` file contents.
#[derive(Debug, Clone, Default)]
pub struct EnvDataBuilder {
    id: Option<String>,
    applications: Vec<(String, Option<String>)>,
}

impl EnvDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Application instantiated from `proto` under its default name.
    pub fn app(mut self, proto: &str) -> Self {
        self.applications.push((proto.to_string(), None));
        self
    }

    /// Application instantiated from `proto` under an explicit name.
    pub fn named_app(mut self, proto: &str, name: &str) -> Self {
        self.applications
            .push((proto.to_string(), Some(name.to_string())));
        self
    }

    pub fn to_yaml(&self) -> String {
        let mut out = String::from("#@data/values\n---\nenvironment:\n");
        if let Some(id) = &self.id {
            out.push_str(&format!("  id: {}\n", id));
        }
        if self.applications.is_empty() {
            out.push_str("  applications: []\n");
            return out;
        }
        out.push_str("  applications:\n");
        for (proto, name) in &self.applications {
            out.push_str(&format!("    - proto: {}\n", proto));
            if let Some(name) = name {
                out.push_str(&format!("      name: {}\n", name));
            }
        }
        out
    }
}

/// Builder for a change set.
#[derive(Debug, Default)]
pub struct ChangesBuilder {
    changes: ChangedFiles,
}

impl ChangesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modified(mut self, path: &str) -> Self {
        self.changes.insert(path, ChangeVerb::Modified);
        self
    }

    pub fn added(mut self, path: &str) -> Self {
        self.changes.insert(path, ChangeVerb::Added);
        self
    }

    pub fn deleted(mut self, path: &str) -> Self {
        self.changes.insert(path, ChangeVerb::Deleted);
        self
    }

    pub fn build(self) -> ChangedFiles {
        self.changes
    }
}
