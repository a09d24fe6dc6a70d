//! Typed view of an environment data file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentData {
    #[serde(default)]
    pub environment: EnvironmentSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSpec {
    /// Overrides the directory-derived environment id.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub applications: Vec<ApplicationSpec>,
}

/// One application instantiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    /// Prototype reference, optionally group-qualified (`group/app`).
    pub proto: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ApplicationSpec {
    /// The name rendering produces: explicit `name`, else the last reference segment.
    pub fn resolved_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => self.proto.rsplit('/').next().unwrap_or(&self.proto),
        }
    }
}

impl EnvironmentData {
    /// Decodes every `---` document of a data values file and merges them the
    /// way ytt does for these keys: the last `id` wins and `applications`
    /// accumulate in document order.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut merged = Self::default();
        if content.trim().is_empty() {
            return Ok(merged);
        }

        // Data files may carry ytt annotations or unrelated keys; only `environment` is decoded
        for document in serde_yaml::Deserializer::from_str(content) {
            let Some(data) = Option::<Self>::deserialize(document)? else {
                continue;
            };
            if data.environment.id.is_some() {
                merged.environment.id = data.environment.id;
            }
            merged
                .environment
                .applications
                .extend(data.environment.applications);
        }

        Ok(merged)
    }
}
