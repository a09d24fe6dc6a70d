use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = ".envforge.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub conventions: Conventions,
    #[serde(default)]
    pub smart_mode: SmartModeConfig,
}

/// Directory and file naming conventions of a GitOps repository.
///
/// All values are single path segments relative to the repository root,
/// except `rendered_environments_dir` which is relative to `rendered_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conventions {
    #[serde(default = "default_environment_base_dir")]
    pub environment_base_dir: String,
    #[serde(default = "default_prototypes_base_dir")]
    pub prototypes_base_dir: String,
    #[serde(default = "default_rendered_dir")]
    pub rendered_dir: String,
    #[serde(default = "default_rendered_environments_dir")]
    pub rendered_environments_dir: String,
    #[serde(default = "default_lib_dir")]
    pub lib_dir: String,
    /// Shared environment defaults directory directly under the base dir.
    #[serde(default = "default_common_env_dir")]
    pub common_env_dir: String,
    /// Common ytt library directory inside `common_env_dir`.
    #[serde(default = "default_common_ytt_dir")]
    pub common_ytt_dir: String,
    /// Marker segment grouping per-environment application overrides.
    #[serde(default = "default_applications_dir")]
    pub applications_dir: String,
    /// Environment data files are named `<stem>.<ext>`, e.g. `env-data.ytt.yaml`.
    #[serde(default = "default_environment_data_file_stem")]
    pub environment_data_file_stem: String,
    /// Not read by change resolution. Kept so configs written for the render
    /// pipeline, which vendors charts into this directory, still load.
    #[serde(default = "default_helm_charts_dir_name")]
    pub helm_charts_dir_name: String,
}

fn default_environment_base_dir() -> String {
    "envs".to_string()
}

fn default_prototypes_base_dir() -> String {
    "prototypes".to_string()
}

fn default_rendered_dir() -> String {
    "rendered".to_string()
}

fn default_rendered_environments_dir() -> String {
    "envs".to_string()
}

fn default_lib_dir() -> String {
    "lib".to_string()
}

fn default_common_env_dir() -> String {
    "_env".to_string()
}

fn default_common_ytt_dir() -> String {
    "ytt".to_string()
}

fn default_applications_dir() -> String {
    "_apps".to_string()
}

fn default_environment_data_file_stem() -> String {
    "env-data".to_string()
}

fn default_helm_charts_dir_name() -> String {
    "charts".to_string()
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            environment_base_dir: default_environment_base_dir(),
            prototypes_base_dir: default_prototypes_base_dir(),
            rendered_dir: default_rendered_dir(),
            rendered_environments_dir: default_rendered_environments_dir(),
            lib_dir: default_lib_dir(),
            common_env_dir: default_common_env_dir(),
            common_ytt_dir: default_common_ytt_dir(),
            applications_dir: default_applications_dir(),
            environment_data_file_stem: default_environment_data_file_stem(),
            helm_charts_dir_name: default_helm_charts_dir_name(),
        }
    }
}

impl Conventions {
    /// Returns true if `file_name` is an environment data file (`<stem>.<ext>`).
    pub fn is_environment_data_file(&self, file_name: &str) -> bool {
        file_name
            .strip_prefix(self.environment_data_file_stem.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .is_some_and(|ext| !ext.is_empty())
    }

    /// Returns true if a directory name is reserved (`_env`, `_apps`, ...).
    pub fn is_reserved_dir(&self, dir_name: &str) -> bool {
        dir_name.starts_with('_')
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartModeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Revision to diff against. Without one only uncommitted changes count.
    #[serde(default)]
    pub base_revision: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for SmartModeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_revision: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_data_file_names() {
        let conventions = Conventions::default();
        assert!(conventions.is_environment_data_file("env-data.ytt.yaml"));
        assert!(conventions.is_environment_data_file("env-data.yaml"));
        assert!(!conventions.is_environment_data_file("env-data."));
        assert!(!conventions.is_environment_data_file("env-data"));
        assert!(!conventions.is_environment_data_file("env-database.yaml"));
        assert!(!conventions.is_environment_data_file("app-data.yaml"));
    }

    #[test]
    fn test_reserved_dirs() {
        let conventions = Conventions::default();
        assert!(conventions.is_reserved_dir("_env"));
        assert!(conventions.is_reserved_dir("_apps"));
        assert!(!conventions.is_reserved_dir("env1"));
    }
}
