use std::collections::HashSet;
use std::path::Path;

use log::debug;

use crate::config::schema::{Config, Conventions, CONFIG_FILE_NAME};
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    // An empty document deserializes to unit, not to an all-defaults struct
    let config: Config = if content.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(content)?
    };

    validate_config(&config)?;

    Ok(config)
}

/// Loads `<root>/.envforge.yaml`, falling back to defaults when it is absent.
pub fn load_config_or_default<P: AsRef<Path>>(root_dir: P) -> Result<Config, ConfigError> {
    let path = root_dir.as_ref().join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root_dir.as_ref().display());
        return Ok(Config::default());
    }

    load_config(path)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_conventions(&config.conventions)?;

    if let Some(revision) = &config.smart_mode.base_revision {
        if revision.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "smartMode.baseRevision must not be blank".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_conventions(conventions: &Conventions) -> Result<(), ConfigError> {
    let segments = [
        ("environmentBaseDir", &conventions.environment_base_dir),
        ("prototypesBaseDir", &conventions.prototypes_base_dir),
        ("renderedDir", &conventions.rendered_dir),
        ("renderedEnvironmentsDir", &conventions.rendered_environments_dir),
        ("libDir", &conventions.lib_dir),
        ("commonEnvDir", &conventions.common_env_dir),
        ("commonYttDir", &conventions.common_ytt_dir),
        ("applicationsDir", &conventions.applications_dir),
        ("environmentDataFileStem", &conventions.environment_data_file_stem),
        ("helmChartsDirName", &conventions.helm_charts_dir_name),
    ];

    for (name, value) in segments {
        if value.is_empty() {
            return Err(ConfigError::Validation {
                message: format!("{} must not be empty", name),
            });
        }
        if value.contains('/') || value.contains('\\') {
            return Err(ConfigError::Validation {
                message: format!("{} must be a single path segment, got '{}'", name, value),
            });
        }
    }

    // Top-level directories must be distinct or the path shapes would overlap
    let mut top_level = HashSet::new();
    for (name, value) in [
        ("environmentBaseDir", &conventions.environment_base_dir),
        ("prototypesBaseDir", &conventions.prototypes_base_dir),
        ("renderedDir", &conventions.rendered_dir),
        ("libDir", &conventions.lib_dir),
    ] {
        if !top_level.insert(value.as_str()) {
            return Err(ConfigError::Validation {
                message: format!("{} '{}' collides with another top-level directory", name, value),
            });
        }
    }

    for (name, value) in [
        ("commonEnvDir", &conventions.common_env_dir),
        ("applicationsDir", &conventions.applications_dir),
    ] {
        if !conventions.is_reserved_dir(value) {
            return Err(ConfigError::Validation {
                message: format!("{} '{}' must start with '_'", name, value),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.conventions, Conventions::default());
        assert!(config.smart_mode.enabled);
        assert!(config.smart_mode.base_revision.is_none());
    }

    #[test]
    fn test_partial_config() {
        let yaml = r#"
conventions:
  environmentBaseDir: environments
  renderedDir: out
smartMode:
  baseRevision: origin/main
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.conventions.environment_base_dir, "environments");
        assert_eq!(config.conventions.rendered_dir, "out");
        assert_eq!(config.conventions.prototypes_base_dir, "prototypes");
        assert_eq!(
            config.smart_mode.base_revision.as_deref(),
            Some("origin/main")
        );
    }

    #[test]
    fn test_rejects_nested_segment() {
        let yaml = "conventions:\n  libDir: lib/common\n";
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("libDir must be a single path segment"));
    }

    #[test]
    fn test_rejects_colliding_top_level_dirs() {
        let yaml = "conventions:\n  libDir: envs\n";
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("collides"));
    }

    #[test]
    fn test_rejects_unreserved_applications_dir() {
        let yaml = "conventions:\n  applicationsDir: apps\n";
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("must start with '_'"));
    }

    #[test]
    fn test_rejects_blank_base_revision() {
        let yaml = "smartMode:\n  baseRevision: \"  \"\n";
        assert!(load_config_from_str(yaml).is_err());
    }

    #[test]
    fn test_load_config_or_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config_or_default(dir.path()).unwrap();
        assert_eq!(config.conventions, Conventions::default());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "smartMode:\n  enabled: false\n",
        )
        .unwrap();
        let config = load_config_or_default(dir.path()).unwrap();
        assert!(!config.smart_mode.enabled);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/.envforge.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
