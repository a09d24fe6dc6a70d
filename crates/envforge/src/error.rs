use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvforgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment index error: {0}")]
    Index(#[from] IndexError),

    #[error("Git error: {0}")]
    GitOps(#[from] crate::gitops::GitOpsError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Environments directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Failed to walk environments directory '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read environment data '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse environment data '{path}': {message}")]
    ParseYaml { path: PathBuf, message: String },

    #[error("Environment path '{path}' is not under '{base}'")]
    OutsideBaseDir { path: String, base: String },
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Logging is already initialized")]
    AlreadyInitialized,

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EnvforgeError>;
