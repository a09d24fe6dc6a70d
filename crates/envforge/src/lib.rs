pub mod config;
pub mod error;
pub mod gitops;
pub mod globe;
pub mod logging;
pub mod smart;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, Config, Conventions, SmartModeConfig,
};
pub use error::{ConfigError, EnvforgeError, IndexError, LoggingError, Result};
pub use gitops::{GitOpsError, GitRepository};
pub use globe::{Environment, Globe};
pub use logging::{init_logging, LogFormat};
pub use smart::{
    run_smart_mode, ChangeImpactResolver, ChangeVerb, ChangedFiles, ImpactSet, PathClassifier,
};
