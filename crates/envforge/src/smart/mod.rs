//! Smart mode: render only what a change set actually affects.
//!
//! - [`classifier`] recognizes the path shapes of a GitOps repository
//! - [`usage`] maps modified prototypes onto their consumers
//! - [`audit`] finds configured applications missing from rendered output
//! - [`resolver`] combines the above into an [`ImpactSet`]

pub mod audit;
pub mod changes;
pub mod classifier;
pub mod resolver;
pub mod usage;

use std::path::Path;

use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::gitops::GitRepository;
use crate::globe::Globe;

pub use audit::RenderedStateAuditor;
pub use changes::{ChangeVerb, ChangedFiles};
pub use classifier::{ApplicationHit, PathClassifier, PathShape};
pub use resolver::{ChangeImpactResolver, ImpactSet};
pub use usage::{find_prototype_usage, reference_matches, PrototypeUsage};

/// Loads the environment index under `root_dir`, collects changes from git
/// and resolves them.
///
/// With smart mode disabled this returns the full-rebuild signal without
/// touching git or the environment tree.
pub fn run_smart_mode(config: &Config, root_dir: &Path) -> Result<ImpactSet> {
    let base_dir = &config.conventions.environment_base_dir;
    if !config.smart_mode.enabled {
        info!("Smart mode disabled, rendering everything");
        return Ok(ImpactSet::full_rebuild(base_dir));
    }

    let globe = Globe::load(root_dir, config.conventions.clone())?;
    let changes =
        GitRepository::new(root_dir).changed_files(config.smart_mode.base_revision.as_deref())?;

    let impact = ChangeImpactResolver::new(&globe).resolve(&changes);
    if impact.full_rebuild {
        info!("Smart mode: full rebuild of {}", base_dir);
    } else {
        info!(
            "Smart mode: {} environment(s), {} application(s) to render",
            impact.environments.len(),
            impact.applications.len()
        );
    }
    Ok(impact)
}
