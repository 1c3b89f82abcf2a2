use std::path::Path;

use lfs_config::LfsUpdateConfig;
use lfs_update::Updater;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `lfs-update status`.
pub fn run(
    project_root: &Path,
    config: &LfsUpdateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    let (_repo, config_store, hook_store) = super::open_stores(project_root, config)?;
    let status = Updater::new(config_store, hook_store).status()?;
    output(&status, &status.lines(), flags.format)?;
    Ok(true)
}
