use std::path::Path;

use lfs_config::LfsUpdateConfig;
use lfs_update::Updater;

use crate::cli::{GlobalFlags, UpdateArgs};
use crate::output::output;

/// Handle `lfs-update update`.
pub fn run(
    args: &UpdateArgs,
    project_root: &Path,
    config: &LfsUpdateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    let (repo, config_store, hook_store) = super::open_stores(project_root, config)?;
    tracing::debug!(
        root = %repo.root.display(),
        force = args.force,
        manual = args.manual,
        "running update"
    );

    let report = Updater::new(config_store, hook_store).update(args.force, args.manual)?;
    output(&report, &report.lines, flags.format)?;
    Ok(report.success)
}
