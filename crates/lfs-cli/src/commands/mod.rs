pub mod status;
pub mod update;

use std::path::Path;

use lfs_config::LfsUpdateConfig;
use lfs_hooks::{FsHookStore, RepoContext, discover_repo_context};
use lfs_update::GitConfigStore;

use crate::cli::{Commands, GlobalFlags};

/// Run `command`; `Ok(false)` means it completed but reported a failure.
pub fn dispatch(
    command: &Commands,
    project_root: &Path,
    config: &LfsUpdateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    match command {
        Commands::Update(args) => update::run(args, project_root, config, flags),
        Commands::Status => status::run(project_root, config, flags),
    }
}

/// The repository plus the two stores every command works against.
fn open_stores(
    project_root: &Path,
    config: &LfsUpdateConfig,
) -> anyhow::Result<(RepoContext, GitConfigStore, FsHookStore)> {
    let hooks_dir = config.hooks.override_dir().map(Path::to_path_buf);
    let repo = discover_repo_context(project_root, hooks_dir)?;
    let config_store = GitConfigStore::new(&config.git.program, &repo.root);
    let hook_store = FsHookStore::pre_push(&repo);
    Ok((repo, config_store, hook_store))
}
