use std::path::{Path, PathBuf};

use crate::error::HookError;

#[derive(Debug, Clone)]
pub struct RepoContext {
    pub root: PathBuf,
    pub hooks_dir: PathBuf,
    pub core_hooks_path: Option<String>,
}

/// Discover the repository containing `project_root` and resolve its hooks
/// directory.
///
/// Precedence: `hooks_dir_override`, then `core.hooksPath`, then the hooks
/// directory of the common git dir, which linked worktrees share with the
/// main checkout. Relative directories resolve against the work tree root.
pub fn discover_repo_context(
    project_root: &Path,
    hooks_dir_override: Option<PathBuf>,
) -> Result<RepoContext, HookError> {
    let repo = gix::discover(project_root)
        .map_err(|_| HookError::NotGitRepo(project_root.to_path_buf()))?;
    let repo_root = repo
        .work_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_root.to_path_buf());

    let core_hooks_path = repo
        .config_snapshot()
        .string("core.hooksPath")
        .map(|v| v.to_string());

    let hooks_dir = match (hooks_dir_override, core_hooks_path.as_deref()) {
        (Some(dir), _) => resolve_against(&repo_root, dir),
        (None, Some(path)) if !path.trim().is_empty() => {
            resolve_against(&repo_root, PathBuf::from(path))
        }
        _ => repo.common_dir().join("hooks"),
    };

    tracing::debug!(
        root = %repo_root.display(),
        hooks_dir = %hooks_dir.display(),
        "discovered repository"
    );

    Ok(RepoContext {
        root: repo_root,
        hooks_dir,
        core_hooks_path,
    })
}

fn resolve_against(root: &Path, dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        dir
    } else {
        root.join(dir)
    }
}
