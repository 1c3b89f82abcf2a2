use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lfs_core::{HookStore, StoreError};

use crate::repo::RepoContext;
use crate::template::PRE_PUSH_HOOK;

/// A hook file inside a hooks directory on disk.
#[derive(Clone, Debug)]
pub struct FsHookStore {
    hooks_dir: PathBuf,
    path: PathBuf,
    display_root: Option<PathBuf>,
}

impl FsHookStore {
    #[must_use]
    pub fn new(hooks_dir: impl Into<PathBuf>, hook_name: &str) -> Self {
        let hooks_dir = hooks_dir.into();
        let path = hooks_dir.join(hook_name);
        Self {
            hooks_dir,
            path,
            display_root: None,
        }
    }

    /// The `pre-push` hook of `repo`, displayed relative to its root.
    #[must_use]
    pub fn pre_push(repo: &RepoContext) -> Self {
        Self::new(&repo.hooks_dir, PRE_PUSH_HOOK).with_display_root(&repo.root)
    }

    /// Show locations relative to `root` when the hook lives under it.
    #[must_use]
    pub fn with_display_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.display_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HookStore for FsHookStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Stage the bytes in a sibling temp file, set the mode, then rename over
    /// the hook so readers see old content or new content with its final
    /// permissions.
    fn write(&mut self, contents: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.hooks_dir)?;
        let mut temp = tempfile::Builder::new()
            .prefix(".pre-push.")
            .tempfile_in(&self.hooks_dir)?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o755))?;
        }
        temp.persist(&self.path)
            .map_err(|error| StoreError::Io(error.error))?;
        Ok(())
    }

    fn location(&self) -> String {
        let shown = self
            .display_root
            .as_deref()
            .and_then(|root| self.path.strip_prefix(root).ok())
            .unwrap_or(&self.path);
        shown.display().to_string()
    }
}
