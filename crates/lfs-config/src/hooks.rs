//! Hook location settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HooksConfig {
    /// Hooks directory override. Relative paths resolve against the
    /// repository's work tree root, like `core.hooksPath`. When unset, the
    /// directory comes from `core.hooksPath` or the common git dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl HooksConfig {
    /// The configured override, if any. Relative paths are returned as
    /// written; repository discovery anchors them to the work tree root.
    #[must_use]
    pub fn override_dir(&self) -> Option<&Path> {
        self.dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}
