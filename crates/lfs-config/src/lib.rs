//! # lfs-config
//!
//! Layered settings loading for lfs-update using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LFS_UPDATE_*` prefix, `__` as separator)
//! 2. Project-level `.lfs-update.toml`
//! 3. User-level `~/.config/lfs-update/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LFS_UPDATE_GIT__PROGRAM` -> `git.program` and
//! `LFS_UPDATE_HOOKS__DIR` -> `hooks.dir`.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use lfs_config::LfsUpdateConfig;
//!
//! let config = LfsUpdateConfig::load(Path::new(".")).expect("config");
//! println!("git program: {}", config.git.program);
//! ```

mod error;
mod git;
mod hooks;

pub use error::ConfigError;
pub use git::GitConfig;
pub use hooks::HooksConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-local settings file.
pub const PROJECT_CONFIG_FILE: &str = ".lfs-update.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LfsUpdateConfig {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub hooks: HooksConfig,
}

impl LfsUpdateConfig {
    /// Load configuration from all sources for the project at `project_root`.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LFS_UPDATE_").split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.git.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "git.program".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lfs-update").join("config.toml"))
    }
}
