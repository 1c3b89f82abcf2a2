//! # lfs-update
//!
//! Brings a repository's LFS integration up to date:
//! - migrates `lfs.<scope>.access` entries (`private` becomes `basic`,
//!   anything else but `basic` is removed)
//! - installs or upgrades the `pre-push` hook without clobbering a hook the
//!   user wrote
//!
//! Both phases always run; every decision lands in one ordered report.

mod error;
mod git_config;
mod migrate;
mod orchestrator;

pub use error::{MigrationAborted, UpdateError};
pub use git_config::GitConfigStore;
pub use migrate::{MigrationAction, MigrationEvent, MigrationReport, migrate, migrate_store};
pub use orchestrator::{UpdateReport, UpdateStatus, Updater};
