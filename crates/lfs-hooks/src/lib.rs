//! # lfs-hooks
//!
//! Pre-push hook management for lfs-update.
//!
//! - Canonical and legacy hook templates, keyed by release
//! - Classification of whatever currently sits at the hook path
//! - The install decision table and its single atomic write
//! - Repository discovery and hooks directory resolution via `gix`
//!
//! This crate isolates the `gix` dependency from the rest of the workspace.

mod error;
mod fs_store;
mod inspector;
mod installer;
mod repo;
mod template;

pub use error::HookError;
pub use fs_store::FsHookStore;
pub use inspector::{HookClassification, classify};
pub use installer::{
    InstallDecision, InstallMode, InstallOutcome, REFUSAL_REASON, REMEDIATION_HINTS, apply,
    decide, reconcile,
};
pub use repo::{RepoContext, discover_repo_context};
pub use template::{HookTemplate, HookTemplates, PRE_PUSH_HOOK};
