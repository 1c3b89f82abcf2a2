use lfs_core::StoreError;
use lfs_hooks::HookError;
use thiserror::Error;

use crate::migrate::{MigrationAction, MigrationReport};

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("You cannot use --force and --manual options together")]
    ConflictingFlags,

    #[error("failed to list repository configuration: {0}")]
    ConfigListFailed(#[source] StoreError),

    #[error("failed to {action} {scope} access (was: {value}): {source}")]
    ConfigMutationFailed {
        key: String,
        scope: String,
        value: String,
        action: MigrationAction,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Hook(#[from] HookError),
}

/// A migration run that stopped at a failed mutation.
///
/// Mutations applied before the failure stay applied.
#[derive(Debug, Error)]
#[error("config migration stopped after {} change(s)", .applied.events.len())]
pub struct MigrationAborted {
    pub applied: MigrationReport,
    #[source]
    pub error: UpdateError,
}
