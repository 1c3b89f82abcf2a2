use std::path::PathBuf;

use lfs_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("not a git repository: {0}")]
    NotGitRepo(PathBuf),
    #[error("failed to read hook at '{location}': {source}")]
    ReadFailed {
        location: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to write hook at '{location}': {source}")]
    WriteFailed {
        location: String,
        #[source]
        source: StoreError,
    },
    #[error("hook conflict at '{location}': {reason}")]
    Refused {
        location: String,
        classification: &'static str,
        reason: String,
        hints: Vec<String>,
    },
}
