//! Collaborator error types.
//!
//! Errors raised by the configuration store and the hook file store. The
//! component crates wrap these with the context an operator needs (scope,
//! prior value, hook path).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A git subprocess exited unsuccessfully.
    #[error("`{command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    /// The store refused the mutation because it is held by someone else.
    #[error("configuration store is locked while changing '{0}'")]
    Locked(String),

    /// The key's raw bytes cannot be passed to the store on this platform.
    #[error("configuration key '{0}' cannot be addressed exactly")]
    UnaddressableKey(String),

    #[error("not a git repository: {0}")]
    NotGitRepo(PathBuf),
}
