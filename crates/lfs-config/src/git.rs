//! Git subprocess settings.

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "git".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitConfig {
    /// Program used for `git config` reads and writes.
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}
