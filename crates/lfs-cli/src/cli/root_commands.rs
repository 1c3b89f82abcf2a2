use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Migrate legacy access config and install or upgrade the pre-push hook.
    Update(UpdateArgs),
    /// Show what `update` would change without changing anything.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    /// Overwrite an existing pre-push hook.
    #[arg(short, long, conflicts_with = "manual")]
    pub force: bool,

    /// Print instructions for merging the hook by hand instead of installing it.
    #[arg(short, long)]
    pub manual: bool,
}
