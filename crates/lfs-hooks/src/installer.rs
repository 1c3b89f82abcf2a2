use lfs_core::HookStore;
use serde::Serialize;

use crate::error::HookError;
use crate::inspector::{HookClassification, classify};
use crate::template::HookTemplates;

pub const REFUSAL_REASON: &str =
    "existing hook not recognized; use --force to overwrite or --manual for merge instructions";

pub const REMEDIATION_HINTS: [&str; 2] = [
    "run `git lfs update --manual` for instructions on how to merge hooks.",
    "run `git lfs update --force` to overwrite your hook.",
];

/// How the operator asked for the hook to be handled.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InstallMode {
    #[default]
    Default,
    /// Overwrite whatever is there.
    Force,
    /// Touch nothing; print the hook for the operator to merge by hand.
    Manual,
}

impl InstallMode {
    /// `None` when both flags are set; the caller reports that as an error.
    #[must_use]
    pub const fn from_flags(force: bool, manual: bool) -> Option<Self> {
        match (force, manual) {
            (true, true) => None,
            (true, false) => Some(Self::Force),
            (false, true) => Some(Self::Manual),
            (false, false) => Some(Self::Default),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallDecision {
    Write {
        contents: Vec<u8>,
        replaces_existing: bool,
    },
    /// Replace a hook an earlier release installed.
    Merge {
        contents: Vec<u8>,
        template_version: Option<&'static str>,
    },
    Refuse {
        classification: &'static str,
        reason: String,
    },
    PrintInstructions { hook: String },
}

/// What applying a decision did.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InstallOutcome {
    Installed { location: String },
    Updated { location: String },
    Upgraded {
        location: String,
        template_version: Option<String>,
    },
    Instructions { text: String },
}

impl InstallOutcome {
    /// Report lines for this outcome.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Installed { .. } => vec!["Installed pre-push hook.".to_string()],
            Self::Updated { .. } => vec!["Updated pre-push hook.".to_string()],
            Self::Upgraded {
                template_version: Some(version),
                ..
            } => vec![format!("Upgraded pre-push hook from git-lfs {version}.")],
            Self::Upgraded {
                template_version: None,
                ..
            } => vec!["Updated pre-push hook.".to_string()],
            Self::Instructions { text } => text.lines().map(ToString::to_string).collect(),
        }
    }
}

/// The decision table.
#[must_use]
pub fn decide(
    classification: &HookClassification,
    mode: InstallMode,
    templates: &HookTemplates,
) -> InstallDecision {
    let canonical = templates.canonical();
    if mode == InstallMode::Manual {
        return InstallDecision::PrintInstructions {
            hook: canonical.body.to_string(),
        };
    }

    match classification {
        HookClassification::Absent => InstallDecision::Write {
            contents: canonical.contents(),
            replaces_existing: false,
        },
        HookClassification::Canonical => InstallDecision::Write {
            contents: canonical.contents(),
            replaces_existing: true,
        },
        HookClassification::ForeignMergeable {
            template_version, ..
        } => InstallDecision::Merge {
            contents: canonical.contents(),
            template_version: *template_version,
        },
        HookClassification::ForeignUnmergeable { .. } => match mode {
            InstallMode::Force => InstallDecision::Write {
                contents: canonical.contents(),
                replaces_existing: true,
            },
            InstallMode::Default | InstallMode::Manual => InstallDecision::Refuse {
                classification: classification.kind(),
                reason: REFUSAL_REASON.to_string(),
            },
        },
    }
}

/// Carry out `decision` against `store`. Only `Write` and `Merge` touch it.
pub fn apply<S: HookStore + ?Sized>(
    decision: InstallDecision,
    store: &mut S,
) -> Result<InstallOutcome, HookError> {
    let location = store.location();
    match decision {
        InstallDecision::Write {
            contents,
            replaces_existing,
        } => {
            write_hook(store, &location, &contents)?;
            if replaces_existing {
                Ok(InstallOutcome::Updated { location })
            } else {
                Ok(InstallOutcome::Installed { location })
            }
        }
        InstallDecision::Merge {
            contents,
            template_version,
        } => {
            write_hook(store, &location, &contents)?;
            Ok(InstallOutcome::Upgraded {
                location,
                template_version: template_version.map(ToString::to_string),
            })
        }
        InstallDecision::Refuse {
            classification,
            reason,
        } => {
            tracing::warn!(%location, classification, "refusing to overwrite pre-push hook");
            Err(HookError::Refused {
                location,
                classification,
                reason,
                hints: REMEDIATION_HINTS.iter().map(ToString::to_string).collect(),
            })
        }
        InstallDecision::PrintInstructions { hook } => Ok(InstallOutcome::Instructions {
            text: install_steps(&location, &hook),
        }),
    }
}

/// Read, classify, decide, apply.
pub fn reconcile<S: HookStore + ?Sized>(
    store: &mut S,
    templates: &HookTemplates,
    mode: InstallMode,
) -> Result<InstallOutcome, HookError> {
    let existing = store.read().map_err(|source| HookError::ReadFailed {
        location: store.location(),
        source,
    })?;
    let classification = classify(existing.as_deref(), templates);
    tracing::debug!(
        classification = classification.kind(),
        ?mode,
        "classified pre-push hook"
    );
    let decision = decide(&classification, mode, templates);
    apply(decision, store)
}

fn write_hook<S: HookStore + ?Sized>(
    store: &mut S,
    location: &str,
    contents: &[u8],
) -> Result<(), HookError> {
    store
        .write(contents)
        .map_err(|source| HookError::WriteFailed {
            location: location.to_string(),
            source,
        })?;
    tracing::info!(%location, bytes = contents.len(), "wrote pre-push hook");
    Ok(())
}

fn install_steps(location: &str, hook: &str) -> String {
    let mut text = format!("Add the following to {location}:\n\n");
    for line in hook.lines() {
        text.push_str("    ");
        text.push_str(line);
        text.push('\n');
    }
    text.push_str(
        "\nIf the hook already has content, keep your own commands and append the lines\n\
         above without repeating the `#!/bin/sh` line. Make sure the file is executable.\n",
    );
    text
}
