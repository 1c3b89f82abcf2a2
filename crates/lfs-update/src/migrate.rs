//! `lfs.<scope>.access` migration.

use std::collections::HashMap;
use std::fmt;

use lfs_core::{AccessLevel, ConfigEntry, ConfigKey, ConfigStore, StoreError};
use serde::Serialize;

use crate::error::{MigrationAborted, UpdateError};

/// The single mutation a legacy access entry needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationAction {
    /// Set the key to the canonical level.
    SetBasic,
    /// Remove the key and all of its values.
    Remove,
}

impl fmt::Display for MigrationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetBasic => f.write_str("update"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MigrationEvent {
    Updated {
        scope: String,
        key: String,
        from: String,
        to: String,
    },
    Removed {
        scope: String,
        key: String,
        value: String,
    },
}

impl MigrationEvent {
    #[must_use]
    pub fn line(&self) -> String {
        match self {
            Self::Updated {
                scope, from, to, ..
            } => format!("Updated {scope} access from {from} to {to}."),
            Self::Removed { scope, value, .. } => {
                format!("Removed invalid {scope} access of {value}.")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Access keys looked at, after collapsing duplicates.
    pub examined: usize,
    pub events: Vec<MigrationEvent>,
}

impl MigrationReport {
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(MigrationEvent::line).collect()
    }
}

/// Migrate every `lfs.<scope>.access` entry in `entries`.
///
/// Each key is handled once, at its first position, using its last value
/// (git's effective value for multi-valued keys). `mutate` is applied
/// immediately per key; the first failure stops the run and the returned
/// error carries the events already applied.
pub fn migrate<F>(
    entries: &[ConfigEntry],
    mut mutate: F,
) -> Result<MigrationReport, MigrationAborted>
where
    F: FnMut(&ConfigKey, MigrationAction) -> Result<(), StoreError>,
{
    let mut report = MigrationReport::default();

    for entry in effective_access_entries(entries) {
        let Some(scope) = entry.access_scope() else {
            continue;
        };
        report.examined += 1;

        let level = AccessLevel::parse(&entry.value);
        let (action, event) = match level {
            AccessLevel::Basic => continue,
            AccessLevel::Private => (
                MigrationAction::SetBasic,
                MigrationEvent::Updated {
                    scope: scope.to_string(),
                    key: entry.key.to_string(),
                    from: entry.value.clone(),
                    to: AccessLevel::CANONICAL.to_string(),
                },
            ),
            AccessLevel::Other(_) => (
                MigrationAction::Remove,
                MigrationEvent::Removed {
                    scope: scope.to_string(),
                    key: entry.key.to_string(),
                    value: entry.value.clone(),
                },
            ),
        };

        if let Err(source) = mutate(&entry.key, action) {
            tracing::warn!(key = %entry.key, %action, %source, "config migration failed");
            return Err(MigrationAborted {
                applied: report,
                error: UpdateError::ConfigMutationFailed {
                    key: entry.key.to_string(),
                    scope: scope.to_string(),
                    value: entry.value.clone(),
                    action,
                    source,
                },
            });
        }

        tracing::info!(key = %entry.key, %action, "migrated access entry");
        report.events.push(event);
    }

    Ok(report)
}

/// List `store` and migrate it in place.
pub fn migrate_store<S: ConfigStore + ?Sized>(
    store: &mut S,
) -> Result<MigrationReport, MigrationAborted> {
    let entries = store.list().map_err(|source| MigrationAborted {
        applied: MigrationReport::default(),
        error: UpdateError::ConfigListFailed(source),
    })?;

    migrate(&entries, |key, action| match action {
        MigrationAction::SetBasic => store.set(key, AccessLevel::CANONICAL),
        MigrationAction::Remove => store.unset(key),
    })
}

fn effective_access_entries(entries: &[ConfigEntry]) -> Vec<ConfigEntry> {
    let mut collapsed: Vec<ConfigEntry> = Vec::new();
    let mut positions: HashMap<&ConfigKey, usize> = HashMap::new();

    for entry in entries.iter().filter(|entry| entry.access_scope().is_some()) {
        match positions.get(&entry.key) {
            Some(&index) => collapsed[index].value.clone_from(&entry.value),
            None => {
                positions.insert(&entry.key, collapsed.len());
                collapsed.push(entry.clone());
            }
        }
    }

    collapsed
}
