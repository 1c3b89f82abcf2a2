use lfs_core::{ConfigStore, HookStore};
use lfs_hooks::{
    HookClassification, HookError, HookTemplates, InstallMode, InstallOutcome, classify, reconcile,
};
use serde::Serialize;

use crate::error::UpdateError;
use crate::migrate::{MigrationEvent, migrate, migrate_store};

/// Everything one `update` run decided, in order.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub success: bool,
    pub mode: InstallMode,
    pub lines: Vec<String>,
    pub migrations: Vec<MigrationEvent>,
    pub hook: Option<InstallOutcome>,
    pub errors: Vec<String>,
}

impl UpdateReport {
    fn new(mode: InstallMode) -> Self {
        Self {
            success: true,
            mode,
            lines: Vec::new(),
            migrations: Vec::new(),
            hook: None,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, error: &UpdateError) {
        self.success = false;
        self.errors.push(error.to_string());
    }
}

/// What `update` would change, computed without mutating anything.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatus {
    pub hook_location: String,
    pub hook_classification: &'static str,
    pub legacy_template_version: Option<&'static str>,
    pub pending_migrations: Vec<MigrationEvent>,
}

impl UpdateStatus {
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "pre-push hook at {}: {}",
            self.hook_location, self.hook_classification
        )];
        if let Some(version) = self.legacy_template_version {
            lines.push(format!("installed by git-lfs {version}"));
        }
        if self.pending_migrations.is_empty() {
            lines.push("no access entries need migration".to_string());
        } else {
            lines.extend(
                self.pending_migrations
                    .iter()
                    .map(|event| format!("pending: {}", event.line())),
            );
        }
        lines
    }
}

/// Runs config migration, then hook reconciliation, against explicit stores.
///
/// Pass `&mut store` to keep ownership of a store and inspect it afterwards.
pub struct Updater<C, H> {
    config: C,
    hook: H,
    templates: HookTemplates,
}

impl<C: ConfigStore, H: HookStore> Updater<C, H> {
    pub fn new(config: C, hook: H) -> Self {
        Self {
            config,
            hook,
            templates: HookTemplates::pre_push(),
        }
    }

    #[must_use]
    pub fn with_templates(mut self, templates: HookTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Run both phases.
    ///
    /// Only `ConflictingFlags` is returned as an error, before anything is
    /// read or written. Every other failure is recorded in the report and
    /// clears `success`; a failed migration does not skip the hook phase.
    pub fn update(&mut self, force: bool, manual: bool) -> Result<UpdateReport, UpdateError> {
        let mode = InstallMode::from_flags(force, manual).ok_or(UpdateError::ConflictingFlags)?;
        let mut report = UpdateReport::new(mode);

        self.migrate_config(&mut report);
        self.reconcile_hook(mode, &mut report);

        tracing::debug!(success = report.success, lines = report.lines.len(), "update finished");
        Ok(report)
    }

    /// Classify the hook and preview migrations; reads only.
    pub fn status(&self) -> Result<UpdateStatus, UpdateError> {
        let entries = self.config.list().map_err(UpdateError::ConfigListFailed)?;
        let pending = migrate(&entries, |_, _| Ok(())).map_err(|aborted| aborted.error)?;

        let hook_location = self.hook.location();
        let existing = self.hook.read().map_err(|source| HookError::ReadFailed {
            location: hook_location.clone(),
            source,
        })?;
        let classification = classify(existing.as_deref(), &self.templates);
        let legacy_template_version = match &classification {
            HookClassification::ForeignMergeable {
                template_version, ..
            } => *template_version,
            _ => None,
        };

        Ok(UpdateStatus {
            hook_location,
            hook_classification: classification.kind(),
            legacy_template_version,
            pending_migrations: pending.events,
        })
    }

    fn migrate_config(&mut self, report: &mut UpdateReport) {
        match migrate_store(&mut self.config) {
            Ok(migration) => {
                report.lines.extend(migration.lines());
                report.migrations = migration.events;
            }
            Err(aborted) => {
                report.lines.extend(aborted.applied.lines());
                report.migrations = aborted.applied.events;
                report.lines.push(capitalize(&aborted.error.to_string()));
                report.fail(&aborted.error);
            }
        }
    }

    fn reconcile_hook(&mut self, mode: InstallMode, report: &mut UpdateReport) {
        match reconcile(&mut self.hook, &self.templates, mode) {
            Ok(outcome) => {
                report.lines.extend(outcome.lines());
                report.hook = Some(outcome);
            }
            Err(HookError::Refused {
                location,
                classification,
                reason,
                hints,
            }) => {
                report.lines.push(format!("Hook already exists: {location}"));
                report.lines.push(reason.clone());
                report.lines.push("To resolve this, either:".to_string());
                for (index, hint) in hints.iter().enumerate() {
                    report.lines.push(format!("  {}: {hint}", index + 1));
                }
                report.fail(&UpdateError::Hook(HookError::Refused {
                    location,
                    classification,
                    reason,
                    hints,
                }));
            }
            Err(error) => {
                let error = UpdateError::Hook(error);
                report.lines.push(capitalize(&error.to_string()));
                report.fail(&error);
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
