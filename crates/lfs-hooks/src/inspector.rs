use crate::template::HookTemplates;

/// What currently sits at the hook path, relative to the templates we know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookClassification {
    Absent,
    Canonical,
    /// Content a previous release installed; safe to overwrite.
    ForeignMergeable {
        existing: Vec<u8>,
        /// Release whose template matched, or `None` for an empty file.
        template_version: Option<&'static str>,
    },
    /// Anything else. Assumed to carry the user's own pre-push policy.
    ForeignUnmergeable { existing: Vec<u8> },
}

impl HookClassification {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Canonical => "canonical",
            Self::ForeignMergeable { .. } => "foreign_mergeable",
            Self::ForeignUnmergeable { .. } => "foreign_unmergeable",
        }
    }
}

/// Classify `existing` hook bytes against `templates`.
///
/// An existing but empty file holds nothing a user could lose and is treated
/// as mergeable.
#[must_use]
pub fn classify(existing: Option<&[u8]>, templates: &HookTemplates) -> HookClassification {
    let Some(existing) = existing else {
        return HookClassification::Absent;
    };

    if templates.canonical().matches(existing) {
        return HookClassification::Canonical;
    }

    if existing.trim_ascii().is_empty() {
        return HookClassification::ForeignMergeable {
            existing: existing.to_vec(),
            template_version: None,
        };
    }

    match templates.find_legacy(existing) {
        Some(template) => HookClassification::ForeignMergeable {
            existing: existing.to_vec(),
            template_version: Some(template.version),
        },
        None => HookClassification::ForeignUnmergeable {
            existing: existing.to_vec(),
        },
    }
}
