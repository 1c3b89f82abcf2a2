//! Hook templates.
//!
//! `LEGACY_PRE_PUSH` is append-only: when the canonical hook changes, the
//! outgoing body moves to the end of the list under the last release that
//! installed it.

/// File name of the managed hook inside the hooks directory.
pub const PRE_PUSH_HOOK: &str = "pre-push";

const PRE_PUSH: HookTemplate = HookTemplate {
    version: "1.0.1",
    body: r#"#!/bin/sh
command -v git-lfs >/dev/null 2>&1 || { echo >&2 "\nThis repository has been configured for Git LFS but 'git-lfs' was not found on your path. If you no longer wish to use Git LFS, remove this hook by deleting .git/hooks/pre-push.\n"; exit 2; }
git lfs pre-push "$@""#,
};

const LEGACY_PRE_PUSH: &[HookTemplate] = &[
    HookTemplate {
        version: "0.5.1",
        body: "#!/bin/sh\ngit lfs push --stdin $*",
    },
    HookTemplate {
        version: "0.5.2",
        body: "#!/bin/sh\ngit lfs push --stdin \"$@\"",
    },
    HookTemplate {
        version: "0.5.3",
        body: "#!/bin/sh\ngit lfs pre-push \"$@\"",
    },
    HookTemplate {
        version: "1.0.0",
        body: r#"#!/bin/sh
command -v git-lfs >/dev/null 2>&1 || { echo >&2 "\nThis repository has been configured for Git LFS but 'git-lfs' was not found on your path. If you no longer wish to use Git LFS, remove this hook by deleting .git/hooks/pre-push.\n"; exit 0; }
git lfs pre-push "$@""#,
    },
];

/// A hook body as shipped by one release of the tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookTemplate {
    /// Release that introduced this body.
    pub version: &'static str,
    /// Script text without the trailing newline.
    pub body: &'static str,
}

impl HookTemplate {
    /// Bytes written to disk.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        format!("{}\n", self.body).into_bytes()
    }

    /// Whether `existing` is this template, ignoring trailing whitespace.
    #[must_use]
    pub fn matches(&self, existing: &[u8]) -> bool {
        existing.trim_ascii_end() == self.body.as_bytes().trim_ascii_end()
    }
}

/// The canonical hook plus every body earlier releases installed.
#[derive(Clone, Debug)]
pub struct HookTemplates {
    canonical: HookTemplate,
    legacy: Vec<HookTemplate>,
}

impl HookTemplates {
    #[must_use]
    pub fn new(canonical: HookTemplate, legacy: Vec<HookTemplate>) -> Self {
        Self { canonical, legacy }
    }

    /// The templates this build of the tool ships for `pre-push`.
    #[must_use]
    pub fn pre_push() -> Self {
        Self::new(PRE_PUSH, LEGACY_PRE_PUSH.to_vec())
    }

    #[must_use]
    pub const fn canonical(&self) -> &HookTemplate {
        &self.canonical
    }

    #[must_use]
    pub fn legacy(&self) -> &[HookTemplate] {
        &self.legacy
    }

    /// The legacy template `existing` matches, if any.
    #[must_use]
    pub fn find_legacy(&self, existing: &[u8]) -> Option<&HookTemplate> {
        self.legacy.iter().find(|template| template.matches(existing))
    }
}

impl Default for HookTemplates {
    fn default() -> Self {
        Self::pre_push()
    }
}
