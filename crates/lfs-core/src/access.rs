//! Legacy `lfs.<scope>.access` configuration entries.

use std::fmt;

const ACCESS_KEY_PREFIX: &str = "lfs.";
const ACCESS_KEY_SUFFIX: &str = ".access";

/// A configuration key exactly as the store holds it.
///
/// Git subsection names may contain any byte except NUL and newline, so the
/// raw bytes are what a store must be handed back. `as_str` is a display
/// form and is lossy when the key is not UTF-8.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    raw: Vec<u8>,
    display: String,
}

impl ConfigKey {
    pub fn from_bytes(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let display = String::from_utf8_lossy(&raw).into_owned();
        Self { raw, display }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// The key as UTF-8, or `None` when `as_str` had to replace bytes.
    #[must_use]
    pub fn to_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.raw).ok()
    }
}

impl From<&str> for ConfigKey {
    fn from(key: &str) -> Self {
        Self::from(key.to_string())
    }
}

impl From<String> for ConfigKey {
    fn from(key: String) -> Self {
        Self {
            raw: key.clone().into_bytes(),
            display: key,
        }
    }
}

impl PartialEq<str> for ConfigKey {
    fn eq(&self, other: &str) -> bool {
        self.raw == other.as_bytes()
    }
}

impl PartialEq<&str> for ConfigKey {
    fn eq(&self, other: &&str) -> bool {
        self.raw == other.as_bytes()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// A single repository-scoped configuration pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: ConfigKey,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<ConfigKey>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The `<scope>` of an `lfs.<scope>.access` key, if this entry is one.
    #[must_use]
    pub fn access_scope(&self) -> Option<&str> {
        access_scope(self.key.as_str())
    }
}

/// Extract `<scope>` from `lfs.<scope>.access`.
///
/// The scope is opaque and may itself contain dots (remote URLs do).
/// An empty scope (`lfs..access`) still matches.
#[must_use]
pub fn access_scope(key: &str) -> Option<&str> {
    key.strip_prefix(ACCESS_KEY_PREFIX)?
        .strip_suffix(ACCESS_KEY_SUFFIX)
}

/// Value of an `lfs.<scope>.access` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessLevel {
    Basic,
    /// Deprecated alias for `Basic`.
    Private,
    Other(String),
}

impl AccessLevel {
    pub const CANONICAL: &'static str = "basic";

    /// Exact, case-sensitive parse.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "basic" => Self::Basic,
            "private" => Self::Private,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic => "basic",
            Self::Private => "private",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        matches!(self, Self::Basic)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scope_is_extracted_from_access_keys() {
        assert_eq!(access_scope("lfs.origin.access"), Some("origin"));
        assert_eq!(
            access_scope("lfs.https://example.com/repo.git/info/lfs.access"),
            Some("https://example.com/repo.git/info/lfs")
        );
        assert_eq!(access_scope("lfs..access"), Some(""));
    }

    #[test]
    fn non_access_keys_do_not_match() {
        assert_eq!(access_scope("lfs.access"), None);
        assert_eq!(access_scope("lfs.url"), None);
        assert_eq!(access_scope("remote.origin.url"), None);
        assert_eq!(access_scope("lfs.origin.accessx"), None);
        assert_eq!(access_scope("xlfs.origin.access"), None);
    }

    #[test]
    fn non_utf8_key_keeps_raw_bytes() {
        let key = ConfigKey::from_bytes(b"lfs.caf\xe9.access".to_vec());
        assert_eq!(key.as_bytes(), b"lfs.caf\xe9.access");
        assert_eq!(key.as_str(), "lfs.caf\u{FFFD}.access");
        assert_eq!(key.to_utf8(), None);
        assert_ne!(key, ConfigKey::from("lfs.caf\u{FFFD}.access"));

        let entry = ConfigEntry::new(key, "private");
        assert_eq!(entry.access_scope(), Some("caf\u{FFFD}"));
    }

    #[test]
    fn utf8_key_compares_with_str() {
        let key = ConfigKey::from("lfs.origin.access");
        assert_eq!(key.to_utf8(), Some("lfs.origin.access"));
        assert!(key == "lfs.origin.access");
    }

    #[test]
    fn access_level_parse_is_exact() {
        assert_eq!(AccessLevel::parse("basic"), AccessLevel::Basic);
        assert_eq!(AccessLevel::parse("private"), AccessLevel::Private);
        assert_eq!(
            AccessLevel::parse("Basic"),
            AccessLevel::Other("Basic".to_string())
        );
        assert_eq!(
            AccessLevel::parse("readonly"),
            AccessLevel::Other("readonly".to_string())
        );
    }

    #[test]
    fn only_basic_is_canonical() {
        assert!(AccessLevel::Basic.is_canonical());
        assert!(!AccessLevel::Private.is_canonical());
        assert!(!AccessLevel::parse("").is_canonical());
        assert_eq!(AccessLevel::parse("none").to_string(), "none");
    }
}
