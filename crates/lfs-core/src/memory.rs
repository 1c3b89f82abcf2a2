//! In-memory stores.
//!
//! Used by the component tests and by callers that want to preview an update
//! without touching the repository.

use std::collections::HashSet;
use std::io;

use crate::access::{ConfigEntry, ConfigKey};
use crate::errors::StoreError;
use crate::store::{ConfigStore, HookStore};

/// One mutation applied to a [`MemoryConfigStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigMutation {
    Set { key: String, value: String },
    Unset { key: String },
}

#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: Vec<ConfigEntry>,
    locked: HashSet<String>,
    mutations: Vec<ConfigMutation>,
}

impl MemoryConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(key, value)` pairs; duplicate keys are kept as
    /// multi-valued entries.
    #[must_use]
    pub fn with_entries<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| ConfigEntry::new(Into::<String>::into(key), value))
                .collect(),
            ..Self::default()
        }
    }

    /// Make every later `set`/`unset` of `key` fail with [`StoreError::Locked`].
    pub fn lock_key(&mut self, key: impl Into<String>) {
        self.locked.insert(key.into());
    }

    /// Last value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Successful mutations, in the order they were applied.
    #[must_use]
    pub fn mutations(&self) -> &[ConfigMutation] {
        &self.mutations
    }

    fn ensure_unlocked(&self, key: &ConfigKey) -> Result<(), StoreError> {
        if self.locked.contains(key.as_str()) {
            return Err(StoreError::Locked(key.to_string()));
        }
        Ok(())
    }
}

impl ConfigStore for MemoryConfigStore {
    fn list(&self) -> Result<Vec<ConfigEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn set(&mut self, key: &ConfigKey, value: &str) -> Result<(), StoreError> {
        self.ensure_unlocked(key)?;
        let position = self.entries.iter().position(|entry| entry.key == *key);
        self.entries.retain(|entry| entry.key != *key);
        let entry = ConfigEntry::new(key.clone(), value);
        match position {
            Some(index) => self.entries.insert(index, entry),
            None => self.entries.push(entry),
        }
        self.mutations.push(ConfigMutation::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn unset(&mut self, key: &ConfigKey) -> Result<(), StoreError> {
        self.ensure_unlocked(key)?;
        self.entries.retain(|entry| entry.key != *key);
        self.mutations.push(ConfigMutation::Unset {
            key: key.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug)]
pub struct MemoryHookStore {
    contents: Option<Vec<u8>>,
    executable: bool,
    writes: usize,
    fail_writes: bool,
    location: String,
}

impl Default for MemoryHookStore {
    fn default() -> Self {
        Self {
            contents: None,
            executable: false,
            writes: 0,
            fail_writes: false,
            location: ".git/hooks/pre-push".to_string(),
        }
    }
}

impl MemoryHookStore {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store holding an existing (non-executable) hook file.
    #[must_use]
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// Make every later write fail with a permission error.
    #[must_use]
    pub const fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    #[must_use]
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    #[must_use]
    pub const fn is_executable(&self) -> bool {
        self.executable
    }

    /// Number of successful writes.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl HookStore for MemoryHookStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "hook file is read-only",
            )));
        }
        self.contents = Some(contents.to_vec());
        self.executable = true;
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}
