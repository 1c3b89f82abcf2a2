//! Collaborator traits.
//!
//! The migration and hook components never reach for the "current
//! repository" on their own; they are handed these stores explicitly.

use crate::access::{ConfigEntry, ConfigKey};
use crate::errors::StoreError;

/// Repository-scoped configuration.
pub trait ConfigStore {
    /// Every local key/value pair, in the store's own order.
    fn list(&self) -> Result<Vec<ConfigEntry>, StoreError>;

    /// Set `key` to `value`, replacing every existing value.
    ///
    /// `key` is matched byte for byte; a store that cannot address it exactly
    /// must fail rather than touch a different key.
    fn set(&mut self, key: &ConfigKey, value: &str) -> Result<(), StoreError>;

    /// Remove `key` and all of its values.
    fn unset(&mut self, key: &ConfigKey) -> Result<(), StoreError>;
}

/// The pre-push hook file.
pub trait HookStore {
    /// Raw bytes of the hook, or `None` when no file exists.
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the hook with `contents` and mark it executable.
    ///
    /// Implementations must not expose the new content with stale permissions.
    fn write(&mut self, contents: &[u8]) -> Result<(), StoreError>;

    /// Human-readable location of the hook, used in reports.
    fn location(&self) -> String;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &mut T {
    fn list(&self) -> Result<Vec<ConfigEntry>, StoreError> {
        (**self).list()
    }

    fn set(&mut self, key: &ConfigKey, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn unset(&mut self, key: &ConfigKey) -> Result<(), StoreError> {
        (**self).unset(key)
    }
}

impl<T: HookStore + ?Sized> HookStore for &mut T {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).read()
    }

    fn write(&mut self, contents: &[u8]) -> Result<(), StoreError> {
        (**self).write(contents)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
