use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Output};

use lfs_core::{ConfigEntry, ConfigKey, ConfigStore, StoreError};

/// `git config` exit status when the key to unset does not exist.
const EXIT_KEY_NOT_FOUND: i32 = 5;
/// `git config --get-all` exit status when the key has no value.
const EXIT_GET_MISSING: i32 = 1;

/// Repository-local configuration read and written through the git CLI.
#[derive(Clone, Debug)]
pub struct GitConfigStore {
    program: String,
    repo_root: PathBuf,
}

impl GitConfigStore {
    pub fn new(program: impl Into<String>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            repo_root: repo_root.into(),
        }
    }

    fn command(&self, args: &[&OsStr]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("config")
            .arg("--local")
            .args(args)
            .current_dir(&self.repo_root);
        command
    }

    fn run(&self, args: &[&OsStr], key: Option<&ConfigKey>) -> Result<Vec<u8>, StoreError> {
        let output = self.command(args).output()?;
        self.check(output, args, key)
    }

    fn check(
        &self,
        output: Output,
        args: &[&OsStr],
        key: Option<&ConfigKey>,
    ) -> Result<Vec<u8>, StoreError> {
        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if let Some(key) = key {
            if stderr.contains("could not lock config file") {
                return Err(StoreError::Locked(key.to_string()));
            }
        }
        if stderr.contains("not in a git directory") {
            return Err(StoreError::NotGitRepo(self.repo_root.clone()));
        }
        let args: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        Err(StoreError::Git {
            command: format!("{} config --local {}", self.program, args.join(" ")),
            stderr,
        })
    }

    /// Whether `key` still has any value, asked of git with the exact bytes.
    fn has_key(&self, key: &ConfigKey, key_arg: &OsStr) -> Result<bool, StoreError> {
        let args = [OsStr::new("--get-all"), key_arg];
        let output = self.command(&args).output()?;
        if output.status.code() == Some(EXIT_GET_MISSING) {
            return Ok(false);
        }
        self.check(output, &args, Some(key)).map(|_| true)
    }
}

impl ConfigStore for GitConfigStore {
    fn list(&self) -> Result<Vec<ConfigEntry>, StoreError> {
        let stdout = self.run(&[OsStr::new("--list"), OsStr::new("-z")], None)?;
        Ok(parse_config_list(&stdout))
    }

    fn set(&mut self, key: &ConfigKey, value: &str) -> Result<(), StoreError> {
        let key_arg = key_arg(key)?;
        let args = [OsStr::new("--replace-all"), key_arg.as_os_str(), OsStr::new(value)];
        self.run(&args, Some(key))?;
        Ok(())
    }

    fn unset(&mut self, key: &ConfigKey) -> Result<(), StoreError> {
        let key_arg = key_arg(key)?;
        let args = [OsStr::new("--unset-all"), key_arg.as_os_str()];
        let output = self.command(&args).output()?;
        if output.status.code() == Some(EXIT_KEY_NOT_FOUND) && !self.has_key(key, &key_arg)? {
            tracing::debug!(%key, "key already absent");
            return Ok(());
        }
        self.check(output, &args, Some(key)).map(|_| ())
    }
}

/// `key` as a command-line argument carrying its exact bytes.
#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn key_arg(key: &ConfigKey) -> Result<OsString, StoreError> {
    use std::os::unix::ffi::OsStrExt;

    Ok(OsStr::from_bytes(key.as_bytes()).to_os_string())
}

/// `key` as a command-line argument carrying its exact bytes.
#[cfg(not(unix))]
fn key_arg(key: &ConfigKey) -> Result<OsString, StoreError> {
    key.to_utf8()
        .map(OsString::from)
        .ok_or_else(|| StoreError::UnaddressableKey(key.to_string()))
}

/// Parse `git config --list -z`: NUL-terminated records, key and value split
/// by the first newline. A key with no newline has no value. Keys keep their
/// raw bytes so they can be handed back to git unchanged.
fn parse_config_list(stdout: &[u8]) -> Vec<ConfigEntry> {
    stdout
        .split(|byte| *byte == 0)
        .filter(|record| !record.is_empty())
        .map(|record| {
            let (key, value) = match record.iter().position(|byte| *byte == b'\n') {
                Some(split) => (&record[..split], &record[split + 1..]),
                None => (record, &[][..]),
            };
            ConfigEntry::new(
                ConfigKey::from_bytes(key),
                String::from_utf8_lossy(value).into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_nul_separated_records() {
        let stdout = b"core.bare\nfalse\0lfs.origin.access\nprivate\0remote.origin.url\nhttps://example.com/repo.git\0";
        assert_eq!(
            parse_config_list(stdout),
            vec![
                ConfigEntry::new("core.bare", "false"),
                ConfigEntry::new("lfs.origin.access", "private"),
                ConfigEntry::new("remote.origin.url", "https://example.com/repo.git"),
            ]
        );
    }

    #[test]
    fn multiline_values_and_bare_keys_survive() {
        let stdout = b"alias.long\nline one\nline two\0core.implicit\0";
        assert_eq!(
            parse_config_list(stdout),
            vec![
                ConfigEntry::new("alias.long", "line one\nline two"),
                ConfigEntry::new("core.implicit", ""),
            ]
        );
    }

    #[test]
    fn non_utf8_subsection_keeps_raw_key_bytes() {
        let entries = parse_config_list(b"lfs.caf\xe9.access\nprivate\0");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key.as_bytes(), b"lfs.caf\xe9.access");
        assert_eq!(entries[0].value, "private");
        assert_eq!(entries[0].access_scope(), Some("caf\u{FFFD}"));
    }

    #[test]
    fn empty_output_has_no_entries() {
        assert!(parse_config_list(b"").is_empty());
    }
}
