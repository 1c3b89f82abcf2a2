//! End-to-end runs against scratch repositories created with the git CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use lfs_core::{ConfigKey, ConfigStore, HookStore};
use lfs_hooks::{FsHookStore, HookTemplates, discover_repo_context};
use lfs_update::{GitConfigStore, Updater};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_temp_repo() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create tempdir");
    let repo_path = dir.path().to_path_buf();
    run_git(&repo_path, &["init", "--quiet"]);
    (dir, repo_path)
}

fn run_git(repo_path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .unwrap_or_else(|e| panic!("git {} failed: {}", args.join(" "), e));
    assert!(
        output.status.success(),
        "git {} failed:\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn local_value(repo_path: &Path, key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--local", "--get", key])
        .current_dir(repo_path)
        .output()
        .expect("git config --get");
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn stores(repo_path: &Path) -> (GitConfigStore, FsHookStore) {
    let repo = discover_repo_context(repo_path, None).expect("discover repo");
    (
        GitConfigStore::new("git", &repo.root),
        FsHookStore::pre_push(&repo),
    )
}

#[test]
fn migrates_access_entries_in_local_config() {
    let (_dir, repo_path) = init_temp_repo();
    run_git(&repo_path, &["config", "lfs.origin.access", "private"]);
    run_git(&repo_path, &["config", "lfs.mirror.access", "readonly"]);
    run_git(&repo_path, &["config", "lfs.basic.access", "basic"]);

    let (mut config, mut hook) = stores(&repo_path);
    let report = Updater::new(&mut config, &mut hook)
        .update(false, false)
        .expect("update");

    assert!(report.success, "report: {:?}", report.lines);
    assert!(
        report
            .lines
            .contains(&"Updated origin access from private to basic.".to_string())
    );
    assert!(
        report
            .lines
            .contains(&"Removed invalid mirror access of readonly.".to_string())
    );
    assert_eq!(local_value(&repo_path, "lfs.origin.access").as_deref(), Some("basic"));
    assert_eq!(local_value(&repo_path, "lfs.mirror.access"), None);
    assert_eq!(local_value(&repo_path, "lfs.basic.access").as_deref(), Some("basic"));
}

#[test]
fn multi_valued_access_key_is_collapsed() {
    let (_dir, repo_path) = init_temp_repo();
    run_git(&repo_path, &["config", "--add", "lfs.origin.access", "private"]);
    run_git(&repo_path, &["config", "--add", "lfs.origin.access", "bogus"]);

    let mut config = GitConfigStore::new("git", &repo_path);
    let entries = config.list().expect("list");
    assert_eq!(
        entries
            .iter()
            .filter(|entry| entry.key == "lfs.origin.access")
            .count(),
        2
    );

    let report = lfs_update::migrate_store(&mut config).expect("migrate");
    assert_eq!(report.lines(), vec!["Removed invalid origin access of bogus."]);
    assert_eq!(local_value(&repo_path, "lfs.origin.access"), None);
}

#[cfg(unix)]
#[test]
fn non_utf8_subsections_are_migrated_in_place() {
    let (_dir, repo_path) = init_temp_repo();
    let config_path = repo_path.join(".git").join("config");
    let mut raw = fs::read(&config_path).expect("read config");
    raw.extend_from_slice(b"[lfs \"caf\xe9\"]\n\taccess = private\n");
    raw.extend_from_slice(b"[lfs \"na\xefve\"]\n\taccess = bogus\n");
    fs::write(&config_path, raw).expect("seed config");

    let mut config = GitConfigStore::new("git", &repo_path);
    let first = lfs_update::migrate_store(&mut config).expect("first run");
    assert_eq!(
        first.lines(),
        vec![
            "Updated caf\u{FFFD} access from private to basic.",
            "Removed invalid na\u{FFFD}ve access of bogus.",
        ]
    );

    let second = lfs_update::migrate_store(&mut config).expect("second run");
    assert!(second.events.is_empty(), "second run: {:?}", second.lines());

    let access: Vec<(Vec<u8>, String)> = config
        .list()
        .expect("list")
        .into_iter()
        .filter(|entry| entry.access_scope().is_some())
        .map(|entry| (entry.key.as_bytes().to_vec(), entry.value))
        .collect();
    assert_eq!(
        access,
        vec![(b"lfs.caf\xe9.access".to_vec(), "basic".to_string())]
    );

    let written = fs::read(&config_path).expect("read config back");
    let replacement = "\u{FFFD}".as_bytes();
    assert!(!written.windows(replacement.len()).any(|window| window == replacement));
}

#[cfg(unix)]
#[test]
fn unset_removes_non_utf8_key() {
    let (_dir, repo_path) = init_temp_repo();
    let config_path = repo_path.join(".git").join("config");
    let mut raw = fs::read(&config_path).expect("read config");
    raw.extend_from_slice(b"[lfs \"caf\xe9\"]\n\taccess = bogus\n");
    fs::write(&config_path, raw).expect("seed config");

    let mut config = GitConfigStore::new("git", &repo_path);
    let key = ConfigKey::from_bytes(b"lfs.caf\xe9.access".to_vec());
    config.unset(&key).expect("unset");

    assert!(
        config
            .list()
            .expect("list")
            .iter()
            .all(|entry| entry.key != key)
    );
}

#[test]
fn unset_of_missing_key_succeeds() {
    let (_dir, repo_path) = init_temp_repo();
    let mut config = GitConfigStore::new("git", &repo_path);
    config
        .unset(&"lfs.nowhere.access".into())
        .expect("unset missing key");
}

#[test]
fn installs_executable_hook_in_fresh_repo() {
    let (_dir, repo_path) = init_temp_repo();
    let (mut config, mut hook) = stores(&repo_path);
    let hook_path = hook.path().to_path_buf();

    let report = Updater::new(&mut config, &mut hook)
        .update(false, false)
        .expect("update");

    assert!(report.success);
    assert_eq!(report.lines, vec!["Installed pre-push hook."]);
    assert_eq!(
        fs::read(&hook_path).expect("hook written"),
        HookTemplates::pre_push().canonical().contents()
    );
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&hook_path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[test]
fn refuses_custom_hook_and_leaves_it_alone() {
    let (_dir, repo_path) = init_temp_repo();
    let (mut config, mut hook) = stores(&repo_path);
    let custom = "#!/bin/sh\nexec ./scripts/guard-push \"$@\"\n";
    fs::create_dir_all(hook.path().parent().expect("hooks dir")).expect("mkdir hooks");
    fs::write(hook.path(), custom).expect("seed custom hook");

    let report = Updater::new(&mut config, &mut hook)
        .update(false, false)
        .expect("update");

    assert!(!report.success);
    assert!(report.lines.iter().any(|line| line.contains("--manual")));
    assert!(report.lines.iter().any(|line| line.contains("--force")));
    assert_eq!(hook.read().expect("read").as_deref(), Some(custom.as_bytes()));
}

#[test]
fn relative_core_hooks_path_resolves_against_work_tree() {
    let (_dir, repo_path) = init_temp_repo();
    run_git(&repo_path, &["config", "core.hooksPath", "tools/hooks"]);

    let repo = discover_repo_context(&repo_path, None).expect("discover repo");
    assert_eq!(repo.core_hooks_path.as_deref(), Some("tools/hooks"));
    assert!(repo.hooks_dir.ends_with("tools/hooks"));

    let mut hook = FsHookStore::pre_push(&repo);
    hook.write(b"#!/bin/sh\n").expect("write");
    assert!(repo.root.join("tools/hooks/pre-push").is_file());
    assert_eq!(hook.location(), Path::new("tools/hooks/pre-push").display().to_string());
}

#[test]
fn hooks_dir_override_wins_over_core_hooks_path() {
    let (_dir, repo_path) = init_temp_repo();
    run_git(&repo_path, &["config", "core.hooksPath", "tools/hooks"]);
    let override_dir = repo_path.join("custom-hooks");

    let repo = discover_repo_context(&repo_path, Some(override_dir.clone())).expect("discover");
    assert_eq!(repo.hooks_dir, override_dir);
}

#[test]
fn relative_override_resolves_against_work_tree_from_subdirectory() {
    let (_dir, repo_path) = init_temp_repo();
    let nested = repo_path.join("src").join("nested");
    fs::create_dir_all(&nested).expect("mkdir nested");

    let repo = discover_repo_context(&nested, Some(PathBuf::from("custom-hooks"))).expect("discover");
    assert_eq!(repo.hooks_dir, repo.root.join("custom-hooks"));
}

#[test]
fn linked_worktree_uses_the_shared_hooks_dir() {
    let dir = TempDir::new().expect("create tempdir");
    let main = dir.path().join("main");
    fs::create_dir_all(&main).expect("mkdir main");
    run_git(&main, &["init", "--quiet"]);
    run_git(
        &main,
        &[
            "-c",
            "user.name=lfs",
            "-c",
            "user.email=lfs@example.com",
            "commit",
            "--quiet",
            "--allow-empty",
            "-m",
            "init",
        ],
    );
    run_git(&main, &["worktree", "add", "--quiet", "../wt"]);
    let worktree = dir.path().join("wt");
    let shared_hooks = main.join(".git").join("hooks");
    fs::create_dir_all(&shared_hooks).expect("mkdir hooks");

    let repo = discover_repo_context(&worktree, None).expect("discover worktree");
    assert_eq!(
        fs::canonicalize(&repo.hooks_dir).expect("canonical hooks dir"),
        fs::canonicalize(&shared_hooks).expect("canonical shared hooks")
    );

    let mut config = GitConfigStore::new("git", &repo.root);
    let mut hook = FsHookStore::pre_push(&repo);
    let report = Updater::new(&mut config, &mut hook)
        .update(false, false)
        .expect("update");

    assert!(report.success, "report: {:?}", report.lines);
    assert_eq!(
        fs::read(shared_hooks.join("pre-push")).expect("hook in shared dir"),
        HookTemplates::pre_push().canonical().contents()
    );
}

#[test]
fn discovery_outside_a_repository_fails() {
    let dir = TempDir::new().expect("tempdir");
    let error = discover_repo_context(dir.path(), None).expect_err("no repo");
    assert!(matches!(error, lfs_hooks::HookError::NotGitRepo(_)));
}
