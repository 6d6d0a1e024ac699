//! Integration tests for prettier-action

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn prettier_action() -> Command {
        let mut cmd = cargo_bin_cmd!("prettier-action");
        cmd.env_remove("GITHUB_BASE_REF")
            .env_remove("PRETTIER_ACTION_CONFIG")
            .env_remove("PRETTIER_ACTION_CACHE_DIR");
        cmd
    }

    #[test]
    fn help_displays() {
        prettier_action()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cached Prettier check"));
    }

    #[test]
    fn version_displays() {
        prettier_action()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("prettier-action"));
    }

    #[test]
    fn cache_dir_prints() {
        let cache = TempDir::new().unwrap();
        prettier_action()
            .args(["cache", "dir"])
            .env("PRETTIER_ACTION_CACHE_DIR", cache.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(cache.path().to_str().unwrap()));
    }

    #[test]
    fn cache_list_empty() {
        let cache = TempDir::new().unwrap();
        prettier_action()
            .args(["cache", "list"])
            .env("PRETTIER_ACTION_CACHE_DIR", cache.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries"));
    }

    #[test]
    fn cache_clear_empty() {
        let cache = TempDir::new().unwrap();
        prettier_action()
            .args(["cache", "clear", "--yes"])
            .env("PRETTIER_ACTION_CACHE_DIR", cache.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries"));
    }

    #[test]
    fn check_missing_manifest_fails() {
        let project = TempDir::new().unwrap();
        prettier_action()
            .args(["check", "--project"])
            .arg(project.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read"));
    }

    #[test]
    fn check_invalid_manifest_fails() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("package.json"), "{not json").unwrap();

        prettier_action()
            .args(["check", "--project"])
            .arg(project.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid package.json"));
    }

    #[test]
    fn unknown_subcommand_fails() {
        prettier_action().arg("frobnicate").assert().failure();
    }
}

/// End-to-end pipeline runs with stubbed npm and prettier binaries.
#[cfg(unix)]
mod pipeline_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn prettier_action() -> Command {
        let mut cmd = cargo_bin_cmd!("prettier-action");
        cmd.env_remove("GITHUB_BASE_REF")
            .env_remove("PRETTIER_ACTION_CONFIG")
            .env_remove("PRETTIER_ACTION_CACHE_DIR");
        cmd
    }

    fn write_executable(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// A fake npm that "installs" a stub prettier into ./node_modules
    fn fake_npm(dir: &Path, prettier_exit: i32) -> PathBuf {
        let script = format!(
            concat!(
                "#!/bin/sh\n",
                "mkdir -p node_modules/.bin\n",
                "printf '#!/bin/sh\\necho files checked\\nexit {exit}\\n' > node_modules/.bin/prettier\n",
                "chmod +x node_modules/.bin/prettier\n"
            ),
            exit = prettier_exit
        );
        let path = dir.join("fake-npm");
        write_executable(&path, &script);
        path
    }

    fn project_with(npm: &Path) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"prettier": "^3.0.0"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(".prettier-action.toml"),
            format!("[install]\nnpm_bin = \"{}\"\n", npm.display()),
        )
        .unwrap();
        dir
    }

    #[test]
    fn check_passes_installs_and_caches() {
        let tools = TempDir::new().unwrap();
        let npm = fake_npm(tools.path(), 0);
        let project = project_with(&npm);
        let cache = TempDir::new().unwrap();

        prettier_action()
            .args(["check", "--project"])
            .arg(project.path())
            .arg("--cache-dir")
            .arg(cache.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("completed successfully"));

        // node_modules cleaned up, cache entry written under the namespace
        assert!(!project.path().join("node_modules").exists());
        let keys: Vec<String> = fs::read_dir(cache.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert!(keys.iter().any(|k| k.starts_with("prettier-action-cache-v1-")));

        // Second run restores the install from the cache. Breaking the fake
        // npm proves the install step is skipped on an exact hit.
        write_executable(&npm, "#!/bin/sh\nexit 1\n");
        prettier_action()
            .args(["check", "--project"])
            .arg(project.path())
            .arg("--cache-dir")
            .arg(cache.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("restored from cache"));
    }

    #[test]
    fn failing_check_exits_nonzero_and_still_cleans_up() {
        let tools = TempDir::new().unwrap();
        let npm = fake_npm(tools.path(), 1);
        let project = project_with(&npm);
        let cache = TempDir::new().unwrap();

        prettier_action()
            .args(["check", "--project"])
            .arg(project.path())
            .arg("--cache-dir")
            .arg(cache.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed"));

        // cleanup ran even though the check failed
        assert!(!project.path().join("node_modules").exists());
        // the install itself succeeded, so the cache entry was still saved
        let entries = fs::read_dir(cache.path()).unwrap().count();
        assert!(entries > 0);
    }

    #[test]
    fn failing_install_exits_nonzero() {
        let tools = TempDir::new().unwrap();
        let npm = tools.path().join("fake-npm");
        write_executable(&npm, "#!/bin/sh\necho 'registry unreachable' >&2\nexit 1\n");
        let project = project_with(&npm);
        let cache = TempDir::new().unwrap();

        prettier_action()
            .args(["check", "--project"])
            .arg(project.path())
            .arg("--cache-dir")
            .arg(cache.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("npm install failed"));

        // nothing was cached for the failed install
        assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 0);
    }

    #[test]
    fn keep_install_skips_cleanup() {
        let tools = TempDir::new().unwrap();
        let npm = fake_npm(tools.path(), 0);
        let project = project_with(&npm);
        let cache = TempDir::new().unwrap();

        prettier_action()
            .args(["check", "--keep-install", "--project"])
            .arg(project.path())
            .arg("--cache-dir")
            .arg(cache.path())
            .assert()
            .success();

        assert!(project
            .path()
            .join("node_modules")
            .join(".bin")
            .join("prettier")
            .exists());
    }
}
