//! Check command - the cached Prettier run
//!
//! Pipeline: read manifest -> filter -> derive key -> restore ->
//! conditional install + save -> resolve changeset -> check -> cleanup.
//! Each stage completes before the next starts; cleanup runs whether the
//! check passed or failed, but not when an earlier stage already aborted
//! the run.

use crate::cache::coordinator::Installer;
use crate::cache::{CacheCoordinator, DirStore};
use crate::changeset::{self, Changeset, GitDiff};
use crate::cli::args::CheckArgs;
use crate::config::{self, Config};
use crate::error::{ActionError, ActionResult};
use crate::hash;
use crate::install::{NpmInstaller, INSTALL_DIR};
use crate::manifest::{self, PackageManifest, SyntheticManifest, MANIFEST_FILE};
use crate::trace::Stopwatch;
use crate::ui::{output, UiContext};
use crate::verify::PrettierRunner;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Execute the check command
pub async fn execute(args: CheckArgs, config_path: Option<&Path>) -> ActionResult<()> {
    let ctx = UiContext::detect();
    let mut watch = Stopwatch::start();

    let project_dir = resolve_project_dir(&args)?;
    debug!("project directory: {}", project_dir.display());
    let config = config::load(config_path, &project_dir).await?;

    output::intro("Prettier check");

    // Manifest -> filtered dependency set -> cache key
    let manifest_path = project_dir.join(MANIFEST_FILE);
    let pkg = PackageManifest::from_file(&manifest_path).await?;
    let deps = manifest::prettier_dependencies(&pkg);
    let key = hash::compute_cache_key(&deps);
    debug!("cache key: {}", key);
    watch.mark("computed cache key");

    // GitHub sets GITHUB_BASE_REF to the empty string on non-PR events
    let base_ref = args.base_ref.as_deref().filter(|s| !s.is_empty());
    let use_cache = !args.no_cache && config.cache.enabled;

    let target = project_dir.join(INSTALL_DIR);
    let installer = NpmInstaller::new(
        project_dir.clone(),
        config.install.npm_bin.clone(),
        SyntheticManifest::new(deps),
    );

    install_dependencies(&args, &config, &ctx, &mut watch, &target, &key, &installer, use_cache)
        .await?;

    // Changeset
    let diff = GitDiff::new(project_dir.clone());
    let changeset = changeset::resolve(base_ref, &diff).await;
    watch.mark("resolved changeset");
    match &changeset {
        Changeset::Everything => output::step_info("checking the entire tree"),
        Changeset::Files(files) => {
            output::step_info(&format!("checking {} changed file(s)", files.len()));
        }
    }

    // Verify; cleanup runs before the result is propagated
    let result = if changeset.is_empty() {
        Ok(String::new())
    } else {
        let runner = PrettierRunner::new(
            project_dir.clone(),
            config.check.prettier_bin.clone(),
            config.check.args.clone(),
        );
        runner.check(&changeset).await
    };
    watch.mark("prettier check");

    if !args.keep_install {
        cleanup(&target).await;
        watch.mark("cleanup");
    }

    let check_output = result?;
    if !check_output.trim().is_empty() {
        println!("{}", check_output.trim_end());
    }

    output::outro_success("Prettier check completed successfully.");
    Ok(())
}

/// Restore from cache and install if needed, or install unconditionally
/// when caching is disabled.
#[allow(clippy::too_many_arguments)]
async fn install_dependencies(
    args: &CheckArgs,
    config: &Config,
    ctx: &UiContext,
    watch: &mut Stopwatch,
    target: &Path,
    key: &str,
    installer: &NpmInstaller,
    use_cache: bool,
) -> ActionResult<()> {
    if !use_cache {
        debug!("caching disabled, installing fresh");
        installer.install().await?;
        watch.mark("install (no cache)");
        output::step_ok("dependencies installed (cache disabled)");
        return Ok(());
    }

    let cache_root = args
        .cache_dir
        .clone()
        .or_else(|| config.cache.dir.clone())
        .unwrap_or_else(DirStore::default_root);
    let store = DirStore::new(cache_root);
    let coordinator = CacheCoordinator::new(
        &store,
        vec![target.to_path_buf()],
        key.to_string(),
        vec![hash::fallback_prefix()],
    );

    let pb = ctx.use_fancy_output().then(|| spinner("Restoring cache..."));

    let outcome = coordinator.restore().await;
    watch.mark("cache restore");

    if let Some(pb) = &pb {
        pb.set_message("Installing Prettier dependencies...");
    }
    let installed = coordinator.ensure_installed(&outcome, installer).await?;
    watch.mark("install");
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    output::step_info(&format!("cache {}", outcome));
    if installed {
        output::step_ok("dependencies installed and cached");
    } else {
        output::step_ok("dependencies restored from cache");
    }
    Ok(())
}

fn resolve_project_dir(args: &CheckArgs) -> ActionResult<PathBuf> {
    match &args.project {
        Some(path) => path.canonicalize().map_err(|e| {
            ActionError::io(format!("resolving project path {}", path.display()), e)
        }),
        None => env::current_dir().map_err(|e| ActionError::io("getting current directory", e)),
    }
}

/// Best-effort removal of the install target; failure is a warning only
async fn cleanup(target: &Path) {
    match tokio::fs::remove_dir_all(target).await {
        Ok(()) => debug!("cleaned up {}", target.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            warn!("failed to clean up {}: {}", target.display(), e);
            output::step_warn(&format!("failed to clean up {}: {}", target.display(), e));
        }
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn args(argv: &[&str]) -> CheckArgs {
        let mut full = vec!["harness"];
        full.extend(argv);
        Harness::try_parse_from(full).unwrap().args
    }

    #[test]
    fn project_dir_defaults_to_cwd() {
        let resolved = resolve_project_dir(&args(&[])).unwrap();
        assert_eq!(resolved, env::current_dir().unwrap());
    }

    #[test]
    fn missing_project_dir_errors() {
        let result = resolve_project_dir(&args(&["--project", "/definitely/not/here"]));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn cleanup_missing_target_is_silent() {
        // NotFound is not a failure worth warning about
        cleanup(Path::new("/definitely/not/here/node_modules")).await;
    }
}
