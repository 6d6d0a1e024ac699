//! Filesystem cache store
//!
//! One directory per cache entry:
//!
//! ```text
//! <root>/<key>/meta.json     key, save time, original target paths
//! <root>/<key>/data/<i>/     snapshot of the i-th saved path
//! ```
//!
//! Lookup is exact-key first, then the most recently saved entry whose key
//! starts with one of the fallback prefixes. Saves stage into a hidden
//! sibling directory and rename into place, so a crashed save never leaves
//! a half-written entry under a live key.

use crate::cache::CacheStore;
use crate::error::{ActionError, ActionResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const META_FILE: &str = "meta.json";
const DATA_DIR: &str = "data";

/// Format bytes as human-readable size (e.g., "1.5 GB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Per-entry metadata stored alongside the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryMeta {
    key: String,
    saved_at: DateTime<Utc>,
    paths: Vec<String>,
}

/// A cache entry with its on-disk footprint, for listings
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// Full cache key
    pub key: String,
    /// When the entry was written
    pub saved_at: DateTime<Utc>,
    /// Total size on disk
    pub size_bytes: u64,
}

/// Cache store rooted at a local directory
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store over `root` (created lazily on first save)
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Default store location under the OS cache directory
    pub fn default_root() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("prettier-action")
    }

    /// The store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_dir(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn read_meta(&self, key: &str) -> Option<EntryMeta> {
        let content = fs::read_to_string(self.entry_dir(key).join(META_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// List all entries, newest first. Directories without parseable
    /// metadata (interrupted saves, foreign files) are skipped.
    pub async fn entries(&self) -> ActionResult<Vec<EntryInfo>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let dir = fs::read_dir(&self.root)
            .map_err(|e| ActionError::io(format!("reading cache root {}", self.root.display()), e))?;

        for entry in dir {
            let entry = entry
                .map_err(|e| ActionError::io("reading cache root entry", e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let Some(meta) = self.read_meta(&name) else {
                continue;
            };
            entries.push(EntryInfo {
                key: meta.key,
                saved_at: meta.saved_at,
                size_bytes: dir_size(&entry.path()),
            });
        }

        entries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(entries)
    }

    /// Remove every entry. Returns how many were removed.
    pub async fn clear(&self) -> ActionResult<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        let dir = fs::read_dir(&self.root)
            .map_err(|e| ActionError::io(format!("reading cache root {}", self.root.display()), e))?;

        for entry in dir {
            let entry = entry
                .map_err(|e| ActionError::io("reading cache root entry", e))?;
            remove_existing(&entry.path())?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Copy an entry's snapshot back over the target paths
    fn materialize(&self, key: &str, paths: &[PathBuf]) -> ActionResult<()> {
        let data = self.entry_dir(key).join(DATA_DIR);

        for (i, target) in paths.iter().enumerate() {
            let src = data.join(i.to_string());
            if !src.exists() {
                continue;
            }
            remove_existing(target)?;
            copy_tree(&src, target).map_err(|e| {
                ActionError::io(format!("restoring {} into {}", key, target.display()), e)
            })?;
        }
        Ok(())
    }

    /// Most recently saved entry whose key starts with one of `prefixes`,
    /// excluding the primary key itself (already known to be absent).
    fn find_fallback(&self, primary_key: &str, prefixes: &[String]) -> Option<String> {
        let dir = fs::read_dir(&self.root).ok()?;

        let mut best: Option<(String, DateTime<Utc>)> = None;
        for entry in dir.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || name == primary_key {
                continue;
            }
            if !prefixes.iter().any(|p| name.starts_with(p.as_str())) {
                continue;
            }
            let Some(meta) = self.read_meta(&name) else {
                continue;
            };
            match &best {
                Some((_, newest)) if *newest >= meta.saved_at => {}
                _ => best = Some((name, meta.saved_at)),
            }
        }
        best.map(|(name, _)| name)
    }
}

#[async_trait]
impl CacheStore for DirStore {
    async fn restore(
        &self,
        paths: &[PathBuf],
        primary_key: &str,
        fallback_prefixes: &[String],
    ) -> ActionResult<Option<String>> {
        if self.read_meta(primary_key).is_some() {
            self.materialize(primary_key, paths)?;
            return Ok(Some(primary_key.to_string()));
        }

        if let Some(key) = self.find_fallback(primary_key, fallback_prefixes) {
            debug!("no exact entry for {}, restoring {}", primary_key, key);
            self.materialize(&key, paths)?;
            return Ok(Some(key));
        }

        Ok(None)
    }

    async fn save(&self, paths: &[PathBuf], key: &str) -> ActionResult<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| ActionError::io(format!("creating cache root {}", self.root.display()), e))?;

        let staging = self.root.join(format!(".{key}.tmp"));
        remove_existing(&staging)?;
        fs::create_dir_all(&staging)
            .map_err(|e| ActionError::io("creating cache staging directory", e))?;

        let data = staging.join(DATA_DIR);
        for (i, path) in paths.iter().enumerate() {
            if !path.exists() {
                continue;
            }
            copy_tree(path, &data.join(i.to_string())).map_err(|e| {
                ActionError::io(format!("snapshotting {} under {}", path.display(), key), e)
            })?;
        }

        let meta = EntryMeta {
            key: key.to_string(),
            saved_at: Utc::now(),
            paths: paths.iter().map(|p| p.display().to_string()).collect(),
        };
        fs::write(staging.join(META_FILE), serde_json::to_string_pretty(&meta)?)
            .map_err(|e| ActionError::io("writing cache entry metadata", e))?;

        let entry = self.entry_dir(key);
        remove_existing(&entry)?;
        fs::rename(&staging, &entry)
            .map_err(|e| ActionError::io(format!("publishing cache entry {}", key), e))?;

        debug!("saved cache entry {}", key);
        Ok(())
    }
}

fn remove_existing(path: &Path) -> ActionResult<()> {
    if !path.exists() {
        return Ok(());
    }
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| ActionError::io(format!("removing {}", path.display()), e))
}

/// Recursively copy a directory tree, preserving symlinks on unix
fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
    let mut stack = vec![(src.to_path_buf(), dst.to_path_buf())];

    while let Some((from, to)) = stack.pop() {
        fs::create_dir_all(&to)?;
        for entry in fs::read_dir(&from)? {
            let entry = entry?;
            let ty = entry.file_type()?;
            let target = to.join(entry.file_name());

            if ty.is_dir() {
                stack.push((entry.path(), target));
            } else if ty.is_symlink() {
                #[cfg(unix)]
                {
                    let link = fs::read_link(entry.path())?;
                    std::os::unix::fs::symlink(link, &target)?;
                }
                #[cfg(not(unix))]
                {
                    fs::copy(entry.path(), &target)?;
                }
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
    }
    Ok(())
}

fn dir_size(path: &Path) -> u64 {
    let mut total = 0;
    let mut stack = vec![path.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if meta.is_dir() {
                stack.push(entry.path());
            } else {
                total += meta.len();
            }
        }
    }
    total
}
