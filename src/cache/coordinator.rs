//! Restore / install / save orchestration
//!
//! Only an exact key match proves the cached artifacts were built from the
//! current dependency set. A fallback hit restores a related entry to warm
//! the install, but the install still runs and the result is saved under
//! the primary key.

use crate::cache::CacheStore;
use crate::error::ActionResult;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Result of a cache restore attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The cache held an entry for exactly this dependency set
    ExactHit(String),
    /// A related entry was restored; a fresh install is still required
    FallbackHit(String),
    /// Nothing restored
    Miss,
}

impl RestoreOutcome {
    fn from_match(primary_key: &str, matched: Option<String>) -> Self {
        match matched {
            Some(key) if key == primary_key => Self::ExactHit(key),
            Some(key) => Self::FallbackHit(key),
            None => Self::Miss,
        }
    }

    /// Whether the restored entry satisfies the current dependency set
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::ExactHit(_))
    }
}

impl fmt::Display for RestoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactHit(key) => write!(f, "hit ({key})"),
            Self::FallbackHit(key) => write!(f, "stale hit ({key})"),
            Self::Miss => write!(f, "miss"),
        }
    }
}

/// The expensive step the cache exists to avoid
#[async_trait]
pub trait Installer: Send + Sync {
    /// Perform the full install into the target paths
    async fn install(&self) -> ActionResult<()>;
}

/// Drives the restore -> conditional install -> save sequence for one run
pub struct CacheCoordinator<'a> {
    store: &'a dyn CacheStore,
    paths: Vec<PathBuf>,
    primary_key: String,
    fallback_prefixes: Vec<String>,
}

impl<'a> CacheCoordinator<'a> {
    /// Create a coordinator over a store for one key and target path set
    pub fn new(
        store: &'a dyn CacheStore,
        paths: Vec<PathBuf>,
        primary_key: String,
        fallback_prefixes: Vec<String>,
    ) -> Self {
        Self {
            store,
            paths,
            primary_key,
            fallback_prefixes,
        }
    }

    /// Attempt a cache restore.
    ///
    /// Store failures degrade to a miss: the cache is an optimization and
    /// must never block the run.
    pub async fn restore(&self) -> RestoreOutcome {
        match self
            .store
            .restore(&self.paths, &self.primary_key, &self.fallback_prefixes)
            .await
        {
            Ok(matched) => {
                let outcome = RestoreOutcome::from_match(&self.primary_key, matched);
                debug!("cache restore: {}", outcome);
                outcome
            }
            Err(e) => {
                warn!("cache restore failed, treating as miss: {}", e);
                RestoreOutcome::Miss
            }
        }
    }

    /// Run the installer unless the restore was an exact hit, then save
    /// the result under the primary key.
    ///
    /// Install failures are fatal. Save failures are not: the install
    /// already succeeded, so verification proceeds and only a warning is
    /// logged. Returns whether an install ran.
    pub async fn ensure_installed(
        &self,
        outcome: &RestoreOutcome,
        installer: &dyn Installer,
    ) -> ActionResult<bool> {
        if outcome.is_exact() {
            debug!("exact cache hit, skipping install");
            return Ok(false);
        }

        installer.install().await?;

        if let Err(e) = self.store.save(&self.paths, &self.primary_key).await {
            warn!("cache save failed: {}", e);
        } else {
            debug!("cache saved under {}", self.primary_key);
        }

        Ok(true)
    }
}
