//! Content-addressed dependency cache
//!
//! Stores snapshots of installed dependencies keyed by a digest of the
//! dependency manifest. Restore supports exact-key lookup with a
//! prefix-fallback scan for the most recent related entry.
//!
//! # Restore semantics
//!
//! | Outcome | Meaning | Install runs? |
//! |---------|---------|---------------|
//! | ExactHit | entry matches the current dependency set | no |
//! | FallbackHit | a related entry warmed the target | yes |
//! | Miss | nothing restored | yes |

pub mod coordinator;
pub mod dir;

pub use coordinator::{CacheCoordinator, Installer, RestoreOutcome};
pub use dir::{format_bytes, DirStore, EntryInfo};

use crate::error::ActionResult;
use async_trait::async_trait;
use std::path::PathBuf;

/// Narrow interface to the cache backend.
///
/// Exactly the two operations the coordinator needs. Backends are free to
/// store entries however they like as long as keys behave as opaque
/// strings with prefix matching.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Restore a cached entry into `paths`.
    ///
    /// Tries `primary_key` exactly, then the most recently saved entry
    /// whose key starts with one of `fallback_prefixes`. Returns the
    /// matched key, or `None` on a miss, in which case no filesystem
    /// changes are made.
    async fn restore(
        &self,
        paths: &[PathBuf],
        primary_key: &str,
        fallback_prefixes: &[String],
    ) -> ActionResult<Option<String>>;

    /// Save the current contents of `paths` under `key`, replacing any
    /// existing entry with the same key.
    async fn save(&self, paths: &[PathBuf], key: &str) -> ActionResult<()>;
}
