//! # Shared snapshot
//!
//! A handle that publishes whole snapshots to concurrent readers.
//!
//! Readers pin the current `Arc<Snapshot>` for a query session; a rebuild
//! swaps in a complete new value. There is no way to mutate the published
//! snapshot in place, so a query never observes half of a rebuild.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::resolver::PermissionResolver;
use crate::snapshot::Snapshot;

/// Atomically swappable snapshot shared between one builder and many readers.
///
/// # Example
///
/// ```
/// use acl_engine::{PermissionResolver, SharedSnapshot, Snapshot};
///
/// let shared = SharedSnapshot::new(Snapshot::new().with_role("admin", ["p1"]));
/// let pinned = shared.load();
///
/// let version = shared.replace(Snapshot::new());
///
/// // The pinned session still sees the snapshot it started with.
/// assert!(PermissionResolver::new(&pinned).has_root_role("admin"));
/// assert!(!PermissionResolver::new(&shared.load()).has_root_role("admin"));
/// assert_eq!(version, 1);
/// ```
pub struct SharedSnapshot {
    sender: watch::Sender<Arc<Snapshot>>,
    version: AtomicU64,
}

impl SharedSnapshot {
    /// Publish `snapshot` as version 0.
    pub fn new(snapshot: Snapshot) -> Self {
        let (sender, _) = watch::channel(Arc::new(snapshot));
        Self {
            sender,
            version: AtomicU64::new(0),
        }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<Snapshot> {
        self.sender.borrow().clone()
    }

    /// The current snapshot together with its version.
    ///
    /// Both are read under the channel lock, so the pair always matches.
    pub fn load_versioned(&self) -> (u64, Arc<Snapshot>) {
        let current = self.sender.borrow();
        (self.version.load(Ordering::Acquire), current.clone())
    }

    /// Replace the published snapshot.
    ///
    /// # Returns
    ///
    /// The version assigned to `snapshot`
    pub fn replace(&self, snapshot: Snapshot) -> u64 {
        let snapshot = Arc::new(snapshot);
        let mut version = 0;

        // Bump and swap under the channel's write lock.
        self.sender.send_modify(|current| {
            version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
            *current = snapshot;
        });

        tracing::debug!(version, "Published permission snapshot");
        version
    }

    /// Number of replacements since creation.
    pub fn version(&self) -> u64 {
        let _current = self.sender.borrow();
        self.version.load(Ordering::Acquire)
    }

    /// Receiver notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.sender.subscribe()
    }

    /// Run `query` against the current snapshot.
    ///
    /// The snapshot is pinned for the duration of the closure.
    pub fn with_resolver<R>(&self, query: impl FnOnce(PermissionResolver<'_>) -> R) -> R {
        let snapshot = self.load();
        query(PermissionResolver::new(&snapshot))
    }
}

impl std::fmt::Debug for SharedSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSnapshot")
            .field("version", &self.version())
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl Default for SharedSnapshot {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}
