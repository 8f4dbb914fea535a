//! Application resolution for MIME types
//!
//! Queries run against an immutable snapshot of registry plus index.
//! Rebuilding publishes a whole new snapshot by swapping one reference, so
//! concurrent readers see the old state or the new state, never a mix.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::associations::{AssociationIndex, load_overrides};
use crate::mime;
use crate::registry::{ApplicationDescriptor, Registry};

/// One complete, immutable resolution state
#[derive(Debug, Default)]
pub struct Snapshot {
    registry: Registry,
    index: AssociationIndex,
}

impl Snapshot {
    /// Scan descriptor directories and layer the override list on top
    pub fn build(directories: &[PathBuf], overrides_path: Option<&PathBuf>) -> Self {
        let registry = Registry::scan(directories);
        let overrides = overrides_path
            .map(|p| load_overrides(p))
            .unwrap_or_default();
        let index = AssociationIndex::build(&registry, &overrides);
        Self { registry, index }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Ordered applications able to open the given MIME type.
    ///
    /// Exact entry first, `major/*` wildcard as fallback; an unknown type
    /// yields an empty vec. Hidden and stale ids are filtered out and the
    /// surviving default, if any, leads the result.
    pub fn apps_for(&self, mime_type: &str) -> Vec<ApplicationDescriptor> {
        let entry = match self.index.get(mime_type) {
            Some(entry) => entry,
            None => {
                let Some(wild) = mime::wildcard(mime_type) else {
                    return Vec::new();
                };
                match self.index.get(&wild) {
                    Some(entry) => entry,
                    None => return Vec::new(),
                }
            }
        };

        let mut apps: Vec<ApplicationDescriptor> = Vec::new();
        for id in entry.ids() {
            let Some(descriptor) = self.registry.get(id) else {
                tracing::debug!("dropping stale association id `{}`", id);
                continue;
            };
            if descriptor.hidden || apps.iter().any(|a| a.id == descriptor.id) {
                continue;
            }
            apps.push(descriptor.clone());
        }

        if let Some(default_id) = entry.default_id()
            && let Some(pos) = apps.iter().position(|a| a.id == default_id)
            && pos > 0
        {
            let default = apps.remove(pos);
            apps.insert(0, default);
        }

        apps
    }
}

/// Query-time facade over the current snapshot
pub struct Resolver {
    directories: Vec<PathBuf>,
    overrides_path: Option<PathBuf>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl Resolver {
    /// Build the initial snapshot from descriptor directories (earliest
    /// wins) and an optional override list
    pub fn new(directories: Vec<PathBuf>, overrides_path: Option<PathBuf>) -> Self {
        let snapshot = Snapshot::build(&directories, overrides_path.as_ref());
        Self {
            directories,
            overrides_path,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot current at this moment; safe to query concurrently
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().unwrap().clone()
    }

    pub fn apps_for(&self, mime_type: &str) -> Vec<ApplicationDescriptor> {
        self.snapshot().apps_for(mime_type)
    }

    /// Re-scan and atomically publish the result.
    ///
    /// Idempotent; picks up descriptors installed since the last scan.
    pub fn rebuild(&self) {
        let snapshot = Snapshot::build(&self.directories, self.overrides_path.as_ref());
        *self.snapshot.write().unwrap() = Arc::new(snapshot);
    }
}
