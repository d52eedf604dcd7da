//! src/workspace.rs
//!
//! Named blob store shared between workers and the driving thread.
//!
//! A `Workspace` is an explicit, caller-passed context object: construct one,
//! wrap it in `Arc`, and hand clones to worker tasks and lifecycle hooks.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Process-local key-value store, keyed by blob name.
///
/// All operations take `&self`; values are returned by clone so readers never
/// hold the internal lock while using them.
pub struct Workspace<V> {
    blobs: Mutex<HashMap<String, V>>,
}

impl<V: Clone> Workspace<V> {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Inserts `value` under `name`, overwriting any previous blob.
    pub fn feed(&self, name: impl Into<String>, value: V) {
        self.lock_blobs().insert(name.into(), value);
    }

    /// Returns a clone of the blob under `name`, if present.
    pub fn fetch(&self, name: &str) -> Option<V> {
        self.lock_blobs().get(name).cloned()
    }

    pub fn has_blob(&self, name: &str) -> bool {
        self.lock_blobs().contains_key(name)
    }

    /// Removes and returns the blob under `name`.
    pub fn remove(&self, name: &str) -> Option<V> {
        self.lock_blobs().remove(name)
    }

    /// Names of all blobs, sorted for stable output.
    pub fn blob_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock_blobs().keys().cloned().collect();
        names.sort();
        names
    }

    /// Removes every blob.
    pub fn reset(&self) {
        self.lock_blobs().clear();
    }

    fn lock_blobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, V>> {
        // A poisoned lock only means a panic elsewhere while holding it; the
        // map itself is still usable.
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Default for Workspace<V> {
    fn default() -> Self {
        Self::new()
    }
}
