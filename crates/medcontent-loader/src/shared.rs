//! Copy-on-write sharing of a content collection across threads.

use std::sync::{Arc, PoisonError, RwLock};

use crate::store::ContentStore;

/// A content collection that can be replaced while queries are running.
///
/// Readers take a [`snapshot`](Self::snapshot) and query it for as long as
/// they like; a concurrent [`replace`](Self::replace) swaps in a whole new
/// collection without touching the one readers hold. A collection is never
/// mutated in place.
///
/// # Example
///
/// ```
/// use medcontent_loader::{ContentStore, SharedContentStore};
///
/// let shared = SharedContentStore::new(ContentStore::new());
/// let before = shared.snapshot();
///
/// shared.replace(ContentStore::new());
/// assert_eq!(before.count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct SharedContentStore {
    current: RwLock<Arc<ContentStore>>,
}

impl SharedContentStore {
    /// Wraps an initial collection.
    pub fn new(store: ContentStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// Returns the current collection.
    ///
    /// The snapshot stays valid and unchanged for as long as it is held.
    pub fn snapshot(&self) -> Arc<ContentStore> {
        // The lock only guards a pointer swap, so a poisoned lock still
        // holds a complete collection.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Atomically swaps in a new collection, returning the previous one.
    pub fn replace(&self, store: ContentStore) -> Arc<ContentStore> {
        let next = Arc::new(store);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
