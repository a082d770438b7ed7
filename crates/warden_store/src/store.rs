//! The lock-guarded, shareable resource store.
//!
//! [`ResourceStore`] wraps a [`ResourceTable`] in a single
//! `parking_lot::RwLock`, which is the whole concurrency contract: writers
//! are exclusive, readers are concurrent, and the table's own logic stays
//! sequential. Read access is handed out through RAII guards that hold the
//! lock only for the guard's lifetime.

use core::fmt;
use core::ops::{Deref, DerefMut};

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use crate::handle::Handle;
use crate::owner::OwnerId;
use crate::resource::Resource;
use crate::table::ResourceTable;

/// Thread-safe owner-gated resource store.
///
/// All of [`ResourceTable`]'s operations are available through `&self`, so a
/// store is typically shared as an `Arc<ResourceStore<T>>` across whatever
/// threads service its resource type.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use warden_store::owner::OwnerId;
/// use warden_store::resource::Resource;
/// use warden_store::store::ResourceStore;
///
/// struct Counter {
///     value: i32,
/// }
/// impl Resource for Counter {}
///
/// let store = Arc::new(ResourceStore::new());
/// let owner = OwnerId::new("alpha");
///
/// let handle = store.insert(owner.clone(), Counter { value: 7 });
///
/// // The guard holds the read lock until it is dropped.
/// {
///     let counter = store.get(&owner, handle).unwrap();
///     assert_eq!(counter.value, 7);
/// }
///
/// store.remove(&owner, handle);
/// assert!(store.get(&owner, handle).is_none());
/// ```
pub struct ResourceStore<T: Resource> {
    table: RwLock<ResourceTable<T>>,
}

impl<T: Resource> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> ResourceStore<T> {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ResourceTable::new()),
        }
    }

    /// Stores a resource for `owner` and returns its fresh handle.
    pub fn insert(&self, owner: OwnerId, value: T) -> Handle {
        self.table.write().insert(owner, value)
    }

    /// Returns a read guard over the resource at `handle` if it exists and
    /// is owned by `owner`.
    ///
    /// The negative case releases the read lock immediately.
    #[must_use]
    pub fn get(&self, owner: &OwnerId, handle: Handle) -> Option<ResourceRef<'_, T>> {
        let guard = self.table.read();
        RwLockReadGuard::try_map(guard, |table| table.get(owner, handle))
            .ok()
            .map(|guard| ResourceRef { guard })
    }

    /// Returns a write guard over the resource at `handle` if it exists and
    /// is owned by `owner`.
    #[must_use]
    pub fn get_mut(&self, owner: &OwnerId, handle: Handle) -> Option<ResourceRefMut<'_, T>> {
        let guard = self.table.write();
        RwLockWriteGuard::try_map(guard, |table| table.get_mut(owner, handle))
            .ok()
            .map(|guard| ResourceRefMut { guard })
    }

    /// Replaces the resource at `handle` in place, returning the old value.
    ///
    /// Owner-gated exactly like [`ResourceTable::replace`].
    pub fn replace(&self, owner: &OwnerId, handle: Handle, value: T) -> Option<T> {
        self.table.write().replace(owner, handle, value)
    }

    /// Removes and returns the resource at `handle` if `owner` matches.
    pub fn remove(&self, owner: &OwnerId, handle: Handle) -> Option<T> {
        self.table.write().remove(owner, handle)
    }

    /// Returns `true` if `handle` exists and is owned by `owner`.
    #[must_use]
    pub fn contains(&self, owner: &OwnerId, handle: Handle) -> bool {
        self.table.read().contains(owner, handle)
    }

    /// Returns the live handles belonging to `owner`, in allocation order.
    #[must_use]
    pub fn handles_of(&self, owner: &OwnerId) -> Vec<Handle> {
        self.table.read().handles_of(owner)
    }

    /// Drops every resource belonging to `owner`; returns the count.
    pub fn remove_owner(&self, owner: &OwnerId) -> usize {
        self.table.write().remove_owner(owner)
    }

    /// Drops the non-persistent resources of `owner`; returns the count.
    pub fn remove_transient(&self, owner: &OwnerId) -> usize {
        self.table.write().remove_transient(owner)
    }

    /// Returns the number of live entries across all owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Drops every entry for every owner.
    pub fn clear(&self) {
        self.table.write().clear();
    }
}

impl<T: Resource> fmt::Debug for ResourceStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStore")
            .field("table", &*self.table.read())
            .finish()
    }
}

/// RAII guard for read access to one stored resource.
///
/// Returned by [`ResourceStore::get`]; the store's read lock is released
/// when the guard is dropped.
pub struct ResourceRef<'a, T: Resource> {
    guard: MappedRwLockReadGuard<'a, T>,
}

impl<T: Resource> Deref for ResourceRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// RAII guard for write access to one stored resource.
///
/// Returned by [`ResourceStore::get_mut`]; the store's write lock is
/// released when the guard is dropped.
pub struct ResourceRefMut<'a, T: Resource> {
    guard: MappedRwLockWriteGuard<'a, T>,
}

impl<T: Resource> Deref for ResourceRefMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T: Resource> DerefMut for ResourceRefMut<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: i32,
    }
    impl Resource for Counter {}

    #[test]
    fn insert_and_get_through_guard() {
        let store = ResourceStore::new();
        let owner = OwnerId::new("alpha");

        let handle = store.insert(owner.clone(), Counter { value: 42 });
        let counter = store.get(&owner, handle).unwrap();
        assert_eq!(counter.value, 42);
    }

    #[test]
    fn wrong_owner_gets_no_guard() {
        let store = ResourceStore::new();
        let handle = store.insert(OwnerId::new("alpha"), Counter { value: 1 });

        assert!(store.get(&OwnerId::new("beta"), handle).is_none());
        assert!(store.get(&OwnerId::nobody(), handle).is_none());
    }

    #[test]
    fn get_mut_modifies_through_guard() {
        let store = ResourceStore::new();
        let owner = OwnerId::new("alpha");
        let handle = store.insert(owner.clone(), Counter { value: 0 });

        {
            let mut counter = store.get_mut(&owner, handle).unwrap();
            counter.value += 10;
        }

        assert_eq!(store.get(&owner, handle).unwrap().value, 10);
    }

    #[test]
    fn negative_lookup_releases_the_lock() {
        let store = ResourceStore::new();
        let owner = OwnerId::new("alpha");
        let handle = store.insert(owner.clone(), Counter { value: 1 });

        // A failed get must not leave a read lock behind, or this write
        // would deadlock.
        assert!(store.get(&OwnerId::new("beta"), handle).is_none());
        store.insert(owner, Counter { value: 2 });
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_and_teardown_mirror_the_table() {
        let store = ResourceStore::new();
        let alpha = OwnerId::new("alpha");
        let beta = OwnerId::new("beta");

        let a = store.insert(alpha.clone(), Counter { value: 1 });
        store.insert(alpha.clone(), Counter { value: 2 });
        let b = store.insert(beta.clone(), Counter { value: 3 });

        assert_eq!(store.remove(&alpha, a).map(|c| c.value), Some(1));
        assert_eq!(store.remove_owner(&alpha), 1);
        assert!(store.contains(&beta, b));
        assert_eq!(store.handles_of(&beta), vec![b]);
    }

    #[test]
    fn multiple_read_guards_coexist() {
        let store = ResourceStore::new();
        let owner = OwnerId::new("alpha");
        let handle = store.insert(owner.clone(), Counter { value: 9 });

        let first = store.get(&owner, handle).unwrap();
        let second = store.get(&owner, handle).unwrap();
        assert_eq!(first.value, second.value);
    }
}
