//! The sequential owner-gated resource table.
//!
//! [`ResourceTable`] is the heart of the crate: a mapping from [`Handle`] to
//! `(OwnerId, resource)` in which every read and every removal is gated on
//! the caller presenting the stored owner. It has no interior locking; wrap
//! it in a [`ResourceStore`](crate::store::ResourceStore) to share it across
//! threads.

use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::handle::{Handle, HandleAllocator};
use crate::owner::OwnerId;
use crate::resource::Resource;

/// One stored entry: the owning principal and its value.
struct Slot<T> {
    owner: OwnerId,
    value: T,
}

/// Owner-gated mapping from handles to resources.
///
/// # Access Model
///
/// Handles are allocated monotonically and never reused for the table's
/// lifetime, but a handle alone grants nothing: lookups return `None` unless
/// the presented owner equals the stored owner. An owner mismatch is
/// indistinguishable from the handle never having existed, so negative
/// results leak no information across principals.
///
/// # Capacity
///
/// The table is unbounded. There is no eviction and no implicit expiry;
/// entries leave only through [`remove`](Self::remove), the owner-teardown
/// operations, or [`clear`](Self::clear).
///
/// # Example
///
/// ```
/// use warden_store::owner::OwnerId;
/// use warden_store::resource::Resource;
/// use warden_store::table::ResourceTable;
///
/// struct Counter {
///     value: i32,
/// }
/// impl Resource for Counter {}
///
/// let mut table = ResourceTable::new();
/// let owner = OwnerId::new("alpha");
///
/// let handle = table.insert(owner.clone(), Counter { value: 7 });
/// assert_eq!(table.get(&owner, handle).map(|c| c.value), Some(7));
///
/// table.remove(&owner, handle);
/// assert!(table.get(&owner, handle).is_none());
/// ```
pub struct ResourceTable<T: Resource> {
    /// Live entries, keyed by handle.
    slots: HashMap<Handle, Slot<T>>,
    /// Index of live handles per owner, kept consistent with `slots`.
    by_owner: HashMap<OwnerId, HashSet<Handle>>,
    /// Source of fresh handles; keeps counting across `clear()`.
    allocator: HandleAllocator,
}

impl<T: Resource> Default for ResourceTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> ResourceTable<T> {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            by_owner: HashMap::new(),
            allocator: HandleAllocator::new(),
        }
    }

    /// Stores a resource for `owner` and returns its fresh handle.
    ///
    /// Never fails. Handles from successive calls are strictly increasing.
    ///
    /// Storing under the empty owner is permitted but pointless: the entry
    /// occupies the table yet no lookup path can ever match it (see
    /// [`OwnerId::grants`]).
    pub fn insert(&mut self, owner: OwnerId, value: T) -> Handle {
        let handle = self.allocator.allocate();
        self.by_owner.entry(owner.clone()).or_default().insert(handle);
        self.slots.insert(handle, Slot { owner, value });
        handle
    }

    /// Returns the resource at `handle` if it exists and is owned by `owner`.
    ///
    /// `None` covers every negative case equally: unknown handle, owner
    /// mismatch, or an empty `owner`.
    #[must_use]
    pub fn get(&self, owner: &OwnerId, handle: Handle) -> Option<&T> {
        self.slots
            .get(&handle)
            .filter(|slot| slot.owner.grants(owner))
            .map(|slot| &slot.value)
    }

    /// Mutable variant of [`get`](Self::get), gated on the same owner check.
    #[must_use]
    pub fn get_mut(&mut self, owner: &OwnerId, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(&handle)
            .filter(|slot| slot.owner.grants(owner))
            .map(|slot| &mut slot.value)
    }

    /// Replaces the resource at `handle` in place, returning the old value.
    ///
    /// The handle and the stored owner are unchanged. Returns `None` without
    /// touching the table if the handle is unknown or `owner` does not match.
    pub fn replace(&mut self, owner: &OwnerId, handle: Handle, value: T) -> Option<T> {
        let slot = self.slots.get_mut(&handle)?;
        if !slot.owner.grants(owner) {
            return None;
        }
        Some(core::mem::replace(&mut slot.value, value))
    }

    /// Removes and returns the resource at `handle` if `owner` matches.
    ///
    /// A mismatch or unknown handle is a no-op returning `None`; removing
    /// the same handle twice yields `None` the second time.
    pub fn remove(&mut self, owner: &OwnerId, handle: Handle) -> Option<T> {
        if !self
            .slots
            .get(&handle)
            .is_some_and(|slot| slot.owner.grants(owner))
        {
            return None;
        }

        let slot = self.slots.remove(&handle)?;
        self.unindex(&slot.owner, handle);
        Some(slot.value)
    }

    /// Returns `true` if `handle` exists and is owned by `owner`.
    #[must_use]
    pub fn contains(&self, owner: &OwnerId, handle: Handle) -> bool {
        self.get(owner, handle).is_some()
    }

    /// Returns the live handles belonging to `owner`, in allocation order.
    ///
    /// Empty for an unknown owner, and always empty for the empty owner.
    #[must_use]
    pub fn handles_of(&self, owner: &OwnerId) -> Vec<Handle> {
        if owner.is_empty() {
            return Vec::new();
        }
        let mut handles: Vec<Handle> = self
            .by_owner
            .get(owner)
            .into_iter()
            .flatten()
            .copied()
            .collect();
        handles.sort_unstable();
        handles
    }

    /// Drops every resource belonging to `owner` and returns how many were
    /// dropped.
    ///
    /// This is the unload half of owner teardown: nothing of the owner
    /// survives. A no-op for unknown owners and for the empty owner.
    pub fn remove_owner(&mut self, owner: &OwnerId) -> usize {
        if owner.is_empty() {
            return 0;
        }
        let Some(handles) = self.by_owner.remove(owner) else {
            return 0;
        };
        let count = handles.len();
        for handle in handles {
            self.slots.remove(&handle);
        }
        count
    }

    /// Drops the non-persistent resources belonging to `owner` and returns
    /// how many were dropped.
    ///
    /// This is the suspend half of owner teardown: resources whose
    /// [`is_persistent`](Resource::is_persistent) returns `true` stay put.
    /// A no-op for unknown owners and for the empty owner.
    pub fn remove_transient(&mut self, owner: &OwnerId) -> usize {
        if owner.is_empty() {
            return 0;
        }
        let Some(handles) = self.by_owner.get(owner) else {
            return 0;
        };

        let transient: Vec<Handle> = handles
            .iter()
            .copied()
            .filter(|handle| {
                self.slots
                    .get(handle)
                    .is_some_and(|slot| !slot.value.is_persistent())
            })
            .collect();

        for handle in &transient {
            self.slots.remove(handle);
            self.unindex(owner, *handle);
        }
        transient.len()
    }

    /// Returns the number of live entries across all owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops every entry for every owner.
    ///
    /// The handle allocator keeps counting, so handles are still never
    /// reused after a clear.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.by_owner.clear();
    }

    /// Removes `handle` from the per-owner index, dropping the owner's set
    /// once it is empty.
    fn unindex(&mut self, owner: &OwnerId, handle: Handle) {
        if let Some(handles) = self.by_owner.get_mut(owner) {
            handles.remove(&handle);
            if handles.is_empty() {
                self.by_owner.remove(owner);
            }
        }
    }
}

impl<T: Resource> fmt::Debug for ResourceTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceTable")
            .field("entries", &self.slots.len())
            .field("owners", &self.by_owner.len())
            .finish()
    }
}
