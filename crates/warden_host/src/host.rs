//! The host registry and owner teardown fan-out.
//!
//! A [`Host`] owns one [`ResourceStore`] per resource type and is the single
//! place an embedding application reports owner lifecycle events to. The
//! host is an explicit instance held by the embedder; there is deliberately
//! no process-wide singleton.

use core::any::{Any, TypeId};
use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use warden_store::owner::OwnerId;
use warden_store::resource::Resource;
use warden_store::store::ResourceStore;

// ─────────────────────────────────────────────────────────────────────────────
// OwnerLifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// Teardown hooks the host invokes on every registered store.
///
/// Implemented for [`ResourceStore`]; custom store-like containers can
/// implement it to participate in the same fan-out. Both hooks return the
/// number of resources dropped, which the host logs.
pub trait OwnerLifecycle: Send + Sync {
    /// The owner is gone for good; drop everything it owns.
    fn owner_unloaded(&self, owner: &OwnerId) -> usize;

    /// The owner is suspended and may return; drop only its non-persistent
    /// resources.
    fn owner_suspended(&self, owner: &OwnerId) -> usize;
}

impl<T: Resource> OwnerLifecycle for ResourceStore<T> {
    fn owner_unloaded(&self, owner: &OwnerId) -> usize {
        self.remove_owner(owner)
    }

    fn owner_suspended(&self, owner: &OwnerId) -> usize {
        self.remove_transient(owner)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HostError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during host registry operations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// No store was registered for the requested resource type.
    #[error("no store registered for resource type: {0}")]
    StoreNotRegistered(&'static str),

    /// A store for this resource type already exists.
    #[error("store already registered for resource type: {0}")]
    StoreAlreadyRegistered(&'static str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Host
// ─────────────────────────────────────────────────────────────────────────────

/// Internal entry for a registered store.
struct RegisteredStore {
    /// The store behind a type-erased handle, for typed lookup.
    store: Arc<dyn Any + Send + Sync>,
    /// The same store behind its teardown hooks, for the fan-out.
    lifecycle: Arc<dyn OwnerLifecycle>,
    /// The resource type's name (cached for log output and errors).
    type_name: &'static str,
}

/// Registry of one [`ResourceStore`] per resource type, plus the owner
/// teardown fan-out.
///
/// # Example
///
/// ```
/// use warden_host::Host;
/// use warden_store::owner::OwnerId;
/// use warden_store::resource::Resource;
///
/// struct Socket {
///     port: u16,
/// }
/// impl Resource for Socket {}
///
/// struct Timer {
///     interval_ms: u64,
/// }
/// impl Resource for Timer {
///     fn is_persistent(&self) -> bool {
///         false
///     }
/// }
///
/// let mut host = Host::new();
/// let sockets = host.register::<Socket>().unwrap();
/// let timers = host.register::<Timer>().unwrap();
///
/// let owner = OwnerId::new("alpha");
/// sockets.insert(owner.clone(), Socket { port: 8080 });
/// timers.insert(owner.clone(), Timer { interval_ms: 100 });
///
/// // Suspension drops only the transient timer; the socket persists.
/// assert_eq!(host.owner_suspended(&owner), 1);
/// assert_eq!(sockets.len(), 1);
/// assert!(timers.is_empty());
/// ```
#[derive(Default)]
pub struct Host {
    stores: HashMap<TypeId, RegisteredStore>,
}

impl Host {
    /// Creates a new host with no registered stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Creates and registers the store for resource type `T`, returning a
    /// shared handle to it.
    ///
    /// # Errors
    ///
    /// [`HostError::StoreAlreadyRegistered`] if a store for `T` exists.
    pub fn register<T: Resource>(&mut self) -> Result<Arc<ResourceStore<T>>, HostError> {
        let type_id = TypeId::of::<T>();
        let type_name = core::any::type_name::<T>();

        if self.stores.contains_key(&type_id) {
            return Err(HostError::StoreAlreadyRegistered(type_name));
        }

        let store = Arc::new(ResourceStore::<T>::new());
        self.stores.insert(
            type_id,
            RegisteredStore {
                store: Arc::clone(&store) as Arc<dyn Any + Send + Sync>,
                lifecycle: Arc::clone(&store) as Arc<dyn OwnerLifecycle>,
                type_name,
            },
        );

        tracing::debug!(store = type_name, "registered resource store");
        Ok(store)
    }

    /// Returns the registered store for resource type `T`.
    ///
    /// # Errors
    ///
    /// [`HostError::StoreNotRegistered`] if no store for `T` exists.
    pub fn store<T: Resource>(&self) -> Result<Arc<ResourceStore<T>>, HostError> {
        let type_name = core::any::type_name::<T>();
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| Arc::clone(&entry.store).downcast::<ResourceStore<T>>().ok())
            .ok_or(HostError::StoreNotRegistered(type_name))
    }

    /// Returns `true` if a store for resource type `T` is registered.
    #[must_use]
    pub fn contains<T: Resource>(&self) -> bool {
        self.stores.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered stores.
    #[must_use]
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Reports that `owner` has been unloaded.
    ///
    /// Fans out to every registered store, dropping everything the owner
    /// held anywhere in the host. Returns the total number of resources
    /// dropped. Unknown owners (and the empty owner) purge nothing.
    pub fn owner_unloaded(&self, owner: &OwnerId) -> usize {
        let mut purged = 0;
        for entry in self.stores.values() {
            let count = entry.lifecycle.owner_unloaded(owner);
            if count > 0 {
                tracing::debug!(
                    owner = %owner,
                    store = entry.type_name,
                    count,
                    "purged resources on unload"
                );
            }
            purged += count;
        }
        if purged > 0 {
            tracing::info!(owner = %owner, purged, "owner unloaded");
        }
        purged
    }

    /// Reports that `owner` has been suspended.
    ///
    /// Fans out to every registered store, dropping the owner's
    /// non-persistent resources. Returns the total number dropped.
    pub fn owner_suspended(&self, owner: &OwnerId) -> usize {
        let mut purged = 0;
        for entry in self.stores.values() {
            let count = entry.lifecycle.owner_suspended(owner);
            if count > 0 {
                tracing::debug!(
                    owner = %owner,
                    store = entry.type_name,
                    count,
                    "purged transient resources on suspend"
                );
            }
            purged += count;
        }
        if purged > 0 {
            tracing::info!(owner = %owner, purged, "owner suspended");
        }
        purged
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.stores.values().map(|entry| entry.type_name).collect();
        f.debug_struct("Host").field("stores", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Socket {
        port: u16,
    }
    impl Resource for Socket {}

    struct Timer;
    impl Resource for Timer {
        fn is_persistent(&self) -> bool {
            false
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut host = Host::new();
        let registered = host.register::<Socket>().unwrap();

        let owner = OwnerId::new("alpha");
        let handle = registered.insert(owner.clone(), Socket { port: 80 });

        // The looked-up store is the same store.
        let looked_up = host.store::<Socket>().unwrap();
        assert_eq!(looked_up.get(&owner, handle).unwrap().port, 80);
        assert!(Arc::ptr_eq(&registered, &looked_up));
    }

    #[test]
    fn double_registration_is_an_error() {
        let mut host = Host::new();
        host.register::<Socket>().unwrap();

        let result = host.register::<Socket>();
        assert!(matches!(result, Err(HostError::StoreAlreadyRegistered(_))));
    }

    #[test]
    fn unknown_store_lookup_is_an_error() {
        let host = Host::new();
        let result = host.store::<Socket>();
        assert!(matches!(result, Err(HostError::StoreNotRegistered(_))));
        assert!(!host.contains::<Socket>());
    }

    #[test]
    fn unload_purges_across_stores() {
        let mut host = Host::new();
        let sockets = host.register::<Socket>().unwrap();
        let timers = host.register::<Timer>().unwrap();

        let alpha = OwnerId::new("alpha");
        let beta = OwnerId::new("beta");

        sockets.insert(alpha.clone(), Socket { port: 1 });
        sockets.insert(alpha.clone(), Socket { port: 2 });
        timers.insert(alpha.clone(), Timer);
        let survivor = sockets.insert(beta.clone(), Socket { port: 3 });

        assert_eq!(host.owner_unloaded(&alpha), 3);
        assert!(sockets.contains(&beta, survivor));
        assert!(timers.is_empty());
    }

    #[test]
    fn suspend_purges_only_transient_resources() {
        let mut host = Host::new();
        let sockets = host.register::<Socket>().unwrap();
        let timers = host.register::<Timer>().unwrap();

        let owner = OwnerId::new("alpha");
        sockets.insert(owner.clone(), Socket { port: 1 });
        timers.insert(owner.clone(), Timer);
        timers.insert(owner.clone(), Timer);

        assert_eq!(host.owner_suspended(&owner), 2);
        assert_eq!(sockets.len(), 1);
        assert!(timers.is_empty());

        // A later unload still drops the persistent remainder.
        assert_eq!(host.owner_unloaded(&owner), 1);
        assert!(sockets.is_empty());
    }

    #[test]
    fn lifecycle_events_for_unknown_owner_purge_nothing() {
        let mut host = Host::new();
        host.register::<Socket>().unwrap();

        assert_eq!(host.owner_unloaded(&OwnerId::new("ghost")), 0);
        assert_eq!(host.owner_suspended(&OwnerId::new("ghost")), 0);
        assert_eq!(host.owner_unloaded(&OwnerId::nobody()), 0);
    }

    #[test]
    fn debug_lists_registered_store_types() {
        let mut host = Host::new();
        host.register::<Socket>().unwrap();

        let rendered = format!("{host:?}");
        assert!(rendered.contains("Socket"));
        assert_eq!(host.store_count(), 1);
    }
}
