//! The resource trait.
//!
//! Any value stored in a [`ResourceTable`](crate::table::ResourceTable) or
//! [`ResourceStore`](crate::store::ResourceStore) implements [`Resource`].
//! The trait carries one policy decision: whether the value survives its
//! owner being suspended.

/// A unit of state held on behalf of exactly one owner.
///
/// Implementing the trait is a one-line opt-in:
///
/// ```
/// use warden_store::resource::Resource;
///
/// struct OpenFile {
///     path: String,
/// }
/// impl Resource for OpenFile {}
/// ```
///
/// # Persistence
///
/// A host distinguishes two teardown events for an owner: *suspension*
/// (the owner is idle and may come back) and *unload* (the owner is gone).
/// Persistent resources survive suspension; transient ones do not. Unload
/// always drops everything. Override [`is_persistent`](Self::is_persistent)
/// for state that is meaningless across a suspension, such as a live
/// connection:
///
/// ```
/// use warden_store::resource::Resource;
///
/// struct LiveConnection {
///     peer: String,
/// }
///
/// impl Resource for LiveConnection {
///     fn is_persistent(&self) -> bool {
///         false
///     }
/// }
/// ```
pub trait Resource: Send + Sync + 'static {
    /// Returns whether this resource survives suspension of its owner.
    ///
    /// Defaults to `true`.
    fn is_persistent(&self) -> bool {
        true
    }
}
