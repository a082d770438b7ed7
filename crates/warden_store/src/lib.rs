//! The core owner-scoped storage primitives for Warden (Layer 1).
//!
//! `warden_store` provides the building blocks for holding resources on
//! behalf of third-party principals (extensions, apps, plugins) without ever
//! letting one principal reach a resource created by another:
//!
//! - [`owner`] - Opaque owner identifiers and the access-matching rule
//! - [`handle`] - Process-unique resource handles and their allocator
//! - [`resource`] - The [`Resource`](resource::Resource) trait for stored values
//! - [`table`] - The sequential owner-gated [`ResourceTable`](table::ResourceTable)
//! - [`store`] - The lock-guarded, shareable [`ResourceStore`](store::ResourceStore)
//!
//! # Access Model
//!
//! A handle alone is not a capability. Every lookup supplies the expected
//! owner, and an entry is returned only when the stored owner matches. A
//! mismatch is a normal negative result, indistinguishable from "never
//! existed", so a principal probing foreign handles learns nothing.
//!
//! # Architecture
//!
//! This crate is Layer 1 of the Warden architecture:
//!
//! - **Layer 1** (`warden_store`): Storage primitives (this crate)
//! - **Layer 2** (`warden_host`): Host registry, teardown fan-out, telemetry
//!
//! # Example
//!
//! ```
//! use warden_store::owner::OwnerId;
//! use warden_store::resource::Resource;
//! use warden_store::table::ResourceTable;
//!
//! struct Socket {
//!     port: u16,
//! }
//! impl Resource for Socket {}
//!
//! let mut table = ResourceTable::new();
//! let alpha = OwnerId::new("alpha");
//!
//! let handle = table.insert(alpha.clone(), Socket { port: 8080 });
//!
//! // The owning principal gets its resource back.
//! assert_eq!(table.get(&alpha, handle).map(|s| s.port), Some(8080));
//!
//! // Anyone else gets nothing, even with a valid handle.
//! assert!(table.get(&OwnerId::new("beta"), handle).is_none());
//! ```

/// Opaque owner identifiers and the access-matching rule.
pub mod owner;

/// Process-unique resource handles and their allocator.
pub mod handle;

/// The trait implemented by values stored in a table.
pub mod resource;

/// The sequential owner-gated resource table.
pub mod table;

/// The lock-guarded, shareable resource store.
pub mod store;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::handle::{Handle, HandleAllocator};
    pub use crate::owner::OwnerId;
    pub use crate::resource::Resource;
    pub use crate::store::{ResourceRef, ResourceRefMut, ResourceStore};
    pub use crate::table::ResourceTable;
}
