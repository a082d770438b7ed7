//! Host-side plumbing for Warden (Layer 2).
//!
//! This crate provides what an embedding application needs around the core
//! stores of `warden_store`:
//!
//! - [`Host`] - A registry holding one [`ResourceStore`] per resource type,
//!   with typed lookup and owner-lifecycle teardown fan-out
//! - [`OwnerLifecycle`] - The teardown hooks a registered store implements
//! - [`Telemetry`] - Logging and observability setup via the `tracing` crate
//!
//! # Teardown Model
//!
//! The host distinguishes two lifecycle events for an owner. **Unload**
//! means the owner is gone: every store drops everything it holds for that
//! owner. **Suspend** means the owner is idle and may return: stores drop
//! only resources whose `is_persistent()` is `false`. The embedding
//! application translates its own notifications (an extension being
//! uninstalled, an app going to sleep) into these two calls; nothing else
//! is required for cleanup.
//!
//! # Example
//!
//! ```
//! use warden_host::Host;
//! use warden_store::owner::OwnerId;
//! use warden_store::resource::Resource;
//!
//! struct Socket {
//!     port: u16,
//! }
//! impl Resource for Socket {}
//!
//! let mut host = Host::new();
//! let sockets = host.register::<Socket>().unwrap();
//!
//! let owner = OwnerId::new("alpha");
//! sockets.insert(owner.clone(), Socket { port: 8080 });
//!
//! // The owner goes away; the host purges everything it held.
//! assert_eq!(host.owner_unloaded(&owner), 1);
//! assert!(sockets.is_empty());
//! ```

mod host;
mod telemetry;

pub use host::{Host, HostError, OwnerLifecycle};
pub use telemetry::{LogFormat, Telemetry};

// Re-exported so embedders depending only on this crate can name the core
// types that appear in the Host API.
pub use warden_store::store::ResourceStore;
