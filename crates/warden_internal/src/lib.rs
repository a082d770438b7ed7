//! # Warden Internal Library
//!
//! Re-exports the core Warden crates for convenience.

/// Layer 1: Owner-scoped storage primitives.
pub use warden_store;

/// Layer 2: Host registry, teardown fan-out, and telemetry.
pub use warden_host;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use warden_host::{Host, HostError, LogFormat, OwnerLifecycle, Telemetry};
    pub use warden_store::prelude::*;
}
