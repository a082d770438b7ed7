//! Owner-scoped resource brokerage for applications that host extensions
//! and plugins.
//!

pub use warden_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use warden_internal::prelude::*;
}
