//! Resource handles.
//!
//! A [`Handle`] identifies a stored resource within one table. Handles are
//! allocated by a [`HandleAllocator`] that counts up monotonically and never
//! reuses a value, so a handle observed once refers to at most one resource
//! for the allocator's entire lifetime.
//!
//! A handle is deliberately not a capability: knowing a handle grants no
//! access without also presenting the matching owner.

use core::fmt;

/// Identifier of a stored resource within one table.
///
/// Opaque and `Copy`. Ordering follows allocation order, so handles from
/// successive insertions compare strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// Creates a handle from its raw value.
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    ///
    /// Intended for log output and FFI boundaries; the value carries no
    /// meaning beyond identity within its table.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`Handle`]s.
///
/// The first allocated handle has raw value 1; zero is never produced, so
/// embedders that must squeeze a handle through an integer-typed boundary
/// can keep zero as their sentinel.
///
/// # Example
///
/// ```
/// use warden_store::handle::HandleAllocator;
///
/// let mut allocator = HandleAllocator::new();
/// let first = allocator.allocate();
/// let second = allocator.allocate();
///
/// assert_eq!(first.raw(), 1);
/// assert!(second > first);
/// ```
#[derive(Debug)]
pub struct HandleAllocator {
    /// Raw value of the next handle to hand out.
    next: u64,
}

impl HandleAllocator {
    /// Creates an allocator starting at handle 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocates a fresh handle, distinct from every handle allocated
    /// before it.
    ///
    /// # Panics
    ///
    /// Panics if the 64-bit handle space is exhausted. At one allocation
    /// per nanosecond that takes centuries, so hitting it means the
    /// allocator state was corrupted.
    pub fn allocate(&mut self) -> Handle {
        let handle = Handle::from_raw(self.next);
        self.next = self
            .next
            .checked_add(1)
            .expect("handle space exhausted: allocator state is corrupt");
        handle
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_start_at_one() {
        let mut allocator = HandleAllocator::new();
        assert_eq!(allocator.allocate().raw(), 1);
    }

    #[test]
    fn handles_are_distinct_and_increasing() {
        let mut allocator = HandleAllocator::new();
        let handles: Vec<_> = (0..100).map(|_| allocator.allocate()).collect();

        for pair in handles.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn display_includes_raw_value() {
        let mut allocator = HandleAllocator::new();
        let handle = allocator.allocate();
        assert_eq!(handle.to_string(), "#1");
    }
}
