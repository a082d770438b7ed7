//! Owner identifiers.
//!
//! Every resource in a table is tagged with the [`OwnerId`] of the principal
//! that created it, and every lookup must present the expected owner. The
//! identifier is an opaque newtype rather than a bare `String` so it cannot
//! be mixed up with other string-keyed concepts in a host application.

use core::fmt;

/// Identifier of the principal that owns a resource.
///
/// Owners are compared by exact string equality, with one carve-out: the
/// empty identifier is a recognized "nobody" value that never grants access
/// to anything, not even to entries that were stored under the empty
/// identifier. See [`OwnerId::grants`].
///
/// # Example
///
/// ```
/// use warden_store::owner::OwnerId;
///
/// let alpha = OwnerId::new("alpha");
/// assert_eq!(alpha.as_str(), "alpha");
/// assert!(!alpha.is_empty());
///
/// assert!(alpha.grants(&OwnerId::new("alpha")));
/// assert!(!alpha.grants(&OwnerId::new("beta")));
/// assert!(!alpha.grants(&OwnerId::nobody()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an owner identifier from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the empty "nobody" identifier.
    ///
    /// Useful in tests and in callers that must probe a table on behalf of
    /// no principal at all. `nobody` is never granted access to any entry.
    #[must_use]
    pub fn nobody() -> Self {
        Self(String::new())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the empty "nobody" identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if a caller presenting `claimed` may access a resource
    /// stored under `self`.
    ///
    /// Access requires exact equality AND a non-empty claim. The empty
    /// identifier matches nothing, so entries stored under it are
    /// unreachable through any lookup path.
    #[must_use]
    pub fn grants(&self, claimed: &OwnerId) -> bool {
        !claimed.is_empty() && self == claimed
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OwnerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_exact_match() {
        let stored = OwnerId::new("one");
        assert!(stored.grants(&OwnerId::new("one")));
    }

    #[test]
    fn denies_other_owner() {
        let stored = OwnerId::new("one");
        assert!(!stored.grants(&OwnerId::new("two")));
    }

    #[test]
    fn nobody_is_never_granted() {
        let stored = OwnerId::new("one");
        assert!(!stored.grants(&OwnerId::nobody()));

        // The empty identifier does not even match itself.
        let empty = OwnerId::nobody();
        assert!(!empty.grants(&OwnerId::nobody()));
    }

    #[test]
    fn display_and_as_str_agree() {
        let owner = OwnerId::new("alpha");
        assert_eq!(owner.to_string(), owner.as_str());
    }

    #[test]
    fn from_str_and_from_string() {
        let a: OwnerId = "alpha".into();
        let b: OwnerId = String::from("alpha").into();
        assert_eq!(a, b);
    }
}
