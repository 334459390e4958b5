//! Node abstractions for the hash ring.
//!
//! Nodes are identified by caller-supplied opaque strings (typically
//! `"host:port"`). The ring assigns no meaning to the name beyond hashing it.

use std::fmt;

/// Weight used when a caller passes a non-positive weight.
pub const DEFAULT_WEIGHT: usize = 1;

/// A registered node and the weight it was added with.
///
/// Returned by [`HashRing::nodes`](crate::HashRing::nodes); the ring itself
/// keeps names and weights in separate tables.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    /// Caller-supplied identifier.
    pub name: String,
    /// Multiplier on the ring's cubes-per-weight.
    pub weight: usize,
}

impl Node {
    pub fn new(name: impl Into<String>, weight: usize) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (weight {})", self.name, self.weight)
    }
}

/// Map a caller-supplied weight onto the positive range.
///
/// `weight <= 0` becomes [`DEFAULT_WEIGHT`].
#[inline]
pub fn normalize_weight(weight: i64) -> usize {
    if weight <= 0 {
        DEFAULT_WEIGHT
    } else {
        usize::try_from(weight).unwrap_or(usize::MAX)
    }
}
