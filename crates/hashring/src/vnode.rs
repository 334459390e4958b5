//! Virtual node ("cube") abstractions.
//!
//! # Cubes
//!
//! A node does not sit on the ring once. It occupies `weight × cubes_per_weight`
//! virtual positions, each obtained by hashing `"<node>#<index>"`. This gives:
//!
//! 1. **Smooth distribution**: many small arcs average out hash variance
//! 2. **Weighting**: a node of weight 3 owns roughly three times the arcs of a
//!    node of weight 1
//! 3. **Minimal disruption**: removing a node only frees its own arcs, which
//!    are absorbed by their clockwise neighbours
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(V) where V = total cubes on the ring
//! - **Lookup**: O(log V)
//! - **Rebuild**: O(V log V) after every mutation
//!
//! Cube keys are regenerated (never stored) on removal, which is why the ring
//! keeps each node's weight.

use crate::partitioner::Partitioner;
use crate::token::Token;

/// Separator between node name and cube index in the hashed key.
pub const CUBE_SEPARATOR: char = '#';

/// Build the hashed key for a node's `index`th cube: `"<node>#<index>"`.
///
/// # Example
///
/// ```rust
/// use hashring::vnode::cube_key;
///
/// assert_eq!(cube_key("192.168.1.10", 7), "192.168.1.10#7");
/// ```
pub fn cube_key(node: &str, index: usize) -> String {
    format!("{}{}{}", node, CUBE_SEPARATOR, index)
}

/// Tokens of cubes `0..count` for `node`, in index order.
pub(crate) fn cube_tokens<'a, P: Partitioner>(
    partitioner: &'a P,
    node: &'a str,
    count: usize,
) -> impl Iterator<Item = P::TokenType> + 'a {
    (0..count).map(move |index| partitioner.partition(cube_key(node, index).as_bytes()))
}

/// A virtual node on the hash ring.
///
/// Represents a single position owned by a physical node. The owner's name is
/// not stored here; the ring index maps tokens back to names.
///
/// # Invariants
///
/// - `token == partitioner.partition(cube_key(node, index))` for the owning node
/// - Ordered by token first, so a sorted `Vec<VirtualNode<_>>` is in ring order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode<T: Token> {
    /// Position on the ring.
    pub token: T,
    /// Cube index within the owning node, in `0..weight × cubes_per_weight`.
    pub index: usize,
}

impl<T: Token> VirtualNode<T> {
    #[inline]
    pub fn new(token: T, index: usize) -> Self {
        Self { token, index }
    }

    /// Create the `index`th virtual node of `node` by hashing its cube key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashring::partitioner::Crc32Partitioner;
    /// use hashring::VirtualNode;
    ///
    /// let v0 = VirtualNode::from_index(&Crc32Partitioner, "node1", 0);
    /// let v1 = VirtualNode::from_index(&Crc32Partitioner, "node1", 1);
    /// assert_ne!(v0.token, v1.token);
    /// ```
    pub fn from_index<P>(partitioner: &P, node: &str, index: usize) -> Self
    where
        P: Partitioner<TokenType = T>,
    {
        let token = partitioner.partition(cube_key(node, index).as_bytes());
        Self::new(token, index)
    }

    #[inline]
    pub fn token(&self) -> T {
        self.token
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Clockwise distance to another virtual node.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> T {
        self.token.distance_to(&other.token)
    }
}
