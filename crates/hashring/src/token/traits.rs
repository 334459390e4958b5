//! Core token trait definitions.

use std::fmt::Debug;
use std::hash::Hash;

/// A position on the hash ring.
///
/// Tokens are immutable, comparable positions. Implementations must be
/// thread-safe and cheap to copy, compare and hash, since the ring index is
/// keyed by them and the sorted index is a plain vector of them.
pub trait Token: Copy + Ord + Hash + Send + Sync + Debug + 'static {
    /// Minimum token value (start of ring).
    fn zero() -> Self;
    /// Maximum token value (end of ring).
    fn max() -> Self;
    /// True if this token is the minimum.
    fn is_zero(&self) -> bool;
    /// True if this token is the maximum.
    fn is_max(&self) -> bool;
    /// Clockwise distance from `self` to `other` on the ring.
    fn distance_to(&self, other: &Self) -> Self;
    /// This token read as a distance, expressed as a fraction of the whole ring.
    fn ring_fraction(&self) -> f64;
}
