//! CRC-32 token: the default 32-bit ring.

use crate::token::traits::Token;

/// Size of the 32-bit hash space.
const RING_SIZE: f64 = (u32::MAX as f64) + 1.0;

/// CRC-32 (IEEE) token using u32 representation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Crc32Token(pub u32);

impl Token for Crc32Token {
    fn zero() -> Self {
        Crc32Token(0)
    }

    fn max() -> Self {
        Crc32Token(u32::MAX)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_max(&self) -> bool {
        self.0 == u32::MAX
    }

    fn distance_to(&self, other: &Self) -> Self {
        Crc32Token(other.0.wrapping_sub(self.0))
    }

    fn ring_fraction(&self) -> f64 {
        f64::from(self.0) / RING_SIZE
    }
}

impl Crc32Token {
    /// Creates a token from a byte slice using the IEEE CRC-32 checksum.
    pub fn from_bytes(data: &[u8]) -> Self {
        Crc32Token(crc32fast::hash(data))
    }

    /// Creates a token from a string key.
    pub fn from_key(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}
