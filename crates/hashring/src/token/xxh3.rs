//! XXH3 token for a 64-bit ring.

use crate::token::traits::Token;
use xxhash_rust::xxh3::xxh3_64;

const RING_SIZE: f64 = (u64::MAX as f64) + 1.0;

/// XXH3 token using u64 representation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Xxh3Token(pub u64);

impl Token for Xxh3Token {
    fn zero() -> Self {
        Xxh3Token(0)
    }

    fn max() -> Self {
        Xxh3Token(u64::MAX)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_max(&self) -> bool {
        self.0 == u64::MAX
    }

    fn distance_to(&self, other: &Self) -> Self {
        Xxh3Token(other.0.wrapping_sub(self.0))
    }

    fn ring_fraction(&self) -> f64 {
        self.0 as f64 / RING_SIZE
    }
}

impl Xxh3Token {
    /// Creates a token from a byte slice using XXH3-64.
    pub fn from_bytes(data: &[u8]) -> Self {
        Xxh3Token(xxh3_64(data))
    }

    /// Creates a token from a string key.
    pub fn from_key(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}
