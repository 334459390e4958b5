//! XXH3 partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::xxh3::Xxh3Token;

/// XXH3-64 partitioner for a 64-bit ring.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    type TokenType = Xxh3Token;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        Xxh3Token::from_bytes(key)
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
