//! Weighted consistent-hash ring.
//!
//! Maps string keys onto a dynamic set of named nodes so that adding or
//! removing a node only moves the keys that node gains or loses, and heavier
//! nodes receive proportionally more keys.
//!
//! This crate provides:
//! - Token types and implementations
//! - Partitioner algorithms (CRC-32 by default, XXH3 for a 64-bit ring)
//! - Node and virtual node ("cube") abstractions
//! - The thread-safe [`HashRing`] and its [`RingBuilder`]
//!
//! The ring holds no global state. Callers that want a process-wide ring keep
//! one in their own static.

pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod vnode;

pub use config::{RingConfig, DEFAULT_CUBES_PER_WEIGHT, MAX_CUBES_PER_NODE};
pub use error::{Error, Result};
pub use node::Node;
pub use partitioner::{Crc32Partitioner, Partitioner, Xxh3Partitioner};
pub use ring::{HashRing, RingBuilder};
pub use token::{Crc32Token, Token, Xxh3Token};
pub use vnode::VirtualNode;
