//! Builder for populating a ring in one batch.

use crate::config::RingConfig;
use crate::error::Result;
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::ring::HashRing;

/// Collects configuration and initial nodes, then builds the ring with a
/// single sorted-index rebuild.
///
/// ```rust
/// use hashring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_cubes_per_weight(64)
///     .add_node("cache-a:11211", 1)
///     .add_node("cache-b:11211", 3)
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.cube_count(), 64 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<P: Partitioner = Crc32Partitioner> {
    partitioner: P,
    config: RingConfig,
    nodes: Vec<(String, i64)>,
}

impl RingBuilder<Crc32Partitioner> {
    pub fn new() -> Self {
        Self {
            partitioner: Crc32Partitioner,
            config: RingConfig::default(),
            nodes: Vec::new(),
        }
    }
}

impl Default for RingBuilder<Crc32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    pub fn with_cubes_per_weight(mut self, cubes_per_weight: usize) -> Self {
        self.config.cubes_per_weight = cubes_per_weight;
        self
    }

    pub fn with_config(mut self, config: RingConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the hash function; nodes queued so far are kept.
    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            partitioner,
            config: self.config,
            nodes: self.nodes,
        }
    }

    /// Queue a node. Weight is normalized the same way as [`HashRing::add_node`].
    pub fn add_node(mut self, name: impl Into<String>, weight: i64) -> Self {
        self.nodes.push((name.into(), weight));
        self
    }

    /// Build the ring.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if
    /// the cube count is zero.
    pub fn build(self) -> Result<HashRing<P>> {
        let ring = HashRing::with_partitioner_and_config(self.partitioner, self.config)?;
        if !self.nodes.is_empty() {
            ring.add_nodes(self.nodes);
        }
        Ok(ring)
    }
}
