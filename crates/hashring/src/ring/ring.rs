//! Weighted consistent-hash ring.
//!
//! Each node occupies `weight × cubes_per_weight` virtual positions. A key is
//! owned by the node holding the first position clockwise after the key's
//! token, wrapping past the largest position back to the smallest.
//!
//! # Concurrency
//!
//! One `RwLock` guards the whole [`RingState`]. Mutations take the write guard
//! for their full duration, including the sorted-index rebuild, so readers
//! never see a ring index and sorted index that disagree. Lookups share the
//! read guard. No method calls another locking method while holding a guard.
//!
//! # Re-adding a node
//!
//! `add_node` does not replace an existing node's cubes. Re-adding a name
//! with a different weight leaves the old cubes on the ring, and a later
//! `remove_node` only clears as many cubes as the latest weight covers.
//! Remove a node before re-adding it with a new weight.

use std::collections::{HashMap, HashSet};
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::{RingConfig, MAX_CUBES_PER_NODE};
use crate::error::{Error, Result};
use crate::node::{normalize_weight, Node};
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::token::Token;
use crate::ring::state::RingState;
use crate::vnode::VirtualNode;

/// Thread-safe weighted consistent-hash ring.
///
/// # Example
///
/// ```rust
/// use hashring::HashRing;
///
/// let ring = HashRing::new();
/// ring.add_node("10.0.0.1:11211", 1);
/// ring.add_node("10.0.0.2:11211", 2);
///
/// let owner = ring.get_node("user:42").unwrap();
/// assert!(ring.members().contains(&owner));
///
/// let replicas = ring.get_nodes("user:42", 2).unwrap();
/// assert_eq!(replicas[0], owner);
/// ```
pub struct HashRing<P: Partitioner = Crc32Partitioner> {
    partitioner: P,
    state: RwLock<RingState<P::TokenType>>,
}

impl HashRing<Crc32Partitioner> {
    /// Create an empty CRC-32 ring with the default cube count (128).
    pub fn new() -> Self {
        Self::with_partitioner(Crc32Partitioner)
    }

    /// Create an empty CRC-32 ring from a config.
    pub fn with_config(config: RingConfig) -> Result<Self> {
        Self::with_partitioner_and_config(Crc32Partitioner, config)
    }
}

impl Default for HashRing<Crc32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> HashRing<P> {
    /// Create an empty ring that hashes with `partitioner`.
    pub fn with_partitioner(partitioner: P) -> Self {
        Self {
            partitioner,
            state: RwLock::new(RingState::new(RingConfig::default().cubes_per_weight)),
        }
    }

    pub fn with_partitioner_and_config(partitioner: P, config: RingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            partitioner,
            state: RwLock::new(RingState::new(config.cubes_per_weight)),
        })
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the number of cubes per unit of weight.
    ///
    /// Only allowed while no node is registered, since cubes already on the
    /// ring were placed with the old count and removal regenerates them from
    /// the current one.
    ///
    /// # Errors
    ///
    /// - [`Error::RingNotEmpty`] if any node is registered
    /// - [`Error::InvalidConfiguration`] if `n <= 0`
    pub fn set_cube_count(&self, n: i64) -> Result<()> {
        let mut state = self.state.write();
        if !state.members.is_empty() {
            return Err(Error::RingNotEmpty {
                members: state.members.len(),
            });
        }
        let cubes = usize::try_from(n).ok().filter(|cubes| *cubes > 0).ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "cube count must be more than 0, suggest more than 32 (got {n})"
            ))
        })?;
        state.cubes_per_weight = cubes;
        debug!(cubes, "set cubes per weight");
        Ok(())
    }

    /// Current cubes per unit of weight.
    pub fn cubes_per_weight(&self) -> usize {
        self.state.read().cubes_per_weight
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Add a node with `weight`; `weight <= 0` is treated as 1.
    ///
    /// A node never occupies more than [`MAX_CUBES_PER_NODE`] cubes; larger
    /// weights are clamped and logged. See the module docs before re-adding
    /// an existing node.
    pub fn add_node(&self, name: impl Into<String>, weight: i64) {
        let name: String = name.into();
        let weight = normalize_weight(weight);

        let mut state = self.state.write();
        let cubes = state.cube_count_for(weight);
        warn_on_cap(&state, &name, weight);
        let previous = state.insert_node(&self.partitioner, name.clone(), weight);
        state.update_sorted_ring();

        warn_on_readd(&name, previous, weight);
        debug!(node = %name, weight, cubes, positions = state.sorted.len(), "added node to ring");
    }

    /// Add many nodes at once, rebuilding the sorted index a single time.
    ///
    /// Accepts anything yielding `(name, weight)` pairs, e.g. a
    /// `HashMap<String, i64>`.
    pub fn add_nodes<I, S>(&self, weights: I)
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut state = self.state.write();
        let mut added = 0usize;
        for (name, weight) in weights {
            let name: String = name.into();
            let weight = normalize_weight(weight);
            warn_on_cap(&state, &name, weight);
            let previous = state.insert_node(&self.partitioner, name.clone(), weight);
            warn_on_readd(&name, previous, weight);
            added += 1;
        }
        state.update_sorted_ring();

        debug!(nodes = added, positions = state.sorted.len(), "added nodes to ring");
    }

    /// Remove a node and its cubes. Unknown names are ignored.
    pub fn remove_node(&self, name: &str) {
        let mut state = self.state.write();
        let Some(weight) = state.remove_node(&self.partitioner, name) else {
            debug!(node = %name, "remove of unknown node ignored");
            return;
        };
        state.update_sorted_ring();

        debug!(node = %name, weight, positions = state.sorted.len(), "removed node from ring");
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// The node owning `key`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRing`] if the ring holds no cubes.
    pub fn get_node(&self, key: impl AsRef<[u8]>) -> Result<String> {
        let state = self.state.read();
        if state.sorted.is_empty() {
            return Err(Error::EmptyRing);
        }
        let position = state.search(self.partitioner.partition(key.as_ref()));
        Ok(state.owner_at(position).to_string())
    }

    /// Up to `n` distinct nodes for `key`, primary first, then clockwise.
    ///
    /// `n` is clamped to the number of members. An empty ring yields an empty
    /// list rather than [`Error::EmptyRing`].
    pub fn get_nodes(&self, key: impl AsRef<[u8]>, n: usize) -> Result<Vec<String>> {
        let state = self.state.read();
        if state.sorted.is_empty() {
            return Ok(Vec::new());
        }
        let n = n.min(state.members.len());
        let start = state.search(self.partitioner.partition(key.as_ref()));
        Ok(state.walk_distinct(start, n))
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Names of all registered nodes.
    pub fn members(&self) -> HashSet<String> {
        self.state.read().members.clone()
    }

    pub fn node_count(&self) -> usize {
        self.state.read().members.len()
    }

    /// Number of distinct cube positions on the ring.
    pub fn cube_count(&self) -> usize {
        self.state.read().sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().sorted.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.read().members.contains(name)
    }

    /// Weight `name` was last added with.
    pub fn weight(&self, name: &str) -> Option<usize> {
        self.state.read().weights.get(name).copied()
    }

    /// Registered nodes with their weights, sorted by name.
    pub fn nodes(&self) -> Vec<Node> {
        let state = self.state.read();
        let mut nodes: Vec<Node> = state
            .weights
            .iter()
            .map(|(name, weight)| Node::new(name.clone(), *weight))
            .collect();
        nodes.sort();
        nodes
    }

    /// Virtual nodes `name` currently holds on the ring, in ring order.
    ///
    /// Cubes lost to a collision with another node are not included, and each
    /// position is reported once.
    pub fn cubes_of(&self, name: &str) -> Vec<VirtualNode<P::TokenType>> {
        let state = self.state.read();
        let Some(weight) = state.weights.get(name) else {
            return Vec::new();
        };
        let mut cubes: Vec<_> = (0..state.cube_count_for(*weight))
            .map(|index| VirtualNode::from_index(&self.partitioner, name, index))
            .filter(|vnode| state.index.get(&vnode.token).is_some_and(|owner| &**owner == name))
            .collect();
        cubes.sort();
        // Two of a node's own cubes can land on one position; report it once.
        cubes.dedup_by_key(|vnode| vnode.token);
        cubes
    }

    /// Fraction of the hash space owned by each node; sums to 1.0 on a
    /// non-empty ring.
    pub fn ownership(&self) -> HashMap<String, f64> {
        self.state.read().ownership()
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }
}

impl<P: Partitioner> fmt::Debug for HashRing<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("partitioner", &self.partitioner.name())
            .field("cubes_per_weight", &state.cubes_per_weight)
            .field("nodes", &state.members.len())
            .field("positions", &state.sorted.len())
            .finish()
    }
}

fn warn_on_cap<T: Token>(state: &RingState<T>, name: &str, weight: usize) {
    if state.exceeds_cube_cap(weight) {
        warn!(
            node = %name,
            weight,
            cubes_per_weight = state.cubes_per_weight,
            cap = MAX_CUBES_PER_NODE,
            "node weight exceeds the per-node cube cap; clamping"
        );
    }
}

fn warn_on_readd(name: &str, previous: Option<usize>, weight: usize) {
    if let Some(old_weight) = previous.filter(|old| *old != weight) {
        warn!(
            node = %name,
            old_weight,
            weight,
            "node re-added with a different weight without removal; stale cubes remain"
        );
    }
}
