//! Ring state guarded by the ring's lock.
//!
//! Everything a lookup reads lives in one record so a single lock covers it:
//! the ring index, the sorted index derived from it, the membership set, the
//! weight table and the cube multiplier. Nothing here locks; [`HashRing`]
//! decides which guard a method runs under.
//!
//! [`HashRing`]: crate::ring::HashRing

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::MAX_CUBES_PER_NODE;
use crate::partitioner::Partitioner;
use crate::token::Token;
use crate::vnode::cube_tokens;

pub(crate) struct RingState<T: Token> {
    /// Cube token -> owning node.
    pub(crate) index: HashMap<T, Arc<str>>,
    /// Keys of `index`, ascending. Rebuilt, never edited in place.
    pub(crate) sorted: Vec<T>,
    pub(crate) members: HashSet<String>,
    pub(crate) weights: HashMap<String, usize>,
    pub(crate) cubes_per_weight: usize,
}

impl<T: Token> RingState<T> {
    pub(crate) fn new(cubes_per_weight: usize) -> Self {
        Self {
            index: HashMap::new(),
            sorted: Vec::new(),
            members: HashSet::new(),
            weights: HashMap::new(),
            cubes_per_weight,
        }
    }

    /// Number of cubes a node of `weight` occupies, capped at
    /// [`MAX_CUBES_PER_NODE`].
    #[inline]
    pub(crate) fn cube_count_for(&self, weight: usize) -> usize {
        self.cubes_per_weight.saturating_mul(weight).min(MAX_CUBES_PER_NODE)
    }

    /// True if `weight` asks for more cubes than a node may hold.
    #[inline]
    pub(crate) fn exceeds_cube_cap(&self, weight: usize) -> bool {
        self.cubes_per_weight.saturating_mul(weight) > MAX_CUBES_PER_NODE
    }

    /// Place `name`'s cubes and record it. Does not rebuild the sorted index.
    ///
    /// Returns the weight previously recorded for `name`, if any. Cubes from
    /// an earlier insertion are left in place.
    pub(crate) fn insert_node<P>(&mut self, partitioner: &P, name: String, weight: usize) -> Option<usize>
    where
        P: Partitioner<TokenType = T>,
    {
        let owner: Arc<str> = Arc::from(name.as_str());
        for token in cube_tokens(partitioner, &name, self.cube_count_for(weight)) {
            self.index.insert(token, Arc::clone(&owner));
        }
        self.members.insert(name.clone());
        self.weights.insert(name, weight)
    }

    /// Drop `name`'s cubes and forget it. Does not rebuild the sorted index.
    ///
    /// Returns the removed weight, or `None` if `name` was never added.
    pub(crate) fn remove_node<P>(&mut self, partitioner: &P, name: &str) -> Option<usize>
    where
        P: Partitioner<TokenType = T>,
    {
        let weight = self.weights.remove(name)?;
        for token in cube_tokens(partitioner, name, self.cube_count_for(weight)) {
            self.index.remove(&token);
        }
        self.members.remove(name);
        Some(weight)
    }

    /// Recompute the sorted index from the ring index.
    pub(crate) fn update_sorted_ring(&mut self) {
        let mut hashes: Vec<T> = self.index.keys().copied().collect();
        hashes.sort_unstable();
        self.sorted = hashes;
    }

    /// Position in the sorted index of the first cube strictly after `token`,
    /// wrapping to 0 past the last one.
    ///
    /// Callers must check the ring is non-empty.
    #[inline]
    pub(crate) fn search(&self, token: T) -> usize {
        let index = self.sorted.partition_point(|pos| *pos <= token);
        if index >= self.sorted.len() {
            0
        } else {
            index
        }
    }

    #[inline]
    pub(crate) fn owner_at(&self, position: usize) -> &str {
        // `sorted` is always rebuilt from `index` under the same guard.
        &self.index[&self.sorted[position]]
    }

    /// Walk clockwise from `start`, collecting up to `n` distinct owners.
    ///
    /// Stops early once the walk comes back round to `start`.
    pub(crate) fn walk_distinct(&self, start: usize, n: usize) -> Vec<String> {
        let len = self.sorted.len();
        let mut nodes: Vec<String> = Vec::with_capacity(n);
        if n == 0 {
            return nodes;
        }
        for step in 0..len {
            let owner = self.owner_at((start + step) % len);
            if !nodes.iter().any(|node| node == owner) {
                nodes.push(owner.to_string());
                if nodes.len() == n {
                    break;
                }
            }
        }
        nodes
    }

    /// Fraction of the hash space each owner is responsible for.
    ///
    /// A cube owns the arc from its predecessor (inclusive) up to itself
    /// (exclusive), matching `search`.
    pub(crate) fn ownership(&self) -> HashMap<String, f64> {
        let mut shares: HashMap<String, f64> = HashMap::new();
        let len = self.sorted.len();
        if len == 1 {
            shares.insert(self.owner_at(0).to_string(), 1.0);
            return shares;
        }
        for (i, token) in self.sorted.iter().enumerate() {
            let prev = if i == 0 { self.sorted[len - 1] } else { self.sorted[i - 1] };
            *shares.entry(self.owner_at(i).to_string()).or_insert(0.0) +=
                prev.distance_to(token).ring_fraction();
        }
        shares
    }
}
