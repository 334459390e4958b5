//! Ring configuration.
//!
//! `RingConfig` is meant to be embedded in a caller's own configuration file;
//! every field has a default so an empty section deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of virtual positions a node of weight 1 occupies.
pub const DEFAULT_CUBES_PER_WEIGHT: usize = 128;

/// Upper bound on the cubes a single node may occupy, whatever its weight.
///
/// Insertion and removal both clamp to this, so a capped node is still
/// removed cleanly.
pub const MAX_CUBES_PER_NODE: usize = 1 << 20;

/// Tunables fixed for the lifetime of a ring's membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual positions per unit of node weight.
    pub cubes_per_weight: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            cubes_per_weight: DEFAULT_CUBES_PER_WEIGHT,
        }
    }
}

impl RingConfig {
    /// Shorthand for a config with the given cube count.
    pub fn with_cubes_per_weight(cubes_per_weight: usize) -> Self {
        Self { cubes_per_weight }
    }

    /// Reject values the ring cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.cubes_per_weight == 0 {
            return Err(Error::InvalidConfiguration(
                "cubes_per_weight must be more than 0, suggest more than 32".into(),
            ));
        }
        Ok(())
    }
}
