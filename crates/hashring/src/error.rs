//! Error types for the hash ring.

/// Result type alias for the hash ring.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring or querying the ring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The ring holds no virtual positions, so no key can be routed.
    #[error("empty hash ring")]
    EmptyRing,

    /// A configuration value was rejected (e.g. a zero cube count).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The cube count cannot change once nodes have been added.
    #[error("ring is not empty: {members} node(s) registered")]
    RingNotEmpty {
        /// Number of nodes currently registered.
        members: usize,
    },
}
