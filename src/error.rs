//! Error types for dictionary construction and view misuse.

use thiserror::Error;

/// Rejected construction parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The initial (and minimum) capacity must hold at least one slot.
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,

    /// The load factor must be finite and lie strictly between 0 and 1.
    #[error("load factor must lie in (0, 1), got {0}")]
    InvalidLoadFactor(f64),
}

/// Misuse of a view collection or its cursor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// `next()` was called with no remaining live slot.
    #[error("view has no more elements")]
    Exhausted,

    /// `remove()` was called without a preceding successful `next()`.
    #[error("remove() requires a preceding next() not yet followed by remove()")]
    IllegalRemove,

    /// Views only allow removal through their own cursor.
    #[error("view collections cannot be modified directly")]
    UnsupportedMutation,
}
