//! Error types for map generation.

use thiserror::Error;

/// Failures raised while generating a world map.
///
/// Every variant is terminal for the call that raised it; callers decide
/// whether to retry with different parameters.
#[derive(Debug, Error)]
pub enum GenError {
    /// A precondition on the requested parameters was violated before any
    /// generation work started.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Region growth ran out of frontier while nodes remained unclaimed.
    /// Indicates a disconnected adjacency graph or a region count too close
    /// to the node count.
    #[error("region growth stalled with {claimed} of {total} nodes claimed and every frontier empty")]
    RegionGrowthStalled { claimed: usize, total: usize },

    /// The drift pass exhausted its attempt budget before reaching the
    /// requested number of differing assignments.
    #[error(
        "drift budget of {attempts} attempts exhausted at {achieved} of {target} target differences"
    )]
    DriftTargetUnreached {
        attempts: usize,
        achieved: usize,
        target: usize,
    },

    /// A character ended up holding no titles. Unreachable when every
    /// character is seeded with a county.
    #[error("character {0} holds no titles")]
    HolderWithoutTitles(u32),
}
