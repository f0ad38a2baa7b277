//! Error taxonomy.
//!
//! Everything here is a caller bug surfaced fail-fast; the engine has no
//! I/O and therefore nothing to retry. Degenerate numeric situations the
//! selection algorithm handles on its own (probability saturation) are
//! not errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A numeric sub-type identifier belongs to no known family.
    #[error("sub-type code {0} belongs to no known family")]
    UnknownSubType(u16),

    /// A path identifier could not be resolved into an override.
    #[error("path could not be resolved: {0}")]
    PathResolution(String),

    /// `select` was invoked with an empty proficiency map.
    #[error("selection requires at least one candidate sub-type")]
    EmptyCandidateSet,

    /// Path overrides left the probability vector without valid mass.
    #[error("probability distribution degenerate after path adjustment")]
    DegenerateDistribution,
}
