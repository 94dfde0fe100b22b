//! Error types for the JADE optimizer.
//!
//! Configuration errors are raised at setup and abort the run. Internal
//! consistency errors are detected by the operator steps and stop the
//! generation loop at the point of detection; the orchestrator keeps the last
//! consistent population so callers still get partial results.

use thiserror::Error;

/// Errors that can occur while configuring or running JADE.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JadeError {
    /// Population size must be at least 1.
    #[error("population size must be >= 1")]
    EmptyPopulation,

    /// Dimensionality must be at least 1.
    #[error("dimension must be >= 1")]
    EmptyDimension,

    /// Lower and upper bounds have different lengths.
    #[error("bounds mismatch: lower has {lower_len} elements, upper has {upper_len}")]
    BoundsMismatch {
        /// Length of the lower bounds array
        lower_len: usize,
        /// Length of the upper bounds array
        upper_len: usize,
    },

    /// A lower bound is not strictly below its upper bound, or is not finite.
    #[error("invalid bounds at index {index}: lower ({lower}) must be < upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// Best fraction p must lie in (0, 1).
    #[error("invalid best fraction: {p} (must be in (0, 1))")]
    InvalidBestFraction {
        /// The rejected value
        p: f64,
    },

    /// The pbest pool would cover the whole population.
    #[error("degenerate best fraction: floor({popsize} * {p}) equals the population size")]
    DegenerateBestFraction {
        /// Population size
        popsize: usize,
        /// Best fraction
        p: f64,
    },

    /// Adaptation rate c must lie in [0, 1].
    #[error("invalid adaptation rate: {c} (must be in [0, 1])")]
    InvalidAdaptationRate {
        /// The rejected value
        c: f64,
    },

    /// Too many feed vectors for the population.
    #[error("too large feed: {feed} vectors for a population of {popsize}")]
    FeedTooLarge {
        /// Number of feed vectors
        feed: usize,
        /// Population size
        popsize: usize,
    },

    /// A feed vector does not match the problem dimension.
    #[error("feed vector {index} has dimension {got}, expected {expected}")]
    FeedDimensionMismatch {
        /// Position of the offending vector in the feed list
        index: usize,
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        got: usize,
    },

    /// A feed vector component lies outside its bounds.
    #[error("feed vector {index} is out of bounds at dimension {dim}: {value}")]
    FeedOutOfBounds {
        /// Position of the offending vector in the feed list
        index: usize,
        /// First dimension found outside `[lower, upper]`
        dim: usize,
        /// The offending component
        value: f64,
    },

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// No recorded fitness for a population slot.
    #[error("no recorded fitness for population slot {index}")]
    MissingFitness {
        /// The slot that was looked up
        index: usize,
    },

    /// The archive is still above its cap after cleanup.
    #[error("archive holds {size} entries after cleanup, cap is {cap}")]
    ArchiveOverflow {
        /// Archive size after cleanup
        size: usize,
        /// Maximum allowed size
        cap: usize,
    },

    /// No valid candidate left when drawing a random donor.
    #[error("no candidate left when drawing {what} for individual {index}")]
    CandidatesExhausted {
        /// Which donor was being drawn
        what: &'static str,
        /// Individual being mutated
        index: usize,
    },

    /// Failure in the aggregation transport.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A specialized `Result` type for JADE operations.
pub type Result<T> = std::result::Result<T, JadeError>;

impl JadeError {
    /// Returns `true` for errors raised while validating the setup.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            JadeError::EmptyPopulation
                | JadeError::EmptyDimension
                | JadeError::BoundsMismatch { .. }
                | JadeError::InvalidBounds { .. }
                | JadeError::InvalidBestFraction { .. }
                | JadeError::DegenerateBestFraction { .. }
                | JadeError::InvalidAdaptationRate { .. }
                | JadeError::FeedTooLarge { .. }
                | JadeError::FeedDimensionMismatch { .. }
                | JadeError::FeedOutOfBounds { .. }
                | JadeError::Config(_)
        )
    }

    /// Returns `true` for internal consistency failures detected mid-run.
    pub fn is_internal_error(&self) -> bool {
        matches!(
            self,
            JadeError::MissingFitness { .. }
                | JadeError::ArchiveOverflow { .. }
                | JadeError::CandidatesExhausted { .. }
        )
    }

    /// Returns `true` for aggregation transport failures.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, JadeError::Transport(_))
    }
}

impl From<std::io::Error> for JadeError {
    fn from(err: std::io::Error) -> Self {
        JadeError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for JadeError {
    fn from(err: serde_json::Error) -> Self {
        JadeError::Config(err.to_string())
    }
}
