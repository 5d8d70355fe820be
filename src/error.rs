use thiserror::Error;

use crate::data::Timestamp;

/// Contract violations raised at the boundary of the scoring core.
///
/// Degenerate geometry (zero-area boxes, zero-length edges) is not an error:
/// it surfaces as `None` metrics on the affected record instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid corner count: expected {expected}, got {got}")]
    InvalidCornerCount { expected: usize, got: usize },

    #[error("non-finite coordinate at point {index}")]
    NonFiniteCoordinate { index: usize },

    #[error("threshold must be finite and positive, got {0}")]
    InvalidThreshold(f64),

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("zero-length segment")]
    DegenerateSegment,

    #[error("objects from different frames: expected timestamp {expected}, got {got}")]
    MixedTimestamps { expected: Timestamp, got: Timestamp },

    #[error("{matched} associations exceed {ground_truth} ground-truth / {predicted} predicted objects")]
    InconsistentCounts {
        matched: usize,
        ground_truth: usize,
        predicted: usize,
    },

    #[error("unknown object class `{0}`")]
    UnknownClass(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
