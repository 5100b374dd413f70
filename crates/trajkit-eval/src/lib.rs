#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Similarity-transform alignment of translation sequences.
pub mod align;

/// Absolute trajectory error.
pub mod ate;

/// Error types for trajectory evaluation.
pub mod error;

/// Whole-trajectory evaluation combining all metrics.
pub mod evaluator;

/// Relative pose error over consecutive motions.
pub mod rpe;

/// Segment-normalized (KITTI-style) odometry error.
pub mod segment;

pub use align::{align_translations, Alignment, SimilarityTransform};
pub use error::EvalError;
pub use evaluator::{evaluate_one_trajectory, EvaluationResult};
pub use rpe::RelativeError;
pub use segment::{SegmentError, SegmentOptions};
