use thiserror::Error;
use trajkit_geometry::GeometryError;

/// Error types for trajectory evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The two trajectories differ in pose count.
    #[error("trajectories differ in pose count: ground truth has {gt}, estimate has {est}")]
    LengthMismatch {
        /// Number of ground-truth poses.
        gt: usize,
        /// Number of estimated poses.
        est: usize,
    },

    /// A pose row does not have exactly 7 values.
    #[error("pose row {row} has {width} values, expected 7")]
    InvalidPoseWidth {
        /// Index of the offending row.
        row: usize,
        /// Number of values found in the row.
        width: usize,
    },

    /// Not enough non-degenerate points to solve the alignment.
    #[error("alignment requires at least {required} non-degenerate points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points required.
        required: usize,
        /// Number of usable points provided.
        actual: usize,
    },

    /// Not enough poses to form relative motions.
    #[error("relative error requires at least {required} poses, got {actual}")]
    InsufficientPoses {
        /// Minimum number of poses required.
        required: usize,
        /// Number of poses provided.
        actual: usize,
    },

    /// The scale solve denominator is numerically zero.
    #[error("cannot solve for scale: estimated points have no spread")]
    DegenerateScale,

    /// No segment of any requested length fits in the trajectory.
    #[error("trajectory is too short for every requested segment length")]
    TrajectoryTooShort,

    /// A pose could not be converted to a rigid transform.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
