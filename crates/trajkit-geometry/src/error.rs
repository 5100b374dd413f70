use thiserror::Error;

/// Error types for geometry operations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The quaternion norm is too close to zero to normalize.
    #[error("cannot normalize quaternion with norm {norm}")]
    DegenerateQuaternion {
        /// Norm of the offending quaternion.
        norm: f64,
    },
}
