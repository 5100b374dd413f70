#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for geometry operations.
pub mod error;

/// Linear algebra utilities over fixed-size arrays.
pub mod linalg;

/// Rigid-body transforms in 3D.
pub mod se3;

/// Rotation parameterization conversions.
pub mod transforms;

pub use error::GeometryError;
pub use se3::{poses_to_se3, Se3};
