use crate::error::GeometryError;
use crate::linalg::{matmul33, rotate_point3d, transpose33};
use crate::transforms::{quat_to_rotation_matrix, rotation_matrix_angle};

/// Rigid-body transform in 3D combining a rotation and a translation.
///
/// The rotation block is a proper rotation (orthonormal, det = +1) whenever
/// the transform was built through this crate's constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Se3 {
    /// Rotation matrix.
    pub rotation: [[f64; 3]; 3],
    /// Translation vector.
    pub translation: [f64; 3],
}

impl Se3 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        translation: [0.0, 0.0, 0.0],
    };

    /// Create a transform from a rotation matrix and a translation vector.
    pub fn new(rotation: [[f64; 3]; 3], translation: [f64; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Build a transform from a pose row `(tx, ty, tz, qx, qy, qz, qw)`.
    ///
    /// The quaternion is normalized during conversion; a near-zero norm is an
    /// error.
    pub fn from_pose_row(row: &[f64; 7]) -> Result<Self, GeometryError> {
        let rotation = quat_to_rotation_matrix(&[row[3], row[4], row[5], row[6]])?;
        Ok(Self {
            rotation,
            translation: [row[0], row[1], row[2]],
        })
    }

    /// The inverse transform.
    pub fn inverse(&self) -> Self {
        // R' = R^T, t' = -R^T * t
        let rotation = transpose33(&self.rotation);
        let rotated = rotate_point3d(&rotation, &self.translation);
        Self {
            rotation,
            translation: [-rotated[0], -rotated[1], -rotated[2]],
        }
    }

    /// Compose with another transform: `self * other`.
    pub fn compose(&self, other: &Se3) -> Self {
        let rotation = matmul33(&self.rotation, &other.rotation);
        let rotated = rotate_point3d(&self.rotation, &other.translation);
        Self {
            rotation,
            translation: [
                rotated[0] + self.translation[0],
                rotated[1] + self.translation[1],
                rotated[2] + self.translation[2],
            ],
        }
    }

    /// Relative transform from `self` to `other`: `self^-1 * other`.
    pub fn between(&self, other: &Se3) -> Self {
        self.inverse().compose(other)
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, point: &[f64; 3]) -> [f64; 3] {
        let rotated = rotate_point3d(&self.rotation, point);
        [
            rotated[0] + self.translation[0],
            rotated[1] + self.translation[1],
            rotated[2] + self.translation[2],
        ]
    }

    /// Angle of the rotation block relative to identity, in radians.
    pub fn rotation_angle(&self) -> f64 {
        rotation_matrix_angle(&self.rotation)
    }

    /// Euclidean norm of the translation.
    pub fn translation_norm(&self) -> f64 {
        (self.translation[0].powi(2) + self.translation[1].powi(2) + self.translation[2].powi(2))
            .sqrt()
    }

    /// The transform as a 4x4 homogeneous matrix with bottom row `[0, 0, 0, 1]`.
    pub fn as_matrix(&self) -> [[f64; 4]; 4] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t[0]],
            [r[1][0], r[1][1], r[1][2], t[1]],
            [r[2][0], r[2][1], r[2][2], t[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

/// Convert a quaternion-form trajectory into rigid transforms.
///
/// # Arguments
///
/// * `rows` - Pose rows `(tx, ty, tz, qx, qy, qz, qw)` in trajectory order.
///
/// # Returns
///
/// One transform per row, in the same order.
pub fn poses_to_se3(rows: &[[f64; 7]]) -> Result<Vec<Se3>, GeometryError> {
    rows.iter().map(Se3::from_pose_row).collect()
}
