use crate::error::GeometryError;

/// Norm below which a quaternion is considered degenerate.
const MIN_QUAT_NORM: f64 = 1e-12;

/// Compute the rotation matrix from a quaternion in `[x, y, z, w]` order.
///
/// The quaternion is normalized before conversion, so callers may pass
/// unnormalized values straight from a pose file.
///
/// # Arguments
///
/// * `quat` - The quaternion as `[x, y, z, w]`.
///
/// # Returns
///
/// The rotation matrix, or an error if the quaternion norm is close to zero.
///
/// Example:
/// ```
/// use trajkit_geometry::transforms::quat_to_rotation_matrix;
///
/// let rotation = quat_to_rotation_matrix(&[0.0, 0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(rotation, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// ```
pub fn quat_to_rotation_matrix(quat: &[f64; 4]) -> Result<[[f64; 3]; 3], GeometryError> {
    let norm = (quat[0].powi(2) + quat[1].powi(2) + quat[2].powi(2) + quat[3].powi(2)).sqrt();
    if norm < MIN_QUAT_NORM {
        return Err(GeometryError::DegenerateQuaternion { norm });
    }

    let x = quat[0] / norm;
    let y = quat[1] / norm;
    let z = quat[2] / norm;
    let w = quat[3] / norm;

    let m00 = 1.0 - 2.0 * (y * y + z * z);
    let m11 = 1.0 - 2.0 * (x * x + z * z);
    let m22 = 1.0 - 2.0 * (x * x + y * y);

    let m01 = 2.0 * (x * y - z * w);
    let m10 = 2.0 * (x * y + z * w);

    let m02 = 2.0 * (x * z + y * w);
    let m20 = 2.0 * (x * z - y * w);

    let m12 = 2.0 * (y * z - x * w);
    let m21 = 2.0 * (y * z + x * w);

    Ok([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation, normalized internally.
/// * `angle` - The angle of rotation in radians.
///
/// # Returns
///
/// The rotation matrix, or an error if the axis is a zero vector.
pub fn axis_angle_to_rotation_matrix(
    axis: &[f64; 3],
    angle: f64,
) -> Result<[[f64; 3]; 3], GeometryError> {
    let magnitude = (axis[0].powi(2) + axis[1].powi(2) + axis[2].powi(2)).sqrt();
    if magnitude < MIN_QUAT_NORM {
        return Err(GeometryError::DegenerateQuaternion { norm: magnitude });
    }

    let x = axis[0] / magnitude;
    let y = axis[1] / magnitude;
    let z = axis[2] / magnitude;

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;

    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;

    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;

    let m12 = tmp5 - tmp6;
    let m21 = tmp5 + tmp6;

    Ok([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
}

/// Angle of a rotation matrix relative to the identity, in radians.
///
/// The trace argument is clamped so that matrices that are orthonormal only
/// up to floating point error do not produce NaN.
pub fn rotation_matrix_angle(rotation: &[[f64; 3]; 3]) -> f64 {
    let trace = rotation[0][0] + rotation[1][1] + rotation[2][2];
    ((trace - 1.0) / 2.0).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quat_identity() -> Result<(), GeometryError> {
        let rotation = quat_to_rotation_matrix(&[0.0, 0.0, 0.0, 1.0])?;
        let expected = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(rotation[i][j], expected[i][j]);
            }
        }
        Ok(())
    }

    #[test]
    fn test_quat_90deg_z() -> Result<(), GeometryError> {
        // 90 degrees around z: q = (0, 0, sin(45), cos(45))
        let half = std::f64::consts::FRAC_PI_4;
        let rotation = quat_to_rotation_matrix(&[0.0, 0.0, half.sin(), half.cos()])?;
        let expected = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(rotation[i][j], expected[i][j], epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_quat_not_unit_norm() -> Result<(), GeometryError> {
        // scaling a quaternion must not change the rotation
        let half = std::f64::consts::FRAC_PI_4;
        let q = [0.0, 0.0, half.sin(), half.cos()];
        let q_scaled = [q[0] * 3.0, q[1] * 3.0, q[2] * 3.0, q[3] * 3.0];

        let r = quat_to_rotation_matrix(&q)?;
        let r_scaled = quat_to_rotation_matrix(&q_scaled)?;
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(r[i][j], r_scaled[i][j], epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_quat_zero_norm() {
        let result = quat_to_rotation_matrix(&[0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            result,
            Err(GeometryError::DegenerateQuaternion { .. })
        ));
    }

    #[test]
    fn test_axis_angle_90deg_x() -> Result<(), GeometryError> {
        let rotation = axis_angle_to_rotation_matrix(&[1.0, 0.0, 0.0], std::f64::consts::FRAC_PI_2)?;
        let expected = [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(rotation[i][j], expected[i][j], epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_rotation_matrix_angle() -> Result<(), GeometryError> {
        let eye = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_relative_eq!(rotation_matrix_angle(&eye), 0.0);

        let angle = 0.3;
        let rotation = axis_angle_to_rotation_matrix(&[0.0, 1.0, 0.0], angle)?;
        assert_relative_eq!(rotation_matrix_angle(&rotation), angle, epsilon = 1e-12);
        Ok(())
    }
}
