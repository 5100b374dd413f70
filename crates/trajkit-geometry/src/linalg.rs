/// Utility function to compute the Euclidean distance between two points.
///
/// # Arguments
///
/// * `a` - A point in 3D space.
/// * `b` - Another point in 3D space.
///
/// # Returns
///
/// The Euclidean distance between the two points.
///
/// Example:
/// ```
/// use trajkit_geometry::linalg::euclidean_distance;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let dst = euclidean_distance(&a, &b);
/// ```
pub fn euclidean_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

/// Multiply two 3x3 matrices.
pub fn matmul33(lhs: &[[f64; 3]; 3], rhs: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = lhs[i][0] * rhs[0][j] + lhs[i][1] * rhs[1][j] + lhs[i][2] * rhs[2][j];
        }
    }
    out
}

/// Transpose a 3x3 matrix.
pub fn transpose33(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Determinant of a 3x3 matrix.
pub fn det33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Rotate a single point by a 3x3 rotation matrix.
pub fn rotate_point3d(rotation: &[[f64; 3]; 3], point: &[f64; 3]) -> [f64; 3] {
    [
        rotation[0][0] * point[0] + rotation[0][1] * point[1] + rotation[0][2] * point[2],
        rotation[1][0] * point[0] + rotation[1][1] * point[1] + rotation[1][2] * point[2],
        rotation[2][0] * point[0] + rotation[2][1] * point[1] + rotation[2][2] * point[2],
    ]
}

/// Transform a set of points using a rotation and translation.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `rotation` - A rotation matrix.
/// * `translation` - A translation vector.
/// * `dst_points` - A pre-allocated slice to store the transformed points.
///
/// PRECONDITION: dst_points is pre-allocated with the same size as src_points.
pub fn transform_points3d(
    src_points: &[[f64; 3]],
    rotation: &[[f64; 3]; 3],
    translation: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) {
    assert_eq!(src_points.len(), dst_points.len());
    for (dst, src) in dst_points.iter_mut().zip(src_points.iter()) {
        let rotated = rotate_point3d(rotation, src);
        dst[0] = rotated[0] + translation[0];
        dst[1] = rotated[1] + translation[1];
        dst[2] = rotated[2] + translation[2];
    }
}
