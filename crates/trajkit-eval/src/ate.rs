use crate::align::{align_translations, SimilarityTransform};
use crate::error::EvalError;
use trajkit_geometry::linalg::euclidean_distance;
use trajkit_geometry::transforms::rotation_matrix_angle;

/// Absolute trajectory error of one estimated trajectory.
#[derive(Debug, Clone)]
pub struct AteResult {
    /// Root-mean-square Euclidean distance between aligned pose pairs.
    pub rmse: f64,
    /// Angular magnitude of the alignment rotation, in radians.
    pub rot_error: f64,
    /// Euclidean norm of the alignment translation.
    pub trans_error: f64,
    /// Recovered scale factor, 1.0 when not solved.
    pub scale: f64,
    /// The full alignment transform, for downstream reuse.
    pub transform: SimilarityTransform,
    /// Ground-truth translations (the reference frame).
    pub gt_aligned: Vec<[f64; 3]>,
    /// Estimated translations mapped into the ground-truth frame.
    pub est_aligned: Vec<[f64; 3]>,
}

/// Compute the absolute trajectory error between two translation sequences.
///
/// The estimated translations are aligned onto the ground truth with a
/// similarity transform before the residual is measured, so a global offset
/// or (when `solve_scale` is set) a global scale does not count as error.
///
/// # Arguments
///
/// * `gt` - Ground-truth translations.
/// * `est` - Estimated translations, same length as `gt`.
/// * `solve_scale` - Whether to solve for a global scale factor.
pub fn evaluate(
    gt: &[[f64; 3]],
    est: &[[f64; 3]],
    solve_scale: bool,
) -> Result<AteResult, EvalError> {
    let alignment = align_translations(gt, est, solve_scale)?;

    let sum_sq: f64 = alignment
        .gt_aligned
        .iter()
        .zip(alignment.est_aligned.iter())
        .map(|(g, e)| {
            let d = euclidean_distance(g, e);
            d * d
        })
        .sum();
    let rmse = (sum_sq / alignment.gt_aligned.len() as f64).sqrt();

    let transform = alignment.transform;
    let t = &transform.translation;
    let rot_error = rotation_matrix_angle(&transform.rotation);
    let trans_error = (t[0] * t[0] + t[1] * t[1] + t[2] * t[2]).sqrt();

    Ok(AteResult {
        rmse,
        rot_error,
        trans_error,
        scale: transform.scale,
        transform,
        gt_aligned: alignment.gt_aligned,
        est_aligned: alignment.est_aligned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_line(n: usize) -> Vec<[f64; 3]> {
        (0..n).map(|i| [i as f64, 0.0, 0.0]).collect()
    }

    #[test]
    fn test_ate_identity_is_zero() -> Result<(), EvalError> {
        let traj = straight_line(10);
        let result = evaluate(&traj, &traj, false)?;
        assert_relative_eq!(result.rmse, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.rot_error, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.trans_error, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.scale, 1.0);
        Ok(())
    }

    #[test]
    fn test_ate_constant_offset_is_absorbed() -> Result<(), EvalError> {
        // a constant offset is removed by the alignment translation
        let gt = straight_line(10);
        let est: Vec<[f64; 3]> = gt.iter().map(|p| [p[0], p[1] + 2.0, p[2]]).collect();
        let result = evaluate(&gt, &est, false)?;
        assert_relative_eq!(result.rmse, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.trans_error, 2.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_ate_residual_error() -> Result<(), EvalError> {
        // symmetric +-1 perturbation on y that no rigid alignment can remove
        let gt = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]];
        let est = vec![[0.0, 1.0, 0.0], [1.0, -1.0, 0.0], [2.0, 1.0, 0.0], [3.0, -1.0, 0.0]];
        let result = evaluate(&gt, &est, false)?;
        assert!(result.rmse > 0.5);
        Ok(())
    }

    #[test]
    fn test_ate_scale_recovery() -> Result<(), EvalError> {
        let gt = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.5, 0.0],
            [2.0, 0.5, 1.0],
            [3.0, 1.5, 1.0],
        ];
        let est: Vec<[f64; 3]> = gt.iter().map(|p| [p[0] * 0.5, p[1] * 0.5, p[2] * 0.5]).collect();
        let result = evaluate(&gt, &est, true)?;
        assert_relative_eq!(result.scale, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.rmse, 0.0, epsilon = 1e-9);
        Ok(())
    }
}
