use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use trajkit_geometry::Se3;

/// Relative pose error as an RMSE pair over consecutive motions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RelativeError {
    /// Translation RMSE, in trajectory length units.
    pub translation: f64,
    /// Rotation RMSE, in radians.
    pub rotation: f64,
}

/// Compute the relative pose error between two rigid-transform sequences.
///
/// For every consecutive pair of indices the relative motion of each
/// trajectory is compared; the error at step `i` is
/// `inverse(gt_rel) * est_rel`. No global alignment is involved, the metric
/// is invariant to it by construction.
///
/// # Arguments
///
/// * `gt` - Ground-truth rigid transforms.
/// * `est` - Estimated rigid transforms, same length as `gt`.
pub fn evaluate(gt: &[Se3], est: &[Se3]) -> Result<RelativeError, EvalError> {
    if gt.len() != est.len() {
        return Err(EvalError::LengthMismatch {
            gt: gt.len(),
            est: est.len(),
        });
    }
    if gt.len() < 2 {
        return Err(EvalError::InsufficientPoses {
            required: 2,
            actual: gt.len(),
        });
    }

    let mut trans_sq = 0.0;
    let mut rot_sq = 0.0;
    for i in 0..gt.len() - 1 {
        let gt_rel = gt[i].between(&gt[i + 1]);
        let est_rel = est[i].between(&est[i + 1]);
        let error = gt_rel.between(&est_rel);

        let t = error.translation_norm();
        let r = error.rotation_angle();
        trans_sq += t * t;
        rot_sq += r * r;
    }

    let pairs = (gt.len() - 1) as f64;
    Ok(RelativeError {
        translation: (trans_sq / pairs).sqrt(),
        rotation: (rot_sq / pairs).sqrt(),
    })
}
