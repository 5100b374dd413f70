use serde::{Deserialize, Serialize};

use crate::align::SimilarityTransform;
use crate::error::EvalError;
use crate::rpe::RelativeError;
use crate::segment::{SegmentError, SegmentOptions};
use crate::{ate, rpe, segment};
use trajkit_geometry::poses_to_se3;

/// Number of values per pose row: `(tx, ty, tz, qx, qy, qz, qw)`.
const POSE_WIDTH: usize = 7;

/// Complete result of evaluating one estimated trajectory against ground
/// truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Absolute trajectory error (RMSE after alignment).
    pub ate_score: f64,
    /// Relative pose error over consecutive motions.
    pub rpe_score: RelativeError,
    /// Segment-normalized odometry error; `None` when the trajectory is too
    /// short for every requested segment length.
    pub kitti_score: Option<SegmentError>,
    /// Ground-truth translations (the reference frame).
    pub gt_aligned: Vec<[f64; 3]>,
    /// Estimated translations mapped into the ground-truth frame.
    pub est_aligned: Vec<[f64; 3]>,
    /// Recovered scale factor, 1.0 when not solved.
    pub scale: f64,
    /// Angular magnitude of the alignment rotation, in radians.
    pub ate_rot: f64,
    /// Euclidean norm of the alignment translation.
    pub ate_trans: f64,
    /// The full alignment transform.
    pub ate_transform: SimilarityTransform,
}

fn validate_rows(rows: &[Vec<f64>]) -> Result<Vec<[f64; POSE_WIDTH]>, EvalError> {
    rows.iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() != POSE_WIDTH {
                return Err(EvalError::InvalidPoseWidth {
                    row,
                    width: values.len(),
                });
            }
            let mut pose = [0.0; POSE_WIDTH];
            pose.copy_from_slice(values);
            Ok(pose)
        })
        .collect()
}

/// Evaluate one estimated trajectory against ground truth.
///
/// Validates both inputs, converts them to rigid transforms, and computes
/// the absolute, relative, and segment-normalized error metrics. The
/// relative and segment metrics operate on the raw transform sequences,
/// independent of the absolute alignment.
///
/// # Arguments
///
/// * `gt_rows` - Ground-truth pose rows `(tx, ty, tz, qx, qy, qz, qw)`.
/// * `est_rows` - Estimated pose rows, index-corresponding to `gt_rows`.
/// * `solve_scale` - Whether to solve for a global scale (monocular tracks).
/// * `options` - Segment-length set for the KITTI-style metric.
///
/// # Returns
///
/// All scores plus the aligned translation sequences. A trajectory too short
/// for the segment metric yields `kitti_score = None` while the other
/// metrics still succeed; every other failure aborts the evaluation.
pub fn evaluate_one_trajectory(
    gt_rows: &[Vec<f64>],
    est_rows: &[Vec<f64>],
    solve_scale: bool,
    options: &SegmentOptions,
) -> Result<EvaluationResult, EvalError> {
    if gt_rows.len() != est_rows.len() {
        return Err(EvalError::LengthMismatch {
            gt: gt_rows.len(),
            est: est_rows.len(),
        });
    }
    let gt_poses = validate_rows(gt_rows)?;
    let est_poses = validate_rows(est_rows)?;

    let gt_se3 = poses_to_se3(&gt_poses)?;
    let est_se3 = poses_to_se3(&est_poses)?;

    let gt_xyz: Vec<[f64; 3]> = gt_se3.iter().map(|pose| pose.translation).collect();
    let est_xyz: Vec<[f64; 3]> = est_se3.iter().map(|pose| pose.translation).collect();

    let ate = ate::evaluate(&gt_xyz, &est_xyz, solve_scale)?;
    let rpe_score = rpe::evaluate(&gt_se3, &est_se3)?;
    let kitti_score = match segment::evaluate(&gt_se3, &est_se3, options) {
        Ok(score) => Some(score),
        Err(EvalError::TrajectoryTooShort) => {
            log::warn!("segment metric skipped: trajectory too short for every segment length");
            None
        }
        Err(err) => return Err(err),
    };

    Ok(EvaluationResult {
        ate_score: ate.rmse,
        rpe_score,
        kitti_score,
        gt_aligned: ate.gt_aligned,
        est_aligned: ate.est_aligned,
        scale: ate.scale,
        ate_rot: ate.rot_error,
        ate_trans: ate.trans_error,
        ate_transform: ate.transform,
    })
}
