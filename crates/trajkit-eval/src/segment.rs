use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use trajkit_geometry::linalg::euclidean_distance;
use trajkit_geometry::Se3;

/// Traveled distance below which a segment cannot be scored.
const MIN_SEGMENT_DISTANCE: f64 = 1e-9;

/// Segmentation settings for the KITTI-style odometry metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentOptions {
    /// Target segment lengths, in trajectory length units when `by_distance`
    /// is set, otherwise in frames.
    pub lengths: Vec<f64>,
    /// Segment by cumulative ground-truth arc length rather than frame count.
    pub by_distance: bool,
}

impl Default for SegmentOptions {
    /// The KITTI segmentation: 100 m to 800 m in 100 m steps, distance-based.
    fn default() -> Self {
        Self {
            lengths: (1..=8).map(|i| i as f64 * 100.0).collect(),
            by_distance: true,
        }
    }
}

impl SegmentOptions {
    /// Distance-based segmentation with a custom length set.
    pub fn distances(lengths: &[f64]) -> Self {
        Self {
            lengths: lengths.to_vec(),
            by_distance: true,
        }
    }

    /// Frame-count-based segmentation.
    pub fn frames(counts: &[usize]) -> Self {
        Self {
            lengths: counts.iter().map(|&c| c as f64).collect(),
            by_distance: false,
        }
    }
}

/// Segment-normalized odometry error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SegmentError {
    /// Translation drift as a percentage of distance traveled.
    pub translation: f64,
    /// Rotation drift in degrees per trajectory length unit.
    pub rotation: f64,
}

/// Cumulative path length along a trajectory.
///
/// Entry `i` is the arc length from the first pose to pose `i` measured along
/// the translation components; entry 0 is 0.
pub fn trajectory_distances(poses: &[Se3]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(poses.len());
    let mut accumulated = 0.0;
    if !poses.is_empty() {
        distances.push(0.0);
    }
    for window in poses.windows(2) {
        accumulated += euclidean_distance(&window[0].translation, &window[1].translation);
        distances.push(accumulated);
    }
    distances
}

/// First index after `start` whose cumulative measure reaches `target`.
fn segment_end(measure: &[f64], start: usize, target: f64) -> Option<usize> {
    (start + 1..measure.len()).find(|&j| measure[j] - measure[start] >= target)
}

/// Compute the segment-normalized (KITTI-style) odometry error.
///
/// For every start index and every target length in `options`, the first pose
/// reaching the target defines a segment; the relative-transform error over
/// the segment is normalized by the distance actually traveled along the
/// ground truth. Scores are averaged over all valid segments.
///
/// # Arguments
///
/// * `gt` - Ground-truth rigid transforms.
/// * `est` - Estimated rigid transforms, same length as `gt`.
/// * `options` - Segment-length set and segmentation mode.
///
/// # Returns
///
/// The averaged percentage translation drift and degrees-per-unit rotation
/// drift, or [`EvalError::TrajectoryTooShort`] when no segment of any target
/// length fits.
pub fn evaluate(gt: &[Se3], est: &[Se3], options: &SegmentOptions) -> Result<SegmentError, EvalError> {
    if gt.len() != est.len() {
        return Err(EvalError::LengthMismatch {
            gt: gt.len(),
            est: est.len(),
        });
    }

    let arc = trajectory_distances(gt);
    let frame_measure: Vec<f64>;
    let measure: &[f64] = if options.by_distance {
        &arc
    } else {
        frame_measure = (0..gt.len()).map(|i| i as f64).collect();
        &frame_measure
    };

    let mut trans_sum = 0.0;
    let mut rot_sum = 0.0;
    let mut num_segments = 0usize;

    for start in 0..gt.len() {
        for &target in &options.lengths {
            let Some(end) = segment_end(measure, start, target) else {
                continue;
            };
            let traveled = arc[end] - arc[start];
            if traveled < MIN_SEGMENT_DISTANCE {
                continue;
            }

            let gt_rel = gt[start].between(&gt[end]);
            let est_rel = est[start].between(&est[end]);
            let error = gt_rel.between(&est_rel);

            trans_sum += error.translation_norm() / traveled;
            rot_sum += error.rotation_angle().to_degrees() / traveled;
            num_segments += 1;
        }
    }

    if num_segments == 0 {
        return Err(EvalError::TrajectoryTooShort);
    }

    log::debug!("segment metric averaged over {} segments", num_segments);
    let count = num_segments as f64;
    Ok(SegmentError {
        translation: 100.0 * trans_sum / count,
        rotation: rot_sum / count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_line(n: usize, step: f64) -> Vec<Se3> {
        (0..n)
            .map(|i| Se3::new(Se3::IDENTITY.rotation, [i as f64 * step, 0.0, 0.0]))
            .collect()
    }

    #[test]
    fn test_trajectory_distances() {
        let traj = straight_line(5, 2.0);
        let distances = trajectory_distances(&traj);
        assert_eq!(distances, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_trajectory_distances_empty() {
        assert!(trajectory_distances(&[]).is_empty());
    }

    #[test]
    fn test_segment_identity_is_zero() -> Result<(), EvalError> {
        let traj = straight_line(20, 1.0);
        let options = SegmentOptions::distances(&[5.0, 10.0]);
        let result = evaluate(&traj, &traj, &options)?;
        assert_relative_eq!(result.translation, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.rotation, 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_segment_constant_drift() -> Result<(), EvalError> {
        // estimate travels 1.1 units per ground-truth unit: 10% drift on
        // every segment
        let gt = straight_line(20, 1.0);
        let est = straight_line(20, 1.1);
        let options = SegmentOptions::distances(&[5.0, 10.0]);
        let result = evaluate(&gt, &est, &options)?;
        assert_relative_eq!(result.translation, 10.0, epsilon = 1e-9);
        assert_relative_eq!(result.rotation, 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_segment_frame_based() -> Result<(), EvalError> {
        let gt = straight_line(10, 1.0);
        let est = straight_line(10, 1.1);
        let options = SegmentOptions::frames(&[3, 5]);
        let result = evaluate(&gt, &est, &options)?;
        assert_relative_eq!(result.translation, 10.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_segment_trajectory_too_short() {
        // path length 9 never reaches the default 100-unit segment
        let traj = straight_line(10, 1.0);
        assert!(matches!(
            evaluate(&traj, &traj, &SegmentOptions::default()),
            Err(EvalError::TrajectoryTooShort)
        ));
    }

    #[test]
    fn test_segment_stationary_trajectory() {
        // frame-count segments exist but no distance is traveled, so nothing
        // can be scored
        let traj = vec![Se3::IDENTITY; 10];
        let options = SegmentOptions::frames(&[3]);
        assert!(matches!(
            evaluate(&traj, &traj, &options),
            Err(EvalError::TrajectoryTooShort)
        ));
    }
}
