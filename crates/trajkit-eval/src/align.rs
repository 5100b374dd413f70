use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use trajkit_geometry::linalg::{det33, matmul33, rotate_point3d, transpose33};

/// Squared-spread threshold below which a point set counts as coincident.
const MIN_SPREAD: f64 = 1e-12;

/// Similarity transform mapping estimated translations onto ground truth.
///
/// Points transform as `p' = scale * R * p + t`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityTransform {
    /// Rotation matrix (orthonormal, det = +1).
    pub rotation: [[f64; 3]; 3],
    /// Translation vector.
    pub translation: [f64; 3],
    /// Uniform scale factor, 1.0 when not solved.
    pub scale: f64,
}

impl SimilarityTransform {
    /// Apply the transform to a single point.
    pub fn apply(&self, point: &[f64; 3]) -> [f64; 3] {
        let rotated = rotate_point3d(&self.rotation, point);
        [
            self.scale * rotated[0] + self.translation[0],
            self.scale * rotated[1] + self.translation[1],
            self.scale * rotated[2] + self.translation[2],
        ]
    }

    /// The transform as a 4x4 homogeneous matrix.
    ///
    /// The rotation block is premultiplied by the scale, so the matrix acts on
    /// homogeneous points exactly as [`apply`](Self::apply) does.
    pub fn as_matrix(&self) -> [[f64; 4]; 4] {
        let r = &self.rotation;
        let s = self.scale;
        let t = &self.translation;
        [
            [s * r[0][0], s * r[0][1], s * r[0][2], t[0]],
            [s * r[1][0], s * r[1][1], s * r[1][2], t[1]],
            [s * r[2][0], s * r[2][1], s * r[2][2], t[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

/// Result of aligning two translation sequences.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// The recovered similarity transform.
    pub transform: SimilarityTransform,
    /// Ground-truth translations, unchanged (the reference frame).
    pub gt_aligned: Vec<[f64; 3]>,
    /// Estimated translations mapped into the ground-truth frame.
    pub est_aligned: Vec<[f64; 3]>,
}

/// Solve for the similarity transform that best maps `est` onto `gt`.
///
/// Closed-form orthogonal Procrustes / Umeyama solution: centroids are
/// subtracted, the cross-covariance of the centered sets is decomposed with
/// an SVD, and the rotation is recovered with a reflection correction so the
/// result is always a proper rotation. When `solve_scale` is set the global
/// scale is recovered from the singular values, otherwise it is fixed to 1.
///
/// # Arguments
///
/// * `gt` - Ground-truth translations.
/// * `est` - Estimated translations, same length as `gt`.
/// * `solve_scale` - Whether to solve for a global scale factor.
///
/// # Returns
///
/// The transform together with aligned copies of both sequences; inputs are
/// not mutated.
pub fn align_translations(
    gt: &[[f64; 3]],
    est: &[[f64; 3]],
    solve_scale: bool,
) -> Result<Alignment, EvalError> {
    if gt.len() != est.len() {
        return Err(EvalError::LengthMismatch {
            gt: gt.len(),
            est: est.len(),
        });
    }
    if gt.len() < 2 {
        return Err(EvalError::InsufficientPoints {
            required: 2,
            actual: gt.len(),
        });
    }

    let n = gt.len() as f64;

    // centroids of both point sets
    let mut gt_centroid = [0.0; 3];
    let mut est_centroid = [0.0; 3];
    for (g, e) in gt.iter().zip(est.iter()) {
        for k in 0..3 {
            gt_centroid[k] += g[k];
            est_centroid[k] += e[k];
        }
    }
    for k in 0..3 {
        gt_centroid[k] /= n;
        est_centroid[k] /= n;
    }

    // cross-covariance H = sum(est_centered * gt_centered^T) and the spreads
    // needed for the degeneracy checks and the scale denominator
    let mut h = [[0.0; 3]; 3];
    let mut gt_spread = 0.0;
    let mut est_spread = 0.0;
    for (g, e) in gt.iter().zip(est.iter()) {
        let gc = [
            g[0] - gt_centroid[0],
            g[1] - gt_centroid[1],
            g[2] - gt_centroid[2],
        ];
        let ec = [
            e[0] - est_centroid[0],
            e[1] - est_centroid[1],
            e[2] - est_centroid[2],
        ];
        gt_spread += gc[0] * gc[0] + gc[1] * gc[1] + gc[2] * gc[2];
        est_spread += ec[0] * ec[0] + ec[1] * ec[1] + ec[2] * ec[2];
        for (r, &ec_r) in ec.iter().enumerate() {
            for (c, &gc_c) in gc.iter().enumerate() {
                h[r][c] += ec_r * gc_c;
            }
        }
    }

    if gt_spread < MIN_SPREAD {
        // every ground-truth point coincides, no geometry to align to
        return Err(EvalError::InsufficientPoints {
            required: 2,
            actual: 1,
        });
    }
    if solve_scale && est_spread < MIN_SPREAD {
        return Err(EvalError::DegenerateScale);
    }

    // SVD of the cross-covariance, H = U * S * V^T
    let h_mat = faer::mat![
        [h[0][0], h[0][1], h[0][2]],
        [h[1][0], h[1][1], h[1][2]],
        [h[2][0], h[2][1], h[2][2]]
    ];
    let svd = h_mat.svd();
    let u = mat3_from_faer(svd.u());
    let v = mat3_from_faer(svd.v());

    // reflection correction: flip the axis of the smallest singular value so
    // that det(R) = +1
    let d = if det33(&matmul33(&v, &transpose33(&u))) < 0.0 {
        -1.0
    } else {
        1.0
    };
    let mut v_corrected = v;
    for row in v_corrected.iter_mut() {
        row[2] *= d;
    }
    let rotation = matmul33(&v_corrected, &transpose33(&u));

    let scale = if solve_scale {
        // trace(R * H) equals the sign-corrected singular value sum
        let rh = matmul33(&rotation, &h);
        (rh[0][0] + rh[1][1] + rh[2][2]) / est_spread
    } else {
        1.0
    };

    // t = gt_centroid - scale * R * est_centroid
    let rotated_centroid = rotate_point3d(&rotation, &est_centroid);
    let translation = [
        gt_centroid[0] - scale * rotated_centroid[0],
        gt_centroid[1] - scale * rotated_centroid[1],
        gt_centroid[2] - scale * rotated_centroid[2],
    ];

    let transform = SimilarityTransform {
        rotation,
        translation,
        scale,
    };
    log::debug!(
        "alignment solved: scale {}, translation {:?}",
        transform.scale,
        transform.translation
    );

    let est_aligned = est.iter().map(|p| transform.apply(p)).collect();

    Ok(Alignment {
        transform,
        gt_aligned: gt.to_vec(),
        est_aligned,
    })
}

fn mat3_from_faer(m: faer::MatRef<'_, f64>) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = m.read(i, j);
        }
    }
    out
}
