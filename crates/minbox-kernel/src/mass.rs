//! Mass properties and principal axes of closed triangle meshes.
//!
//! Volume integrals are accumulated per triangle as signed tetrahedra
//! against a reference point (divergence theorem), assuming uniform unit
//! density. The inertia tensor about the center of mass is then
//! diagonalized to obtain the principal axes.

use crate::error::{BoxError, Result};
use crate::mesh::SolidMesh;
use minbox_math::{Frame, Mat3, Point3, Vec3};
use nalgebra::SymmetricEigen;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Volumes below this fraction of the bounding diagonal cubed are treated as zero.
const RELATIVE_VOLUME_EPS: f64 = 1e-12;

/// Off-diagonal inertia entries below this fraction of the largest entry
/// are noise at every accuracy tier.
const MIN_SNAP: f64 = 1e-12;

/// Precision tier for mass-property queries.
///
/// Higher tiers spend more solver iterations for tighter axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationAccuracy {
    /// Fast, loose convergence.
    Low,
    /// Balanced default.
    #[default]
    Medium,
    /// Tight convergence.
    High,
    /// Converge to machine precision.
    VeryHigh,
}

impl CalculationAccuracy {
    /// Relative convergence threshold of the eigen solver.
    pub fn epsilon(self) -> f64 {
        match self {
            Self::Low => 1e-6,
            Self::Medium => 1e-9,
            Self::High => 1e-12,
            Self::VeryHigh => f64::EPSILON,
        }
    }

    /// Iteration cap of the eigen solver.
    pub fn max_iterations(self) -> usize {
        match self {
            Self::Low => 32,
            Self::Medium => 128,
            Self::High => 512,
            Self::VeryHigh => 4096,
        }
    }

    fn snap_threshold(self) -> f64 {
        self.epsilon().max(MIN_SNAP)
    }
}

/// Mass properties of a solid with uniform unit density.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalProperties {
    /// Enclosed volume (equal to mass).
    pub volume: f64,
    /// Center of mass in world coordinates.
    pub center_of_mass: Point3,
    /// Inertia tensor about the center of mass, world axes.
    pub inertia: Mat3,
    /// Principal moments, in the same order as `principal_axes`.
    pub principal_moments: Vec3,
    /// Orthonormal, right-handed principal axes.
    pub principal_axes: [Vec3; 3],
}

impl PhysicalProperties {
    /// The principal frame, anchored at the center of mass.
    pub fn principal_frame(&self) -> Frame {
        let [x, y, z] = self.principal_axes;
        Frame::new(self.center_of_mass, x, y, z)
    }
}

/// Compute volume, center of mass and principal axes of `body`.
///
/// Fails with [`BoxError::Geometry`] when the enclosed volume is
/// effectively zero or the inertia tensor cannot be diagonalized.
pub fn physical_properties(
    body: &SolidMesh,
    accuracy: CalculationAccuracy,
) -> Result<PhysicalProperties> {
    let positions = body.positions();
    let reference = positions
        .iter()
        .fold(Vec3::zeros(), |acc, p| acc + p.coords)
        / positions.len().max(1) as f64;
    let reference = Point3::from(reference);

    let mut six_volume = 0.0;
    let mut first = Vec3::zeros();
    let mut second = Mat3::zeros();
    for [p0, p1, p2] in body.triangle_points() {
        let (a, b, c) = (p0 - reference, p1 - reference, p2 - reference);
        let det = a.dot(&b.cross(&c));
        let s = a + b + c;
        six_volume += det;
        first += det * s;
        second += det
            * (a * a.transpose() + b * b.transpose() + c * c.transpose() + s * s.transpose());
    }

    let mut volume = six_volume / 6.0;
    let mut moment = first / 24.0;
    let mut covariance = second / 120.0;

    let scale = body.aabb().diagonal();
    if !scale.is_finite() || volume.abs() <= RELATIVE_VOLUME_EPS * scale.powi(3) {
        return Err(BoxError::Geometry(format!(
            "body encloses no volume (volume = {volume:e})"
        )));
    }
    if volume < 0.0 {
        warn!(volume, "mesh is inside out, flipping orientation");
        volume = -volume;
        moment = -moment;
        covariance = -covariance;
    }

    let offset = moment / volume;
    let center_of_mass = reference + offset;
    let covariance = covariance - volume * offset * offset.transpose();
    let inertia = Mat3::identity() * covariance.trace() - covariance;

    let (principal_moments, principal_axes) = principal_axes(&inertia, accuracy)?;
    debug!(
        volume,
        com = ?center_of_mass,
        moments = ?principal_moments,
        "mass properties"
    );

    Ok(PhysicalProperties {
        volume,
        center_of_mass,
        inertia,
        principal_moments,
        principal_axes,
    })
}

/// Diagonalize a symmetric inertia tensor.
///
/// Axes are matched to world X, Y, Z (the permutation with the strongest
/// alignment wins, identity first on ties), X and Y are signed to point
/// along their world counterparts, and Z completes a right-handed triple.
fn principal_axes(inertia: &Mat3, accuracy: CalculationAccuracy) -> Result<(Vec3, [Vec3; 3])> {
    let magnitude = inertia.abs().max();
    if !(magnitude.is_finite() && magnitude > 0.0) {
        return Err(BoxError::Geometry("inertia tensor is zero".into()));
    }
    let mut scaled = inertia / magnitude;
    let snap = accuracy.snap_threshold();
    for i in 0..3 {
        for j in 0..3 {
            if i != j && scaled[(i, j)].abs() <= snap {
                scaled[(i, j)] = 0.0;
            }
        }
    }

    let eigen = SymmetricEigen::try_new(scaled, accuracy.epsilon(), accuracy.max_iterations())
        .ok_or_else(|| BoxError::Geometry("inertia tensor did not converge".into()))?;
    let vectors: [Vec3; 3] = [0, 1, 2].map(|k| eigen.eigenvectors.column(k).into_owned());

    let perm = best_permutation(&vectors);
    let x = signed_towards(vectors[perm[0]].normalize(), 0);
    let y = vectors[perm[1]] - x * x.dot(&vectors[perm[1]]);
    let norm_y = y.norm();
    if norm_y < MIN_SNAP {
        return Err(BoxError::Geometry("principal axes are not independent".into()));
    }
    let y = signed_towards(y / norm_y, 1);
    let z = x.cross(&y);

    let moments = Vec3::new(
        eigen.eigenvalues[perm[0]],
        eigen.eigenvalues[perm[1]],
        eigen.eigenvalues[perm[2]],
    ) * magnitude;
    Ok((moments, [x, y, z]))
}

const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

fn best_permutation(vectors: &[Vec3; 3]) -> [usize; 3] {
    let score = |p: &[usize; 3]| -> f64 { (0..3).map(|k| vectors[p[k]][k].abs()).sum() };
    let mut best = PERMUTATIONS[0];
    let mut best_score = score(&best);
    for p in &PERMUTATIONS[1..] {
        let s = score(p);
        // Strictly greater, so ties keep the earlier permutation
        if s > best_score + 1e-12 {
            best = *p;
            best_score = s;
        }
    }
    best
}

/// Flip `v` so its component along world axis `k` is positive.
fn signed_towards(v: Vec3, k: usize) -> Vec3 {
    if v[k] < 0.0 {
        -v
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{make_box, make_centered_box, make_cylinder};
    use approx::assert_relative_eq;
    use minbox_math::{Dir3, Transform};

    #[test]
    fn test_unit_cube() {
        let props = physical_properties(&make_centered_box(1.0, 1.0, 1.0), Default::default())
            .unwrap();
        assert_relative_eq!(props.volume, 1.0, epsilon = 1e-12);
        assert!(props.center_of_mass.coords.norm() < 1e-12);
        // I = m (a² + b²) / 12
        for k in 0..3 {
            assert_relative_eq!(props.principal_moments[k], 1.0 / 6.0, epsilon = 1e-12);
        }
        assert!(props.principal_frame().is_orthonormal(1e-12));
    }

    #[test]
    fn test_axis_aligned_box_is_world_frame() {
        let props =
            physical_properties(&make_box(1.0, 2.0, 3.0), CalculationAccuracy::High).unwrap();
        assert_relative_eq!(props.volume, 6.0, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.z, 1.5, epsilon = 1e-12);
        let [x, y, z] = props.principal_axes;
        assert!((x - Vec3::x()).norm() < 1e-9);
        assert!((y - Vec3::y()).norm() < 1e-9);
        assert!((z - Vec3::z()).norm() < 1e-9);
        // moments about x: 6 (4 + 9) / 12
        assert_relative_eq!(props.principal_moments.x, 6.5, epsilon = 1e-9);
        assert_relative_eq!(props.principal_moments.y, 5.0, epsilon = 1e-9);
        assert_relative_eq!(props.principal_moments.z, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_rotated_box_axes_follow_body() {
        let axis = Dir3::new_normalize(Vec3::new(1.0, 2.0, 0.5));
        let t = Transform::rotation_about_axis(&axis, 0.6);
        let body = make_centered_box(1.0, 2.0, 3.0).transformed(&t);
        let props = physical_properties(&body, CalculationAccuracy::High).unwrap();
        let local = [Vec3::x(), Vec3::y(), Vec3::z()].map(|v| t.apply_vec(&v));
        for axis in props.principal_axes {
            let best = local
                .iter()
                .map(|l| l.dot(&axis).abs())
                .fold(0.0, f64::max);
            assert_relative_eq!(best, 1.0, epsilon = 1e-9);
        }
        let frame = props.principal_frame();
        assert!(frame.is_orthonormal(1e-9));
        assert!(frame.is_right_handed());
    }

    #[test]
    fn test_inside_out_mesh_is_flipped() {
        let mut body = make_box(2.0, 2.0, 2.0);
        body.flip();
        let props = physical_properties(&body, CalculationAccuracy::Medium).unwrap();
        assert_relative_eq!(props.volume, 8.0, epsilon = 1e-12);
        assert_relative_eq!(props.center_of_mass.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_mesh_is_degenerate() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let flat = SolidMesh::new(pts, vec![[0, 1, 2], [0, 2, 1]]).unwrap();
        let err = physical_properties(&flat, CalculationAccuracy::Medium).unwrap_err();
        assert!(matches!(err, BoxError::Geometry(_)));
    }

    #[test]
    fn test_cylinder_axis_along_z() {
        let body = make_cylinder(1.0, 10.0, 48);
        let props = physical_properties(&body, CalculationAccuracy::Low).unwrap();
        let [_, _, z] = props.principal_axes;
        assert_relative_eq!(z.z.abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_accuracy_tiers_agree() {
        let axis = Dir3::new_normalize(Vec3::new(0.3, -1.0, 2.0));
        let t = Transform::rotation_about_axis(&axis, 1.1);
        let body = make_centered_box(4.0, 2.0, 1.0).transformed(&t);
        let low = physical_properties(&body, CalculationAccuracy::Low).unwrap();
        let high = physical_properties(&body, CalculationAccuracy::VeryHigh).unwrap();
        for k in 0..3 {
            assert!(low.principal_axes[k].dot(&high.principal_axes[k]).abs() > 1.0 - 1e-6);
        }
    }

    #[test]
    fn test_accuracy_serde_names() {
        #[derive(Deserialize)]
        struct Wrap {
            accuracy: CalculationAccuracy,
        }
        let w: Wrap = toml::from_str("accuracy = \"very-high\"").unwrap();
        assert_eq!(w.accuracy, CalculationAccuracy::VeryHigh);
    }
}
