#![warn(missing_docs)]

//! Math types for the minbox bounding-box kernel.
//!
//! Thin wrappers around nalgebra providing the geometric vocabulary the
//! kernel works in: points, vectors, directions, rigid transforms,
//! coordinate frames, and tolerance constants.

use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 3x3 matrix, used for rotation blocks and inertia tensors.
pub type Mat3 = Matrix3<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Build from a 3x3 rotation block and a translation vector.
    ///
    /// The block is stored as given; callers that need a rigid transform
    /// should check [`Transform::is_rigid`].
    pub fn from_parts(rotation: &Mat3, translation: &Vec3) -> Self {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
        m[(0, 3)] = translation.x;
        m[(1, 3)] = translation.y;
        m[(2, 3)] = translation.z;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// Applying the result to a point applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// The upper-left 3x3 (rotation) block.
    pub fn rotation(&self) -> Mat3 {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The translation column.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Whether this is a proper rigid motion: orthonormal rotation block
    /// with determinant +1 and no projective row.
    pub fn is_rigid(&self, tol: f64) -> bool {
        let r = self.rotation();
        let ortho = (r.transpose() * r - Mat3::identity()).abs().max() < tol;
        let bottom = self.matrix.fixed_view::<1, 4>(3, 0);
        let affine = bottom[0].abs() < tol
            && bottom[1].abs() < tol
            && bottom[2].abs() < tol
            && (bottom[3] - 1.0).abs() < tol;
        ortho && affine && (r.determinant() - 1.0).abs() < tol
    }

    /// Check whether two transforms agree entry-wise within `tol`.
    pub fn approx_eq(&self, other: &Transform, tol: f64) -> bool {
        (self.matrix - other.matrix).abs().max() < tol
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A local coordinate system: an origin and three axes.
///
/// Frames built by the kernel are orthonormal and right-handed. Frames
/// supplied from outside are checked with [`Frame::is_orthonormal`]
/// before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Frame origin in world coordinates.
    pub origin: Point3,
    /// Local X axis.
    pub x: Vec3,
    /// Local Y axis.
    pub y: Vec3,
    /// Local Z axis.
    pub z: Vec3,
}

impl Frame {
    /// Create a frame from an origin and three axes, unchecked.
    pub fn new(origin: Point3, x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { origin, x, y, z }
    }

    /// The world frame: origin at zero, unit X/Y/Z axes.
    pub fn world() -> Self {
        Self::new(Point3::origin(), Vec3::x(), Vec3::y(), Vec3::z())
    }

    /// The same axes moved to a new origin.
    pub fn at(&self, origin: Point3) -> Self {
        Self { origin, ..*self }
    }

    /// Axes as matrix columns `[x y z]`.
    pub fn axes_matrix(&self) -> Mat3 {
        Mat3::from_columns(&[self.x, self.y, self.z])
    }

    /// Whether the axes are unit length and pairwise orthogonal within `tol`.
    ///
    /// Handedness is not checked.
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let axes = [self.x, self.y, self.z];
        let finite = axes.iter().all(|a| a.iter().all(|c| c.is_finite()))
            && self.origin.iter().all(|c| c.is_finite());
        finite
            && axes.iter().all(|a| (a.norm() - 1.0).abs() < tol)
            && self.x.dot(&self.y).abs() < tol
            && self.y.dot(&self.z).abs() < tol
            && self.z.dot(&self.x).abs() < tol
    }

    /// Whether `z` agrees with `x × y`.
    pub fn is_right_handed(&self) -> bool {
        self.x.cross(&self.y).dot(&self.z) > 0.0
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::world()
    }
}

/// Midpoint of a scalar interval, computed as `min + (max - min) / 2`.
///
/// Unlike `(min + max) / 2` this does not overflow when both ends are
/// large with the same sign, or for `-1e300..1e300`.
pub fn middle(min: f64, max: f64) -> f64 {
    min + (max - min) / 2.0
}

/// Component-wise [`middle`] of two points.
pub fn mid_point(min: &Point3, max: &Point3) -> Point3 {
    Point3::new(
        middle(min.x, max.x),
        middle(min.y, max.y),
        middle(min.z, max.z),
    )
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance, in model units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two directions are parallel or anti-parallel.
    pub fn parallel(&self, a: &Vec3, b: &Vec3) -> bool {
        let (na, nb) = (a.norm(), b.norm());
        if na == 0.0 || nb == 0.0 {
            return false;
        }
        1.0 - (a.dot(b) / (na * nb)).abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
