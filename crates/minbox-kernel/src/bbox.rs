//! Axis-aligned bounding boxes and the transformed-extent reduction.
//!
//! The oriented box is found by moving a disposable copy of the body
//! into its principal frame and taking the plain min/max box there.

use crate::body::BodySnapshot;
use crate::error::{BoxError, Result};
use minbox_math::{mid_point, Point3, Transform, Vec3};

/// Extents below this fraction of the box diagonal count as zero.
const RELATIVE_EXTENT_EPS: f64 = 1e-9;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Whether no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Extent along X.
    pub fn length(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    pub fn width(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent along Z.
    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Extents as a vector `(length, width, height)`.
    pub fn extents(&self) -> Vec3 {
        Vec3::new(self.length(), self.width(), self.height())
    }

    /// Center point, via the overflow-safe midpoint.
    pub fn center(&self) -> Point3 {
        mid_point(&self.min, &self.max)
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f64 {
        self.extents().norm()
    }

    /// Check that every extent is strictly positive.
    ///
    /// Zero or negative extents mean a flat or empty body; that is
    /// reported rather than passed on as a zero-filled box. The cutoff
    /// scales with the box, so small solids in any unit pass.
    pub fn ensure_solid(&self) -> Result<()> {
        let e = self.extents();
        if self.is_empty() || !e.iter().all(|c| c.is_finite()) {
            return Err(BoxError::Geometry("bounding box is empty".into()));
        }
        let cutoff = RELATIVE_EXTENT_EPS * e.norm();
        if e.iter().any(|&c| c <= cutoff) {
            return Err(BoxError::Geometry(format!(
                "bounding box has zero extent ({} x {} x {})",
                e.x, e.y, e.z
            )));
        }
        Ok(())
    }
}

/// Move `snapshot` by `transform` and return its bounds in the new space.
///
/// The snapshot is mutated in place; the body it was copied from is never
/// touched. Degenerate results are an error.
pub fn transformed_bounding_box(
    snapshot: &mut BodySnapshot,
    transform: &Transform,
) -> Result<Aabb3> {
    snapshot.transform(transform);
    let aabb = snapshot.mesh().aabb();
    aabb.ensure_solid()?;
    Ok(aabb)
}
