//! The geometry service the pipeline is handed, rather than reaching for
//! a global host application.

use crate::bbox::{transformed_bounding_box, Aabb3};
use crate::body::BodySnapshot;
use crate::error::Result;
use crate::mass::{physical_properties, CalculationAccuracy, PhysicalProperties};
use crate::mesh::SolidMesh;
use crate::obb::OrientedBox;
use minbox_math::Transform;

/// Geometry queries and temporary-body operations.
///
/// Every method works on values the caller passes in; implementations
/// hold no per-call state, so one provider can serve many threads. The
/// defaults cover [`SolidMesh`] bodies; hosts with their own geometry
/// engine override them.
pub trait GeometryProvider {
    /// Mass properties of `body` at the requested accuracy.
    fn physical_properties(
        &self,
        body: &SolidMesh,
        accuracy: CalculationAccuracy,
    ) -> Result<PhysicalProperties> {
        physical_properties(body, accuracy)
    }

    /// An independent copy of `body` that may be moved freely.
    fn snapshot(&self, body: &SolidMesh) -> Result<BodySnapshot> {
        Ok(BodySnapshot::copy_of(body))
    }

    /// Move `snapshot` and return its axis-aligned bounds afterwards.
    fn transformed_bounds(
        &self,
        snapshot: &mut BodySnapshot,
        transform: &Transform,
    ) -> Result<Aabb3> {
        transformed_bounding_box(snapshot, transform)
    }

    /// A temporary solid for `obb`.
    fn create_box(&self, obb: &OrientedBox) -> Result<BodySnapshot> {
        Ok(BodySnapshot::from_mesh(obb.to_mesh()))
    }

    /// Move a temporary solid in place.
    fn transform(&self, snapshot: &mut BodySnapshot, transform: &Transform) {
        snapshot.transform(transform);
    }
}

/// The stock provider over [`SolidMesh`] bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshKernel;

impl GeometryProvider for MeshKernel {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;
    use minbox_math::Point3;

    #[test]
    fn test_snapshot_leaves_body() {
        let body = make_box(1.0, 1.0, 1.0);
        let kernel = MeshKernel;
        let mut snap = kernel.snapshot(&body).unwrap();
        let aabb = kernel
            .transformed_bounds(&mut snap, &Transform::translation(0.0, 0.0, 2.0))
            .unwrap();
        assert!((aabb.min.z - 2.0).abs() < 1e-12);
        assert_eq!(body.aabb().min, Point3::origin());
    }

    #[test]
    fn test_create_box_is_closed_solid() {
        let aabb = Aabb3::new(Point3::origin(), Point3::new(2.0, 3.0, 4.0));
        let obb = OrientedBox::from_aabb(&aabb, &minbox_math::Frame::world());
        let kernel = MeshKernel;
        let solid = kernel.create_box(&obb).unwrap();
        let props = kernel
            .physical_properties(solid.mesh(), CalculationAccuracy::Medium)
            .unwrap();
        assert!((props.volume - 24.0).abs() < 1e-9);
    }
}
