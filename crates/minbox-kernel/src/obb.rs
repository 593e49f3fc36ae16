//! Oriented bounding boxes.

use crate::align::align_coordinate_systems;
use crate::bbox::Aabb3;
use crate::error::Result;
use crate::mesh::SolidMesh;
use minbox_math::{Dir3, Frame, Point3, Transform, Vec3};

/// A box with a free orientation.
///
/// Extents are full edge lengths along the box's own axes, in fixed
/// order: `length` along `length_direction`, `width` along
/// `width_direction`, `height` along their cross product. The order says
/// nothing about which edge is longest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Box center.
    pub center: Point3,
    /// Direction of the `length` edge.
    pub length_direction: Dir3,
    /// Direction of the `width` edge.
    pub width_direction: Dir3,
    /// Extent along `length_direction`.
    pub length: f64,
    /// Extent along `width_direction`.
    pub width: f64,
    /// Extent along `height_direction()`.
    pub height: f64,
}

impl OrientedBox {
    /// First reconstruction step: a box at the local midpoint of `aabb`,
    /// oriented by the reference frame's X and Y axes (the normals of its
    /// YZ and XZ planes).
    pub fn from_aabb(aabb: &Aabb3, reference: &Frame) -> Self {
        Self {
            center: aabb.center(),
            length_direction: Dir3::new_normalize(reference.x),
            width_direction: Dir3::new_normalize(reference.y),
            length: aabb.length(),
            width: aabb.width(),
            height: aabb.height(),
        }
    }

    /// Direction of the `height` edge.
    pub fn height_direction(&self) -> Dir3 {
        Dir3::new_normalize(self.length_direction.cross(self.width_direction.as_ref()))
    }

    /// The box's own frame, centered on the box.
    pub fn frame(&self) -> Frame {
        Frame::new(
            self.center,
            self.length_direction.into_inner(),
            self.width_direction.into_inner(),
            self.height_direction().into_inner(),
        )
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// The same box moved by a rigid transform.
    pub fn transformed(&self, t: &Transform) -> Self {
        Self {
            center: t.apply_point(&self.center),
            length_direction: Dir3::new_normalize(t.apply_vec(&self.length_direction)),
            width_direction: Dir3::new_normalize(t.apply_vec(&self.width_direction)),
            ..*self
        }
    }

    /// The eight corners, bottom face first, counter-clockwise seen from
    /// `+height_direction`, in the vertex order of
    /// [`make_box`](crate::primitives::make_box).
    pub fn corners(&self) -> [Point3; 8] {
        let l: Vec3 = self.length_direction.into_inner() * (self.length / 2.0);
        let w: Vec3 = self.width_direction.into_inner() * (self.width / 2.0);
        let h: Vec3 = self.height_direction().into_inner() * (self.height / 2.0);
        let c = self.center;
        [
            c - l - w - h,
            c + l - w - h,
            c + l + w - h,
            c - l + w - h,
            c - l - w + h,
            c + l - w + h,
            c + l + w + h,
            c - l + w + h,
        ]
    }

    /// Whether `p` lies inside the box, allowing `tol` of slack.
    pub fn contains(&self, p: &Point3, tol: f64) -> bool {
        let d = p - self.center;
        d.dot(self.length_direction.as_ref()).abs() <= self.length / 2.0 + tol
            && d.dot(self.width_direction.as_ref()).abs() <= self.width / 2.0 + tol
            && d.dot(self.height_direction().as_ref()).abs() <= self.height / 2.0 + tol
    }

    /// A closed triangle mesh of this box.
    pub fn to_mesh(&self) -> SolidMesh {
        let base = crate::primitives::make_box(1.0, 1.0, 1.0);
        let corners = self.corners();
        SolidMesh::from_trusted(corners.to_vec(), base.triangles().to_vec())
    }
}

/// Second reconstruction step: carry a box built in the reference frame
/// at `center_of_mass` over to the principal frame at the same point.
pub fn place_in_world(
    local: &OrientedBox,
    reference: &Frame,
    principal: &Frame,
) -> Result<OrientedBox> {
    let back = align_coordinate_systems(
        &reference.at(principal.origin),
        &principal.at(principal.origin),
    )?;
    Ok(local.transformed(&back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mass::{physical_properties, CalculationAccuracy};
    use approx::assert_relative_eq;

    fn sample() -> OrientedBox {
        let aabb = Aabb3::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0));
        OrientedBox::from_aabb(&aabb, &Frame::world())
    }

    #[test]
    fn test_from_aabb() {
        let aabb = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 2.0, 1.0));
        let obb = OrientedBox::from_aabb(&aabb, &Frame::world());
        assert_eq!(obb.center, Point3::new(2.0, 1.0, 0.5));
        assert_eq!(obb.length, 4.0);
        assert_eq!(obb.width, 2.0);
        assert_eq!(obb.height, 1.0);
        assert!((obb.height_direction().into_inner() - Vec3::z()).norm() < 1e-15);
    }

    #[test]
    fn test_corners_and_contains() {
        let obb = sample();
        for c in obb.corners() {
            assert!(obb.contains(&c, 1e-12));
        }
        assert!(!obb.contains(&Point3::new(1.5, 0.0, 0.0), 1e-12));
        assert_relative_eq!(obb.volume(), 48.0);
    }

    #[test]
    fn test_mesh_matches_box() {
        let obb = sample().transformed(&Transform::rotation_z(0.4));
        let mesh = obb.to_mesh();
        assert_eq!(mesh.num_triangles(), 12);
        let props = physical_properties(&mesh, CalculationAccuracy::High).unwrap();
        assert_relative_eq!(props.volume, 48.0, epsilon = 1e-9);
        assert!((props.center_of_mass - obb.center).norm() < 1e-9);
    }

    #[test]
    fn test_transformed_keeps_extents() {
        let t = Transform::translation(5.0, 0.0, 0.0).then(&Transform::rotation_z(1.0));
        let moved = sample().transformed(&t);
        assert_eq!(moved.length, 2.0);
        assert!(moved.frame().is_orthonormal(1e-12));
        assert!((moved.center - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_place_in_world_matches_direct_construction() {
        let axis = Dir3::new_normalize(Vec3::new(2.0, 1.0, -1.0));
        let t = Transform::rotation_about_axis(&axis, 0.8);
        let com = Point3::new(1.0, 2.0, 3.0);
        let principal = Frame::new(
            com,
            t.apply_vec(&Vec3::x()),
            t.apply_vec(&Vec3::y()),
            t.apply_vec(&Vec3::z()),
        );
        let local_mid = Point3::new(1.5, 1.0, 3.25);
        let half = Vec3::new(2.0, 1.0, 0.5);
        let aabb = Aabb3::new(local_mid - half, local_mid + half);
        let local = OrientedBox::from_aabb(&aabb, &Frame::world());
        let placed = place_in_world(&local, &Frame::world(), &principal).unwrap();

        let direct_center = com + principal.axes_matrix() * (local_mid - com);
        assert!((placed.center - direct_center).norm() < 1e-12);
        assert!((placed.length_direction.into_inner() - principal.x).norm() < 1e-12);
        assert!((placed.width_direction.into_inner() - principal.y).norm() < 1e-12);
        assert!((placed.height_direction().into_inner() - principal.z).norm() < 1e-12);
        assert_eq!((placed.length, placed.width, placed.height), (4.0, 2.0, 1.0));
    }
}
