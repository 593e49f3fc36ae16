//! Closed triangle meshes standing in for solid bodies.

use crate::bbox::Aabb3;
use crate::error::{BoxError, Result};
use minbox_math::{Point3, Transform};

/// A closed, consistently oriented triangle mesh.
///
/// Triangles wind counter-clockwise when viewed from outside, so the
/// signed volume of a well-formed solid is positive. Inside-out meshes
/// are tolerated by the mass-property code.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidMesh {
    positions: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
}

impl SolidMesh {
    /// Create a mesh, validating indices and coordinates.
    ///
    /// Fails with [`BoxError::InvalidInput`] when there are no triangles,
    /// an index is out of range, or a coordinate is not finite.
    pub fn new(positions: Vec<Point3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(BoxError::InvalidInput("mesh has no triangles".into()));
        }
        if let Some(p) = positions.iter().find(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(BoxError::InvalidInput(format!(
                "non-finite vertex ({}, {}, {})",
                p.x, p.y, p.z
            )));
        }
        let n = positions.len();
        for (i, tri) in triangles.iter().enumerate() {
            if let Some(&bad) = tri.iter().find(|&&idx| idx as usize >= n) {
                return Err(BoxError::InvalidInput(format!(
                    "triangle {i} references vertex {bad}, mesh has {n}"
                )));
            }
        }
        Ok(Self {
            positions,
            triangles,
        })
    }

    /// Build from data the kernel generated itself.
    pub(crate) fn from_trusted(positions: Vec<Point3>, triangles: Vec<[u32; 3]>) -> Self {
        debug_assert!(triangles
            .iter()
            .all(|t| t.iter().all(|&i| (i as usize) < positions.len())));
        Self {
            positions,
            triangles,
        }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Triangle vertex indices.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Iterate triangle corner positions.
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles.iter().map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Apply a transform to every vertex in place.
    pub fn transform(&mut self, t: &Transform) {
        for p in &mut self.positions {
            *p = t.apply_point(p);
        }
    }

    /// A transformed copy of this mesh.
    pub fn transformed(&self, t: &Transform) -> Self {
        let mut out = self.clone();
        out.transform(t);
        out
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &SolidMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }

    /// Axis-aligned bounds of the vertices actually used by triangles.
    pub fn aabb(&self) -> Aabb3 {
        let mut aabb = Aabb3::empty();
        for tri in &self.triangles {
            for &idx in tri {
                aabb.include_point(&self.positions[idx as usize]);
            }
        }
        aabb
    }

    /// Flip the winding of every triangle.
    pub fn flip(&mut self) {
        for t in &mut self.triangles {
            t.swap(1, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;

    #[test]
    fn test_rejects_empty() {
        let err = SolidMesh::new(vec![Point3::origin()], Vec::new()).unwrap_err();
        assert!(matches!(err, BoxError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_bad_index() {
        let pts = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let err = SolidMesh::new(pts, vec![[0, 1, 2]]).unwrap_err();
        assert!(matches!(err, BoxError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_nan() {
        let pts = vec![
            Point3::origin(),
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        assert!(SolidMesh::new(pts, vec![[0, 1, 2]]).is_err());
    }

    #[test]
    fn test_transform_moves_aabb() {
        let mut mesh = make_box(1.0, 2.0, 3.0);
        mesh.transform(&Transform::translation(10.0, 0.0, 0.0));
        let aabb = mesh.aabb();
        assert!((aabb.min.x - 10.0).abs() < 1e-12);
        assert!((aabb.max.x - 11.0).abs() < 1e-12);
        assert!((aabb.max.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = make_box(1.0, 1.0, 1.0);
        let b = make_box(1.0, 1.0, 1.0).transformed(&Transform::translation(5.0, 0.0, 0.0));
        let (nv, nt) = (a.num_vertices(), a.num_triangles());
        a.merge(&b);
        assert_eq!(a.num_vertices(), 2 * nv);
        assert_eq!(a.num_triangles(), 2 * nt);
        assert!(a.triangles()[nt..].iter().all(|t| t.iter().all(|&i| i as usize >= nv)));
        assert!((a.aabb().max.x - 6.0).abs() < 1e-12);
    }
}
