//! Disposable body copies.

use crate::mesh::SolidMesh;
use minbox_math::Transform;

/// An independently owned copy of a body's boundary geometry.
///
/// The kernel only ever moves snapshots, never the body a caller passed
/// in. A snapshot is not `Clone`: whoever holds it owns it exclusively,
/// and dropping it releases the geometry.
#[derive(Debug, PartialEq)]
pub struct BodySnapshot {
    mesh: SolidMesh,
}

impl BodySnapshot {
    /// Copy `body` into a fresh snapshot.
    pub fn copy_of(body: &SolidMesh) -> Self {
        Self { mesh: body.clone() }
    }

    /// Wrap a mesh the caller already owns.
    pub fn from_mesh(mesh: SolidMesh) -> Self {
        Self { mesh }
    }

    /// The current geometry.
    pub fn mesh(&self) -> &SolidMesh {
        &self.mesh
    }

    /// Move the snapshot in place.
    pub fn transform(&mut self, t: &Transform) {
        self.mesh.transform(t);
    }

    /// Give up the snapshot and keep its geometry.
    pub fn into_mesh(self) -> SolidMesh {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::make_box;

    #[test]
    fn test_snapshot_is_independent() {
        let body = make_box(1.0, 1.0, 1.0);
        let mut snap = BodySnapshot::copy_of(&body);
        snap.transform(&Transform::translation(3.0, 0.0, 0.0));
        assert!((snap.mesh().aabb().min.x - 3.0).abs() < 1e-12);
        assert!(body.aabb().min.x.abs() < 1e-12);
        assert_ne!(snap.into_mesh(), body);
    }
}
