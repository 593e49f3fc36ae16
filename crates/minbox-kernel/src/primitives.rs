//! Primitive solid construction.
//!
//! Closed triangle meshes for boxes and faceted cylinders, with outward
//! counter-clockwise winding.

use crate::mesh::SolidMesh;
use minbox_math::{Point3, Transform};
use std::f64::consts::PI;

/// Build a box (cuboid) with corner at origin and dimensions `(sx, sy, sz)`.
///
/// Vertex layout (corner-aligned at origin):
/// ```text
///     v4----v5
///    /|    /|
///   v7----v6|    z
///   | v0--|-v1   | y
///   |/    |/     |/
///   v3----v2     +---x
/// ```
pub fn make_box(sx: f64, sy: f64, sz: f64) -> SolidMesh {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(sx, 0.0, 0.0),
        Point3::new(sx, sy, 0.0),
        Point3::new(0.0, sy, 0.0),
        Point3::new(0.0, 0.0, sz),
        Point3::new(sx, 0.0, sz),
        Point3::new(sx, sy, sz),
        Point3::new(0.0, sy, sz),
    ];

    // Each face CCW viewed from outside
    let quads: [[u32; 4]; 6] = [
        [0, 3, 2, 1], // bottom, -Z
        [4, 5, 6, 7], // top, +Z
        [0, 1, 5, 4], // front, -Y
        [2, 3, 7, 6], // back, +Y
        [0, 4, 7, 3], // left, -X
        [1, 2, 6, 5], // right, +X
    ];
    let triangles = quads
        .iter()
        .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
        .collect();

    SolidMesh::from_trusted(positions, triangles)
}

/// Build a box of dimensions `(sx, sy, sz)` centered on the origin.
pub fn make_centered_box(sx: f64, sy: f64, sz: f64) -> SolidMesh {
    make_box(sx, sy, sz).transformed(&Transform::translation(-sx / 2.0, -sy / 2.0, -sz / 2.0))
}

/// Build a faceted cylinder along +Z with its base centered at the origin.
///
/// `segments` is clamped to at least 3.
pub fn make_cylinder(radius: f64, height: f64, segments: u32) -> SolidMesh {
    let n = segments.max(3);
    let mut positions = Vec::with_capacity(2 * n as usize + 2);
    for ring_z in [0.0, height] {
        for i in 0..n {
            let theta = 2.0 * PI * i as f64 / n as f64;
            let (s, c) = theta.sin_cos();
            positions.push(Point3::new(radius * c, radius * s, ring_z));
        }
    }
    let bottom_center = 2 * n;
    let top_center = 2 * n + 1;
    positions.push(Point3::new(0.0, 0.0, 0.0));
    positions.push(Point3::new(0.0, 0.0, height));

    let mut triangles = Vec::with_capacity(4 * n as usize);
    for i in 0..n {
        let j = (i + 1) % n;
        let (b0, b1, t0, t1) = (i, j, n + i, n + j);
        triangles.push([bottom_center, b1, b0]);
        triangles.push([top_center, t0, t1]);
        triangles.push([b0, b1, t1]);
        triangles.push([b0, t1, t0]);
    }

    SolidMesh::from_trusted(positions, triangles)
}
