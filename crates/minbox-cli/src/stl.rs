//! STL reading and writing.

use anyhow::{bail, Context, Result};
use minbox_kernel::minbox_math::Point3;
use minbox_kernel::SolidMesh;
use std::collections::HashMap;
use std::path::Path;

/// Read a binary or ASCII STL file into a welded solid mesh.
pub fn read_stl(path: &Path) -> Result<SolidMesh> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_stl(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Parse STL bytes, detecting the flavor.
pub fn parse_stl(bytes: &[u8]) -> Result<SolidMesh> {
    let triangles = if looks_ascii(bytes) {
        parse_ascii(std::str::from_utf8(bytes).context("ASCII STL is not UTF-8")?)?
    } else {
        parse_binary(bytes)?
    };
    weld(&triangles)
}

fn looks_ascii(bytes: &[u8]) -> bool {
    // Binary files may also start with "solid", so require a facet keyword.
    // Raw bytes, since the window may end inside a multi-byte character.
    let head = &bytes[..bytes.len().min(512)];
    bytes.starts_with(b"solid")
        && head
            .windows(5)
            .any(|w| w == b"facet" || w == b"endso")
}

fn parse_binary(bytes: &[u8]) -> Result<Vec<[[f32; 3]; 3]>> {
    if bytes.len() < 84 {
        bail!("binary STL shorter than its header");
    }
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    let expected = 84 + count * 50;
    if bytes.len() < expected {
        bail!(
            "binary STL declares {} triangles but holds {} bytes",
            count,
            bytes.len()
        );
    }

    let read_f32 = |at: usize| {
        f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };
    let mut tris = Vec::with_capacity(count);
    for i in 0..count {
        // Skip the 12-byte facet normal; winding carries orientation
        let base = 84 + i * 50 + 12;
        let mut tri = [[0f32; 3]; 3];
        for (v, corner) in tri.iter_mut().enumerate() {
            for (c, coord) in corner.iter_mut().enumerate() {
                *coord = read_f32(base + v * 12 + c * 4);
            }
        }
        tris.push(tri);
    }
    Ok(tris)
}

fn parse_ascii(text: &str) -> Result<Vec<[[f32; 3]; 3]>> {
    let mut tris = Vec::new();
    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(3);
    for (line_no, line) in text.lines().enumerate() {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("vertex") => {
                let mut p = [0f32; 3];
                for coord in &mut p {
                    let at = line_no + 1;
                    *coord = words
                        .next()
                        .with_context(|| format!("line {at}: vertex needs 3 coordinates"))?
                        .parse()
                        .with_context(|| format!("line {at}: bad coordinate"))?;
                }
                corners.push(p);
            }
            Some("endloop") => {
                if corners.len() != 3 {
                    bail!("line {}: facet has {} vertices", line_no + 1, corners.len());
                }
                tris.push([corners[0], corners[1], corners[2]]);
                corners.clear();
            }
            _ => {}
        }
    }
    Ok(tris)
}

/// Merge bit-identical corners into shared vertices.
fn weld(tris: &[[[f32; 3]; 3]]) -> Result<SolidMesh> {
    let mut index: HashMap<[u32; 3], u32> = HashMap::new();
    let mut positions = Vec::new();
    let mut triangles = Vec::with_capacity(tris.len());
    for tri in tris {
        let mut ids = [0u32; 3];
        for (id, p) in ids.iter_mut().zip(tri) {
            let key = [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()];
            *id = *index.entry(key).or_insert_with(|| {
                positions.push(Point3::new(p[0] as f64, p[1] as f64, p[2] as f64));
                (positions.len() - 1) as u32
            });
        }
        triangles.push(ids);
    }
    Ok(SolidMesh::new(positions, triangles)?)
}

/// Encode a mesh as binary STL.
pub fn stl_bytes(mesh: &SolidMesh) -> Vec<u8> {
    let num_triangles = mesh.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    // 80-byte header
    let mut header = [b' '; 80];
    let tag = b"minbox STL export";
    header[..tag.len()].copy_from_slice(tag);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for [v0, v1, v2] in mesh.triangle_points() {
        let n = (v1 - v0).cross(&(v2 - v0));
        let n = n.try_normalize(1e-12).unwrap_or_else(|| n.map(|_| 0.0));
        for c in [n.x, n.y, n.z] {
            data.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in [v0, v1, v2] {
            for c in [v.x, v.y, v.z] {
                data.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

/// Write a mesh to a binary STL file.
pub fn write_stl(path: &Path, mesh: &SolidMesh) -> std::io::Result<()> {
    std::fs::write(path, stl_bytes(mesh))
}
