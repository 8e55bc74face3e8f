//! Cleanup passes for generated triangle meshes.
//!
//! Run before flattening a [`TriMesh`] into a vertex buffer: generators
//! may emit degenerate triangles (sphere poles), and downstream normal
//! averaging must not see unreferenced or non-manifold geometry.

use std::collections::HashMap;

use glam::Vec3;

use super::generators::TriMesh;

/// Squared-area threshold below which a triangle counts as degenerate.
const ZERO_AREA_EPS: f32 = 1e-12;

/// Remove vertices referenced by no face and remap face indices.
///
/// Returns the number of vertices removed.
pub fn remove_unreferenced_vertices(mesh: &mut TriMesh) -> usize {
    let mut referenced = vec![false; mesh.positions.len()];
    for face in &mesh.faces {
        for &vi in face {
            referenced[vi as usize] = true;
        }
    }

    let mut remap = vec![u32::MAX; mesh.positions.len()];
    let mut kept = Vec::with_capacity(mesh.positions.len());
    for (i, position) in mesh.positions.iter().enumerate() {
        if referenced[i] {
            remap[i] = kept.len() as u32;
            kept.push(*position);
        }
    }

    let removed = mesh.positions.len() - kept.len();
    mesh.positions = kept;
    for face in &mut mesh.faces {
        for vi in face {
            *vi = remap[*vi as usize];
        }
    }
    removed
}

/// Remove triangles with (near-)zero area.
///
/// Returns the number of faces removed.
pub fn remove_zero_area_faces(mesh: &mut TriMesh) -> usize {
    let positions = &mesh.positions;
    let before = mesh.faces.len();
    mesh.faces.retain(|face| {
        let p0 = positions[face[0] as usize];
        let p1 = positions[face[1] as usize];
        let p2 = positions[face[2] as usize];
        (p1 - p0).cross(p2 - p0).length_squared() > ZERO_AREA_EPS
    });
    before - mesh.faces.len()
}

/// Remove triangles containing an edge shared by more than two faces.
///
/// Returns the number of faces removed.
pub fn remove_non_manifold_faces(mesh: &mut TriMesh) -> usize {
    let mut edge_count: HashMap<(u32, u32), u32> = HashMap::new();
    for face in &mesh.faces {
        for (a, b) in face_edges(face) {
            *edge_count.entry((a, b)).or_insert(0) += 1;
        }
    }

    let before = mesh.faces.len();
    mesh.faces
        .retain(|face| face_edges(face).iter().all(|key| edge_count[key] <= 2));
    before - mesh.faces.len()
}

fn face_edges(face: &[u32; 3]) -> [(u32, u32); 3] {
    let edge = |a: u32, b: u32| (a.min(b), a.max(b));
    [
        edge(face[0], face[1]),
        edge(face[1], face[2]),
        edge(face[2], face[0]),
    ]
}

/// Compute per-vertex normals by area-weighted face-normal averaging.
///
/// The unnormalized cross product of a triangle's edges has twice the
/// triangle's area as its length, so summing it per vertex weights each
/// incident face by area before the final normalization.
pub fn compute_vertex_normals(mesh: &TriMesh) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; mesh.positions.len()];
    for face in &mesh.faces {
        let p0 = mesh.positions[face[0] as usize];
        let p1 = mesh.positions[face[1] as usize];
        let p2 = mesh.positions[face[2] as usize];
        let weighted = (p1 - p0).cross(p2 - p0);
        for &vi in face {
            normals[vi as usize] += weighted;
        }
    }
    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }
    normals
}
