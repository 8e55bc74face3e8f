//! Parametric primitive front door.
//!
//! Builds a procedural mesh purely numerically: generate an indexed shape,
//! run the cleanup passes, compute area-weighted vertex normals, then
//! flatten the faces into a position+normal triangle soup.

use crate::error::MeshError;
use crate::mesh::{cleanup, generators, MeshBuffer, Topology};

use super::MeshSource;

/// The shapes the primitive source can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveKind {
    #[default]
    Cube,
    Sphere,
    Icosahedron,
    Cone,
    Cylinder,
    Torus,
}

/// One primitive build request: shape selector plus numeric parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveRequest {
    /// Which shape to generate.
    pub kind: PrimitiveKind,
    /// Uniform scale applied to positions (normals are unaffected).
    pub scale: f32,
}

impl Default for PrimitiveRequest {
    fn default() -> Self {
        Self {
            kind: PrimitiveKind::Cube,
            scale: 1.0,
        }
    }
}

/// Mesh source generating parametric primitives.
pub struct PrimitiveSource;

impl MeshSource for PrimitiveSource {
    type Input = PrimitiveRequest;

    fn build(&self, input: &PrimitiveRequest) -> Result<Vec<MeshBuffer>, MeshError> {
        let mut mesh = match input.kind {
            PrimitiveKind::Cube => generators::cube(1.0),
            PrimitiveKind::Sphere => generators::uv_sphere(1.0, 32, 16),
            PrimitiveKind::Icosahedron => generators::icosahedron(1.0),
            PrimitiveKind::Cone => generators::cone(1.0, 2.0, 48),
            PrimitiveKind::Cylinder => generators::cylinder(1.0, 2.0, 48),
            PrimitiveKind::Torus => generators::torus(1.0, 0.4, 48, 24),
        };

        cleanup::remove_unreferenced_vertices(&mut mesh);
        cleanup::remove_zero_area_faces(&mut mesh);
        cleanup::remove_non_manifold_faces(&mut mesh);
        // Face removal can orphan vertices; compact before averaging.
        cleanup::remove_unreferenced_vertices(&mut mesh);
        let normals = cleanup::compute_vertex_normals(&mesh);

        let scale = input.scale;
        let mut soup_positions = Vec::with_capacity(mesh.face_count() * 9);
        let mut soup_normals = Vec::with_capacity(mesh.face_count() * 9);
        for face in &mesh.faces {
            for &vi in face {
                let position = mesh.positions[vi as usize] * scale;
                soup_positions.extend_from_slice(&position.to_array());
                soup_normals.extend_from_slice(&normals[vi as usize].to_array());
            }
        }

        log::debug!(
            "primitive {:?}: {} triangles after cleanup",
            input.kind,
            mesh.face_count()
        );
        Ok(vec![MeshBuffer::from_streams(
            soup_positions,
            None,
            Some(soup_normals),
            Topology::Triangles,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_build() {
        let buffers = PrimitiveSource
            .build(&PrimitiveRequest {
                kind: PrimitiveKind::Cube,
                scale: 2.0,
            })
            .unwrap();
        assert_eq!(buffers.len(), 1);
        let buf = &buffers[0];
        assert_eq!(buf.vertex_count(), 36); // 12 triangles
        assert!(buf.has_normal());
        assert!(!buf.has_texcoord());
        // Scale applies to positions only.
        let max_position = buf.payload()[..36 * 3]
            .iter()
            .fold(0.0f32, |acc, &v| acc.max(v.abs()));
        assert!((max_position - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_pole_degenerates_removed() {
        let buffers = PrimitiveSource
            .build(&PrimitiveRequest {
                kind: PrimitiveKind::Sphere,
                scale: 1.0,
            })
            .unwrap();
        let buf = &buffers[0];
        // 32x16 grid has 2*32 degenerate pole triangles dropped by cleanup.
        let expected_faces = (32 * 16 * 2 - 2 * 32) as u64;
        assert_eq!(buf.vertex_count(), expected_faces * 3);
    }

    #[test]
    fn test_all_kinds_produce_geometry() {
        for kind in [
            PrimitiveKind::Cube,
            PrimitiveKind::Sphere,
            PrimitiveKind::Icosahedron,
            PrimitiveKind::Cone,
            PrimitiveKind::Cylinder,
            PrimitiveKind::Torus,
        ] {
            let buffers = PrimitiveSource
                .build(&PrimitiveRequest { kind, scale: 1.0 })
                .unwrap();
            assert_eq!(buffers.len(), 1, "{kind:?}");
            assert!(!buffers[0].is_empty(), "{kind:?}");
            assert_eq!(buffers[0].vertex_count() % 3, 0, "{kind:?}");
        }
    }

    #[test]
    fn test_request_equality_for_coalescing() {
        let a = PrimitiveRequest {
            kind: PrimitiveKind::Torus,
            scale: 1.5,
        };
        assert_eq!(a, a);
        assert_ne!(
            a,
            PrimitiveRequest {
                kind: PrimitiveKind::Torus,
                scale: 2.0
            }
        );
    }
}
