//! Parametric primitive generators.
//!
//! These generators produce indexed [`TriMesh`] values that are cleaned up
//! and flattened by the primitive mesh source.

use std::f32::consts::PI;

use glam::Vec3;

/// An indexed triangle mesh used as scratch geometry by the generators
/// and the cleanup passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangles as vertex index triples.
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Generate an axis-aligned cube with the given half-extent.
///
/// Eight shared corner vertices, two triangles per side.
pub fn cube(half_extent: f32) -> TriMesh {
    let h = half_extent;
    let positions = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    // Counter-clockwise winding seen from outside.
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2], // -z
        [4, 5, 6],
        [4, 6, 7], // +z
        [0, 1, 5],
        [0, 5, 4], // -y
        [3, 7, 6],
        [3, 6, 2], // +y
        [0, 4, 7],
        [0, 7, 3], // -x
        [1, 2, 6],
        [1, 6, 5], // +x
    ];
    TriMesh { positions, faces }
}

/// Generate a UV sphere.
///
/// `segments` runs around the equator, `rings` from pole to pole. The seam
/// column is duplicated so rings close without wrapping arithmetic; the
/// cleanup passes drop the degenerate pole triangles this produces.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> TriMesh {
    let mut mesh = TriMesh::default();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            mesh.positions.push(Vec3::new(
                radius * sin_theta * cos_phi,
                radius * cos_theta,
                radius * sin_theta * sin_phi,
            ));
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            mesh.faces.push([current, next, current + 1]);
            mesh.faces.push([current + 1, next, next + 1]);
        }
    }

    mesh
}

/// Generate a regular icosahedron with the given circumradius.
pub fn icosahedron(radius: f32) -> TriMesh {
    // Golden-ratio rectangle construction.
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let scale = radius / (1.0 + t * t).sqrt();

    let positions: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z) * scale)
    .collect();

    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    TriMesh { positions, faces }
}

/// Generate a capped cone with its base on y = 0 and apex at y = `height`.
pub fn cone(radius: f32, height: f32, segments: u32) -> TriMesh {
    let mut mesh = TriMesh::default();

    // Rim vertices, then apex, then base center.
    for segment in 0..segments {
        let phi = segment as f32 * 2.0 * PI / segments as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        mesh.positions
            .push(Vec3::new(radius * cos_phi, 0.0, radius * sin_phi));
    }
    let apex = segments;
    let base_center = segments + 1;
    mesh.positions.push(Vec3::new(0.0, height, 0.0));
    mesh.positions.push(Vec3::ZERO);

    for segment in 0..segments {
        let next = (segment + 1) % segments;
        mesh.faces.push([segment, apex, next]);
        mesh.faces.push([segment, next, base_center]);
    }

    mesh
}

/// Generate a capped cylinder centered on the y axis, spanning
/// `-height / 2 ..= height / 2`.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> TriMesh {
    let mut mesh = TriMesh::default();
    let half = height / 2.0;

    for segment in 0..segments {
        let phi = segment as f32 * 2.0 * PI / segments as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let x = radius * cos_phi;
        let z = radius * sin_phi;
        mesh.positions.push(Vec3::new(x, -half, z));
        mesh.positions.push(Vec3::new(x, half, z));
    }
    let bottom_center = mesh.positions.len() as u32;
    mesh.positions.push(Vec3::new(0.0, -half, 0.0));
    let top_center = mesh.positions.len() as u32;
    mesh.positions.push(Vec3::new(0.0, half, 0.0));

    for segment in 0..segments {
        let next = (segment + 1) % segments;
        let (b0, t0) = (segment * 2, segment * 2 + 1);
        let (b1, t1) = (next * 2, next * 2 + 1);

        // Side
        mesh.faces.push([b0, t0, b1]);
        mesh.faces.push([b1, t0, t1]);
        // Caps
        mesh.faces.push([b0, b1, bottom_center]);
        mesh.faces.push([t1, t0, top_center]);
    }

    mesh
}

/// Generate a torus around the y axis.
///
/// `major_radius` is the distance from the torus center to the tube
/// center, `minor_radius` the tube radius.
pub fn torus(
    major_radius: f32,
    minor_radius: f32,
    major_segments: u32,
    minor_segments: u32,
) -> TriMesh {
    let mut mesh = TriMesh::default();

    for major in 0..major_segments {
        let phi = major as f32 * 2.0 * PI / major_segments as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for minor in 0..minor_segments {
            let theta = minor as f32 * 2.0 * PI / minor_segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let r = major_radius + minor_radius * cos_theta;

            mesh.positions.push(Vec3::new(
                r * cos_phi,
                minor_radius * sin_theta,
                r * sin_phi,
            ));
        }
    }

    for major in 0..major_segments {
        let next_major = (major + 1) % major_segments;
        for minor in 0..minor_segments {
            let next_minor = (minor + 1) % minor_segments;

            let a = major * minor_segments + minor;
            let b = next_major * minor_segments + minor;
            let c = next_major * minor_segments + next_minor;
            let d = major * minor_segments + next_minor;

            mesh.faces.push([a, b, c]);
            mesh.faces.push([a, c, d]);
        }
    }

    mesh
}
