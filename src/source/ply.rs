//! PLY front door.
//!
//! Parsing (ASCII and binary, header included) is delegated to the
//! `ply-rs` crate; this module reshapes the element payload into
//! [`MeshBuffer`]s. A `vertex` element with faces becomes a triangle
//! soup; a vertex element without faces becomes a point cloud.

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, ParseError};
use crate::mesh::{MeshBuffer, Topology};

use super::MeshSource;

/// Mesh source for PLY file contents.
pub struct PlySource;

impl MeshSource for PlySource {
    type Input = Vec<u8>;

    fn build(&self, input: &Vec<u8>) -> Result<Vec<MeshBuffer>, MeshError> {
        parse_ply(input)
    }
}

/// Parse PLY bytes into a single [`MeshBuffer`].
pub(crate) fn parse_ply(bytes: &[u8]) -> Result<Vec<MeshBuffer>, MeshError> {
    let parser = Parser::<DefaultElement>::new();
    let mut cursor = std::io::Cursor::new(bytes);
    let ply = parser
        .read_ply(&mut cursor)
        .map_err(|e| ParseError::MalformedSource(e.to_string()))?;

    let vertices = match ply.payload.get("vertex") {
        Some(vertices) if !vertices.is_empty() => vertices,
        _ => return Err(MeshError::EmptySource),
    };

    // Attribute presence is decided by the first vertex; ply-rs enforces a
    // uniform property set per element, so the rest match.
    let first = &vertices[0];
    let has_normal = first.contains_key("nx") && first.contains_key("ny") && first.contains_key("nz");
    let texcoord_keys = [("u", "v"), ("s", "t")]
        .into_iter()
        .find(|(u, v)| first.contains_key(*u) && first.contains_key(*v));

    let mut positions = Vec::with_capacity(vertices.len() * 3);
    let mut texcoords = texcoord_keys.map(|_| Vec::with_capacity(vertices.len() * 2));
    let mut normals = has_normal.then(|| Vec::with_capacity(vertices.len() * 3));

    for vertex in vertices {
        positions.push(scalar(vertex, "x")?);
        positions.push(scalar(vertex, "y")?);
        positions.push(scalar(vertex, "z")?);
        if let (Some(texcoords), Some((u, v))) = (texcoords.as_mut(), texcoord_keys) {
            texcoords.push(scalar(vertex, u)?);
            texcoords.push(scalar(vertex, v)?);
        }
        if let Some(normals) = normals.as_mut() {
            normals.push(scalar(vertex, "nx")?);
            normals.push(scalar(vertex, "ny")?);
            normals.push(scalar(vertex, "nz")?);
        }
    }

    let faces = ply.payload.get("face").filter(|faces| !faces.is_empty());
    let Some(faces) = faces else {
        // Vertex data without connectivity: publish as points.
        log::debug!("ply: {} points, no face element", vertices.len());
        return Ok(vec![MeshBuffer::from_streams(
            positions,
            texcoords,
            normals,
            Topology::Points,
        )]);
    };

    // Expand indexed triangles into a soup over the per-vertex streams.
    let vertex_count = vertices.len() as u32;
    let mut soup_positions = Vec::with_capacity(faces.len() * 9);
    let mut soup_texcoords = texcoords.as_ref().map(|_| Vec::with_capacity(faces.len() * 6));
    let mut soup_normals = normals.as_ref().map(|_| Vec::with_capacity(faces.len() * 9));

    for (face_index, face) in faces.iter().enumerate() {
        let indices = face_indices(face, face_index)?;
        if indices.len() != 3 {
            return Err(ParseError::NonTriangularFace {
                face: face_index,
                arity: indices.len(),
            }
            .into());
        }
        for vi in indices {
            if vi >= vertex_count {
                return Err(ParseError::MalformedSource(format!(
                    "face {face_index} references vertex {vi} of {vertex_count}"
                ))
                .into());
            }
            let vi = vi as usize;
            soup_positions.extend_from_slice(&positions[vi * 3..vi * 3 + 3]);
            if let (Some(soup), Some(texcoords)) = (soup_texcoords.as_mut(), texcoords.as_ref()) {
                soup.extend_from_slice(&texcoords[vi * 2..vi * 2 + 2]);
            }
            if let (Some(soup), Some(normals)) = (soup_normals.as_mut(), normals.as_ref()) {
                soup.extend_from_slice(&normals[vi * 3..vi * 3 + 3]);
            }
        }
    }

    log::debug!(
        "ply: {} triangles, texcoord={}, normal={}",
        faces.len(),
        soup_texcoords.is_some(),
        soup_normals.is_some()
    );
    Ok(vec![MeshBuffer::from_streams(
        soup_positions,
        soup_texcoords,
        soup_normals,
        Topology::Triangles,
    )])
}

/// Read one scalar vertex property as f32.
fn scalar(vertex: &DefaultElement, key: &str) -> Result<f32, MeshError> {
    let property = vertex.get(key).ok_or_else(|| {
        MeshError::from(ParseError::MalformedSource(format!(
            "vertex missing property '{key}'"
        )))
    })?;
    let value = match property {
        Property::Char(v) => *v as f32,
        Property::UChar(v) => *v as f32,
        Property::Short(v) => *v as f32,
        Property::UShort(v) => *v as f32,
        Property::Int(v) => *v as f32,
        Property::UInt(v) => *v as f32,
        Property::Float(v) => *v,
        Property::Double(v) => *v as f32,
        _ => {
            return Err(ParseError::MalformedSource(format!(
                "vertex property '{key}' is not a scalar"
            ))
            .into())
        }
    };
    Ok(value)
}

/// Read a face's vertex index list.
fn face_indices(face: &DefaultElement, face_index: usize) -> Result<Vec<u32>, MeshError> {
    let property = face
        .get("vertex_indices")
        .or_else(|| face.get("vertex_index"))
        .ok_or_else(|| {
            MeshError::from(ParseError::MalformedSource(format!(
                "face {face_index} has no vertex index list"
            )))
        })?;

    let to_u32 = |v: i64, face_index: usize| -> Result<u32, MeshError> {
        u32::try_from(v).map_err(|_| {
            ParseError::MalformedSource(format!("face {face_index} has negative vertex index"))
                .into()
        })
    };

    match property {
        Property::ListChar(v) => v.iter().map(|&i| to_u32(i as i64, face_index)).collect(),
        Property::ListUChar(v) => Ok(v.iter().map(|&i| i as u32).collect()),
        Property::ListShort(v) => v.iter().map(|&i| to_u32(i as i64, face_index)).collect(),
        Property::ListUShort(v) => Ok(v.iter().map(|&i| i as u32).collect()),
        Property::ListInt(v) => v.iter().map(|&i| to_u32(i as i64, face_index)).collect(),
        Property::ListUInt(v) => Ok(v.clone()),
        _ => Err(ParseError::MalformedSource(format!(
            "face {face_index} vertex index list has an unsupported type"
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
property float nx
property float ny
property float nz
element face 1
property list uchar int vertex_indices
end_header
0 0 0 0 0 1
1 0 0 0 0 1
0 1 0 0 0 1
3 0 1 2
";

    const POINTS: &str = "\
ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
end_header
0 0 0
1 2 3
";

    #[test]
    fn test_triangle_with_normals() {
        let buffers = parse_ply(TRIANGLE.as_bytes()).unwrap();
        assert_eq!(buffers.len(), 1);
        let buf = &buffers[0];
        assert_eq!(buf.vertex_count(), 3);
        assert_eq!(buf.topology(), Topology::Triangles);
        assert!(buf.has_normal());
        assert!(!buf.has_texcoord());
        let normal_start = buf.normal_offset().unwrap() as usize;
        assert_eq!(&buf.payload()[normal_start..normal_start + 3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_point_cloud() {
        let buffers = parse_ply(POINTS.as_bytes()).unwrap();
        let buf = &buffers[0];
        assert_eq!(buf.topology(), Topology::Points);
        assert_eq!(buf.vertex_count(), 2);
        assert_eq!(buf.payload(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_quad_face_rejected() {
        let source = "\
ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";
        let err = parse_ply(source.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Parse(ParseError::NonTriangularFace { face: 0, arity: 4 })
        ));
    }

    #[test]
    fn test_no_vertex_element_is_empty_source() {
        let source = "\
ply
format ascii 1.0
element face 0
property list uchar int vertex_indices
end_header
";
        assert!(matches!(
            parse_ply(source.as_bytes()),
            Err(MeshError::EmptySource)
        ));
    }

    #[test]
    fn test_garbage_header_is_malformed() {
        assert!(matches!(
            parse_ply(b"not a ply file"),
            Err(MeshError::Parse(ParseError::MalformedSource(_)))
        ));
    }

    #[test]
    fn test_out_of_range_face_index() {
        let source = "\
ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 1 9
";
        assert!(matches!(
            parse_ply(source.as_bytes()),
            Err(MeshError::Parse(ParseError::MalformedSource(_)))
        ));
    }
}
