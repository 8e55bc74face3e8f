//! Wavefront OBJ front door.
//!
//! Parsing is delegated to the `tobj` crate; this module only reshapes the
//! parsed attributes into segmented [`MeshBuffer`] payloads, one buffer
//! per OBJ shape. Faces must already be triangles - polygons are rejected,
//! not triangulated.

use crate::error::{MeshError, ParseError};
use crate::mesh::{MeshBuffer, Topology};

use super::MeshSource;

/// Mesh source for OBJ text (e.g. expanded grammar output).
pub struct ObjSource;

impl MeshSource for ObjSource {
    type Input = String;

    fn build(&self, input: &String) -> Result<Vec<MeshBuffer>, MeshError> {
        parse_obj(input)
    }
}

/// Parse OBJ text into one [`MeshBuffer`] per shape.
pub(crate) fn parse_obj(text: &str) -> Result<Vec<MeshBuffer>, MeshError> {
    let options = tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ..Default::default()
    };
    let (models, _materials) =
        tobj::load_obj_buf(&mut text.as_bytes(), &options, |_| {
            // Material definitions are irrelevant to the geometry payload.
            Ok((Vec::new(), Default::default()))
        })
        .map_err(|e| ParseError::MalformedSource(e.to_string()))?;

    if models.is_empty() {
        return Err(MeshError::EmptySource);
    }

    let mut buffers = Vec::with_capacity(models.len());
    for model in &models {
        let mesh = &model.mesh;

        if let Some((face, &arity)) = mesh
            .face_arities
            .iter()
            .enumerate()
            .find(|(_, &arity)| arity != 3)
        {
            return Err(ParseError::NonTriangularFace {
                face,
                arity: arity as usize,
            }
            .into());
        }
        if mesh.face_arities.is_empty() && mesh.indices.len() % 3 != 0 {
            return Err(ParseError::MalformedSource(format!(
                "shape '{}' has a dangling face ({} indices)",
                model.name,
                mesh.indices.len()
            ))
            .into());
        }

        let vertex_count = mesh.indices.len();
        if vertex_count == 0 {
            log::debug!("obj shape '{}' has no faces, skipping", model.name);
            continue;
        }

        let has_texcoord = !mesh.texcoord_indices.is_empty();
        let has_normal = !mesh.normal_indices.is_empty();
        if has_texcoord && mesh.texcoord_indices.len() != vertex_count {
            return Err(ParseError::MalformedSource(format!(
                "shape '{}' mixes face vertices with and without texcoords",
                model.name
            ))
            .into());
        }
        if has_normal && mesh.normal_indices.len() != vertex_count {
            return Err(ParseError::MalformedSource(format!(
                "shape '{}' mixes face vertices with and without normals",
                model.name
            ))
            .into());
        }

        // Expand the indexed faces into a triangle soup, one segmented
        // stream per attribute.
        let mut positions = Vec::with_capacity(vertex_count * 3);
        for &pi in &mesh.indices {
            positions.extend_from_slice(fetch(&mesh.positions, pi, 3, "position")?);
        }
        let texcoords = if has_texcoord {
            let mut texcoords = Vec::with_capacity(vertex_count * 2);
            for &ti in &mesh.texcoord_indices {
                texcoords.extend_from_slice(fetch(&mesh.texcoords, ti, 2, "texcoord")?);
            }
            Some(texcoords)
        } else {
            None
        };
        let normals = if has_normal {
            let mut normals = Vec::with_capacity(vertex_count * 3);
            for &ni in &mesh.normal_indices {
                normals.extend_from_slice(fetch(&mesh.normals, ni, 3, "normal")?);
            }
            Some(normals)
        } else {
            None
        };

        log::debug!(
            "obj shape '{}': {} vertices, texcoord={}, normal={}",
            model.name,
            vertex_count,
            has_texcoord,
            has_normal
        );
        buffers.push(MeshBuffer::from_streams(
            positions,
            texcoords,
            normals,
            Topology::Triangles,
        ));
    }

    Ok(buffers)
}

/// Fetch `width` consecutive floats for attribute index `index`.
fn fetch<'a>(
    data: &'a [f32],
    index: u32,
    width: usize,
    what: &str,
) -> Result<&'a [f32], MeshError> {
    let start = index as usize * width;
    data.get(start..start + width).ok_or_else(|| {
        ParseError::MalformedSource(format!("{what} index {index} out of range")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

    const TEXTURED: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_bare_triangle() {
        let buffers = parse_obj(TRIANGLE).unwrap();
        assert_eq!(buffers.len(), 1);
        let buf = &buffers[0];
        assert_eq!(buf.vertex_count(), 3);
        assert!(!buf.has_texcoord());
        assert!(!buf.has_normal());
        assert_eq!(buf.payload(), &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_texcoords_and_normals() {
        let buffers = parse_obj(TEXTURED).unwrap();
        let buf = &buffers[0];
        assert_eq!(buf.vertex_count(), 3);
        assert!(buf.has_texcoord());
        assert!(buf.has_normal());
        assert_eq!(buf.payload().len() as u64, 3 * 8);
        // Normal stream holds the shared face normal for each vertex.
        let normal_start = buf.normal_offset().unwrap() as usize;
        assert_eq!(&buf.payload()[normal_start..normal_start + 3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_quad_face_rejected() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        let err = parse_obj(source).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Parse(ParseError::NonTriangularFace { face: 0, arity: 4 })
        ));
    }

    #[test]
    fn test_multiple_shapes() {
        let source = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";
        let buffers = parse_obj(source).unwrap();
        assert_eq!(buffers.len(), 2);
        assert_eq!(buffers[0].vertex_count(), 3);
        assert_eq!(buffers[1].vertex_count(), 3);
    }

    #[test]
    fn test_malformed_source() {
        assert!(matches!(
            parse_obj("f 1 2 3"), // face referencing missing vertices
            Err(MeshError::Parse(ParseError::MalformedSource(_)))
        ));
    }

    #[test]
    fn test_source_trait_entry_point() {
        let buffers = ObjSource.build(&TRIANGLE.to_string()).unwrap();
        assert_eq!(buffers.len(), 1);
    }
}
