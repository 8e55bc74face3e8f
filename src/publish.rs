//! Publishing completed builds into the backend-facing geometry output.
//!
//! Runs exclusively on the owning thread. The layout derivation is
//! deterministic: binding 0 carries positions, binding 1 texcoords when
//! present, and the next free binding normals when present, all reading
//! from a single shared payload buffer at the segmented stream offsets.

use std::sync::Arc;

use crate::mesh::{
    AttributeFormat, AttributeLocation, GeometryAttribute, GeometryBinding, GeometryBuffer,
    GeometryDescription, GeometryOutput, MeshBuffer, VertexInput,
};

/// Rewrite `out` from a completed mesh set.
///
/// Full replace: previous descriptions are dropped, not patched. Buffers
/// with no vertices are discarded; if nothing remains, `out` is left
/// untouched (the backend keeps showing the last good geometry) and no
/// dirty flag is raised.
pub fn publish(meshes: Vec<MeshBuffer>, out: &mut GeometryOutput) {
    let descriptions: Vec<GeometryDescription> = meshes
        .into_iter()
        .filter(|mesh| !mesh.is_empty())
        .map(describe)
        .collect();
    if descriptions.is_empty() {
        return;
    }

    log::debug!(
        "publishing {} mesh(es), {} vertices total",
        descriptions.len(),
        descriptions.iter().map(|d| d.vertex_count).sum::<u64>()
    );
    out.meshes = descriptions;
    out.dirty = true;
}

/// Derive the buffer/binding/attribute layout for one mesh buffer.
fn describe(mesh: MeshBuffer) -> GeometryDescription {
    let vertex_count = mesh.vertex_count();
    let topology = mesh.topology();
    let has_texcoord = mesh.has_texcoord();
    let texcoord_byte_offset = mesh.texcoord_byte_offset();
    let normal_byte_offset = mesh.normal_byte_offset();
    let payload: Arc<[f32]> = mesh.into_payload().into();

    let mut description = GeometryDescription {
        buffers: vec![GeometryBuffer {
            data: payload,
            dirty: true,
        }],
        bindings: vec![GeometryBinding::per_vertex(
            AttributeFormat::Float3.size(),
        )],
        attributes: vec![GeometryAttribute {
            binding: 0,
            location: AttributeLocation::Position,
            format: AttributeFormat::Float3,
            offset: 0,
        }],
        inputs: vec![VertexInput {
            buffer: 0,
            byte_offset: 0,
        }],
        vertex_count,
        topology,
        dirty: true,
    };

    if let Some(byte_offset) = texcoord_byte_offset {
        description
            .bindings
            .push(GeometryBinding::per_vertex(AttributeFormat::Float2.size()));
        description.attributes.push(GeometryAttribute {
            binding: 1,
            location: AttributeLocation::TexCoord,
            format: AttributeFormat::Float2,
            offset: 0,
        });
        description.inputs.push(VertexInput {
            buffer: 0,
            byte_offset,
        });
    }

    if let Some(byte_offset) = normal_byte_offset {
        let binding = if has_texcoord { 2 } else { 1 };
        description
            .bindings
            .push(GeometryBinding::per_vertex(AttributeFormat::Float3.size()));
        description.attributes.push(GeometryAttribute {
            binding,
            location: AttributeLocation::Normal,
            format: AttributeFormat::Float3,
            offset: 0,
        });
        description.inputs.push(VertexInput {
            buffer: 0,
            byte_offset,
        });
    }

    debug_assert!(description.validate().is_ok());
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Topology;

    fn full_buffer(vertices: usize) -> MeshBuffer {
        MeshBuffer::from_streams(
            vec![1.0; vertices * 3],
            Some(vec![0.5; vertices * 2]),
            Some(vec![0.0; vertices * 3]),
            Topology::Triangles,
        )
    }

    #[test]
    fn test_full_layout() {
        let mut out = GeometryOutput::new();
        publish(vec![full_buffer(6)], &mut out);

        assert!(out.dirty);
        assert_eq!(out.meshes.len(), 1);
        let mesh = &out.meshes[0];
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.vertex_count, 6);
        assert_eq!(mesh.bindings.len(), 3);
        assert_eq!(mesh.bindings[0].stride, 12);
        assert_eq!(mesh.bindings[1].stride, 8);
        assert_eq!(mesh.bindings[2].stride, 12);
        assert_eq!(mesh.inputs[0].byte_offset, 0);
        assert_eq!(mesh.inputs[1].byte_offset, 6 * 12);
        assert_eq!(mesh.inputs[2].byte_offset, 6 * 12 + 6 * 8);
        assert_eq!(mesh.buffers[0].data.len(), 6 * 8);
    }

    #[test]
    fn test_position_only_layout() {
        let mut out = GeometryOutput::new();
        let buffer =
            MeshBuffer::from_streams(vec![0.0; 9], None, None, Topology::Triangles);
        publish(vec![buffer], &mut out);

        let mesh = &out.meshes[0];
        assert_eq!(mesh.bindings.len(), 1);
        assert_eq!(mesh.attributes.len(), 1);
        assert_eq!(mesh.attributes[0].location, AttributeLocation::Position);
    }

    #[test]
    fn test_normal_binding_index_without_texcoord() {
        let mut out = GeometryOutput::new();
        let buffer = MeshBuffer::from_streams(
            vec![0.0; 9],
            None,
            Some(vec![0.0; 9]),
            Topology::Triangles,
        );
        publish(vec![buffer], &mut out);

        let mesh = &out.meshes[0];
        let normal = mesh
            .attributes
            .iter()
            .find(|a| a.location == AttributeLocation::Normal)
            .unwrap();
        assert_eq!(normal.binding, 1);
        assert_eq!(mesh.inputs[1].byte_offset, 36);
    }

    #[test]
    fn test_empty_set_leaves_output_untouched() {
        let mut out = GeometryOutput::new();
        publish(vec![full_buffer(3)], &mut out);
        out.clear_dirty();
        let snapshot = out.clone();

        publish(Vec::new(), &mut out);
        assert_eq!(out, snapshot);

        let empty = MeshBuffer::from_streams(Vec::new(), None, None, Topology::Triangles);
        publish(vec![empty], &mut out);
        assert_eq!(out, snapshot);
    }

    #[test]
    fn test_publish_replaces_previous_set() {
        let mut out = GeometryOutput::new();
        publish(vec![full_buffer(3), full_buffer(6)], &mut out);
        assert_eq!(out.meshes.len(), 2);

        publish(vec![full_buffer(9)], &mut out);
        assert_eq!(out.meshes.len(), 1);
        assert_eq!(out.meshes[0].vertex_count, 9);
    }
}
