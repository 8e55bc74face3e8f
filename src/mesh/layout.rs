//! Backend-facing geometry description.
//!
//! [`GeometryOutput`] is the structure the rendering backend polls: an
//! ordered list of mesh descriptions, each made of buffers, bindings,
//! attributes and vertex inputs, plus dirty flags the backend clears after
//! re-uploading. It is written only by the publisher, on the owning
//! thread, and read by the backend between publishes.

use std::sync::Arc;

use super::buffer::Topology;

/// Shader input slot an attribute feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeLocation {
    /// Vertex position (float3).
    Position,
    /// Texture coordinates (float2).
    TexCoord,
    /// Vertex normal (float3).
    Normal,
}

impl AttributeLocation {
    /// Shader location index for this attribute.
    pub fn location(&self) -> u32 {
        match self {
            Self::Position => 0,
            Self::TexCoord => 1,
            Self::Normal => 2,
        }
    }
}

/// Data format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeFormat {
    /// Single 32-bit float.
    Float,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl AttributeFormat {
    /// Size in bytes of this format.
    pub fn size(&self) -> u32 {
        match self {
            Self::Float => 4,
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
        }
    }
}

/// How a binding advances: per-vertex or per-instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StepMode {
    /// Binding advances once per vertex (default).
    #[default]
    Vertex,
    /// Binding advances once per instance.
    Instance,
}

/// One vertex buffer binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryBinding {
    /// Stride in bytes between consecutive elements.
    pub stride: u32,
    /// How the binding advances.
    pub step_mode: StepMode,
    /// Instances (or vertices) consumed per step.
    pub step_rate: u32,
}

impl GeometryBinding {
    /// Create a per-vertex binding with the given stride.
    pub fn per_vertex(stride: u32) -> Self {
        Self {
            stride,
            step_mode: StepMode::Vertex,
            step_rate: 1,
        }
    }
}

/// A single vertex attribute description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryAttribute {
    /// Index of the binding this attribute reads from.
    pub binding: u32,
    /// Shader input slot.
    pub location: AttributeLocation,
    /// Data format.
    pub format: AttributeFormat,
    /// Byte offset within one binding element.
    pub offset: u32,
}

/// Where a binding's stream starts inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexInput {
    /// Index of the buffer the stream lives in.
    pub buffer: u32,
    /// Byte offset of the stream start.
    pub byte_offset: u64,
}

/// One geometry payload buffer, shared with the backend.
///
/// The payload is reference-counted: a backend that needs the data beyond
/// the next publish clones the `Arc` while consuming the dirty flag, so
/// replacing a description never invalidates data the backend still holds.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    /// The raw float payload.
    pub data: Arc<[f32]>,
    /// Set on publish; the backend clears it after re-uploading.
    pub dirty: bool,
}

impl GeometryBuffer {
    /// Payload length in bytes.
    pub fn byte_len(&self) -> u64 {
        self.data.len() as u64 * 4
    }

    /// Payload viewed as bytes, for GPU upload.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Complete description of one renderable mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryDescription {
    /// Payload buffers.
    pub buffers: Vec<GeometryBuffer>,
    /// Vertex buffer bindings.
    pub bindings: Vec<GeometryBinding>,
    /// Vertex attributes, each referencing a binding.
    pub attributes: Vec<GeometryAttribute>,
    /// Per-binding stream start offsets, parallel to `bindings`.
    pub inputs: Vec<VertexInput>,
    /// Number of vertices to draw.
    pub vertex_count: u64,
    /// Primitive topology.
    pub topology: Topology,
    /// Set on publish; the backend clears it after consuming.
    pub dirty: bool,
}

impl GeometryDescription {
    /// Check internal consistency: attributes and inputs must reference
    /// bindings and buffers that exist, and there must be one input per
    /// binding.
    pub fn validate(&self) -> Result<(), String> {
        for attr in &self.attributes {
            if attr.binding as usize >= self.bindings.len() {
                return Err(format!(
                    "attribute {:?} references binding {} but only {} bindings defined",
                    attr.location,
                    attr.binding,
                    self.bindings.len()
                ));
            }
        }
        if self.inputs.len() != self.bindings.len() {
            return Err(format!(
                "{} vertex inputs for {} bindings",
                self.inputs.len(),
                self.bindings.len()
            ));
        }
        for input in &self.inputs {
            if input.buffer as usize >= self.buffers.len() {
                return Err(format!(
                    "vertex input references buffer {} but only {} buffers defined",
                    input.buffer,
                    self.buffers.len()
                ));
            }
        }
        Ok(())
    }
}

/// The structure the rendering backend polls for new geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryOutput {
    /// The current mesh set. Fully replaced on each publish.
    pub meshes: Vec<GeometryDescription>,
    /// Set on publish; the backend clears it after re-uploading.
    pub dirty: bool,
}

impl GeometryOutput {
    /// Create an empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all dirty flags. Called by the backend after it consumed the
    /// current mesh set.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        for mesh in &mut self.meshes {
            mesh.dirty = false;
            for buffer in &mut mesh.buffers {
                buffer.dirty = false;
            }
        }
    }
}
