//! CPU-side geometry payload produced by mesh sources.

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Every three vertices form a triangle.
    #[default]
    Triangles,
    /// Each vertex is a separate point.
    Points,
}

/// One parsed or generated geometry chunk.
///
/// The payload is a single flat float vector holding the vertex streams
/// back to back: all positions first, then all texcoords when present,
/// then all normals when present. The streams never overlap and their
/// order is fixed, so the per-stream offsets are fully determined by the
/// vertex count and the presence flags.
///
/// A buffer is immutable after construction; it is moved from the source
/// to the handoff cell and from there to the publisher, never shared
/// mutably between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    payload: Vec<f32>,
    vertex_count: u64,
    has_texcoord: bool,
    has_normal: bool,
    topology: Topology,
}

impl MeshBuffer {
    /// Assemble a buffer from separate attribute streams.
    ///
    /// `positions` holds xyz triples; `texcoords` uv pairs and `normals`
    /// xyz triples for the same vertices when present. The segmented
    /// payload layout holds by construction.
    pub fn from_streams(
        positions: Vec<f32>,
        texcoords: Option<Vec<f32>>,
        normals: Option<Vec<f32>>,
        topology: Topology,
    ) -> Self {
        debug_assert_eq!(positions.len() % 3, 0, "positions must be xyz triples");
        let vertex_count = (positions.len() / 3) as u64;
        if topology == Topology::Triangles {
            debug_assert_eq!(
                vertex_count % 3,
                0,
                "triangle topology requires a multiple of 3 vertices"
            );
        }
        if let Some(tc) = &texcoords {
            debug_assert_eq!(
                tc.len() as u64,
                vertex_count * 2,
                "texcoord stream must hold one uv pair per vertex"
            );
        }
        if let Some(n) = &normals {
            debug_assert_eq!(
                n.len() as u64,
                vertex_count * 3,
                "normal stream must hold one xyz triple per vertex"
            );
        }

        let has_texcoord = texcoords.is_some();
        let has_normal = normals.is_some();
        let mut payload = positions;
        if let Some(tc) = texcoords {
            payload.extend_from_slice(&tc);
        }
        if let Some(n) = normals {
            payload.extend_from_slice(&n);
        }

        Self {
            payload,
            vertex_count,
            has_texcoord,
            has_normal,
            topology,
        }
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> u64 {
        self.vertex_count
    }

    /// Whether the payload carries a texcoord stream.
    pub fn has_texcoord(&self) -> bool {
        self.has_texcoord
    }

    /// Whether the payload carries a normal stream.
    pub fn has_normal(&self) -> bool {
        self.has_normal
    }

    /// Primitive topology of the buffer.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// True when the buffer holds no vertices. Empty buffers are discarded
    /// by the publisher and never surface as output geometry.
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Floats stored per vertex across all streams.
    pub fn floats_per_vertex(&self) -> u64 {
        3 + if self.has_texcoord { 2 } else { 0 } + if self.has_normal { 3 } else { 0 }
    }

    /// Element offset of the position stream (always the payload start).
    pub fn positions_offset(&self) -> u64 {
        0
    }

    /// Element offset of the texcoord stream, when present.
    pub fn texcoord_offset(&self) -> Option<u64> {
        self.has_texcoord.then(|| self.vertex_count * 3)
    }

    /// Element offset of the normal stream, when present.
    pub fn normal_offset(&self) -> Option<u64> {
        self.has_normal.then(|| {
            self.vertex_count * 3 + if self.has_texcoord { self.vertex_count * 2 } else { 0 }
        })
    }

    /// Byte offset of the position stream.
    pub fn positions_byte_offset(&self) -> u64 {
        0
    }

    /// Byte offset of the texcoord stream, when present.
    pub fn texcoord_byte_offset(&self) -> Option<u64> {
        self.texcoord_offset().map(|o| o * 4)
    }

    /// Byte offset of the normal stream, when present.
    pub fn normal_byte_offset(&self) -> Option<u64> {
        self.normal_offset().map(|o| o * 4)
    }

    /// The raw float payload.
    pub fn payload(&self) -> &[f32] {
        &self.payload
    }

    /// The payload viewed as bytes.
    pub fn payload_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.payload)
    }

    /// Consume the buffer, returning the payload.
    pub fn into_payload(self) -> Vec<f32> {
        self.payload
    }
}
