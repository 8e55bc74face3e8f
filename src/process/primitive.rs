//! Parametric primitive producer.

use std::thread::ThreadId;

use crate::builder::{AsyncMeshBuilder, RequestOutcome};
use crate::mesh::GeometryOutput;
use crate::publish;
use crate::source::{PrimitiveKind, PrimitiveRequest, PrimitiveSource};

use super::{debug_check_owner, TickOutcome};

/// Rebuilds a parametric primitive whenever the host's shape selector or
/// scale slider changes.
pub struct PrimitiveMesh {
    builder: AsyncMeshBuilder<PrimitiveSource>,
    geometry: GeometryOutput,
    request: PrimitiveRequest,
    owner: Option<ThreadId>,
}

impl PrimitiveMesh {
    /// Create a producer with the default request (cube, scale 1).
    ///
    /// No build is scheduled until the host pushes a parameter.
    pub fn new() -> Self {
        Self {
            builder: AsyncMeshBuilder::new(PrimitiveSource),
            geometry: GeometryOutput::new(),
            request: PrimitiveRequest::default(),
            owner: None,
        }
    }

    /// Change the shape selector and schedule a rebuild.
    pub fn set_kind(&mut self, kind: PrimitiveKind) -> RequestOutcome {
        self.request.kind = kind;
        self.builder.request(self.request)
    }

    /// Change the scale slider and schedule a rebuild.
    pub fn set_scale(&mut self, scale: f32) -> RequestOutcome {
        self.request.scale = scale;
        self.builder.request(self.request)
    }

    /// The request the producer currently tracks.
    pub fn request(&self) -> PrimitiveRequest {
        self.request
    }

    /// Per-tick entry point: drain and publish a completed build, if any.
    pub fn tick(&mut self) -> TickOutcome {
        debug_check_owner(&mut self.owner);
        match self.builder.poll() {
            Some(meshes) => {
                publish::publish(meshes, &mut self.geometry);
                TickOutcome::Published
            }
            None => TickOutcome::NoChange,
        }
    }

    /// The geometry the rendering backend reads.
    pub fn geometry(&self) -> &GeometryOutput {
        &self.geometry
    }

    /// Mutable access for the backend to clear dirty flags after
    /// consuming.
    pub fn geometry_mut(&mut self) -> &mut GeometryOutput {
        &mut self.geometry
    }

    /// True while a build is pending or in flight.
    pub fn is_building(&self) -> bool {
        self.builder.is_busy()
    }
}

impl Default for PrimitiveMesh {
    fn default() -> Self {
        Self::new()
    }
}
