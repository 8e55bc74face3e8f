//! Model file loader producer (`.obj` / `.ply`).

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::ThreadId;

use crate::builder::{AsyncMeshBuilder, RequestOutcome};
use crate::mesh::GeometryOutput;
use crate::publish;
use crate::source::{FileInput, ModelSource};

use super::{debug_check_owner, TickOutcome};

/// Loads mesh files handed over by the host and keeps the published
/// geometry current.
///
/// The host calls [`load`](Self::load) whenever its file input changes and
/// [`tick`](Self::tick) once per processing cycle.
pub struct ModelLoader {
    builder: AsyncMeshBuilder<ModelSource>,
    geometry: GeometryOutput,
    owner: Option<ThreadId>,
}

impl ModelLoader {
    /// Create an idle loader.
    pub fn new() -> Self {
        Self {
            builder: AsyncMeshBuilder::new(ModelSource),
            geometry: GeometryOutput::new(),
            owner: None,
        }
    }

    /// Schedule a build for a file's contents. Duplicate change events for
    /// unchanged content are dropped. Never blocks.
    pub fn load(
        &self,
        path: impl Into<PathBuf>,
        contents: impl Into<Arc<[u8]>>,
    ) -> RequestOutcome {
        self.builder.request(FileInput::new(path, contents))
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

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
