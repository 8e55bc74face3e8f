//! Procedural grammar producer.

use std::thread::ThreadId;

use crate::builder::{AsyncMeshBuilder, RequestOutcome};
use crate::mesh::GeometryOutput;
use crate::publish;
use crate::source::{ProceduralSource, ProgramExpander};

use super::{debug_check_owner, TickOutcome};

/// Rebuilds geometry from a grammar program whenever the host's program
/// text changes.
pub struct StructureProgram<E: ProgramExpander> {
    builder: AsyncMeshBuilder<ProceduralSource<E>>,
    geometry: GeometryOutput,
    owner: Option<ThreadId>,
}

impl<E: ProgramExpander> StructureProgram<E> {
    /// Create a producer around the host's grammar expander.
    pub fn new(expander: E) -> Self {
        Self {
            builder: AsyncMeshBuilder::new(ProceduralSource::new(expander)),
            geometry: GeometryOutput::new(),
            owner: None,
        }
    }

    /// Schedule a rebuild for the given program text. Never blocks.
    pub fn set_program(&self, program: impl Into<String>) -> RequestOutcome {
        self.builder.request(program.into())
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
