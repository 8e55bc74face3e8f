//! # mesh-pipeline
//!
//! Asynchronous mesh build pipeline for a long-running rendering host.
//!
//! Mesh description inputs - Wavefront OBJ text, PLY files, a procedural
//! grammar expanded by an external collaborator, or parametric primitive
//! parameters - are parsed and flattened on a background worker while the
//! host keeps rendering the previous geometry. Completed builds cross to
//! the owning processing thread through a single-slot handoff cell and are
//! published as renderer-ready buffer/binding/attribute descriptions.
//!
//! This crate provides:
//!
//! - [`mesh`] - [`MeshBuffer`] payloads and the backend-facing
//!   [`GeometryOutput`] description
//! - [`source`] - pure input-to-geometry conversions for each producer
//! - [`builder`] - the [`AsyncMeshBuilder`] concurrency core
//! - [`publish`] - the owning-thread geometry publisher
//! - [`process`] - host-facing producer objects with per-tick entry points
//!
//! # Example
//!
//! ```
//! use mesh_pipeline::{ModelLoader, TickOutcome};
//!
//! let mut loader = ModelLoader::new();
//! loader.load("triangle.obj", &b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"[..]);
//!
//! // The host's processing callback, once per cycle:
//! loop {
//!     if loader.tick() == TickOutcome::Published {
//!         let geometry = loader.geometry();
//!         assert_eq!(geometry.meshes[0].vertex_count, 3);
//!         break;
//!     }
//! }
//! ```

pub mod builder;
pub mod error;
pub mod mesh;
pub mod process;
pub mod publish;
pub mod source;

pub use builder::{AsyncMeshBuilder, HandoffCell, RequestOutcome};
pub use error::{MeshError, ParseError};
pub use mesh::{GeometryDescription, GeometryOutput, MeshBuffer, Topology};
pub use process::{ModelLoader, PrimitiveMesh, StructureProgram, TickOutcome};
pub use source::{
    ExpandResult, FileInput, MeshSource, ModelSource, ObjSource, PlySource, PrimitiveKind,
    PrimitiveRequest, PrimitiveSource, ProceduralSource, ProgramExpander,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
