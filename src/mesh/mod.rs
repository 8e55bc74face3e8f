//! CPU-side mesh data: payload buffers, geometry descriptions, generators.
//!
//! - [`MeshBuffer`] - flat float payload with segmented attribute streams
//! - [`GeometryOutput`] / [`GeometryDescription`] - what the rendering
//!   backend polls
//! - [`generators`] / [`cleanup`] - indexed scratch meshes for the
//!   parametric primitives

mod buffer;
pub mod cleanup;
pub mod generators;
mod layout;

pub use buffer::{MeshBuffer, Topology};
pub use generators::TriMesh;
pub use layout::{
    AttributeFormat, AttributeLocation, GeometryAttribute, GeometryBinding, GeometryBuffer,
    GeometryDescription, GeometryOutput, StepMode, VertexInput,
};
