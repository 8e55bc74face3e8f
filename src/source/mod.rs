//! Mesh sources: pure conversions from description inputs to geometry.
//!
//! A source turns one input token into zero or more [`MeshBuffer`]s. All
//! sources are stateless (or hold only immutable collaborators), so the
//! build worker can call them from any thread.

mod model;
mod obj;
mod ply;
mod primitive;
mod procedural;

pub use model::{FileInput, ModelSource};
pub use obj::ObjSource;
pub use ply::PlySource;
pub use primitive::{PrimitiveKind, PrimitiveRequest, PrimitiveSource};
pub use procedural::{ExpandResult, ProceduralSource, ProgramExpander};

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

/// A mesh producer: raw input in, geometry buffers out.
///
/// `build` must be pure and reentrant - no shared mutable state - so it is
/// safe to invoke off the owning thread. A source may yield multiple
/// disjoint sub-meshes (e.g. one per OBJ shape).
pub trait MeshSource: Send + Sync + 'static {
    /// Input token for one build request. Equality is used to de-duplicate
    /// and coalesce requests, so it must be cheap to compare.
    type Input: Clone + PartialEq + Send + 'static;

    /// Convert one input into zero or more mesh buffers.
    fn build(&self, input: &Self::Input) -> Result<Vec<MeshBuffer>, MeshError>;
}
