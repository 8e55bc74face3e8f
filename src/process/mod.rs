//! Host-facing mesh producer objects.
//!
//! One object per producer, mirroring how a host registers processors:
//! each owns an [`AsyncMeshBuilder`](crate::builder::AsyncMeshBuilder), a
//! [`GeometryOutput`](crate::mesh::GeometryOutput) the rendering backend
//! polls, and a per-tick entry point. `tick()` must be called once per
//! host processing cycle on the owning thread and returns promptly - no
//! disk I/O, no parsing happens on it.

mod model_loader;
mod primitive;
mod structure;

pub use model_loader::ModelLoader;
pub use primitive::PrimitiveMesh;
pub use structure::StructureProgram;

/// Result of one owning-thread tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A completed build was drained and published.
    Published,
    /// No completed build was waiting; the output is unchanged.
    NoChange,
}

/// Debug-build check that ticks stay on one thread. Publishing off the
/// owning thread is a programming-contract violation, not a runtime error.
pub(crate) fn debug_check_owner(owner: &mut Option<std::thread::ThreadId>) {
    let current = std::thread::current().id();
    match owner {
        Some(id) => debug_assert_eq!(*id, current, "tick() called off the owning thread"),
        None => *owner = Some(current),
    }
}
