//! Error types for mesh building.

use thiserror::Error;

/// Errors produced while parsing mesh description input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A face with a vertex count other than 3. Polygons are not
    /// triangulated here; the producing tool must export triangles.
    #[error("face {face} has {arity} vertices, only triangles are supported")]
    NonTriangularFace {
        /// Zero-based face index in the source.
        face: usize,
        /// Number of vertices the face declared.
        arity: usize,
    },
    /// Unparsable source syntax.
    #[error("malformed source: {0}")]
    MalformedSource(String),
    /// The file extension does not map to a known mesh format.
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level error for one mesh build.
///
/// All variants are absorbed at the source boundary by the build worker:
/// a failed build is logged and leaves the published geometry untouched.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Well-formed input that contains no geometry.
    #[error("source contains no geometry")]
    EmptySource,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
