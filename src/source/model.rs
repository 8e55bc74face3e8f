//! Model file front door with extension dispatch.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{MeshError, ParseError};
use crate::mesh::MeshBuffer;

use super::{obj, ply, MeshSource};

/// One model file build request: path plus content bytes.
///
/// Equality compares the path and a content marker (a hash of the bytes)
/// rather than the bytes themselves, so duplicate-change events from the
/// host de-duplicate cheaply and a genuinely re-written file compares
/// unequal.
#[derive(Debug, Clone)]
pub struct FileInput {
    /// Path the host loaded the bytes from; its extension drives format
    /// dispatch.
    pub path: PathBuf,
    /// Raw file contents.
    pub contents: Arc<[u8]>,
    marker: u64,
}

impl FileInput {
    /// Wrap a path and its contents, computing the modification marker.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Arc<[u8]>>) -> Self {
        let contents = contents.into();
        let mut hasher = DefaultHasher::new();
        contents.hash(&mut hasher);
        Self {
            path: path.into(),
            marker: hasher.finish(),
            contents,
        }
    }
}

impl PartialEq for FileInput {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.marker == other.marker
    }
}

/// Mesh source dispatching on the file extension: `.obj` and `.ply`,
/// case-insensitive.
pub struct ModelSource;

impl MeshSource for ModelSource {
    type Input = FileInput;

    fn build(&self, input: &FileInput) -> Result<Vec<MeshBuffer>, MeshError> {
        let extension = input
            .path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "obj" => {
                let text = std::str::from_utf8(&input.contents).map_err(|e| {
                    ParseError::MalformedSource(format!("obj is not valid utf-8: {e}"))
                })?;
                obj::parse_obj(text)
            }
            "ply" => ply::parse_ply(&input.contents),
            _ => Err(ParseError::UnsupportedFormat(input.path.display().to_string()).into()),
        }
    }
}
