//! Procedural grammar front door.
//!
//! The grammar interpreter itself is an external collaborator: it expands
//! a rule program into OBJ-shaped text, which is then fed through the OBJ
//! builder. An expansion failure or an empty expansion yields no geometry
//! (not an error), so the previously published mesh stays on screen.

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

use super::{obj, MeshSource};

/// Result of one grammar expansion.
pub type ExpandResult = Result<String, Box<dyn std::error::Error + Send + Sync>>;

/// Expands a grammar program into OBJ-shaped text.
///
/// Implemented by the embedding host; any `Fn(&str) -> ExpandResult`
/// works. Must be callable from the build worker thread.
pub trait ProgramExpander: Send + Sync + 'static {
    /// Expand `program` into OBJ text.
    fn expand(&self, program: &str) -> ExpandResult;
}

impl<F> ProgramExpander for F
where
    F: Fn(&str) -> ExpandResult + Send + Sync + 'static,
{
    fn expand(&self, program: &str) -> ExpandResult {
        self(program)
    }
}

/// Mesh source that expands a grammar program and parses the result.
pub struct ProceduralSource<E> {
    expander: E,
}

impl<E: ProgramExpander> ProceduralSource<E> {
    /// Create a source around the host's grammar expander.
    pub fn new(expander: E) -> Self {
        Self { expander }
    }
}

impl<E: ProgramExpander> MeshSource for ProceduralSource<E> {
    type Input = String;

    fn build(&self, program: &String) -> Result<Vec<MeshBuffer>, MeshError> {
        let text = match self.expander.expand(program) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("grammar expansion failed: {e}");
                return Ok(Vec::new());
            }
        };
        if text.trim().is_empty() {
            log::debug!("grammar expansion produced no output");
            return Ok(Vec::new());
        }
        obj::parse_obj(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

    #[test]
    fn test_expansion_feeds_obj_builder() {
        let source =
            ProceduralSource::new(|_: &str| -> ExpandResult { Ok(TRIANGLE_OBJ.to_string()) });
        let buffers = source.build(&"rule R1 { box }".to_string()).unwrap();
        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].vertex_count(), 3);
    }

    #[test]
    fn test_expansion_failure_yields_no_geometry() {
        let source =
            ProceduralSource::new(|_: &str| -> ExpandResult { Err("unbalanced rule".into()) });
        let buffers = source.build(&"rule {".to_string()).unwrap();
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_empty_expansion_yields_no_geometry() {
        let source = ProceduralSource::new(|_: &str| -> ExpandResult { Ok(String::new()) });
        let buffers = source.build(&String::new()).unwrap();
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_bad_expanded_text_is_an_error() {
        // The expansion step succeeded; a parse failure of its output is a
        // real error (and is absorbed by the build worker like any other).
        let source =
            ProceduralSource::new(|_: &str| -> ExpandResult { Ok("f 1 2 3".to_string()) });
        assert!(source.build(&"p".to_string()).is_err());
    }
}
