//! The empty process scaffold handed to the reverse converter.
//!
//! In the full engine this template is loaded from a persisted definition
//! file; here it is the pre-wired pair of an empty process and a diagram
//! with exactly one plane. The reverse converter assumes (and checks) the
//! one-plane invariant but never re-validates anything else.

use serde::{Deserialize, Serialize};

use crate::di::Diagram;
use crate::process::ProcessGraph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTemplate {
    pub graph: ProcessGraph,
    pub diagram: Diagram,
}

impl ProcessTemplate {
    /// The built-in empty scaffold.
    pub fn built_in() -> Self {
        Self {
            graph: ProcessGraph::default(),
            diagram: Diagram::single_plane(),
        }
    }
}

impl Default for ProcessTemplate {
    fn default() -> Self {
        Self::built_in()
    }
}
