#![forbid(unsafe_code)]

//! Bidirectional converter between BPMN process graphs and the JSON shape
//! tree of a web diagram editor.
//!
//! Design goals:
//! - faithful round trips: node types, flow topology, nesting, data
//!   variables and process metadata survive both directions
//! - best-effort conversion: unsupported stencils are ignored, per-element
//!   failures are logged and skipped, only structural precondition
//!   violations abort
//! - a single [`StencilRegistry`] built once and shared read-only by both
//!   directions
//!
//! Entry points are [`to_diagram`] (graph → JSON) and [`to_model`]
//! (JSON → graph); the latter additionally produces diagram-interchange
//! edges with geometry-corrected waypoints.

pub mod constants;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod registry;
pub mod shape;
pub mod to_json;
pub mod to_model;

pub use error::{Error, Result};
pub use registry::{ElementKind, StencilRegistry, ToElementFn, ToShapeFn};
pub use to_json::{ForwardCtx, to_diagram};
pub use to_model::{ReverseCtx, ReverseOutput, to_model};

#[cfg(test)]
mod tests;
