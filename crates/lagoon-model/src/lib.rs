#![forbid(unsafe_code)]

//! BPMN process graph + diagram-interchange model types.
//!
//! This crate holds the typed side of the conversion: the process graph
//! (`ProcessGraph`, `FlowElement`, lanes, data variables) and the
//! diagram-interchange geometry that travels alongside it (`Diagram`,
//! `DiagramShape`, `DiagramEdge`). It carries no editor-JSON knowledge;
//! that lives in `lagoon-json`.

pub mod di;
pub mod flow;
pub mod process;
pub mod template;

pub use di::{Bounds, DiPoint, Diagram, DiagramEdge, DiagramPlane, DiagramShape};
pub use flow::{FlowElement, FlowNode, FlowNodeKind, SequenceFlow};
pub use process::{DataVariable, Lane, LaneGroup, ProcessGraph};
pub use template::ProcessTemplate;
