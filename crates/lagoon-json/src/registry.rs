//! Type-dispatch registry: element variant ⇄ stencil id ⇄ strategy pair.
//!
//! Built once via [`StencilRegistry::default_stencils`] and then shared by
//! reference into both converters; after construction the registry is never
//! mutated, so unsynchronized concurrent reads are fine. Variants and
//! stencils without an entry are skipped by the converters, not rejected:
//! unsupported diagram elements are ignored.

use lagoon_model::{FlowElement, FlowNodeKind};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::constants::*;
use crate::elements;
use crate::error::Result;
use crate::geometry::Point;
use crate::to_json::ForwardCtx;
use crate::to_model::ReverseCtx;

/// Dispatch key: a node variant or the sequence-flow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node(FlowNodeKind),
    Flow,
}

impl ElementKind {
    pub fn of(element: &FlowElement) -> Self {
        match element {
            FlowElement::Node(node) => Self::Node(node.kind),
            FlowElement::Flow(_) => Self::Flow,
        }
    }
}

/// Forward strategy: emit the JSON shape for one element, with `offset`
/// being the absolute origin of the enclosing lane/subprocess.
pub type ToShapeFn = fn(&FlowElement, &ForwardCtx, Point) -> Result<Value>;

/// Reverse strategy: build the flow element for one JSON shape.
pub type ToElementFn = fn(&Value, &ReverseCtx) -> Result<FlowElement>;

#[derive(Debug, Clone, Default)]
pub struct StencilRegistry {
    to_shape: FxHashMap<ElementKind, (&'static str, ToShapeFn)>,
    to_element: FxHashMap<&'static str, (ElementKind, ToElementFn)>,
}

impl StencilRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        kind: ElementKind,
        stencil: &'static str,
        to_shape: ToShapeFn,
        to_element: ToElementFn,
    ) {
        self.to_shape.insert(kind, (stencil, to_shape));
        self.to_element.insert(stencil, (kind, to_element));
    }

    pub fn lookup_kind(&self, kind: ElementKind) -> Option<(&'static str, ToShapeFn)> {
        self.to_shape.get(&kind).copied()
    }

    pub fn lookup_stencil(&self, stencil: &str) -> Option<(ElementKind, ToElementFn)> {
        self.to_element.get(stencil).copied()
    }

    pub fn stencil_for(&self, kind: ElementKind) -> Option<&'static str> {
        self.lookup_kind(kind).map(|(stencil, _)| stencil)
    }

    /// The full stencil catalog the editor supports.
    pub fn default_stencils() -> Self {
        use FlowNodeKind::*;

        let mut reg = Self::new();

        // start and end events
        reg.register_node(StartEvent, STENCIL_EVENT_START);
        reg.register_node(EndEvent, STENCIL_EVENT_END);

        // connectors
        reg.register(
            ElementKind::Flow,
            STENCIL_SEQUENCE_FLOW,
            elements::flows::to_shape,
            elements::flows::to_element,
        );

        // task types
        reg.register_node(BusinessRuleTask, STENCIL_TASK_BUSINESS_RULE);
        reg.register_node(ManualTask, STENCIL_TASK_MANUAL);
        reg.register_node(ReceiveTask, STENCIL_TASK_RECEIVE);
        reg.register_node(ScriptTask, STENCIL_TASK_SCRIPT);
        reg.register_node(ServiceTask, STENCIL_TASK_SERVICE);
        reg.register_node(UserTask, STENCIL_TASK_USER);
        reg.register_node(CallActivity, STENCIL_CALL_ACTIVITY);

        // gateways
        reg.register_node(ExclusiveGateway, STENCIL_GATEWAY_EXCLUSIVE);
        reg.register_node(InclusiveGateway, STENCIL_GATEWAY_INCLUSIVE);
        reg.register_node(ParallelGateway, STENCIL_GATEWAY_PARALLEL);
        reg.register_node(EventGateway, STENCIL_GATEWAY_EVENT);

        // scope constructs
        reg.register(
            ElementKind::Node(SubProcess),
            STENCIL_SUB_PROCESS,
            elements::containers::to_shape,
            elements::containers::to_element,
        );
        reg.register(
            ElementKind::Node(EventSubProcess),
            STENCIL_EVENT_SUB_PROCESS,
            elements::containers::to_shape,
            elements::containers::to_element,
        );

        // catch and throw events
        reg.register_node(CatchEvent, STENCIL_EVENT_CATCH);
        reg.register_node(ThrowEvent, STENCIL_EVENT_THROW);

        // boundary events
        reg.register_node(BoundaryEvent, STENCIL_EVENT_BOUNDARY);

        reg
    }

    fn register_node(&mut self, kind: FlowNodeKind, stencil: &'static str) {
        self.register(
            ElementKind::Node(kind),
            stencil,
            elements::nodes::to_shape,
            elements::nodes::to_element,
        );
    }
}
