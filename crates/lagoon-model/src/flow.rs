//! Flow elements: the polymorphic node/edge content of a process.

use serde::{Deserialize, Serialize};

/// The non-edge element variants of the BPMN subset the editor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowNodeKind {
    StartEvent,
    EndEvent,
    BoundaryEvent,
    CatchEvent,
    ThrowEvent,
    ManualTask,
    ScriptTask,
    ServiceTask,
    UserTask,
    ReceiveTask,
    BusinessRuleTask,
    CallActivity,
    SubProcess,
    EventSubProcess,
    ExclusiveGateway,
    InclusiveGateway,
    ParallelGateway,
    EventGateway,
}

impl FlowNodeKind {
    /// Containers own a nested flow-element collection.
    pub fn is_container(self) -> bool {
        matches!(self, Self::SubProcess | Self::EventSubProcess)
    }

    /// Activities are the only legal hosts for boundary events.
    pub fn is_activity(self) -> bool {
        matches!(
            self,
            Self::ManualTask
                | Self::ScriptTask
                | Self::ServiceTask
                | Self::UserTask
                | Self::ReceiveTask
                | Self::BusinessRuleTask
                | Self::CallActivity
                | Self::SubProcess
                | Self::EventSubProcess
        )
    }

    pub fn is_gateway(self) -> bool {
        matches!(
            self,
            Self::ExclusiveGateway | Self::InclusiveGateway | Self::ParallelGateway | Self::EventGateway
        )
    }

    pub fn is_event(self) -> bool {
        matches!(
            self,
            Self::StartEvent
                | Self::EndEvent
                | Self::BoundaryEvent
                | Self::CatchEvent
                | Self::ThrowEvent
        )
    }
}

/// A node in the process graph (task, event, gateway or container).
///
/// `incoming`/`outgoing` hold sequence-flow ids and are only populated by the
/// reverse conversion; forward conversion derives linkage from the flows
/// themselves and ignores these fields on its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub name: String,
    pub kind: FlowNodeKind,
    pub incoming: Vec<String>,
    pub outgoing: Vec<String>,
    /// Owned children; non-empty only for container kinds.
    pub children: Vec<FlowElement>,
    /// Boundary events only: id of the activity this event sits on.
    pub attached_to: Option<String>,
    /// Activities only: ids of boundary events attached to this node.
    pub boundary_refs: Vec<String>,
}

impl FlowNode {
    pub fn new(kind: FlowNodeKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            children: Vec::new(),
            attached_to: None,
            boundary_refs: Vec::new(),
        }
    }
}

/// A directed connection between two flow nodes in the same container scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceFlow {
    pub id: String,
    pub name: String,
    /// Optional flow condition expression.
    pub condition: Option<String>,
    pub source_ref: Option<String>,
    pub target_ref: Option<String>,
}

impl SequenceFlow {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A flow element is either a node or a sequence flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowElement {
    Node(FlowNode),
    Flow(SequenceFlow),
}

impl FlowElement {
    pub fn id(&self) -> &str {
        match self {
            Self::Node(n) => &n.id,
            Self::Flow(f) => &f.id,
        }
    }

    pub fn as_node(&self) -> Option<&FlowNode> {
        match self {
            Self::Node(n) => Some(n),
            Self::Flow(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut FlowNode> {
        match self {
            Self::Node(n) => Some(n),
            Self::Flow(_) => None,
        }
    }

    pub fn as_flow(&self) -> Option<&SequenceFlow> {
        match self {
            Self::Flow(f) => Some(f),
            Self::Node(_) => None,
        }
    }
}
