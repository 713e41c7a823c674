//! The process graph root and its lane/variable companions.

use serde::{Deserialize, Serialize};

use crate::flow::{FlowElement, FlowNode};

/// The root of one conversion: a single process with its metadata, lanes,
/// data variables and flow-element graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessGraph {
    pub id: String,
    pub name: String,
    pub target_namespace: String,
    pub documentation: Option<String>,
    pub category: Option<String>,
    /// Task-subject expression text, if the process declares one.
    pub subject: Option<String>,
    /// Default form URI expression text, if the process declares one.
    pub default_form: Option<String>,
    pub data_variables: Vec<DataVariable>,
    pub lane_groups: Vec<LaneGroup>,
    pub elements: Vec<FlowElement>,
}

impl ProcessGraph {
    /// Finds a flow node anywhere in the graph, recursing into containers.
    pub fn find_node(&self, id: &str) -> Option<&FlowNode> {
        find_node_in(&self.elements, id)
    }

    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        find_node_in_mut(&mut self.elements, id)
    }

    /// Whether `id` names anything reachable from the root: the process
    /// itself, a flow node, a sequence flow, or a lane.
    pub fn contains_element(&self, id: &str) -> bool {
        if self.id == id {
            return true;
        }
        if contains_in(&self.elements, id) {
            return true;
        }
        self.lane_groups.iter().any(|group| group.contains_lane(id))
    }
}

fn find_node_in<'a>(elements: &'a [FlowElement], id: &str) -> Option<&'a FlowNode> {
    for element in elements {
        if let FlowElement::Node(node) = element {
            if node.id == id {
                return Some(node);
            }
            if let Some(found) = find_node_in(&node.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_node_in_mut<'a>(elements: &'a mut [FlowElement], id: &str) -> Option<&'a mut FlowNode> {
    for element in elements {
        if let FlowElement::Node(node) = element {
            if node.id == id {
                return Some(node);
            }
            if let Some(found) = find_node_in_mut(&mut node.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn contains_in(elements: &[FlowElement], id: &str) -> bool {
    elements.iter().any(|element| {
        if element.id() == id {
            return true;
        }
        match element {
            FlowElement::Node(node) => contains_in(&node.children, id),
            FlowElement::Flow(_) => false,
        }
    })
}

/// An ordered group of lanes (BPMN lane set).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneGroup {
    pub lanes: Vec<Lane>,
}

impl LaneGroup {
    fn contains_lane(&self, id: &str) -> bool {
        self.lanes.iter().any(|lane| {
            lane.id == id
                || lane
                    .child_lanes
                    .as_deref()
                    .is_some_and(|group| group.contains_lane(id))
        })
    }
}

/// A lane indexes flow nodes owned by the enclosing process or subprocess;
/// it never owns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub id: String,
    pub name: String,
    pub flow_node_refs: Vec<String>,
    pub child_lanes: Option<Box<LaneGroup>>,
}

impl Lane {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A process-scoped data variable declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataVariable {
    pub id: String,
    pub data_type: String,
    pub biz_type: String,
    pub is_persistent: bool,
    /// Default-value expression text.
    pub default_value: Option<String>,
}
