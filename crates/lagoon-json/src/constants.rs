//! The fixed editor vocabulary.
//!
//! Field names, property keys and stencil identifiers are a versioned
//! compatibility contract shared with the diagram-editor frontend; changing
//! any value here breaks interop with existing diagrams.

// Editor JSON field names.
pub const EDITOR_BOUNDS: &str = "bounds";
pub const EDITOR_BOUNDS_UPPER_LEFT: &str = "upperLeft";
pub const EDITOR_BOUNDS_LOWER_RIGHT: &str = "lowerRight";
pub const EDITOR_BOUNDS_X: &str = "x";
pub const EDITOR_BOUNDS_Y: &str = "y";
pub const EDITOR_SHAPE_ID: &str = "resourceId";
pub const EDITOR_STENCIL: &str = "stencil";
pub const EDITOR_STENCIL_ID: &str = "id";
pub const EDITOR_SHAPE_PROPERTIES: &str = "properties";
pub const EDITOR_CHILD_SHAPES: &str = "childShapes";
pub const EDITOR_DOCKERS: &str = "dockers";
pub const EDITOR_OUTGOING: &str = "outgoing";
pub const EDITOR_TARGET: &str = "target";
pub const EDITOR_PROPERTIES_GENERAL_ITEMS: &str = "items";

// Canvas root.
pub const CANVAS_RESOURCE_ID: &str = "canvas";
pub const STENCIL_DIAGRAM: &str = "BPMNDiagram";
pub const STENCIL_SET_NAMESPACE: &str = "http://b3mn.org/stencilset/bpmn2.0#";
pub const STENCIL_SET_URL: &str = "../editor/stencilsets/bpmn2.0/bpmn2.0.json";
pub const CANVAS_WIDTH: f64 = 1485.0;
pub const CANVAS_HEIGHT: f64 = 1050.0;

// Process-level property keys.
pub const PROPERTY_OVERRIDE_ID: &str = "overrideid";
pub const PROPERTY_NAME: &str = "name";
pub const PROPERTY_DOCUMENTATION: &str = "documentation";
pub const PROPERTY_PROCESS_NAMESPACE: &str = "process_namespace";
pub const PROPERTY_PROCESS_CATEGORY: &str = "process_category";
pub const PROPERTY_PROCESS_SUBJECT: &str = "process_subject";
pub const PROPERTY_PROCESS_DEFAULT_FORM: &str = "process_defaultform";
pub const PROPERTY_PROCESS_DATAVARIABLE: &str = "process_datavariables";

// Data-variable item keys.
pub const PROPERTY_DATAVARIABLE_ID: &str = "variable_id";
pub const PROPERTY_DATAVARIABLE_TYPE: &str = "variable_datatype";
pub const PROPERTY_DATAVARIABLE_BIZTYPE: &str = "variable_biztype";
pub const PROPERTY_DATAVARIABLE_IS_PERSISTENT: &str = "variable_ispersistent";
pub const PROPERTY_DATAVARIABLE_DEFAULT_VALUE: &str = "variable_defaultvalue";

// Element-level property keys.
pub const PROPERTY_ATTACHED_TO_REF: &str = "attachedtoref";
pub const PROPERTY_CONDITION: &str = "conditionsequenceflow";

// Lane style defaults.
pub const PROPERTY_PARENT_POOL: &str = "parentpool";
pub const PROPERTY_PARENT_LANE: &str = "parentlane";
pub const PROPERTY_SHOW_CAPTION: &str = "showcaption";
pub const PROPERTY_BG_COLOR: &str = "bgcolor";
pub const PROPERTY_BORDER_COLOR: &str = "bordercolor";
pub const LANE_BORDER_COLOR: &str = "#000000";

// Stencil identifiers.
pub const STENCIL_EVENT_START: &str = "StartEvent";
pub const STENCIL_EVENT_END: &str = "EndEvent";
pub const STENCIL_EVENT_BOUNDARY: &str = "BoundaryEvent";
pub const STENCIL_EVENT_CATCH: &str = "CatchEvent";
pub const STENCIL_EVENT_THROW: &str = "ThrowEvent";
pub const STENCIL_TASK_MANUAL: &str = "ManualTask";
pub const STENCIL_TASK_SCRIPT: &str = "ScriptTask";
pub const STENCIL_TASK_SERVICE: &str = "ServiceTask";
pub const STENCIL_TASK_USER: &str = "UserTask";
pub const STENCIL_TASK_RECEIVE: &str = "ReceiveTask";
pub const STENCIL_TASK_BUSINESS_RULE: &str = "BusinessRuleTask";
pub const STENCIL_CALL_ACTIVITY: &str = "CallActivity";
pub const STENCIL_SUB_PROCESS: &str = "SubProcess";
pub const STENCIL_EVENT_SUB_PROCESS: &str = "EventSubProcess";
pub const STENCIL_GATEWAY_EXCLUSIVE: &str = "ExclusiveGateway";
pub const STENCIL_GATEWAY_INCLUSIVE: &str = "InclusiveGateway";
pub const STENCIL_GATEWAY_PARALLEL: &str = "ParallelGateway";
pub const STENCIL_GATEWAY_EVENT: &str = "EventGateway";
pub const STENCIL_SEQUENCE_FLOW: &str = "SequenceFlow";
pub const STENCIL_LANE: &str = "Lane";

// DI identifier prefixes.
pub const SHAPE_ID_PREFIX: &str = "BPMNShape_";
pub const EDGE_ID_PREFIX: &str = "BPMNEdge_";
