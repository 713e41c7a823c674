pub type Result<T> = std::result::Result<T, Error>;

/// Conversion errors.
///
/// Only structural preconditions (missing template plane, malformed
/// top-level tree, malformed shape bounds) escape the public entry points;
/// per-element failures are logged at their call site and the element is
/// skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("shape `{context}` is missing required field `{field}`")]
    MissingField {
        field: &'static str,
        context: String,
    },

    #[error("malformed bounds on shape `{0}`")]
    MalformedBounds(String),

    #[error("no stencil registered for `{0}`")]
    UnregisteredStencil(String),

    #[error("no diagram shape recorded for element `{0}`")]
    MissingShape(String),

    #[error("sequence flow `{0}` has no resolved source/target")]
    UnresolvedFlow(String),

    #[error("element `{id}` is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("diagram has no plane")]
    MissingPlane,

    #[error("top-level diagram node must be an object with `childShapes`")]
    MalformedDiagram,
}
