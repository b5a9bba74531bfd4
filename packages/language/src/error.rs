//! Error types for the structural language model

use crate::category::NodeCategory;
use crate::node::NodeId;
use thiserror::Error;

pub type LanguageResult<T> = Result<T, LanguageError>;

/// A mutation that would break a child group's declared contract.
///
/// These are internal-consistency errors: suggestions and adaptation only
/// ever hand out nodes that satisfy the destination's category.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaViolation {
    #[error("{node_type} is not a member of category {category} (group '{group}')")]
    CategoryMismatch {
        node_type: String,
        category: NodeCategory,
        group: String,
    },

    #[error("child group '{group}' holds a single child and is already occupied")]
    ArityViolation { group: String },
}

#[derive(Error, Debug)]
pub enum LanguageError {
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    #[error("Unregistered node type: {0}")]
    UnregisteredType(String),

    #[error("Node type registered twice: {0}")]
    DuplicateType(String),

    #[error("{node_type} does not declare property '{property}'")]
    UndeclaredProperty { node_type: String, property: String },

    #[error("{node_type} has no child group '{group}'")]
    UnknownChildGroup { node_type: String, group: String },

    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("Inserting {node:?} under {parent:?} would create a cycle")]
    CycleDetected { node: NodeId, parent: NodeId },

    #[error("Index {index} out of bounds for group '{group}' of length {len}")]
    IndexOutOfBounds {
        group: String,
        index: usize,
        len: usize,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Syntax error: {0}")]
    Syntax(#[from] sprout_syntax::SyntaxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LanguageError {
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, LanguageError::Schema(_))
    }
}
