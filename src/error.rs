use thiserror::Error;

use crate::NodeId;

/// Errors returned by tree operations
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Cannot move node {node} under {new_parent}: target is the node or one of its descendants")]
    Cycle { node: NodeId, new_parent: NodeId },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
