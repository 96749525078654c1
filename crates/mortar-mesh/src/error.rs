//! Error types for mortar-mesh.

use thiserror::Error;

use crate::{ConditionId, NodeId};

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors raised by the mesh container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A node with this id is already owned by the root.
    #[error("node {0} already exists in the mesh")]
    DuplicateNode(NodeId),

    /// A condition with this id is already owned by the root.
    #[error("condition {0} already exists in the mesh")]
    DuplicateCondition(ConditionId),

    /// A condition's geometry references a node the root does not own.
    #[error("condition {condition} references unknown node {node}")]
    UnknownNode {
        condition: ConditionId,
        node: NodeId,
    },

    /// A node id that is not owned by the root.
    #[error("node {0} is not part of the root mesh")]
    UnknownNodeId(NodeId),

    /// A condition id that is not owned by the root.
    #[error("condition {0} is not part of the root mesh")]
    UnknownConditionId(ConditionId),

    /// The named sub-view does not exist.
    #[error("sub-view \"{0}\" does not exist in the mesh")]
    MissingSubView(String),

    /// Solution-step buffers need at least the current step.
    #[error("invalid solution-step buffer size {0} (must be at least 1)")]
    InvalidBufferSize(usize),
}
