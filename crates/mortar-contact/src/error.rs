//! Error types for mortar-contact.

use thiserror::Error;

use mortar_mesh::MeshError;

/// Result type for contact pass operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a contact pass.
#[derive(Debug, Error)]
pub enum Error {
    /// The mesh container rejected an operation (e.g. a missing sub-view).
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// A dedicated worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A partition was applied to a mesh other than the one it was scanned from.
    #[error(
        "partition scanned {expected_nodes} nodes / {expected_conditions} conditions, \
         mesh has {found_nodes} / {found_conditions}"
    )]
    MeshMismatch {
        expected_nodes: usize,
        expected_conditions: usize,
        found_nodes: usize,
        found_conditions: usize,
    },

    /// Process configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
