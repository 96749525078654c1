//! Mortar Mesh
//!
//! The finite-element container the contact passes operate on.
//!
//! # Storage Model
//!
//! A single root [`Mesh`] owns every [`Node`] and [`Condition`]. Conditions do
//! not own their nodes: a condition's geometry is an ordered list of
//! [`NodeId`]s that resolve back into the root's node storage.
//!
//! Named [`SubView`]s partition the root by reference. A sub-view is an id
//! set, never a copy of entity data, and is resolved through the root.
//!
//! # Flags and Variables
//!
//! Entity flags are tri-state ([`FlagState::Unset`], [`FlagState::True`],
//! [`FlagState::False`]). An unset flag is neither true nor false.
//!
//! Nodal quantities are addressed by typed descriptors with fixed storage
//! slots: [`Variable`] for non-historical values that may be absent and
//! [`StepVariable`] for time-stepped fields that always hold a value.

mod condition;
mod error;
mod flags;
mod mesh;
mod node;
mod sub_view;
mod variables;

pub use condition::{Condition, ConditionId};
pub use error::{MeshError, Result};
pub use flags::{Flag, FlagState, Flags};
pub use mesh::Mesh;
pub use node::{Node, NodeId};
pub use sub_view::SubView;
pub use variables::{NodalValues, SolutionStepData, StepVariable, Variable};

/// Name of the sub-view holding the current contact interface.
pub const CONTACT_SUB_VIEW: &str = "Contact";

/// Solution-step buffer size used by [`Mesh::new`].
pub const DEFAULT_BUFFER_SIZE: usize = 2;
