//! Reference-only partitions of the root mesh.

use std::collections::BTreeSet;

use crate::{ConditionId, NodeId};

/// A named subset of the root's nodes and conditions.
///
/// Holds ids only. Entity data always lives in the root [`crate::Mesh`];
/// use [`crate::Mesh::sub_view_nodes`] and
/// [`crate::Mesh::sub_view_conditions`] to resolve members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubView {
    name: String,
    nodes: BTreeSet<NodeId>,
    conditions: BTreeSet<ConditionId>,
}

impl SubView {
    /// Create an empty sub-view.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: BTreeSet::new(),
            conditions: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add node ids. Ids already present are ignored.
    /// Returns the number of ids newly inserted.
    pub fn add_nodes<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = NodeId>,
    {
        ids.into_iter().filter(|&id| self.nodes.insert(id)).count()
    }

    /// Add condition ids. Ids already present are ignored.
    /// Returns the number of ids newly inserted.
    pub fn add_conditions<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = ConditionId>,
    {
        ids.into_iter().filter(|&id| self.conditions.insert(id)).count()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn contains_condition(&self, id: ConditionId) -> bool {
        self.conditions.contains(&id)
    }

    /// Member node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Member condition ids in ascending order.
    pub fn condition_ids(&self) -> impl Iterator<Item = ConditionId> + '_ {
        self.conditions.iter().copied()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_conditions(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.conditions.is_empty()
    }
}
