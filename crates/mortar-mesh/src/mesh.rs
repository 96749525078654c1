//! The root mesh: single owner of node and condition storage.

use std::collections::{BTreeMap, HashMap};

use crate::{Condition, ConditionId, MeshError, Node, NodeId, Result, SubView, DEFAULT_BUFFER_SIZE};

/// Root mesh.
///
/// Nodes and conditions are stored in insertion order. Id lookups go through
/// an id → slot index. Sub-views are keyed by name and hold ids only.
#[derive(Debug, Clone)]
pub struct Mesh {
    nodes: Vec<Node>,
    conditions: Vec<Condition>,
    node_index: HashMap<NodeId, usize>,
    condition_index: HashMap<ConditionId, usize>,
    sub_views: BTreeMap<String, SubView>,
    buffer_size: usize,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Empty mesh with the default solution-step buffer size.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            conditions: Vec::new(),
            node_index: HashMap::new(),
            condition_index: HashMap::new(),
            sub_views: BTreeMap::new(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Empty mesh whose nodes buffer `buffer_size` solution steps.
    pub fn with_buffer_size(buffer_size: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(MeshError::InvalidBufferSize(buffer_size));
        }
        Ok(Self {
            buffer_size,
            ..Self::new()
        })
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    // ---- nodes ----

    /// Create a node owned by the root.
    pub fn add_node(&mut self, id: NodeId) -> Result<&mut Node> {
        if self.node_index.contains_key(&id) {
            return Err(MeshError::DuplicateNode(id));
        }
        let node = Node::new(id, self.buffer_size)?;
        let slot = self.nodes.len();
        self.nodes.push(node);
        self.node_index.insert(id, slot);
        Ok(&mut self.nodes[slot])
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        match self.node_index.get(&id) {
            Some(&slot) => Some(&mut self.nodes[slot]),
            None => None,
        }
    }

    /// Storage slot of a node.
    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.node_index.get(&id).copied()
    }

    /// All nodes in storage order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All nodes, mutable. Ids cannot change through this slice.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    // ---- conditions ----

    /// Create a condition over nodes already owned by the root.
    pub fn add_condition(&mut self, id: ConditionId, geometry: Vec<NodeId>) -> Result<&mut Condition> {
        if self.condition_index.contains_key(&id) {
            return Err(MeshError::DuplicateCondition(id));
        }
        if let Some(&node) = geometry.iter().find(|&n| !self.node_index.contains_key(n)) {
            return Err(MeshError::UnknownNode { condition: id, node });
        }
        let slot = self.conditions.len();
        self.conditions.push(Condition::new(id, geometry));
        self.condition_index.insert(id, slot);
        Ok(&mut self.conditions[slot])
    }

    pub fn condition(&self, id: ConditionId) -> Option<&Condition> {
        self.condition_index.get(&id).map(|&slot| &self.conditions[slot])
    }

    pub fn condition_mut(&mut self, id: ConditionId) -> Option<&mut Condition> {
        match self.condition_index.get(&id) {
            Some(&slot) => Some(&mut self.conditions[slot]),
            None => None,
        }
    }

    /// Storage slot of a condition.
    pub fn condition_index(&self, id: ConditionId) -> Option<usize> {
        self.condition_index.get(&id).copied()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut [Condition] {
        &mut self.conditions
    }

    pub fn num_conditions(&self) -> usize {
        self.conditions.len()
    }

    // ---- sub-views ----

    /// Create a sub-view if it does not exist yet.
    pub fn create_sub_view(&mut self, name: &str) -> &mut SubView {
        self.sub_views
            .entry(name.to_string())
            .or_insert_with(|| SubView::new(name))
    }

    pub fn has_sub_view(&self, name: &str) -> bool {
        self.sub_views.contains_key(name)
    }

    pub fn sub_view(&self, name: &str) -> Result<&SubView> {
        self.sub_views
            .get(name)
            .ok_or_else(|| MeshError::MissingSubView(name.to_string()))
    }

    pub fn sub_view_mut(&mut self, name: &str) -> Result<&mut SubView> {
        self.sub_views
            .get_mut(name)
            .ok_or_else(|| MeshError::MissingSubView(name.to_string()))
    }

    /// Add root nodes to a sub-view by id.
    ///
    /// Every id is checked against the root first; on error nothing is
    /// inserted. Returns the number of newly added ids.
    pub fn add_nodes_to(&mut self, name: &str, ids: &[NodeId]) -> Result<usize> {
        if let Some(&id) = ids.iter().find(|&id| !self.node_index.contains_key(id)) {
            return Err(MeshError::UnknownNodeId(id));
        }
        let view = self.sub_view_mut(name)?;
        Ok(view.add_nodes(ids.iter().copied()))
    }

    /// Add root conditions to a sub-view by id. Same contract as
    /// [`Mesh::add_nodes_to`].
    pub fn add_conditions_to(&mut self, name: &str, ids: &[ConditionId]) -> Result<usize> {
        if let Some(&id) = ids.iter().find(|&id| !self.condition_index.contains_key(id)) {
            return Err(MeshError::UnknownConditionId(id));
        }
        let view = self.sub_view_mut(name)?;
        Ok(view.add_conditions(ids.iter().copied()))
    }

    /// Resolve a sub-view's nodes into root storage.
    pub fn sub_view_nodes<'a>(&'a self, name: &str) -> Result<impl Iterator<Item = &'a Node> + 'a> {
        let view = self.sub_view(name)?;
        Ok(view.node_ids().filter_map(move |id| self.node(id)))
    }

    /// Resolve a sub-view's conditions into root storage.
    pub fn sub_view_conditions<'a>(
        &'a self,
        name: &str,
    ) -> Result<impl Iterator<Item = &'a Condition> + 'a> {
        let view = self.sub_view(name)?;
        Ok(view.condition_ids().filter_map(move |id| self.condition(id)))
    }

    /// Storage slots of a sub-view's nodes and conditions, ascending by id.
    pub fn sub_view_slots(&self, name: &str) -> Result<(Vec<usize>, Vec<usize>)> {
        let view = self.sub_view(name)?;
        let nodes = view.node_ids().filter_map(|id| self.node_index(id)).collect();
        let conditions = view
            .condition_ids()
            .filter_map(|id| self.condition_index(id))
            .collect();
        Ok((nodes, conditions))
    }

    /// Open a new solution step on every node.
    pub fn clone_solution_step(&mut self) {
        for node in &mut self.nodes {
            node.step_data_mut().clone_step();
        }
    }
}
