//! Element-boundary conditions.
//!
//! A condition's geometry is an ordered list of node ids. Nodes are shared
//! between conditions and always owned by the root mesh.

use crate::{Flag, FlagState, Flags, NodeId};

/// Stable condition identifier, unique within a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionId(pub u64);

impl std::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A boundary condition entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    id: ConditionId,
    geometry: Vec<NodeId>,
    flags: Flags,
}

impl Condition {
    /// Create a condition over `geometry`.
    ///
    /// Geometry ids are not checked here; [`crate::Mesh::add_condition`]
    /// rejects ids the root does not own.
    pub fn new(id: ConditionId, geometry: Vec<NodeId>) -> Self {
        Self {
            id,
            geometry,
            flags: Flags::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ConditionId {
        self.id
    }

    /// Node references in geometry order.
    #[inline]
    pub fn geometry(&self) -> &[NodeId] {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> FlagState {
        self.flags.get(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.set(flag, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_keeps_order() {
        let cond = Condition::new(ConditionId(10), vec![NodeId(3), NodeId(1), NodeId(2)]);
        assert_eq!(cond.geometry(), &[NodeId(3), NodeId(1), NodeId(2)]);
        assert_eq!(cond.len(), 3);
        assert!(!cond.is_empty());
    }

    #[test]
    fn roles_start_unset() {
        let cond = Condition::new(ConditionId(1), vec![NodeId(1)]);
        assert_eq!(cond.flag(Flag::Master), FlagState::Unset);
        assert_eq!(cond.flag(Flag::Slave), FlagState::Unset);
    }
}
