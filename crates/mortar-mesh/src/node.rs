//! Mesh nodes.

use crate::{Flag, FlagState, Flags, NodalValues, Result, SolutionStepData, StepVariable, Variable};

/// Stable node identifier, unique within a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mesh node: flags, non-historical values and buffered step fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    flags: Flags,
    values: NodalValues,
    step_data: SolutionStepData,
}

impl Node {
    /// Create a node with all flags unset, no values and zeroed step fields.
    pub fn new(id: NodeId, buffer_size: usize) -> Result<Self> {
        Ok(Self {
            id,
            flags: Flags::new(),
            values: NodalValues::new(),
            step_data: SolutionStepData::new(buffer_size)?,
        })
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> FlagState {
        self.flags.get(flag)
    }

    #[inline]
    pub fn is_defined(&self, flag: Flag) -> bool {
        self.flags.is_defined(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.set(flag, value);
    }

    #[inline]
    pub fn has_value(&self, var: Variable) -> bool {
        self.values.has(var)
    }

    #[inline]
    pub fn value(&self, var: Variable) -> Option<f64> {
        self.values.get(var)
    }

    #[inline]
    pub fn set_value(&mut self, var: Variable, value: f64) {
        self.values.set(var, value);
    }

    /// Current-step value of a time-stepped field.
    #[inline]
    pub fn step_value(&self, var: StepVariable) -> f64 {
        self.step_data.current(var)
    }

    #[inline]
    pub fn set_step_value(&mut self, var: StepVariable, value: f64) {
        self.step_data.set_current(var, value);
    }

    pub fn step_data(&self) -> &SolutionStepData {
        &self.step_data
    }

    pub fn step_data_mut(&mut self) -> &mut SolutionStepData {
        &mut self.step_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_state() {
        let node = Node::new(NodeId(3), 2).unwrap();
        assert_eq!(node.id(), NodeId(3));
        assert_eq!(node.flag(Flag::Interface), FlagState::Unset);
        assert!(!node.has_value(Variable::AugmentedNormalContactPressure));
        assert_eq!(node.step_value(StepVariable::NormalContactStress), 0.0);
    }

    #[test]
    fn flag_round_trip_through_node() {
        let mut node = Node::new(NodeId(1), 1).unwrap();
        node.set_flag(Flag::Slave, false);
        assert!(node.is_defined(Flag::Slave));
        assert_eq!(node.flag(Flag::Slave), FlagState::False);
        assert!(!node.is_defined(Flag::Master));
    }

    #[test]
    fn display_id() {
        assert_eq!(NodeId(42).to_string(), "#42");
    }
}
