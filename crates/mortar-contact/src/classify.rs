//! Per-entity interface classification.
//!
//! Both classifiers are pure: they read flags and values and return a
//! verdict. Mutations are applied after the parallel scan completes, see
//! [`crate::partition`].

use mortar_mesh::{Condition, Flag, FlagState, Node, NodeId, Variable};

/// Outcome of classifying one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeVerdict {
    /// INTERFACE is defined and true
    pub member: bool,
    /// The node must be marked ACTIVE
    pub activate: bool,
}

impl NodeVerdict {
    const OUTSIDE: Self = Self {
        member: false,
        activate: false,
    };
}

/// Slave status of a node on the interface.
///
/// A node with SLAVE unset counts as slave.
#[inline]
pub fn is_slave_node(node: &Node) -> bool {
    node.flag(Flag::Slave).as_bool().unwrap_or(true)
}

/// Classify a node against the current interface.
///
/// Only slave members with a strictly negative augmented pressure are
/// activated. The verdict never asks for ACTIVE to be cleared.
pub fn classify_node(node: &Node) -> NodeVerdict {
    match node.flag(Flag::Interface) {
        FlagState::Unset | FlagState::False => NodeVerdict::OUTSIDE,
        FlagState::True => {
            let activate = is_slave_node(node)
                && node
                    .value(Variable::AugmentedNormalContactPressure)
                    .is_some_and(|pressure| pressure < 0.0);
            NodeVerdict {
                member: true,
                activate,
            }
        }
    }
}

/// Contact role of an interface condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Master,
    Slave,
}

impl Role {
    /// The flag that carries this role.
    pub const fn flag(self) -> Flag {
        match self {
            Role::Master => Flag::Master,
            Role::Slave => Flag::Slave,
        }
    }

    pub const fn opposite(self) -> Role {
        match self {
            Role::Master => Role::Slave,
            Role::Slave => Role::Master,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.flag(), f)
    }
}

/// Outcome of classifying one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionVerdict {
    /// At least one geometry node is not on the interface
    NotInterface,
    /// Every geometry node is on the interface
    Interface(Role),
}

impl ConditionVerdict {
    pub fn role(self) -> Option<Role> {
        match self {
            ConditionVerdict::NotInterface => None,
            ConditionVerdict::Interface(role) => Some(role),
        }
    }
}

/// Classify a condition from its geometry nodes.
///
/// `resolve` maps a geometry id to the node in root storage; an id that does
/// not resolve is treated like a node whose INTERFACE is unset. All geometry
/// nodes are visited even once the condition is known to be off the
/// interface.
///
/// A condition is SLAVE only if every geometry node has SLAVE defined and
/// true; otherwise it is MASTER. Unlike [`is_slave_node`], an unset SLAVE
/// counts as master-side here.
pub fn classify_condition<'a, F>(condition: &Condition, resolve: F) -> ConditionVerdict
where
    F: Fn(NodeId) -> Option<&'a Node>,
{
    let mut is_interface = true;
    let mut is_slave = true;

    for &id in condition.geometry() {
        let Some(node) = resolve(id) else {
            is_interface = false;
            continue;
        };
        match node.flag(Flag::Interface) {
            FlagState::Unset | FlagState::False => is_interface = false,
            FlagState::True => {
                if !node.flag(Flag::Slave).is_true() {
                    is_slave = false;
                }
            }
        }
    }

    if !is_interface {
        return ConditionVerdict::NotInterface;
    }
    if is_slave {
        ConditionVerdict::Interface(Role::Slave)
    } else {
        ConditionVerdict::Interface(Role::Master)
    }
}
