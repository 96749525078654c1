//! Stale contact state reset.
//!
//! Runs over every node of the root mesh, not only the scanned region.
//! Nodes whose INTERFACE is unset or false lose their contact quantities:
//! AUGMENTED_NORMAL_CONTACT_PRESSURE, and the current-step
//! NORMAL_CONTACT_STRESS and WEIGHTED_GAP.

use mortar_mesh::{Flag, Node, StepVariable, Variable};
use rayon::prelude::*;

/// Whether a node is outside the interface and must be reset.
#[inline]
pub fn needs_reset(node: &Node) -> bool {
    !node.flag(Flag::Interface).is_true()
}

/// Zero the contact quantities of one node.
pub fn reset_node(node: &mut Node) {
    node.set_value(Variable::AugmentedNormalContactPressure, 0.0);
    node.set_step_value(StepVariable::NormalContactStress, 0.0);
    node.set_step_value(StepVariable::WeightedGap, 0.0);
}

/// Reset every node outside the interface. Returns the number reset.
pub fn reset_stale_state(nodes: &mut [Node]) -> usize {
    nodes
        .par_iter_mut()
        .map(|node| {
            if needs_reset(node) {
                reset_node(node);
                1
            } else {
                0
            }
        })
        .sum()
}
