//! Property tests over random meshes.

use std::collections::BTreeSet;

use mortar_contact::{MasterSlaveProcess, MeshProcess, ProcessConfig};
use mortar_mesh::{
    Condition, ConditionId, Flag, FlagState, Mesh, Node, NodeId, StepVariable, Variable,
    CONTACT_SUB_VIEW,
};
use proptest::prelude::*;

/// Random per-node input: (interface, slave, active, pressure, stress, gap).
type NodeInput = (Option<bool>, Option<bool>, Option<bool>, Option<f64>, f64, f64);

fn node_input() -> impl Strategy<Value = NodeInput> {
    (
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(-10.0f64..10.0),
        -10.0f64..10.0,
        -1.0f64..1.0,
    )
}

fn mesh_input() -> impl Strategy<Value = (Vec<NodeInput>, Vec<Vec<usize>>)> {
    proptest::collection::vec(node_input(), 1..40).prop_flat_map(|nodes| {
        let n = nodes.len();
        let conditions = proptest::collection::vec(proptest::collection::vec(0..n, 1..4), 0..30);
        (Just(nodes), conditions)
    })
}

fn build(nodes: &[NodeInput], conditions: &[Vec<usize>]) -> Mesh {
    let mut mesh = Mesh::new();
    for (i, &(interface, slave, active, pressure, stress, gap)) in nodes.iter().enumerate() {
        let node = mesh.add_node(NodeId(i as u64 + 1)).unwrap();
        if let Some(v) = interface {
            node.set_flag(Flag::Interface, v);
        }
        if let Some(v) = slave {
            node.set_flag(Flag::Slave, v);
        }
        if let Some(v) = active {
            node.set_flag(Flag::Active, v);
        }
        if let Some(p) = pressure {
            node.set_value(Variable::AugmentedNormalContactPressure, p);
        }
        node.set_step_value(StepVariable::NormalContactStress, stress);
        node.set_step_value(StepVariable::WeightedGap, gap);
    }
    for (i, geometry) in conditions.iter().enumerate() {
        let ids = geometry.iter().map(|&slot| NodeId(slot as u64 + 1)).collect();
        mesh.add_condition(ConditionId(i as u64 + 100), ids).unwrap();
    }
    mesh.create_sub_view(CONTACT_SUB_VIEW);
    mesh
}

fn run(mesh: &mut Mesh, threads: usize) {
    MasterSlaveProcess::new(ProcessConfig::default().with_num_threads(threads))
        .execute(mesh)
        .unwrap();
}

type Snapshot = (
    BTreeSet<NodeId>,
    BTreeSet<ConditionId>,
    Vec<Node>,
    Vec<Condition>,
);

fn snapshot(mesh: &Mesh) -> Snapshot {
    let view = mesh.sub_view(CONTACT_SUB_VIEW).unwrap();
    (
        view.node_ids().collect(),
        view.condition_ids().collect(),
        mesh.nodes().to_vec(),
        mesh.conditions().to_vec(),
    )
}

proptest! {
    #[test]
    fn thread_count_invariance((nodes, conditions) in mesh_input(), threads in 2usize..8) {
        let mut single = build(&nodes, &conditions);
        let mut many = build(&nodes, &conditions);
        run(&mut single, 1);
        run(&mut many, threads);
        prop_assert_eq!(snapshot(&single), snapshot(&many));
    }

    #[test]
    fn classification_is_idempotent((nodes, conditions) in mesh_input()) {
        let mut mesh = build(&nodes, &conditions);
        run(&mut mesh, 2);
        let first = snapshot(&mesh);
        run(&mut mesh, 2);
        prop_assert_eq!(first, snapshot(&mesh));
    }

    #[test]
    fn interface_conditions_have_exactly_one_role((nodes, conditions) in mesh_input()) {
        let mut mesh = build(&nodes, &conditions);
        run(&mut mesh, 3);
        let view = mesh.sub_view(CONTACT_SUB_VIEW).unwrap();
        for id in view.condition_ids() {
            let cond = mesh.condition(id).unwrap();
            let slave = cond.flag(Flag::Slave).is_true();
            let master = cond.flag(Flag::Master).is_true();
            prop_assert!(slave != master, "condition {} slave={} master={}", id, slave, master);
        }
    }

    #[test]
    fn reset_is_complete((nodes, conditions) in mesh_input()) {
        let mut mesh = build(&nodes, &conditions);
        run(&mut mesh, 2);
        for node in mesh.nodes() {
            if !node.flag(Flag::Interface).is_true() {
                prop_assert_eq!(node.value(Variable::AugmentedNormalContactPressure), Some(0.0));
                prop_assert_eq!(node.step_value(StepVariable::NormalContactStress), 0.0);
                prop_assert_eq!(node.step_value(StepVariable::WeightedGap), 0.0);
            }
        }
    }

    #[test]
    fn activation_is_monotone((nodes, conditions) in mesh_input()) {
        let before = build(&nodes, &conditions);
        let mut after = before.clone();
        run(&mut after, 2);

        for (old, new) in before.nodes().iter().zip(after.nodes()) {
            let slave_member = old.flag(Flag::Interface).is_true()
                && old.flag(Flag::Slave) != FlagState::False;
            let compressed = old
                .value(Variable::AugmentedNormalContactPressure)
                .is_some_and(|p| p < 0.0);
            if slave_member && compressed {
                prop_assert!(new.flag(Flag::Active).is_true());
            } else {
                prop_assert_eq!(old.flag(Flag::Active), new.flag(Flag::Active));
            }
        }
    }

    #[test]
    fn sub_view_matches_interface((nodes, conditions) in mesh_input()) {
        let mut mesh = build(&nodes, &conditions);
        run(&mut mesh, 4);
        let view = mesh.sub_view(CONTACT_SUB_VIEW).unwrap();
        for node in mesh.nodes() {
            prop_assert_eq!(view.contains_node(node.id()), node.flag(Flag::Interface).is_true());
        }
        for cond in mesh.conditions() {
            let all_interface = cond
                .geometry()
                .iter()
                .all(|&id| mesh.node(id).is_some_and(|n| n.flag(Flag::Interface).is_true()));
            prop_assert_eq!(view.contains_condition(cond.id()), all_interface);
        }
    }
}
