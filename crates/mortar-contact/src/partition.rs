//! Parallel map / reduce over the scanned region.
//!
//! # Map
//!
//! The slot list of the region is cut into contiguous, non-overlapping
//! ranges, one per worker. Each worker classifies its range and returns an
//! owned [`WorkerOutput`]: the matched ids in scan order plus the mutations
//! the verdicts call for. Node and condition scans run concurrently; both
//! only read the mesh.
//!
//! # Barrier
//!
//! A scan result is wrapped in [`Completed`], which only this module can
//! construct and only once every worker of that scan has returned.
//!
//! # Reduce
//!
//! [`merge`] takes both completed scans and concatenates worker outputs in
//! worker-index order into a single [`Partition`], which is then applied to
//! the mesh single-threaded.

use mortar_mesh::{ConditionId, Flag, Mesh, NodeId};
use rayon::prelude::*;

use crate::classify::{classify_condition, classify_node, ConditionVerdict, Role};
use crate::{Error, Result};

/// Proof that every worker of a scan has finished.
#[derive(Debug)]
pub struct Completed<T> {
    scan: T,
}

impl<T> Completed<T> {
    fn new(scan: T) -> Self {
        Self { scan }
    }

    pub fn get(&self) -> &T {
        &self.scan
    }
}

/// What one worker produced for its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerOutput<Id, Change> {
    /// Worker index; ranges are assigned in this order
    pub worker: usize,
    /// Matched ids, in scan order
    pub matched: Vec<Id>,
    /// Pending writes, keyed by storage slot
    pub changes: Vec<Change>,
}

/// Per-worker output of the node scan. Changes are slots to activate.
pub type NodeWorkerOutput = WorkerOutput<NodeId, usize>;

/// Per-worker output of the condition scan. Changes are (slot, role) pairs.
pub type ConditionWorkerOutput = WorkerOutput<ConditionId, (usize, Role)>;

/// Result of the node scan.
#[derive(Debug, Default)]
pub struct NodeScan {
    pub workers: Vec<NodeWorkerOutput>,
    /// Node count of the scanned mesh
    pub num_nodes: usize,
}

/// Result of the condition scan.
#[derive(Debug, Default)]
pub struct ConditionScan {
    pub workers: Vec<ConditionWorkerOutput>,
    /// Condition count of the scanned mesh
    pub num_conditions: usize,
}

/// Length of each worker's range for `len` slots over `workers` workers.
///
/// Always at least 1, so the last range may be shorter and some workers may
/// receive nothing when `len < workers`.
pub fn range_len(len: usize, workers: usize) -> usize {
    let workers = workers.max(1);
    len.div_ceil(workers).max(1)
}

/// Classify the nodes at `slots`.
pub fn scan_nodes(mesh: &Mesh, slots: &[usize], workers: usize) -> Completed<NodeScan> {
    let nodes = mesh.nodes();
    let outputs = slots
        .par_chunks(range_len(slots.len(), workers))
        .enumerate()
        .map(|(worker, range)| {
            let mut out = NodeWorkerOutput {
                worker,
                matched: Vec::new(),
                changes: Vec::new(),
            };
            for &slot in range {
                let node = &nodes[slot];
                let verdict = classify_node(node);
                if verdict.member {
                    out.matched.push(node.id());
                }
                if verdict.activate {
                    out.changes.push(slot);
                }
            }
            out
        })
        .collect();

    Completed::new(NodeScan {
        workers: outputs,
        num_nodes: nodes.len(),
    })
}

/// Classify the conditions at `slots`, resolving geometry through the root.
pub fn scan_conditions(mesh: &Mesh, slots: &[usize], workers: usize) -> Completed<ConditionScan> {
    let conditions = mesh.conditions();
    let outputs = slots
        .par_chunks(range_len(slots.len(), workers))
        .enumerate()
        .map(|(worker, range)| {
            let mut out = ConditionWorkerOutput {
                worker,
                matched: Vec::new(),
                changes: Vec::new(),
            };
            for &slot in range {
                let condition = &conditions[slot];
                if let ConditionVerdict::Interface(role) =
                    classify_condition(condition, |id| mesh.node(id))
                {
                    out.matched.push(condition.id());
                    out.changes.push((slot, role));
                }
            }
            out
        })
        .collect();

    Completed::new(ConditionScan {
        workers: outputs,
        num_conditions: conditions.len(),
    })
}

/// Run both scans concurrently. Returns once both have completed.
pub fn scan(
    mesh: &Mesh,
    node_slots: &[usize],
    condition_slots: &[usize],
    workers: usize,
) -> (Completed<NodeScan>, Completed<ConditionScan>) {
    rayon::join(
        || scan_nodes(mesh, node_slots, workers),
        || scan_conditions(mesh, condition_slots, workers),
    )
}

/// Merged classification of a region, ready to be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    node_ids: Vec<NodeId>,
    condition_ids: Vec<ConditionId>,
    activations: Vec<usize>,
    roles: Vec<(usize, Role)>,
    num_nodes: usize,
    num_conditions: usize,
}

/// Concatenate completed scans in worker-index order.
pub fn merge(nodes: Completed<NodeScan>, conditions: Completed<ConditionScan>) -> Partition {
    let mut partition = Partition {
        num_nodes: nodes.scan.num_nodes,
        num_conditions: conditions.scan.num_conditions,
        ..Partition::default()
    };

    let mut node_workers = nodes.scan.workers;
    node_workers.sort_by_key(|w| w.worker);
    for worker in node_workers {
        partition.node_ids.extend(worker.matched);
        partition.activations.extend(worker.changes);
    }

    let mut condition_workers = conditions.scan.workers;
    condition_workers.sort_by_key(|w| w.worker);
    for worker in condition_workers {
        partition.condition_ids.extend(worker.matched);
        partition.roles.extend(worker.changes);
    }

    partition
}

impl Partition {
    /// Interface node ids.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Interface condition ids.
    pub fn condition_ids(&self) -> &[ConditionId] {
        &self.condition_ids
    }

    /// Number of nodes the pass activates.
    pub fn num_activations(&self) -> usize {
        self.activations.len()
    }

    pub fn num_with_role(&self, role: Role) -> usize {
        self.roles.iter().filter(|(_, r)| *r == role).count()
    }

    /// Write the verdicts into the mesh.
    ///
    /// Activated nodes get ACTIVE = true. Interface conditions get their role
    /// flag set true and the opposite role flag set false.
    ///
    /// `mesh` must be the mesh the partition was scanned from; a mesh with
    /// different node or condition counts is rejected before any write.
    pub fn apply(&self, mesh: &mut Mesh) -> Result<()> {
        if mesh.num_nodes() != self.num_nodes || mesh.num_conditions() != self.num_conditions {
            return Err(Error::MeshMismatch {
                expected_nodes: self.num_nodes,
                expected_conditions: self.num_conditions,
                found_nodes: mesh.num_nodes(),
                found_conditions: mesh.num_conditions(),
            });
        }

        let nodes = mesh.nodes_mut();
        for &slot in &self.activations {
            nodes[slot].set_flag(Flag::Active, true);
        }

        let conditions = mesh.conditions_mut();
        for &(slot, role) in &self.roles {
            let condition = &mut conditions[slot];
            condition.set_flag(role.flag(), true);
            condition.set_flag(role.opposite().flag(), false);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortar_mesh::Variable;

    /// Nodes 1..=n; odd ids on the slave interface with compressive pressure,
    /// even ids master interface, every fifth node off the interface.
    fn strip(n: u64) -> Mesh {
        let mut mesh = Mesh::new();
        for id in 1..=n {
            let node = mesh.add_node(NodeId(id)).unwrap();
            node.set_flag(Flag::Interface, id % 5 != 0);
            node.set_flag(Flag::Slave, id % 2 == 1);
            node.set_value(Variable::AugmentedNormalContactPressure, -1.0);
        }
        for id in 1..n {
            mesh.add_condition(ConditionId(id), vec![NodeId(id), NodeId(id + 1)])
                .unwrap();
        }
        mesh
    }

    fn all_slots(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    #[test]
    fn range_len_covers_all_slots() {
        assert_eq!(range_len(0, 4), 1);
        assert_eq!(range_len(10, 1), 10);
        assert_eq!(range_len(10, 3), 4);
        assert_eq!(range_len(3, 8), 1);
        // Zero workers is treated as one
        assert_eq!(range_len(7, 0), 7);
    }

    #[test]
    fn ranges_do_not_overlap() {
        let mesh = strip(23);
        let slots = all_slots(mesh.num_nodes());
        let scan = scan_nodes(&mesh, &slots, 4);

        let mut seen: Vec<NodeId> = scan
            .get()
            .workers
            .iter()
            .flat_map(|w| w.matched.iter().copied())
            .collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total, "a node was classified twice");
    }

    #[test]
    fn merge_concatenates_in_worker_order() {
        let mesh = strip(20);
        let slots = all_slots(mesh.num_nodes());
        let (nodes, conditions) = scan(&mesh, &slots, &all_slots(mesh.num_conditions()), 3);
        let partition = merge(nodes, conditions);

        // Contiguous ranges in worker order reproduce storage order
        let expected: Vec<_> = (1..=20).filter(|id| id % 5 != 0).map(NodeId).collect();
        assert_eq!(partition.node_ids(), expected.as_slice());
    }

    #[test]
    fn worker_count_does_not_change_result() {
        let mesh = strip(37);
        let node_slots = all_slots(mesh.num_nodes());
        let cond_slots = all_slots(mesh.num_conditions());

        let (n1, c1) = scan(&mesh, &node_slots, &cond_slots, 1);
        let reference = merge(n1, c1);
        for workers in [2, 3, 7, 64] {
            let (n, c) = scan(&mesh, &node_slots, &cond_slots, workers);
            assert_eq!(merge(n, c), reference, "workers = {}", workers);
        }
    }

    #[test]
    fn apply_writes_roles_exclusively() {
        let mut mesh = strip(4);
        // Stale role from an earlier iteration
        mesh.condition_mut(ConditionId(1)).unwrap().set_flag(Flag::Slave, true);

        let node_slots = all_slots(mesh.num_nodes());
        let cond_slots = all_slots(mesh.num_conditions());
        let (n, c) = scan(&mesh, &node_slots, &cond_slots, 2);
        let partition = merge(n, c);
        partition.apply(&mut mesh).unwrap();

        // Condition 1 = {1 (slave), 2 (master)} is mixed
        let cond = mesh.condition(ConditionId(1)).unwrap();
        assert!(cond.flag(Flag::Master).is_true());
        assert!(cond.flag(Flag::Slave).is_false());
        assert_eq!(partition.num_with_role(Role::Master), 3);
        assert_eq!(partition.num_with_role(Role::Slave), 0);
    }

    #[test]
    fn apply_activates_only_slave_members() {
        let mut mesh = strip(6);
        let node_slots = all_slots(mesh.num_nodes());
        let (n, c) = scan(&mesh, &node_slots, &[], 2);
        let partition = merge(n, c);
        partition.apply(&mut mesh).unwrap();

        // Slave members: 1, 3 (5 is off the interface)
        assert_eq!(partition.num_activations(), 2);
        for node in mesh.nodes() {
            let expected = matches!(node.id().0, 1 | 3);
            assert_eq!(node.flag(Flag::Active).is_true(), expected, "node {}", node.id());
        }
    }

    #[test]
    fn subset_of_slots_is_respected() {
        let mesh = strip(10);
        let (n, c) = scan(&mesh, &[0, 1, 2], &[], 2);
        let partition = merge(n, c);
        assert_eq!(partition.node_ids(), &[NodeId(1), NodeId(2), NodeId(3)]);
        assert!(partition.condition_ids().is_empty());
    }

    #[test]
    fn apply_to_a_different_mesh_is_rejected() {
        let scanned = strip(6);
        let node_slots = all_slots(scanned.num_nodes());
        let cond_slots = all_slots(scanned.num_conditions());
        let (n, c) = scan(&scanned, &node_slots, &cond_slots, 2);
        let partition = merge(n, c);

        let mut smaller = strip(3);
        let err = partition.apply(&mut smaller).unwrap_err();
        assert!(matches!(
            err,
            Error::MeshMismatch {
                expected_nodes: 6,
                expected_conditions: 5,
                found_nodes: 3,
                found_conditions: 2,
            }
        ));
        // Nothing written
        assert!(smaller.nodes().iter().all(|n| !n.is_defined(Flag::Active)));
        assert!(smaller
            .conditions()
            .iter()
            .all(|c| !c.flag(Flag::Master).is_defined()));
    }
}
