//! The master/slave contact pass.
//!
//! One call to [`MeshProcess::execute`] per contact-search iteration:
//!
//! 1. Resolve the contact sub-view. A missing sub-view aborts the pass before
//!    anything is written.
//! 2. Classify the scanned region's nodes and conditions concurrently.
//! 3. Merge, then apply ACTIVE and role flags.
//! 4. Add the interface ids to the contact sub-view.
//! 5. Reset contact quantities on every root node outside the interface.

use std::sync::Arc;

use mortar_mesh::Mesh;
use once_cell::sync::OnceCell;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::classify::Role;
use crate::partition::{self, Partition};
use crate::reset::reset_stale_state;
use crate::{ProcessConfig, Result};

/// A pass over the mesh driven by the outer solve loop.
pub trait MeshProcess {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Run the pass once.
    fn execute(&self, mesh: &mut Mesh) -> Result<PassReport>;
}

/// Counts from one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassReport {
    /// Nodes classified onto the interface
    pub interface_nodes: usize,
    /// Conditions classified onto the interface
    pub interface_conditions: usize,
    /// Interface conditions with the SLAVE role
    pub slave_conditions: usize,
    /// Interface conditions with the MASTER role
    pub master_conditions: usize,
    /// Slave nodes marked ACTIVE
    pub activated_nodes: usize,
    /// Node ids newly added to the contact sub-view
    pub new_sub_view_nodes: usize,
    /// Condition ids newly added to the contact sub-view
    pub new_sub_view_conditions: usize,
    /// Root nodes whose contact quantities were reset
    pub reset_nodes: usize,
    /// Workers the scans were split across
    pub workers: usize,
}

/// Assigns MASTER/SLAVE roles and rebuilds the contact sub-view.
///
/// With a configured worker count, the dedicated pool is built on the first
/// `execute` and reused by every later pass (and by clones of the process).
#[derive(Debug, Clone, Default)]
pub struct MasterSlaveProcess {
    config: ProcessConfig,
    pool: OnceCell<Arc<ThreadPool>>,
}

impl MasterSlaveProcess {
    pub fn new(config: ProcessConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    fn run(&self, mesh: &mut Mesh) -> Result<PassReport> {
        let contact = self.config.contact_sub_view.as_str();
        mesh.sub_view(contact)?;

        let (node_slots, condition_slots) = match self.config.region.as_deref() {
            Some(region) => mesh.sub_view_slots(region)?,
            None => ((0..mesh.num_nodes()).collect(), (0..mesh.num_conditions()).collect()),
        };

        let workers = rayon::current_num_threads();
        debug!(
            "Classifying {} nodes and {} conditions across {} workers",
            node_slots.len(),
            condition_slots.len(),
            workers
        );

        let (nodes, conditions) = partition::scan(mesh, &node_slots, &condition_slots, workers);
        let partition = partition::merge(nodes, conditions);
        partition.apply(mesh)?;

        let (new_nodes, new_conditions) = build_sub_view(mesh, contact, &partition)?;

        let reset_nodes = if self.config.reset_stale_state {
            reset_stale_state(mesh.nodes_mut())
        } else {
            0
        };

        let report = PassReport {
            interface_nodes: partition.node_ids().len(),
            interface_conditions: partition.condition_ids().len(),
            slave_conditions: partition.num_with_role(Role::Slave),
            master_conditions: partition.num_with_role(Role::Master),
            activated_nodes: partition.num_activations(),
            new_sub_view_nodes: new_nodes,
            new_sub_view_conditions: new_conditions,
            reset_nodes,
            workers,
        };

        info!(
            "Contact pass: {} interface nodes ({} active), {} conditions ({} slave / {} master), {} nodes reset",
            report.interface_nodes,
            report.activated_nodes,
            report.interface_conditions,
            report.slave_conditions,
            report.master_conditions,
            report.reset_nodes
        );

        Ok(report)
    }
}

impl MeshProcess for MasterSlaveProcess {
    fn name(&self) -> &'static str {
        "master_slave"
    }

    fn execute(&self, mesh: &mut Mesh) -> Result<PassReport> {
        self.config.validate()?;
        match self.config.num_threads {
            Some(threads) => {
                let pool = self.pool.get_or_try_init(|| {
                    debug!("Building contact worker pool with {} threads", threads);
                    ThreadPoolBuilder::new().num_threads(threads).build().map(Arc::new)
                })?;
                pool.install(|| self.run(mesh))
            }
            None => self.run(mesh),
        }
    }
}

/// Push the partition's ids into the named sub-view.
/// Returns the number of (nodes, conditions) newly added.
pub fn build_sub_view(mesh: &mut Mesh, name: &str, partition: &Partition) -> Result<(usize, usize)> {
    let nodes = mesh.add_nodes_to(name, partition.node_ids())?;
    let conditions = mesh.add_conditions_to(name, partition.condition_ids())?;
    debug!(
        "Sub-view \"{}\": +{} nodes, +{} conditions",
        name, nodes, conditions
    );
    Ok((nodes, conditions))
}
