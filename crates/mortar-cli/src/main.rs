//! Contact sweep driver
//!
//! Assembles a two-surface contact patch and runs the master/slave pass over
//! a few synthetic contact-search iterations, printing one JSON report per
//! iteration.
//!
//! Usage: `contact-sweep [SEGMENTS] [ITERATIONS]`

use std::env;

use mortar_contact::{MasterSlaveProcess, MeshProcess, PassReport, ProcessConfig};
use mortar_mesh::{ConditionId, Flag, Mesh, NodeId, StepVariable, Variable, CONTACT_SUB_VIEW};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Patch layout read from the command line.
#[derive(Debug, Clone, Copy)]
struct SweepConfig {
    /// Line segments per contact surface
    segments: u64,
    /// Contact-search iterations to simulate
    iterations: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            segments: 8,
            iterations: 3,
        }
    }
}

#[derive(Serialize)]
struct IterationReport {
    iteration: u64,
    #[serde(flatten)]
    report: PassReport,
    contact_nodes: usize,
    contact_conditions: usize,
}

/// Two facing line surfaces. The slave surface holds node ids `1..=n+1`,
/// the master surface `1001..=1001+n`. Each segment is one condition.
fn build_patch(segments: u64) -> Result<Mesh, mortar_mesh::MeshError> {
    let mut mesh = Mesh::with_buffer_size(3)?;
    mesh.create_sub_view(CONTACT_SUB_VIEW);

    for (offset, slave) in [(0u64, true), (1000, false)] {
        for i in 1..=segments + 1 {
            let node = mesh.add_node(NodeId(offset + i))?;
            node.set_flag(Flag::Slave, slave);
        }
        for i in 1..=segments {
            let geometry = vec![NodeId(offset + i), NodeId(offset + i + 1)];
            mesh.add_condition(ConditionId(offset + i), geometry)?;
        }
    }

    // A mixed segment bridging both surfaces
    mesh.add_condition(ConditionId(5000), vec![NodeId(1), NodeId(1001)])?;
    Ok(mesh)
}

/// Stand-in for the contact search: the interface window slides along the
/// surfaces and pressure alternates between compression and tension.
fn search_step(mesh: &mut Mesh, iteration: u64, segments: u64) {
    let window = (iteration % (segments + 1)) + 1;
    for node in mesh.nodes_mut() {
        let local = node.id().0 % 1000;
        let in_contact = local >= window;
        node.set_flag(Flag::Interface, in_contact);
        if in_contact {
            let pressure = if (local + iteration) % 2 == 0 { -1.0 } else { 0.5 };
            node.set_value(Variable::AugmentedNormalContactPressure, pressure);
            node.set_step_value(StepVariable::NormalContactStress, pressure * 10.0);
            node.set_step_value(StepVariable::WeightedGap, -0.01 * local as f64);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_sweep=info,mortar_contact=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();
    let defaults = SweepConfig::default();
    let sweep = SweepConfig {
        segments: args.get(1).and_then(|s| s.parse().ok()).unwrap_or(defaults.segments),
        iterations: args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.iterations),
    };

    let config = ProcessConfig::from_env()?;
    info!(
        "Sweeping {} segments over {} iterations (sub-view \"{}\")",
        sweep.segments, sweep.iterations, config.contact_sub_view
    );

    let mut mesh = build_patch(sweep.segments)?;
    if !mesh.has_sub_view(&config.contact_sub_view) {
        mesh.create_sub_view(&config.contact_sub_view);
    }
    if let Some(region) = config.region.clone() {
        // Scan the slave surface only
        let slave_nodes: Vec<NodeId> = (1..=sweep.segments + 1).map(NodeId).collect();
        let slave_conditions: Vec<ConditionId> = (1..=sweep.segments).map(ConditionId).collect();
        mesh.create_sub_view(&region);
        mesh.add_nodes_to(&region, &slave_nodes)?;
        mesh.add_conditions_to(&region, &slave_conditions)?;
    }

    let process = MasterSlaveProcess::new(config);
    for iteration in 0..sweep.iterations {
        mesh.clone_solution_step();
        search_step(&mut mesh, iteration, sweep.segments);

        let report = process.execute(&mut mesh)?;
        let view = mesh.sub_view(&process.config().contact_sub_view)?;
        let line = IterationReport {
            iteration,
            report,
            contact_nodes: view.num_nodes(),
            contact_conditions: view.num_conditions(),
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    info!("Sweep complete");
    Ok(())
}
