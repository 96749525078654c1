//! Mortar Contact
//!
//! Master/slave classification of a contact interface and the rebuild of the
//! "Contact" sub-view, run once per contact-search iteration.
//!
//! # Inputs
//!
//! The contact search has already flagged INTERFACE (and SLAVE) on nodes and
//! written AUGMENTED_NORMAL_CONTACT_PRESSURE. This crate does no proximity
//! search and solves nothing.
//!
//! # Pass
//!
//! - A node is on the interface iff INTERFACE is defined and true. Slave
//!   interface nodes under compression (pressure < 0) become ACTIVE. ACTIVE
//!   is never cleared here.
//! - A condition is on the interface iff every geometry node is. It takes the
//!   SLAVE role when every one of its nodes has SLAVE defined and true,
//!   MASTER otherwise. An unset SLAVE counts as slave for activation but as
//!   master-side for the condition role.
//! - Interface ids are added to the contact sub-view by reference.
//! - Every root node outside the interface has its contact quantities zeroed.
//!
//! # Parallelism
//!
//! Classification is a rayon map over disjoint per-worker ranges followed by
//! an ordered reduce; see [`partition`]. The result is independent of the
//! worker count.

pub mod classify;
mod config;
mod error;
pub mod partition;
mod process;
pub mod reset;

pub use classify::{classify_condition, classify_node, ConditionVerdict, NodeVerdict, Role};
pub use config::ProcessConfig;
pub use error::{Error, Result};
pub use partition::{Completed, Partition};
pub use process::{build_sub_view, MasterSlaveProcess, MeshProcess, PassReport};
pub use reset::reset_stale_state;
