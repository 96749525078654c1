//! Typed nodal variable descriptors and their storage.
//!
//! Two kinds of nodal quantity exist:
//! - [`Variable`]: a non-historical value that may be absent on a node.
//! - [`StepVariable`]: a time-stepped field, present on every node for every
//!   buffered solution step.
//!
//! Each descriptor maps to a fixed slot, so lookups are array indexing.

use std::collections::VecDeque;

use crate::{MeshError, Result};

/// Non-historical nodal variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variable {
    /// Augmented normal contact pressure (negative = compressive)
    AugmentedNormalContactPressure,
}

impl Variable {
    pub const COUNT: usize = 1;
    pub const ALL: [Variable; Variable::COUNT] = [Variable::AugmentedNormalContactPressure];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::AugmentedNormalContactPressure => f.write_str("AUGMENTED_NORMAL_CONTACT_PRESSURE"),
        }
    }
}

/// Time-stepped nodal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepVariable {
    /// Normal contact stress
    NormalContactStress,
    /// Weighted normal gap
    WeightedGap,
}

impl StepVariable {
    pub const COUNT: usize = 2;
    pub const ALL: [StepVariable; StepVariable::COUNT] =
        [StepVariable::NormalContactStress, StepVariable::WeightedGap];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for StepVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepVariable::NormalContactStress => f.write_str("NORMAL_CONTACT_STRESS"),
            StepVariable::WeightedGap => f.write_str("WEIGHTED_GAP"),
        }
    }
}

/// Non-historical values of one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodalValues {
    slots: [Option<f64>; Variable::COUNT],
}

impl NodalValues {
    /// No values present.
    pub const fn new() -> Self {
        Self {
            slots: [None; Variable::COUNT],
        }
    }

    #[inline]
    pub fn has(&self, var: Variable) -> bool {
        self.slots[var.slot()].is_some()
    }

    #[inline]
    pub fn get(&self, var: Variable) -> Option<f64> {
        self.slots[var.slot()]
    }

    #[inline]
    pub fn set(&mut self, var: Variable, value: f64) {
        self.slots[var.slot()] = Some(value);
    }
}

/// One solution step's worth of field values.
type StepFrame = [f64; StepVariable::COUNT];

/// Buffered time-stepped values of one node.
///
/// Index 0 is the current step, index `k` is `k` steps back. The buffer
/// always holds exactly `buffer_size` frames.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionStepData {
    frames: VecDeque<StepFrame>,
}

impl SolutionStepData {
    /// Create a zeroed buffer holding `buffer_size` steps.
    pub fn new(buffer_size: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(MeshError::InvalidBufferSize(buffer_size));
        }
        Ok(Self {
            frames: std::iter::repeat([0.0; StepVariable::COUNT])
                .take(buffer_size)
                .collect(),
        })
    }

    pub fn buffer_size(&self) -> usize {
        self.frames.len()
    }

    /// Value at the current step.
    #[inline]
    pub fn current(&self, var: StepVariable) -> f64 {
        self.frames[0][var.slot()]
    }

    #[inline]
    pub fn current_mut(&mut self, var: StepVariable) -> &mut f64 {
        &mut self.frames[0][var.slot()]
    }

    #[inline]
    pub fn set_current(&mut self, var: StepVariable, value: f64) {
        *self.current_mut(var) = value;
    }

    /// Value `steps_back` steps before the current one, if buffered.
    pub fn previous(&self, var: StepVariable, steps_back: usize) -> Option<f64> {
        self.frames.get(steps_back).map(|frame| frame[var.slot()])
    }

    /// Open a new solution step.
    ///
    /// The oldest frame is dropped and the current values are carried into
    /// the new current step.
    pub fn clone_step(&mut self) {
        let current = self.frames[0];
        self.frames.pop_back();
        self.frames.push_front(current);
    }
}

impl Default for SolutionStepData {
    fn default() -> Self {
        Self {
            frames: VecDeque::from(vec![[0.0; StepVariable::COUNT]; crate::DEFAULT_BUFFER_SIZE]),
        }
    }
}
