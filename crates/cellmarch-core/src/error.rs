use thiserror::Error;

/// Errors raised at configuration boundaries of the simulation.
///
/// These are never clamped away: a grid that cannot be allocated at the
/// requested size refuses to proceed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellmarchError {
    #[error("grid axis {axis} has {value} nodes, maximum is {max}")]
    AxisExceedsCap { axis: char, value: u32, max: u32 },

    #[error("grid axis {axis} must hold at least one node")]
    EmptyAxis { axis: char },

    #[error("traversal step {step} must be between 1 and the smallest axis ({min_axis})")]
    InvalidStep { step: u32, min_axis: u32 },

    #[error("snapshot holds {actual} cells but the grid needs {expected}")]
    SnapshotSizeMismatch { expected: usize, actual: usize },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
