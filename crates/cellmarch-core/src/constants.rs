//! Single source of truth for shared constants.
//! Grid limits, rule defaults and extraction parameters live here so the
//! simulation, the extractor and the settings validator agree on them.

/// Maximum number of nodes along any one grid axis.
pub const MAX_AXIS_NODES: u32 = 256;

/// Default grid extent per axis when no settings file is supplied.
pub const DEFAULT_AXIS_NODES: u32 = 32;

/// Default traversal stride. 1 visits every node.
pub const DEFAULT_STEP: u32 = 1;

/// Alive cells with fewer live neighbours than this die.
pub const DEFAULT_UNDERPOPULATION: u8 = 2;

/// Alive cells with more live neighbours than this die.
pub const DEFAULT_OVERPOPULATION: u8 = 3;

/// Dead cells with exactly this many live neighbours are born.
pub const DEFAULT_REPRODUCTION: u8 = 3;

/// Seconds between automatic generation advances.
pub const DEFAULT_GENERATION_DELAY: f32 = 0.5;

/// Iso-level separating alive from dead nodes in the scalar field.
pub const DEFAULT_ISO_LEVEL: f32 = 0.5;

/// Seed for the initial random population.
pub const DEFAULT_SEED: u64 = 42;

/// Fraction of nodes alive after the initial random population.
pub const DEFAULT_INITIAL_DENSITY: f32 = 0.3;

/// Face-adjacent neighbours (Von Neumann stencil).
pub const VON_NEUMANN_NEIGHBOURS: u8 = 6;

/// Face, edge and corner neighbours (Moore stencil).
pub const MOORE_NEIGHBOURS: u8 = 26;

/// Corners of one Marching Cubes cell.
pub const CUBE_CORNERS: usize = 8;

/// Edges of one Marching Cubes cell.
pub const CUBE_EDGES: usize = 12;

/// Entries in the triangulation table (one per 8-bit corner mask).
pub const TRI_TABLE_ROWS: usize = 256;

/// Edge indices per tri-table row, including the terminating sentinel.
pub const TRI_TABLE_ROW_LEN: usize = 16;

/// Sentinel terminating a tri-table row.
pub const TRI_TABLE_END: i8 = -1;

/// Weight of the liveness flag in a node's iso-value.
/// The remainder comes from the normalised live-neighbour count, so alive
/// nodes sit in [0.75, 1.0] and dead nodes in [0.0, 0.25].
pub const ISO_ALIVE_WEIGHT: f32 = 0.75;
