use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::direction::{Direction, ALL_DIRECTIONS};

/// Grid extents in nodes along x, y and z.
pub type GridDims = UVec3;

/// Integer node coordinate. Signed so neighbour lookups can step off the grid.
pub type NodeCoord = IVec3;

/// Adjacency rule used when counting live neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Neighbourhood {
    /// 6 face-adjacent neighbours.
    #[default]
    VonNeumann,
    /// 26 neighbours including edges and corners.
    Moore,
}

impl Neighbourhood {
    /// Directions that make up this stencil. Faces come first in
    /// `ALL_DIRECTIONS`, so Von Neumann is a prefix of Moore.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Neighbourhood::VonNeumann => &ALL_DIRECTIONS[..VON_NEUMANN_NEIGHBOURS as usize],
            Neighbourhood::Moore => &ALL_DIRECTIONS[..],
        }
    }

    /// Upper bound on a node's live-neighbour count.
    pub fn max_neighbours(self) -> u8 {
        match self {
            Neighbourhood::VonNeumann => VON_NEUMANN_NEIGHBOURS,
            Neighbourhood::Moore => MOORE_NEIGHBOURS,
        }
    }
}

/// Birth/death thresholds applied once per generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRules {
    /// Alive cells with fewer neighbours than this die.
    pub underpopulation: u8,
    /// Alive cells with more neighbours than this die.
    pub overpopulation: u8,
    /// Dead cells with exactly this many neighbours are born.
    pub reproduction: u8,
}

impl Default for GenerationRules {
    fn default() -> Self {
        Self {
            underpopulation: DEFAULT_UNDERPOPULATION,
            overpopulation: DEFAULT_OVERPOPULATION,
            reproduction: DEFAULT_REPRODUCTION,
        }
    }
}

impl GenerationRules {
    /// Next liveness of a single node given its current state and count.
    #[inline]
    pub fn next_state(&self, alive: bool, live_neighbours: u8) -> bool {
        if alive {
            live_neighbours >= self.underpopulation && live_neighbours <= self.overpopulation
        } else {
            live_neighbours != 0 && live_neighbours == self.reproduction
        }
    }
}
