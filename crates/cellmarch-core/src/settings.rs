use glam::UVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{GenerationRules, GridDims, Neighbourhood};

/// Runtime-tunable simulation settings, loaded from RON or JSON at startup.
///
/// Every field is optional in the source file; missing fields take the
/// defaults from `constants.rs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Grid extents in nodes. Each axis is capped at MAX_AXIS_NODES.
    pub dimensions: (u32, u32, u32),
    /// Traversal stride. Values above 1 skip nodes when extracting.
    pub step: u32,
    /// Minimum live neighbours for an alive cell to survive.
    pub underpopulation_count: u8,
    /// Maximum live neighbours for an alive cell to survive.
    pub overpopulation_count: u8,
    /// Exact live-neighbour count that brings a dead cell to life.
    pub reproduction_count: u8,
    /// Adjacency stencil used for counting.
    pub neighbourhood: Neighbourhood,
    /// Seconds between automatic generation advances.
    pub next_generation_delay: f32,
    /// Interpolate vertices along the iso-value gradient instead of edge midpoints.
    pub is_interpolated: bool,
    /// Threshold separating inside from outside in the scalar field.
    pub iso_level: f32,
    /// Seed for the initial random population.
    pub seed: u64,
    /// Fraction of nodes alive after seeding (0.0–1.0).
    pub initial_density: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            dimensions: (DEFAULT_AXIS_NODES, DEFAULT_AXIS_NODES, DEFAULT_AXIS_NODES),
            step: DEFAULT_STEP,
            underpopulation_count: DEFAULT_UNDERPOPULATION,
            overpopulation_count: DEFAULT_OVERPOPULATION,
            reproduction_count: DEFAULT_REPRODUCTION,
            neighbourhood: Neighbourhood::default(),
            next_generation_delay: DEFAULT_GENERATION_DELAY,
            is_interpolated: false,
            iso_level: DEFAULT_ISO_LEVEL,
            seed: DEFAULT_SEED,
            initial_density: DEFAULT_INITIAL_DENSITY,
        }
    }
}

impl SimSettings {
    /// Grid extents as a vector.
    pub fn dims(&self) -> GridDims {
        let (x, y, z) = self.dimensions;
        UVec3::new(x, y, z)
    }

    /// Birth/death thresholds.
    pub fn rules(&self) -> GenerationRules {
        GenerationRules {
            underpopulation: self.underpopulation_count,
            overpopulation: self.overpopulation_count,
            reproduction: self.reproduction_count,
        }
    }

    /// Whether switching from `self` to `other` needs the grid reallocated and reseeded.
    pub fn requires_reseed(&self, other: &SimSettings) -> bool {
        self.dimensions != other.dimensions
            || self.seed != other.seed
            || self.initial_density != other.initial_density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SimSettings::default();
        assert_eq!(s.dims(), UVec3::splat(32));
        assert_eq!(s.rules(), GenerationRules::default());
        assert_eq!(s.neighbourhood, Neighbourhood::VonNeumann);
        assert!(!s.is_interpolated);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let s: SimSettings = ron::from_str("(dimensions: (8, 9, 10), neighbourhood: Moore)")
            .expect("should parse");
        assert_eq!(s.dims(), UVec3::new(8, 9, 10));
        assert_eq!(s.neighbourhood, Neighbourhood::Moore);
        assert_eq!(s.reproduction_count, DEFAULT_REPRODUCTION);
        assert_eq!(s.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_requires_reseed() {
        let a = SimSettings::default();
        let mut b = a.clone();
        b.next_generation_delay = 2.0;
        b.is_interpolated = true;
        assert!(!a.requires_reseed(&b));
        b.seed = 7;
        assert!(a.requires_reseed(&b));
    }
}
