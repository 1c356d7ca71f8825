use cellmarch_core::{Neighbourhood, SimSettings};

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub dimensions: (u32, u32, u32),
    pub neighbourhood: Neighbourhood,
    pub step: u32,
    pub initial_density: f32,
}

impl SceneConfig {
    /// Settings for this scene. Rules for the Moore scenes are widened so the
    /// population does not collapse within the first few generations.
    pub fn settings(&self) -> SimSettings {
        let (under, over, repro) = match self.neighbourhood {
            Neighbourhood::VonNeumann => (2, 3, 3),
            Neighbourhood::Moore => (5, 7, 6),
        };
        SimSettings {
            dimensions: self.dimensions,
            step: self.step,
            neighbourhood: self.neighbourhood,
            underpopulation_count: under,
            overpopulation_count: over,
            reproduction_count: repro,
            initial_density: self.initial_density,
            next_generation_delay: 0.0,
            ..SimSettings::default()
        }
    }

    pub fn node_count(&self) -> u64 {
        let (x, y, z) = self.dimensions;
        x as u64 * y as u64 * z as u64
    }
}

/// Return the standard suite of benchmark scenes (32K to 2M nodes).
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "32-vn",
            dimensions: (32, 32, 32),
            neighbourhood: Neighbourhood::VonNeumann,
            step: 1,
            initial_density: 0.3,
        },
        SceneConfig {
            name: "64-vn",
            dimensions: (64, 64, 64),
            neighbourhood: Neighbourhood::VonNeumann,
            step: 1,
            initial_density: 0.3,
        },
        SceneConfig {
            name: "64-moore",
            dimensions: (64, 64, 64),
            neighbourhood: Neighbourhood::Moore,
            step: 1,
            initial_density: 0.2,
        },
        SceneConfig {
            name: "128-vn",
            dimensions: (128, 128, 128),
            neighbourhood: Neighbourhood::VonNeumann,
            step: 1,
            initial_density: 0.3,
        },
        SceneConfig {
            name: "128-moore-step2",
            dimensions: (128, 128, 128),
            neighbourhood: Neighbourhood::Moore,
            step: 2,
            initial_density: 0.2,
        },
    ]
}
