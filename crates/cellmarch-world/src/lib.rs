//! Per-frame driver: advances the automaton, re-extracts the isosurface when a
//! generation has run, and forwards the mesh and figures to their sinks.

pub mod error;
pub mod sink;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use cellmarch_core::SimSettings;
use cellmarch_mesh::{ExtractionStats, MarchingCubes};
use cellmarch_persist::rule_fingerprint;
use cellmarch_settings::validate_settings;
use cellmarch_sim::{Event, GameOfLife};

pub use error::WorldError;
pub use sink::{DiagnosticsSink, LogDiagnostics, MeshSink, NullSink};

/// Primary public struct for the cellmarch-world crate.
/// Owns the simulation and the extractor and keeps the mesh in step with the grid.
pub struct World {
    sim: GameOfLife,
    mesher: MarchingCubes,
    settings: SimSettings,
    /// Set by the generation listener, cleared when the mesh is rebuilt.
    mesh_dirty: Rc<Cell<bool>>,
    /// Fires after `apply_settings` has taken effect.
    pub on_settings_changed: Event<SimSettings>,
}

impl World {
    /// Validate settings, allocate and seed the grid. Refuses to start on invalid settings.
    pub fn new(
        settings: SimSettings,
        pool: Option<Arc<rayon::ThreadPool>>,
    ) -> Result<Self, WorldError> {
        validate_settings(&settings).map_err(WorldError::InvalidSettings)?;
        let mut sim = GameOfLife::new(&settings, pool)?;
        let mesh_dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&mesh_dirty);
        sim.on_generation.subscribe(move |_| flag.set(true));

        Ok(Self {
            sim,
            mesher: MarchingCubes::from_settings(&settings),
            settings,
            mesh_dirty,
            on_settings_changed: Event::new(),
        })
    }

    /// Advance time by `dt` seconds. Returns true when the mesh was rebuilt.
    pub fn update(
        &mut self,
        dt: f32,
        mesh_sink: &mut dyn MeshSink,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> bool {
        self.sim.update(dt);
        self.refresh_mesh_if_dirty(mesh_sink, diagnostics)
    }

    /// Force one generation and rebuild the mesh.
    pub fn step(&mut self, mesh_sink: &mut dyn MeshSink, diagnostics: &mut dyn DiagnosticsSink) {
        self.sim.step();
        self.refresh_mesh_if_dirty(mesh_sink, diagnostics);
    }

    fn refresh_mesh_if_dirty(
        &mut self,
        mesh_sink: &mut dyn MeshSink,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> bool {
        if !self.mesh_dirty.replace(false) {
            return false;
        }
        if self.mesher.interpolated() {
            self.sim.recount();
        }
        let vertices = self.mesher.march(self.sim.grid());
        if vertices.is_empty() {
            mesh_sink.clear();
        } else {
            mesh_sink.upload(vertices);
        }
        diagnostics.record(&self.mesher.stats());
        true
    }

    /// Replace the settings at runtime.
    ///
    /// Changes to extents, seed or density reallocate and reseed the grid.
    /// Step, rules, stencil, delay and extraction mode are updated in place.
    /// Invalid settings are rejected and the world is left as it was.
    pub fn apply_settings(&mut self, settings: SimSettings) -> Result<(), WorldError> {
        validate_settings(&settings).map_err(WorldError::InvalidSettings)?;

        if self.settings.requires_reseed(&settings) {
            self.sim.reset(&settings)?;
            log::info!(
                "World: grid reset to {:?} step {}",
                settings.dimensions,
                settings.step
            );
        } else {
            self.sim.grid_mut().set_step(settings.step)?;
            self.sim.set_generation_delay(settings.next_generation_delay)?;
            self.sim.set_rules(settings.rules());
            self.sim.set_neighbourhood(settings.neighbourhood);
        }
        self.mesher.set_interpolated(settings.is_interpolated);
        self.mesher.set_iso_level(settings.iso_level);

        self.settings = settings;
        self.mesh_dirty.set(true);
        self.on_settings_changed.invoke(&self.settings);
        Ok(())
    }

    /// Serialize the current grid.
    pub fn save_snapshot(&self) -> Vec<u8> {
        cellmarch_persist::save(
            &self.sim.snapshot(),
            self.settings.seed,
            rule_fingerprint(&self.sim.rules(), self.sim.neighbourhood()),
        )
    }

    /// Replace the grid with a saved one. Returns compatibility warnings.
    pub fn load_snapshot(&mut self, bytes: &[u8]) -> Result<Vec<String>, WorldError> {
        let fingerprint = rule_fingerprint(&self.sim.rules(), self.sim.neighbourhood());
        let data = cellmarch_persist::load(bytes, fingerprint)?;
        self.sim.restore(&data.snapshot)?;
        let grid = self.sim.grid();
        self.settings.dimensions = (grid.dims().x, grid.dims().y, grid.dims().z);
        self.settings.step = grid.step();
        self.mesh_dirty.set(true);
        Ok(data.warnings)
    }

    pub fn sim(&self) -> &GameOfLife {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut GameOfLife {
        &mut self.sim
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn last_extraction(&self) -> ExtractionStats {
        self.mesher.stats()
    }

    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_dirty.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellmarch_core::Neighbourhood;
    use cellmarch_mesh::MeshVertex;
    use glam::IVec3;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        uploads: Vec<usize>,
        clears: usize,
        stats: Vec<ExtractionStats>,
    }

    impl MeshSink for RecordingSink {
        fn upload(&mut self, vertices: &[MeshVertex]) {
            self.uploads.push(vertices.len());
        }
        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    impl DiagnosticsSink for RecordingSink {
        fn record(&mut self, stats: &ExtractionStats) {
            self.stats.push(*stats);
        }
    }

    fn settings() -> SimSettings {
        SimSettings {
            dimensions: (8, 8, 8),
            next_generation_delay: 1.0,
            initial_density: 0.3,
            ..SimSettings::default()
        }
    }

    #[test]
    fn test_invalid_settings_refuse_to_start() {
        let bad = SimSettings {
            dimensions: (8, 512, 8),
            ..settings()
        };
        assert!(matches!(
            World::new(bad, None),
            Err(WorldError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_first_update_uploads_mesh() {
        let mut world = World::new(settings(), None).expect("valid settings");
        let mut mesh = RecordingSink::default();
        let mut diag = RecordingSink::default();
        assert!(world.update(0.0, &mut mesh, &mut diag));
        assert_eq!(mesh.uploads.len(), 1);
        assert!(mesh.uploads[0] > 0);
        assert_eq!(diag.stats.len(), 1);
        assert_eq!(diag.stats[0].vertex_count, mesh.uploads[0]);
    }

    #[test]
    fn test_mesh_rebuilt_only_after_generation() {
        let mut world = World::new(settings(), None).expect("valid settings");
        let mut mesh = RecordingSink::default();
        let mut diag = NullSink;
        world.update(0.0, &mut mesh, &mut diag);

        assert!(!world.update(0.5, &mut mesh, &mut diag), "no generation yet");
        assert!(!world.update(0.6, &mut mesh, &mut diag), "countdown just expired");
        assert_eq!(mesh.uploads.len() + mesh.clears, 1);

        assert!(world.update(0.0, &mut mesh, &mut diag), "generation ran");
        assert_eq!(world.sim().generation(), 1);
        assert_eq!(mesh.uploads.len() + mesh.clears, 2);
        assert!(!world.is_mesh_dirty());
    }

    #[test]
    fn test_empty_grid_clears_sink() {
        let s = SimSettings {
            initial_density: 0.0,
            ..settings()
        };
        let mut world = World::new(s, None).expect("valid settings");
        let mut mesh = RecordingSink::default();
        world.update(0.0, &mut mesh, &mut NullSink);
        assert_eq!(mesh.clears, 1);
        assert!(mesh.uploads.is_empty());
    }

    #[test]
    fn test_apply_settings_in_place() {
        let mut world = World::new(settings(), None).expect("valid settings");
        world.step(&mut NullSink, &mut NullSink);
        let before = world.sim().snapshot();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        world
            .on_settings_changed
            .subscribe(move |s: &SimSettings| sink.borrow_mut().push(s.neighbourhood));

        let changed = SimSettings {
            neighbourhood: Neighbourhood::Moore,
            is_interpolated: true,
            next_generation_delay: 0.1,
            ..settings()
        };
        world.apply_settings(changed).expect("valid settings");
        assert_eq!(world.sim().snapshot(), before, "grid kept");
        assert_eq!(world.sim().neighbourhood(), Neighbourhood::Moore);
        assert_eq!(world.sim().next_generation_delay(), 0.1);
        assert!(world.is_mesh_dirty());
        assert_eq!(*seen.borrow(), vec![Neighbourhood::Moore]);
    }

    #[test]
    fn test_apply_settings_resize_reseeds() {
        let mut world = World::new(settings(), None).expect("valid settings");
        world.step(&mut NullSink, &mut NullSink);
        let resized = SimSettings {
            dimensions: (12, 6, 4),
            ..settings()
        };
        world.apply_settings(resized).expect("valid settings");
        assert_eq!(world.sim().grid().node_count(), 12 * 6 * 4);
        assert_eq!(world.sim().generation(), 0);
        assert!(world.sim().grid().alive_count() > 0);
    }

    #[test]
    fn test_apply_invalid_settings_leaves_world() {
        let mut world = World::new(settings(), None).expect("valid settings");
        let bad = SimSettings {
            iso_level: 2.0,
            ..settings()
        };
        assert!(world.apply_settings(bad).is_err());
        assert_eq!(world.settings(), &settings());
    }

    #[test]
    fn test_snapshot_round_trip_through_world() {
        let mut world = World::new(settings(), None).expect("valid settings");
        world.step(&mut NullSink, &mut NullSink);
        world.step(&mut NullSink, &mut NullSink);
        let bytes = world.save_snapshot();
        let saved = world.sim().snapshot();

        world.step(&mut NullSink, &mut NullSink);
        world.sim_mut().grid_mut().set_alive(IVec3::ZERO, true);
        let warnings = world.load_snapshot(&bytes).expect("load");
        assert!(warnings.is_empty());
        assert_eq!(world.sim().snapshot(), saved);
        assert_eq!(world.sim().generation(), 2);
        assert!(world.is_mesh_dirty());
    }

    #[test]
    fn test_step_change_keeps_grid() {
        let mut world = World::new(settings(), None).expect("valid settings");
        world.step(&mut NullSink, &mut NullSink);
        world.step(&mut NullSink, &mut NullSink);
        let before = world.sim().snapshot();

        let coarser = SimSettings {
            step: 2,
            ..settings()
        };
        world.apply_settings(coarser).expect("valid settings");
        assert_eq!(world.sim().generation(), 2);
        assert_eq!(world.sim().grid().step(), 2);
        assert_eq!(world.sim().snapshot().alive, before.alive, "grid kept");
        assert!(world.is_mesh_dirty());
    }

    #[test]
    fn test_interpolated_mesh_uses_current_counts() {
        let s = SimSettings {
            is_interpolated: true,
            neighbourhood: Neighbourhood::Moore,
            ..settings()
        };
        let mut world = World::new(s, None).expect("valid settings");
        world.step(&mut NullSink, &mut NullSink);

        let mut fresh = cellmarch_sim::Grid::new(glam::UVec3::splat(2)).expect("valid dims");
        fresh.restore(&world.sim().snapshot()).expect("restore");
        cellmarch_sim::passes::count::run(&mut fresh, Neighbourhood::Moore, None);
        for c in world.sim().grid().traverse() {
            let c = c.as_ivec3();
            assert_eq!(world.sim().grid().live_neighbours(c), fresh.live_neighbours(c));
        }
    }
}
