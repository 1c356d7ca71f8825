use std::sync::Arc;

use cellmarch_core::{CellmarchError, GenerationRules, Neighbourhood, SimSettings};

use crate::events::Event;
use crate::grid::{Grid, GridSnapshot};
use crate::passes::{count, generation};
use crate::rng::seeded_rng;

/// Summary broadcast after every generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub generation: u64,
    pub alive: usize,
    pub births: usize,
    pub deaths: usize,
}

/// Owns the grid and advances it one generation at a time on a timer.
///
/// A generation is a full counting pass followed by a full update pass.
/// Listeners on `on_generation` run after both passes complete.
pub struct GameOfLife {
    grid: Grid,
    rules: GenerationRules,
    neighbourhood: Neighbourhood,
    next_generation_delay: f32,
    time_until_next_generation: f32,
    generation: u64,
    paused: bool,
    pool: Option<Arc<rayon::ThreadPool>>,
    /// Fires once per generation, after the update pass.
    pub on_generation: Event<GenerationStats>,
}

fn validate_delay(delay: f32) -> Result<(), CellmarchError> {
    if !delay.is_finite() || delay < 0.0 {
        return Err(CellmarchError::InvalidSettings(format!(
            "next_generation_delay must be a non-negative number of seconds, got {delay}"
        )));
    }
    Ok(())
}

impl GameOfLife {
    /// Allocate the grid from `settings` and seed it.
    ///
    /// Pass a rayon pool to parallelise the counting and update sweeps.
    pub fn new(
        settings: &SimSettings,
        pool: Option<Arc<rayon::ThreadPool>>,
    ) -> Result<Self, CellmarchError> {
        validate_delay(settings.next_generation_delay)?;
        let mut grid = Grid::with_step(settings.dims(), settings.step)?;
        grid.populate(&mut seeded_rng(settings.seed), settings.initial_density);
        log::info!(
            "GameOfLife: {}x{}x{} grid, {:?}, {} alive, {} worker threads",
            grid.dims().x,
            grid.dims().y,
            grid.dims().z,
            settings.neighbourhood,
            grid.alive_count(),
            pool.as_ref().map_or(1, |p| p.current_num_threads()),
        );
        Ok(Self {
            grid,
            rules: settings.rules(),
            neighbourhood: settings.neighbourhood,
            next_generation_delay: settings.next_generation_delay,
            time_until_next_generation: settings.next_generation_delay,
            generation: 0,
            paused: false,
            pool,
            on_generation: Event::new(),
        })
    }

    /// Run a generation if the countdown has reached zero, otherwise count it
    /// down by `dt` seconds.
    ///
    /// Returns true when a generation ran this call.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.paused {
            return false;
        }
        if self.time_until_next_generation > 0.0 {
            self.time_until_next_generation -= dt;
            return false;
        }
        self.time_until_next_generation = self.next_generation_delay;
        self.step();
        true
    }

    /// Run one generation immediately, ignoring the timer and pause state.
    pub fn step(&mut self) -> GenerationStats {
        let pool = self.pool.as_deref();
        count::run(&mut self.grid, self.neighbourhood, pool);
        let t = generation::run(&mut self.grid, &self.rules, pool);
        self.generation += 1;

        let stats = GenerationStats {
            generation: self.generation,
            alive: self.grid.alive_count(),
            births: t.births,
            deaths: t.deaths,
        };
        log::debug!(
            "GameOfLife: generation {} alive={} births={} deaths={}",
            stats.generation,
            stats.alive,
            stats.births,
            stats.deaths
        );
        self.on_generation.invoke(&stats);
        stats
    }

    /// Recount neighbours against the current liveness.
    ///
    /// After a generation the counts describe the previous one. Interpolated
    /// extraction reads them, so callers recount before marching.
    pub fn recount(&mut self) {
        count::run(&mut self.grid, self.neighbourhood, self.pool.as_deref());
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for seeding patterns by hand.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rules(&self) -> GenerationRules {
        self.rules
    }

    pub fn set_rules(&mut self, rules: GenerationRules) {
        self.rules = rules;
    }

    pub fn neighbourhood(&self) -> Neighbourhood {
        self.neighbourhood
    }

    pub fn set_neighbourhood(&mut self, neighbourhood: Neighbourhood) {
        self.neighbourhood = neighbourhood;
    }

    pub fn next_generation_delay(&self) -> f32 {
        self.next_generation_delay
    }

    /// Change the delay. A pending countdown longer than the new delay is shortened.
    pub fn set_generation_delay(&mut self, delay: f32) -> Result<(), CellmarchError> {
        validate_delay(delay)?;
        self.next_generation_delay = delay;
        self.time_until_next_generation = self.time_until_next_generation.min(delay);
        Ok(())
    }

    pub fn time_until_next_generation(&self) -> f32 {
        self.time_until_next_generation
    }

    /// Reallocate for new extents and step, then reseed. Resets the generation counter.
    pub fn reset(&mut self, settings: &SimSettings) -> Result<(), CellmarchError> {
        validate_delay(settings.next_generation_delay)?;
        self.grid.reconfigure(settings.dims(), settings.step)?;
        self.grid.populate(&mut seeded_rng(settings.seed), settings.initial_density);
        self.rules = settings.rules();
        self.neighbourhood = settings.neighbourhood;
        self.next_generation_delay = settings.next_generation_delay;
        self.time_until_next_generation = settings.next_generation_delay;
        self.generation = 0;
        Ok(())
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot(self.generation)
    }

    /// Load a saved grid. The countdown restarts from the full delay.
    pub fn restore(&mut self, snapshot: &GridSnapshot) -> Result<(), CellmarchError> {
        self.grid.restore(snapshot)?;
        self.generation = snapshot.generation;
        self.time_until_next_generation = self.next_generation_delay;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
