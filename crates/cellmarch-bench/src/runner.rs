use std::sync::Arc;
use std::time::Instant;

use cellmarch_mesh::MarchingCubes;
use cellmarch_sim::GameOfLife;

use crate::scenes::SceneConfig;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub nodes: u64,
    pub tick_count: u32,
    pub final_alive: u64,
    pub final_triangles: u64,
    /// Count pass plus update pass.
    pub generation: TimingSeries,
    /// One full `march`.
    pub extraction: TimingSeries,
    /// Generation and extraction together, per tick.
    pub frame: TimingSeries,
}

/// Runs scenes headless on the CPU, optionally on a rayon pool.
pub struct BenchmarkRunner {
    tick_count: u32,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl BenchmarkRunner {
    /// `threads == 0` runs the passes on the calling thread.
    pub fn new(tick_count: u32, threads: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = if threads == 0 {
            None
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("cellmarch-worker-{i}"))
                .build()?;
            Some(Arc::new(pool))
        };
        log::info!(
            "Benchmark runner: {} ticks per scene, {} worker threads",
            tick_count,
            if threads == 0 { 1 } else { threads }
        );
        Ok(Self { tick_count, pool })
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> Result<BenchmarkResult, String> {
        log::info!(
            "Running scene '{}' ({} nodes)...",
            config.name,
            config.node_count()
        );

        let settings = config.settings();
        let mut sim = GameOfLife::new(&settings, self.pool.clone()).map_err(|e| e.to_string())?;
        let mut mesher = MarchingCubes::from_settings(&settings);

        let n = self.tick_count as usize;
        let mut generation_times = Vec::with_capacity(n);
        let mut extraction_times = Vec::with_capacity(n);
        let mut frame_times = Vec::with_capacity(n);
        let mut triangles = 0;

        for _ in 0..self.tick_count {
            let start = Instant::now();
            sim.step();
            let generated = Instant::now();
            triangles = mesher.march(sim.grid()).len() / 3;
            let extracted = Instant::now();

            generation_times.push((generated - start).as_secs_f64() * 1000.0);
            extraction_times.push((extracted - generated).as_secs_f64() * 1000.0);
            frame_times.push((extracted - start).as_secs_f64() * 1000.0);
        }

        let frame = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, p99={:.2}ms",
            frame.mean_ms,
            frame.p95_ms,
            frame.p99_ms
        );

        Ok(BenchmarkResult {
            scene_name: config.name.to_string(),
            nodes: config.node_count(),
            tick_count: self.tick_count,
            final_alive: sim.grid().alive_count() as u64,
            final_triangles: triangles as u64,
            generation: compute_timings(&generation_times),
            extraction: compute_timings(&extraction_times),
            frame,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellmarch_core::Neighbourhood;

    #[test]
    fn test_compute_timings_empty() {
        assert_eq!(compute_timings(&[]).mean_ms, 0.0);
    }

    #[test]
    fn test_compute_timings_stats() {
        let times: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let t = compute_timings(&times);
        assert_eq!(t.mean_ms, 50.5);
        assert_eq!(t.median_ms, 50.5);
        assert_eq!(t.min_ms, 1.0);
        assert_eq!(t.max_ms, 100.0);
        assert_eq!(t.p95_ms, 96.0);
        assert_eq!(t.p99_ms, 100.0);
    }

    #[test]
    fn test_compute_timings_odd_unsorted() {
        let t = compute_timings(&[3.0, 1.0, 2.0]);
        assert_eq!(t.median_ms, 2.0);
        assert_eq!(t.min_ms, 1.0);
    }

    #[test]
    fn test_run_small_scene() {
        let scene = SceneConfig {
            name: "tiny",
            dimensions: (8, 8, 8),
            neighbourhood: Neighbourhood::VonNeumann,
            step: 1,
            initial_density: 0.3,
        };
        for threads in [0, 2] {
            let runner = BenchmarkRunner::new(3, threads).expect("runner");
            let result = runner.run_scene(&scene).expect("scene runs");
            assert_eq!(result.scene_name, "tiny");
            assert_eq!(result.nodes, 512);
            assert_eq!(result.tick_count, 3);
            assert!(result.frame.mean_ms >= 0.0);
        }
    }
}
