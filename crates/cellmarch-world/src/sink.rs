//! Seams between the world and its outside collaborators.

use cellmarch_mesh::{ExtractionStats, MeshVertex};

/// Receives the extracted mesh. Implemented by the renderer.
pub trait MeshSink {
    /// Replace the displayed mesh with these triangles.
    fn upload(&mut self, vertices: &[MeshVertex]);
    /// Nothing to draw.
    fn clear(&mut self);
}

/// Receives per-extraction figures for an on-screen or logged readout.
pub trait DiagnosticsSink {
    fn record(&mut self, stats: &ExtractionStats);
}

/// Logs each extraction at info level.
#[derive(Debug, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn record(&mut self, stats: &ExtractionStats) {
        log::info!(
            "mesh: {} triangles, {} KB vertices, {} KB grid, {}/{} cubes active",
            stats.triangle_count,
            stats.vertex_bytes / 1024,
            stats.grid_bytes / 1024,
            stats.cubes_active,
            stats.cubes_visited
        );
    }
}

/// Discards everything. Useful for headless runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl MeshSink for NullSink {
    fn upload(&mut self, _vertices: &[MeshVertex]) {}
    fn clear(&mut self) {}
}

impl DiagnosticsSink for NullSink {
    fn record(&mut self, _stats: &ExtractionStats) {}
}
