//! Isosurface extraction over a `Grid` using the Marching Cubes tables.
//!
//! Each cube is 8 nodes spaced `step` apart. Its case index picks a row of
//! `TRI_TABLE`; every edge in the row becomes one vertex, placed at the edge
//! midpoint or at the linear iso-crossing between the two corner values.
//! The vertex buffer is cleared and fully rebuilt by every `march`.

use cellmarch_core::constants::{CUBE_CORNERS, CUBE_EDGES, DEFAULT_ISO_LEVEL};
use cellmarch_core::math::unchecked_index;
use cellmarch_core::SimSettings;
use cellmarch_sim::Grid;
use glam::{UVec3, Vec3};

use crate::tables::{row_edges, row_len, CORNER_OFFSETS, EDGE_CORNERS};
use crate::vertex::MeshVertex;

/// Figures from the most recent extraction, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub vertex_bytes: usize,
    pub grid_bytes: usize,
    pub cubes_visited: usize,
    /// Cubes whose case produced at least one triangle.
    pub cubes_active: usize,
}

/// Sampled corners of one cube.
struct Cube {
    position: [Vec3; CUBE_CORNERS],
    value: [f32; CUBE_CORNERS],
    index: u8,
}

pub struct MarchingCubes {
    vertices: Vec<MeshVertex>,
    interpolated: bool,
    iso_level: f32,
    stats: ExtractionStats,
}

impl Default for MarchingCubes {
    fn default() -> Self {
        Self::new(false, DEFAULT_ISO_LEVEL)
    }
}

impl MarchingCubes {
    pub fn new(interpolated: bool, iso_level: f32) -> Self {
        Self {
            vertices: Vec::new(),
            interpolated,
            iso_level,
            stats: ExtractionStats::default(),
        }
    }

    pub fn from_settings(settings: &SimSettings) -> Self {
        Self::new(settings.is_interpolated, settings.iso_level)
    }

    pub fn interpolated(&self) -> bool {
        self.interpolated
    }

    pub fn set_interpolated(&mut self, interpolated: bool) {
        self.interpolated = interpolated;
    }

    pub fn iso_level(&self) -> f32 {
        self.iso_level
    }

    pub fn set_iso_level(&mut self, iso_level: f32) {
        self.iso_level = iso_level;
    }

    /// Vertices from the most recent `march`.
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    /// Rebuild the vertex buffer from the grid's current state.
    ///
    /// Every three consecutive vertices form one triangle.
    pub fn march(&mut self, grid: &Grid) -> &[MeshVertex] {
        self.vertices.clear();
        let dims = grid.dims();
        let step = grid.step();
        let mut visited = 0;
        let mut active = 0;

        for origin in grid.traverse() {
            if origin.x + step >= dims.x || origin.y + step >= dims.y || origin.z + step >= dims.z {
                continue;
            }
            visited += 1;

            let cube = self.sample(grid, origin, step);
            let len = row_len(cube.index);
            debug_assert!(len % 3 == 0, "malformed tri-table row {}", cube.index);
            if len == 0 {
                continue;
            }
            active += 1;

            let colour = [
                origin.x as f32 / dims.x as f32,
                origin.y as f32 / dims.y as f32,
                origin.z as f32 / dims.z as f32,
                1.0,
            ];
            let mut edge_cache: [Option<Vec3>; CUBE_EDGES] = [None; CUBE_EDGES];
            for edge in row_edges(cube.index) {
                let p = *edge_cache[edge].get_or_insert_with(|| self.edge_vertex(&cube, edge));
                self.vertices.push(MeshVertex::new(p.to_array(), colour));
            }
        }

        self.stats = ExtractionStats {
            vertex_count: self.vertices.len(),
            triangle_count: self.vertices.len() / 3,
            vertex_bytes: std::mem::size_of_val(self.vertices.as_slice()),
            grid_bytes: grid.allocated_bytes(),
            cubes_visited: visited,
            cubes_active: active,
        };
        log::debug!(
            "MarchingCubes: {} cubes, {} active, {} triangles",
            visited,
            active,
            self.stats.triangle_count
        );
        &self.vertices
    }

    fn sample(&self, grid: &Grid, origin: UVec3, step: u32) -> Cube {
        let dims = grid.dims();
        let mut cube = Cube {
            position: [Vec3::ZERO; CUBE_CORNERS],
            value: [0.0; CUBE_CORNERS],
            index: 0,
        };
        for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
            let coord = origin + *offset * step;
            let idx = unchecked_index(dims, coord);
            cube.position[i] = grid.node_position(coord);
            cube.value[i] = grid.iso_value(idx);
            let inside = if self.interpolated {
                cube.value[i] > self.iso_level
            } else {
                grid.is_alive_at(idx)
            };
            if inside {
                cube.index |= 1 << i;
            }
        }
        cube
    }

    fn edge_vertex(&self, cube: &Cube, edge: usize) -> Vec3 {
        let (a, b) = EDGE_CORNERS[edge];
        let (pa, pb) = (cube.position[a], cube.position[b]);
        if !self.interpolated {
            return (pa + pb) * 0.5;
        }
        let (va, vb) = (cube.value[a], cube.value[b]);
        let delta = vb - va;
        if delta.abs() < f32::EPSILON {
            return (pa + pb) * 0.5;
        }
        let t = ((self.iso_level - va) / delta).clamp(0.0, 1.0);
        pa.lerp(pb, t)
    }
}
