use cellmarch_core::direction::Direction;
use cellmarch_core::math::{in_bounds, unchecked_index};
use cellmarch_core::types::GridDims;
use cellmarch_core::Neighbourhood;
use glam::UVec3;
use rayon::prelude::*;

use crate::grid::Grid;

/// Live neighbours of one node. Offsets that leave the grid contribute nothing.
#[inline]
fn count_node(alive: &[bool], dims: GridDims, coord: UVec3, stencil: &[Direction]) -> u8 {
    let base = coord.as_ivec3();
    let mut n = 0u8;
    for dir in stencil {
        let c = base + dir.offset();
        if in_bounds(dims, c) && alive[unchecked_index(dims, c.as_uvec3())] {
            n += 1;
        }
    }
    n
}

/// Fill the counts for one z-slab (`dims.x * dims.y` nodes).
fn count_slab(alive: &[bool], dims: GridDims, z: u32, stencil: &[Direction], out: &mut [u8]) {
    let mut i = 0;
    for y in 0..dims.y {
        for x in 0..dims.x {
            out[i] = count_node(alive, dims, UVec3::new(x, y, z), stencil);
            i += 1;
        }
    }
}

/// Overwrite every node's live-neighbour count from the current liveness.
pub fn run(grid: &mut Grid, neighbourhood: Neighbourhood, pool: Option<&rayon::ThreadPool>) {
    let dims = grid.dims();
    let slab = (dims.x * dims.y) as usize;
    let stencil = neighbourhood.directions();
    let alive = &grid.alive;
    let counts = &mut grid.counts;

    match pool {
        Some(pool) => pool.install(|| {
            counts
                .par_chunks_mut(slab)
                .enumerate()
                .for_each(|(z, out)| count_slab(alive, dims, z as u32, stencil, out));
        }),
        None => {
            for (z, out) in counts.chunks_mut(slab).enumerate() {
                count_slab(alive, dims, z as u32, stencil, out);
            }
        }
    }
    grid.counted_with = neighbourhood;
}
