//! Grid State Store: a dense 3D lattice of boolean cells in structure-of-arrays
//! layout, plus the bookkeeping needed to map coordinates to world space.
//!
//! Buffers are allocated once per `set_dimensions` and dropped with the grid.
//! Liveness is double-buffered: the update pass writes `next` and swaps it in.

use cellmarch_core::constants::{DEFAULT_STEP, ISO_ALIVE_WEIGHT, MAX_AXIS_NODES};
use cellmarch_core::math::{self, node_count};
use cellmarch_core::types::{GridDims, NodeCoord};
use cellmarch_core::{CellmarchError, Neighbourhood};
use glam::{UVec3, Vec3};

use rand::Rng;

/// Owned copy of the grid's liveness, used for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub dims: GridDims,
    pub step: u32,
    pub generation: u64,
    /// One entry per node in linear-index order.
    pub alive: Vec<bool>,
}

pub struct Grid {
    dims: GridDims,
    step: u32,
    min_bounds: Vec3,
    max_bounds: Vec3,
    pub(crate) alive: Box<[bool]>,
    pub(crate) next: Box<[bool]>,
    pub(crate) counts: Box<[u8]>,
    /// Stencil the current `counts` were computed with.
    pub(crate) counted_with: Neighbourhood,
}

fn validate_dims(dims: GridDims) -> Result<(), CellmarchError> {
    for (axis, value) in [('x', dims.x), ('y', dims.y), ('z', dims.z)] {
        if value == 0 {
            return Err(CellmarchError::EmptyAxis { axis });
        }
        if value > MAX_AXIS_NODES {
            return Err(CellmarchError::AxisExceedsCap {
                axis,
                value,
                max: MAX_AXIS_NODES,
            });
        }
    }
    Ok(())
}

fn validate_step(dims: GridDims, step: u32) -> Result<(), CellmarchError> {
    let min_axis = dims.min_element();
    if step == 0 || step > min_axis {
        return Err(CellmarchError::InvalidStep { step, min_axis });
    }
    Ok(())
}

impl Grid {
    /// Allocate a grid with the default traversal step.
    pub fn new(dims: GridDims) -> Result<Self, CellmarchError> {
        Self::with_step(dims, DEFAULT_STEP)
    }

    pub fn with_step(dims: GridDims, step: u32) -> Result<Self, CellmarchError> {
        validate_dims(dims)?;
        validate_step(dims, step)?;
        let mut grid = Self {
            dims: UVec3::ZERO,
            step,
            min_bounds: Vec3::ZERO,
            max_bounds: Vec3::ZERO,
            alive: Box::default(),
            next: Box::default(),
            counts: Box::default(),
            counted_with: Neighbourhood::default(),
        };
        grid.allocate(dims);
        Ok(grid)
    }

    /// Reallocate every buffer for new extents. All cells start dead.
    ///
    /// On error the grid is left untouched. The current step must still fit
    /// inside the new extents; use `reconfigure` to change both at once.
    pub fn set_dimensions(&mut self, dims: GridDims) -> Result<(), CellmarchError> {
        self.reconfigure(dims, self.step)
    }

    /// Validate and apply new extents and step together.
    pub fn reconfigure(&mut self, dims: GridDims, step: u32) -> Result<(), CellmarchError> {
        validate_dims(dims)?;
        validate_step(dims, step)?;
        self.step = step;
        self.allocate(dims);
        Ok(())
    }

    pub fn set_step(&mut self, step: u32) -> Result<(), CellmarchError> {
        validate_step(self.dims, step)?;
        self.step = step;
        Ok(())
    }

    fn allocate(&mut self, dims: GridDims) {
        let old_bytes = self.allocated_bytes();
        let n = node_count(dims);
        self.dims = dims;
        self.alive = vec![false; n].into_boxed_slice();
        self.next = vec![false; n].into_boxed_slice();
        self.counts = vec![0u8; n].into_boxed_slice();
        let (min, max) = math::world_bounds(dims);
        self.min_bounds = min;
        self.max_bounds = max;
        if old_bytes > 0 {
            log::debug!("Grid: released {} bytes", old_bytes);
        }
        log::debug!(
            "Grid: allocated {}x{}x{} = {} nodes ({} bytes)",
            dims.x,
            dims.y,
            dims.z,
            n,
            self.allocated_bytes()
        );
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn node_count(&self) -> usize {
        self.alive.len()
    }

    pub fn min_bounds(&self) -> Vec3 {
        self.min_bounds
    }

    pub fn max_bounds(&self) -> Vec3 {
        self.max_bounds
    }

    /// Bytes held by the liveness, scratch and count buffers.
    pub fn allocated_bytes(&self) -> usize {
        std::mem::size_of_val(&*self.alive)
            + std::mem::size_of_val(&*self.next)
            + std::mem::size_of_val(&*self.counts)
    }

    /// Linear index of a coordinate, `None` when off the grid.
    #[inline]
    pub fn to_index(&self, coord: NodeCoord) -> Option<usize> {
        math::linear_index(self.dims, coord)
    }

    /// World-space centre of a node (Y-down, one unit between nodes).
    #[inline]
    pub fn node_position(&self, coord: UVec3) -> Vec3 {
        math::node_position(self.min_bounds, coord)
    }

    /// Iterate node coordinates at multiples of `step`, z outermost, x innermost.
    pub fn traverse(&self) -> GridTraversal {
        GridTraversal::new(self.dims, self.step)
    }

    #[inline]
    pub fn is_alive(&self, coord: NodeCoord) -> bool {
        self.to_index(coord).is_some_and(|i| self.alive[i])
    }

    #[inline]
    pub fn is_alive_at(&self, index: usize) -> bool {
        self.alive[index]
    }

    /// Set a node's liveness. Returns false when the coordinate is off the grid.
    pub fn set_alive(&mut self, coord: NodeCoord, alive: bool) -> bool {
        match self.to_index(coord) {
            Some(i) => {
                self.alive[i] = alive;
                true
            }
            None => false,
        }
    }

    /// Live-neighbour count from the most recent counting pass.
    pub fn live_neighbours(&self, coord: NodeCoord) -> Option<u8> {
        self.to_index(coord).map(|i| self.counts[i])
    }

    /// Stencil used by the most recent counting pass.
    pub fn counted_with(&self) -> Neighbourhood {
        self.counted_with
    }

    /// Scalar field value of a node: liveness dominates, the neighbour count
    /// nudges it within its half so alive and dead never cross 0.5.
    ///
    /// Reads the counts as last computed. After a generation they describe
    /// the previous one until `GameOfLife::recount` or the next counting pass.
    #[inline]
    pub fn iso_value(&self, index: usize) -> f32 {
        let alive = if self.alive[index] { ISO_ALIVE_WEIGHT } else { 0.0 };
        let max = self.counted_with.max_neighbours() as f32;
        let density = (self.counts[index] as f32 / max).min(1.0);
        alive + (1.0 - ISO_ALIVE_WEIGHT) * density
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Kill every node and zero the counts.
    pub fn clear(&mut self) {
        self.alive.fill(false);
        self.next.fill(false);
        self.counts.fill(0);
    }

    /// Clear, then bring each node to life with probability `density`.
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f32) {
        self.clear();
        for cell in self.alive.iter_mut() {
            *cell = rng.gen::<f32>() < density;
        }
        log::debug!(
            "Grid: populated {} of {} nodes (density {:.2})",
            self.alive_count(),
            self.node_count(),
            density
        );
    }

    pub fn snapshot(&self, generation: u64) -> GridSnapshot {
        GridSnapshot {
            dims: self.dims,
            step: self.step,
            generation,
            alive: self.alive.to_vec(),
        }
    }

    /// Reallocate to the snapshot's extents and copy its liveness in.
    /// Counts are zeroed and recomputed by the next generation.
    pub fn restore(&mut self, snapshot: &GridSnapshot) -> Result<(), CellmarchError> {
        validate_dims(snapshot.dims)?;
        validate_step(snapshot.dims, snapshot.step)?;
        let expected = node_count(snapshot.dims);
        if snapshot.alive.len() != expected {
            return Err(CellmarchError::SnapshotSizeMismatch {
                expected,
                actual: snapshot.alive.len(),
            });
        }
        self.reconfigure(snapshot.dims, snapshot.step)?;
        self.alive.copy_from_slice(&snapshot.alive);
        Ok(())
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("dims", &self.dims)
            .field("step", &self.step)
            .field("alive", &self.alive_count())
            .finish()
    }
}

/// Lazy, finite walk over a grid's strided node coordinates.
///
/// Cheap to construct; call `Grid::traverse` again to restart.
#[derive(Debug, Clone)]
pub struct GridTraversal {
    dims: GridDims,
    step: u32,
    next: Option<UVec3>,
}

impl GridTraversal {
    pub fn new(dims: GridDims, step: u32) -> Self {
        let step = step.max(1);
        let next = if dims.cmpgt(UVec3::ZERO).all() {
            Some(UVec3::ZERO)
        } else {
            None
        };
        Self { dims, step, next }
    }
}

impl Iterator for GridTraversal {
    type Item = UVec3;

    fn next(&mut self) -> Option<UVec3> {
        let current = self.next?;
        let mut n = current;
        n.x += self.step;
        if n.x >= self.dims.x {
            n.x = 0;
            n.y += self.step;
            if n.y >= self.dims.y {
                n.y = 0;
                n.z += self.step;
            }
        }
        self.next = if n.z >= self.dims.z { None } else { Some(n) };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(c) = self.next else {
            return (0, Some(0));
        };
        let per = |extent: u32| extent.div_ceil(self.step) as usize;
        let (nx, ny, nz) = (per(self.dims.x), per(self.dims.y), per(self.dims.z));
        let (cx, cy, cz) = (
            (c.x / self.step) as usize,
            (c.y / self.step) as usize,
            (c.z / self.step) as usize,
        );
        let done = cz * nx * ny + cy * nx + cx;
        let remaining = nx * ny * nz - done;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridTraversal {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;
    use glam::IVec3;

    #[test]
    fn test_new_allocates_zeroed() {
        let grid = Grid::new(UVec3::new(4, 5, 6)).expect("valid dims");
        assert_eq!(grid.node_count(), 120);
        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.allocated_bytes(), 120 * 3);
        assert_eq!(grid.min_bounds(), Vec3::new(-2.0, 2.5, -3.0));
        assert_eq!(grid.max_bounds(), Vec3::new(2.0, -2.5, 3.0));
    }

    #[test]
    fn test_axis_over_cap_refused() {
        let err = Grid::new(UVec3::new(4, MAX_AXIS_NODES + 1, 4)).unwrap_err();
        assert_eq!(
            err,
            CellmarchError::AxisExceedsCap {
                axis: 'y',
                value: MAX_AXIS_NODES + 1,
                max: MAX_AXIS_NODES
            }
        );
        assert!(Grid::new(UVec3::new(MAX_AXIS_NODES, 1, 1)).is_ok());
    }

    #[test]
    fn test_zero_axis_refused() {
        assert_eq!(
            Grid::new(UVec3::new(0, 4, 4)).unwrap_err(),
            CellmarchError::EmptyAxis { axis: 'x' }
        );
    }

    #[test]
    fn test_failed_resize_leaves_grid_untouched() {
        let mut grid = Grid::new(UVec3::splat(4)).expect("valid dims");
        grid.set_alive(IVec3::new(1, 1, 1), true);
        assert!(grid.set_dimensions(UVec3::new(4, 4, 999)).is_err());
        assert_eq!(grid.dims(), UVec3::splat(4));
        assert!(grid.is_alive(IVec3::new(1, 1, 1)));
    }

    #[test]
    fn test_resize_reallocates_and_resets() {
        let mut grid = Grid::new(UVec3::splat(4)).expect("valid dims");
        grid.set_alive(IVec3::new(1, 1, 1), true);
        grid.set_dimensions(UVec3::new(2, 3, 5)).expect("valid dims");
        assert_eq!(grid.node_count(), 30);
        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.min_bounds(), Vec3::new(-1.0, 1.5, -2.5));
    }

    #[test]
    fn test_step_validation() {
        let mut grid = Grid::new(UVec3::new(8, 4, 8)).expect("valid dims");
        assert!(grid.set_step(0).is_err());
        assert_eq!(
            grid.set_step(5).unwrap_err(),
            CellmarchError::InvalidStep {
                step: 5,
                min_axis: 4
            }
        );
        grid.set_step(2).expect("valid step");
        assert_eq!(grid.step(), 2);
    }

    #[test]
    fn test_set_and_query() {
        let mut grid = Grid::new(UVec3::splat(4)).expect("valid dims");
        assert!(grid.set_alive(IVec3::new(3, 0, 2), true));
        assert!(!grid.set_alive(IVec3::new(4, 0, 0), true));
        assert!(grid.is_alive(IVec3::new(3, 0, 2)));
        assert!(!grid.is_alive(IVec3::new(-1, 0, 0)));
        assert_eq!(grid.live_neighbours(IVec3::new(9, 9, 9)), None);
        assert_eq!(grid.alive_count(), 1);
    }

    #[test]
    fn test_traversal_order_and_count() {
        let grid = Grid::new(UVec3::new(2, 2, 2)).expect("valid dims");
        let coords: Vec<UVec3> = grid.traverse().collect();
        assert_eq!(coords.len(), 8);
        assert_eq!(coords[0], UVec3::new(0, 0, 0));
        assert_eq!(coords[1], UVec3::new(1, 0, 0));
        assert_eq!(coords[2], UVec3::new(0, 1, 0));
        assert_eq!(coords[4], UVec3::new(0, 0, 1));
        for (i, c) in coords.iter().enumerate() {
            assert_eq!(grid.to_index(c.as_ivec3()), Some(i));
        }
    }

    #[test]
    fn test_traversal_restartable() {
        let grid = Grid::new(UVec3::new(3, 2, 2)).expect("valid dims");
        let first: Vec<UVec3> = grid.traverse().collect();
        let second: Vec<UVec3> = grid.traverse().collect();
        assert_eq!(first, second);
        assert_eq!(grid.traverse().len(), 12);
    }

    #[test]
    fn test_traversal_with_step() {
        let grid = Grid::with_step(UVec3::new(5, 4, 3), 2).expect("valid dims");
        let coords: Vec<UVec3> = grid.traverse().collect();
        // x in {0,2,4}, y in {0,2}, z in {0,2}
        assert_eq!(coords.len(), 12);
        assert_eq!(grid.traverse().len(), 12);
        assert!(coords.iter().all(|c| c.x % 2 == 0 && c.y % 2 == 0 && c.z % 2 == 0));
        let mut it = grid.traverse();
        it.next();
        assert_eq!(it.len(), 11);
    }

    #[test]
    fn test_populate_is_seeded() {
        let mut a = Grid::new(UVec3::splat(8)).expect("valid dims");
        let mut b = Grid::new(UVec3::splat(8)).expect("valid dims");
        a.populate(&mut seeded_rng(42), 0.3);
        b.populate(&mut seeded_rng(42), 0.3);
        assert_eq!(a.snapshot(0), b.snapshot(0));
        let alive = a.alive_count();
        assert!(alive > 0 && alive < a.node_count(), "density 0.3 gave {alive}");
    }

    #[test]
    fn test_populate_extremes() {
        let mut grid = Grid::new(UVec3::splat(4)).expect("valid dims");
        grid.populate(&mut seeded_rng(1), 0.0);
        assert_eq!(grid.alive_count(), 0);
        grid.populate(&mut seeded_rng(1), 1.0);
        assert_eq!(grid.alive_count(), 64);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut grid = Grid::new(UVec3::new(3, 4, 5)).expect("valid dims");
        grid.populate(&mut seeded_rng(9), 0.5);
        let snap = grid.snapshot(17);
        assert_eq!(snap.generation, 17);

        let mut other = Grid::new(UVec3::splat(2)).expect("valid dims");
        other.restore(&snap).expect("restore");
        assert_eq!(other.dims(), UVec3::new(3, 4, 5));
        assert_eq!(other.snapshot(17), snap);
    }

    #[test]
    fn test_restore_size_mismatch() {
        let mut grid = Grid::new(UVec3::splat(2)).expect("valid dims");
        let snap = GridSnapshot {
            dims: UVec3::splat(2),
            step: 1,
            generation: 0,
            alive: vec![true; 7],
        };
        assert_eq!(
            grid.restore(&snap).unwrap_err(),
            CellmarchError::SnapshotSizeMismatch {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_iso_value_separates_alive_and_dead() {
        let mut grid = Grid::new(UVec3::splat(2)).expect("valid dims");
        grid.set_alive(IVec3::ZERO, true);
        grid.counts[1] = 6;
        grid.counts[0] = 0;
        assert!(grid.iso_value(0) > 0.5);
        assert!(grid.iso_value(1) < 0.5);
    }
}
