use crate::types::{GridDims, NodeCoord};
use glam::{UVec3, Vec3};

/// Total number of nodes in a grid of the given extents.
#[inline]
pub fn node_count(dims: GridDims) -> usize {
    dims.x as usize * dims.y as usize * dims.z as usize
}

/// Whether a signed coordinate lies inside `[0, dims - 1]` on every axis.
#[inline]
pub fn in_bounds(dims: GridDims, coord: NodeCoord) -> bool {
    coord.x >= 0
        && coord.y >= 0
        && coord.z >= 0
        && (coord.x as u32) < dims.x
        && (coord.y as u32) < dims.y
        && (coord.z as u32) < dims.z
}

/// Map a 3D coordinate to its linear offset: `z*dx*dy + y*dx + x`.
/// Returns `None` for any coordinate outside the grid.
#[inline]
pub fn linear_index(dims: GridDims, coord: NodeCoord) -> Option<usize> {
    if !in_bounds(dims, coord) {
        return None;
    }
    Some(unchecked_index(dims, coord.as_uvec3()))
}

/// Linear offset for a coordinate already known to be in bounds.
#[inline]
pub fn unchecked_index(dims: GridDims, coord: UVec3) -> usize {
    coord.z as usize * dims.x as usize * dims.y as usize
        + coord.y as usize * dims.x as usize
        + coord.x as usize
}

/// World-space corners of a grid centred on the origin.
///
/// Returns `(min, max)` with `min = (-x/2, +y/2, -z/2)`: the y axis is
/// inverted so row 0 sits at the top (Y-down).
pub fn world_bounds(dims: GridDims) -> (Vec3, Vec3) {
    let half = dims.as_vec3() * 0.5;
    let min = Vec3::new(-half.x, half.y, -half.z);
    let max = Vec3::new(half.x, -half.y, half.z);
    (min, max)
}

/// World-space position of a node given the grid's minimum corner.
#[inline]
pub fn node_position(min_bounds: Vec3, coord: UVec3) -> Vec3 {
    let c = coord.as_vec3();
    Vec3::new(min_bounds.x + c.x, min_bounds.y - c.y, min_bounds.z + c.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use std::collections::HashSet;

    #[test]
    fn test_index_layout() {
        let dims = UVec3::new(4, 3, 2);
        assert_eq!(linear_index(dims, IVec3::new(0, 0, 0)), Some(0));
        assert_eq!(linear_index(dims, IVec3::new(1, 0, 0)), Some(1));
        assert_eq!(linear_index(dims, IVec3::new(0, 1, 0)), Some(4));
        assert_eq!(linear_index(dims, IVec3::new(0, 0, 1)), Some(12));
        assert_eq!(linear_index(dims, IVec3::new(3, 2, 1)), Some(23));
    }

    #[test]
    fn test_index_bijection() {
        let dims = UVec3::new(5, 4, 3);
        let total = node_count(dims);
        let mut seen = HashSet::new();
        for z in 0..dims.z as i32 {
            for y in 0..dims.y as i32 {
                for x in 0..dims.x as i32 {
                    let idx = linear_index(dims, IVec3::new(x, y, z)).expect("in range");
                    assert!(idx < total, "index {idx} out of [0, {total})");
                    assert!(seen.insert(idx), "collision at ({x},{y},{z})");
                }
            }
        }
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_out_of_range_is_none() {
        let dims = UVec3::new(4, 4, 4);
        assert_eq!(linear_index(dims, IVec3::new(-1, 0, 0)), None);
        assert_eq!(linear_index(dims, IVec3::new(0, -1, 0)), None);
        assert_eq!(linear_index(dims, IVec3::new(0, 0, -1)), None);
        assert_eq!(linear_index(dims, IVec3::new(4, 0, 0)), None);
        assert_eq!(linear_index(dims, IVec3::new(0, 4, 0)), None);
        assert_eq!(linear_index(dims, IVec3::new(0, 0, 4)), None);
    }

    #[test]
    fn test_world_bounds_y_down() {
        let (min, max) = world_bounds(UVec3::new(4, 6, 8));
        assert_eq!(min, Vec3::new(-2.0, 3.0, -4.0));
        assert_eq!(max, Vec3::new(2.0, -3.0, 4.0));
    }

    #[test]
    fn test_node_position_steps_down_in_y() {
        let (min, _) = world_bounds(UVec3::new(4, 4, 4));
        let p0 = node_position(min, UVec3::new(0, 0, 0));
        let p1 = node_position(min, UVec3::new(1, 1, 1));
        assert_eq!(p0, min);
        assert_eq!(p1 - p0, Vec3::new(1.0, -1.0, 1.0));
    }
}
