use glam::IVec3;

/// One of the 26 neighbour offsets around a grid node (6 faces + 12 edges + 8 corners).
///
/// Offsets are expressed in node-index space: +y is the next row of the
/// grid, which maps to a lower world-space y under the Y-down convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    offset: IVec3,
}

const fn dir(x: i32, y: i32, z: i32) -> Direction {
    Direction {
        offset: IVec3::new(x, y, z),
    }
}

/// All 26 directions, faces first, then edges, then corners.
pub const ALL_DIRECTIONS: [Direction; 26] = [
    // 6 faces
    dir(-1, 0, 0),
    dir(1, 0, 0),
    dir(0, -1, 0),
    dir(0, 1, 0),
    dir(0, 0, -1),
    dir(0, 0, 1),
    // 12 edges: xy plane
    dir(-1, -1, 0),
    dir(1, -1, 0),
    dir(-1, 1, 0),
    dir(1, 1, 0),
    // xz plane
    dir(-1, 0, -1),
    dir(1, 0, -1),
    dir(-1, 0, 1),
    dir(1, 0, 1),
    // yz plane
    dir(0, -1, -1),
    dir(0, 1, -1),
    dir(0, -1, 1),
    dir(0, 1, 1),
    // 8 corners
    dir(-1, -1, -1),
    dir(1, -1, -1),
    dir(-1, 1, -1),
    dir(1, 1, -1),
    dir(-1, -1, 1),
    dir(1, -1, 1),
    dir(-1, 1, 1),
    dir(1, 1, 1),
];

impl Direction {
    /// Offset to add to a node coordinate to reach this neighbour.
    #[inline]
    pub fn offset(self) -> IVec3 {
        self.offset
    }

    /// Classification by how many axes the offset moves along.
    pub fn kind(self) -> DirectionKind {
        let moved = (self.offset.x != 0) as u8 + (self.offset.y != 0) as u8 + (self.offset.z != 0) as u8;
        match moved {
            1 => DirectionKind::Face,
            2 => DirectionKind::Edge,
            _ => DirectionKind::Corner,
        }
    }
}

/// Classification of a direction by how many axes it moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionKind {
    Face,
    Edge,
    Corner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_directions_unique() {
        for (i, a) in ALL_DIRECTIONS.iter().enumerate() {
            for (j, b) in ALL_DIRECTIONS.iter().enumerate() {
                if i != j {
                    assert_ne!(a.offset(), b.offset(), "directions {i} and {j} share offset");
                }
            }
        }
    }

    #[test]
    fn test_no_zero_offset() {
        for dir in ALL_DIRECTIONS {
            assert_ne!(dir.offset(), IVec3::ZERO, "{dir:?} has zero offset");
        }
    }

    #[test]
    fn test_offsets_are_unit() {
        for dir in ALL_DIRECTIONS {
            let o = dir.offset();
            assert!(o.abs().max_element() == 1, "{dir:?} leaves the 3x3x3 block");
        }
    }

    #[test]
    fn test_kind_ordering() {
        let kinds: Vec<DirectionKind> = ALL_DIRECTIONS.iter().map(|d| d.kind()).collect();
        assert!(kinds[..6].iter().all(|k| *k == DirectionKind::Face));
        assert!(kinds[6..18].iter().all(|k| *k == DirectionKind::Edge));
        assert!(kinds[18..].iter().all(|k| *k == DirectionKind::Corner));
    }
}
