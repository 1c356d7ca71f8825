/// Multi-generation scenario tests over hand-placed patterns.
///
/// Unit tests for the individual passes live next to them; these drive the
/// full `GameOfLife` pipeline and check pattern-level outcomes.

#[cfg(test)]
mod tests {
    use crate::pipeline::GameOfLife;
    use cellmarch_core::{Neighbourhood, SimSettings};
    use glam::IVec3;

    fn empty(dims: (u32, u32, u32), neighbourhood: Neighbourhood) -> GameOfLife {
        let settings = SimSettings {
            dimensions: dims,
            neighbourhood,
            initial_density: 0.0,
            ..SimSettings::default()
        };
        GameOfLife::new(&settings, None).expect("valid settings")
    }

    fn place(gol: &mut GameOfLife, cells: &[IVec3]) {
        for &c in cells {
            assert!(gol.grid_mut().set_alive(c, true), "{c} off grid");
        }
    }

    #[test]
    fn test_cube_is_still_life_von_neumann() {
        let mut gol = empty((6, 6, 6), Neighbourhood::VonNeumann);
        let cube: Vec<IVec3> = (0..8)
            .map(|i| IVec3::new(2 + (i & 1), 2 + ((i >> 1) & 1), 2 + ((i >> 2) & 1)))
            .collect();
        place(&mut gol, &cube);
        let before = gol.snapshot().alive;
        for _ in 0..10 {
            let stats = gol.step();
            assert_eq!(stats.births, 0);
            assert_eq!(stats.deaths, 0);
        }
        assert_eq!(gol.snapshot().alive, before);
    }

    #[test]
    fn test_flat_square_is_still_life() {
        let mut gol = empty((5, 5, 3), Neighbourhood::VonNeumann);
        place(
            &mut gol,
            &[
                IVec3::new(1, 1, 1),
                IVec3::new(2, 1, 1),
                IVec3::new(1, 2, 1),
                IVec3::new(2, 2, 1),
            ],
        );
        for _ in 0..5 {
            gol.step();
        }
        assert_eq!(gol.grid().alive_count(), 4);
    }

    #[test]
    fn test_lone_cell_dies() {
        for nb in [Neighbourhood::VonNeumann, Neighbourhood::Moore] {
            let mut gol = empty((3, 3, 3), nb);
            place(&mut gol, &[IVec3::ONE]);
            let stats = gol.step();
            assert_eq!(stats.alive, 0, "{nb:?}");
            assert_eq!(stats.deaths, 1, "{nb:?}");
        }
    }

    #[test]
    fn test_row_decays_to_nothing() {
        let mut gol = empty((5, 3, 3), Neighbourhood::VonNeumann);
        place(
            &mut gol,
            &[IVec3::new(1, 1, 1), IVec3::new(2, 1, 1), IVec3::new(3, 1, 1)],
        );
        assert_eq!(gol.step().alive, 1);
        assert_eq!(gol.step().alive, 0);
        assert_eq!(gol.step().alive, 0);
        assert_eq!(gol.generation(), 3);
    }

    #[test]
    fn test_moore_corner_birth() {
        // Three cells around a corner of the 3x3x3 block: under Moore the
        // shared neighbour at the origin is born, under Von Neumann it is not.
        let cells = [IVec3::new(1, 0, 0), IVec3::new(0, 1, 0), IVec3::new(1, 1, 1)];
        let mut moore = empty((3, 3, 3), Neighbourhood::Moore);
        place(&mut moore, &cells);
        moore.step();
        assert!(moore.grid().is_alive(IVec3::ZERO));

        let mut vn = empty((3, 3, 3), Neighbourhood::VonNeumann);
        place(&mut vn, &cells);
        vn.step();
        assert!(!vn.grid().is_alive(IVec3::ZERO));
    }
}
