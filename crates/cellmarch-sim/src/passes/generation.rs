use cellmarch_core::GenerationRules;
use rayon::prelude::*;

use crate::grid::Grid;

/// Births and deaths produced by one update sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transitions {
    pub births: usize,
    pub deaths: usize,
}

impl Transitions {
    fn merge(self, other: Self) -> Self {
        Self {
            births: self.births + other.births,
            deaths: self.deaths + other.deaths,
        }
    }
}

fn update_slab(alive: &[bool], counts: &[u8], rules: &GenerationRules, out: &mut [bool]) -> Transitions {
    let mut t = Transitions::default();
    for ((next, &was), &n) in out.iter_mut().zip(alive).zip(counts) {
        let now = rules.next_state(was, n);
        match (was, now) {
            (false, true) => t.births += 1,
            (true, false) => t.deaths += 1,
            _ => {}
        }
        *next = now;
    }
    t
}

/// Apply the birth/death rules to every node, reading only the current
/// liveness and counts, then swap the scratch buffer in.
pub fn run(grid: &mut Grid, rules: &GenerationRules, pool: Option<&rayon::ThreadPool>) -> Transitions {
    let dims = grid.dims();
    let slab = (dims.x * dims.y) as usize;
    let alive = &grid.alive;
    let counts = &grid.counts;
    let next = &mut grid.next;

    let transitions = match pool {
        Some(pool) => pool.install(|| {
            next.par_chunks_mut(slab)
                .enumerate()
                .map(|(z, out)| {
                    let range = z * slab..z * slab + out.len();
                    update_slab(&alive[range.clone()], &counts[range], rules, out)
                })
                .reduce(Transitions::default, Transitions::merge)
        }),
        None => update_slab(alive, counts, rules, next),
    };

    std::mem::swap(&mut grid.alive, &mut grid.next);
    transitions
}
