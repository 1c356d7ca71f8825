pub mod events;
pub mod grid;
pub mod passes;
pub mod pipeline;
pub mod rng;

#[cfg(test)]
mod test_harness;

pub use events::{Event, ListenerHandle};
pub use grid::{Grid, GridSnapshot, GridTraversal};
pub use pipeline::{GameOfLife, GenerationStats};
pub use rng::{seeded_rng, SimRng};
